//! Cell storage for the board.
//!
//! The grid is a flat arena of `Cell`s indexed by `y * width + x`. It does not
//! validate coordinates on the hot accessors; the move engine checks ranges
//! with `contains` before touching a cell.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{AreaId, Coord, GammaError, PlayerId};

/// Up to four orthogonal neighbors of a cell.
pub type Neighbors = SmallVec<[Coord; 4]>;

/// State of a single board cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Owning player, `None` while unclaimed.
    pub owner: Option<PlayerId>,

    /// Area of `owner` this cell belongs to. `AreaId::NONE` when unclaimed.
    pub area: AreaId,

    /// Traversal marker. Always `false` between oracle calls.
    #[serde(skip)]
    pub(crate) visited: bool,
}

impl Cell {
    /// Check whether this cell belongs to `player`.
    #[must_use]
    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }

    /// Check whether this cell is unclaimed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owner.is_none()
    }
}

/// Rectangular board of cells with fixed dimensions.
#[derive(Clone, Debug)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocate an empty `width x height` grid.
    ///
    /// Fails with `OutOfMemory` instead of aborting when the cell storage
    /// cannot be reserved.
    pub fn new(width: u32, height: u32) -> Result<Self, GammaError> {
        let len = usize::try_from(u64::from(width) * u64::from(height))
            .map_err(|_| GammaError::BoardTooLarge { width, height })?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| GammaError::OutOfMemory { what: "board" })?;
        cells.resize(len, Cell::default());

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Board width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Board height.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check whether `(x, y)` lies on the board.
    #[must_use]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    fn idx(&self, c: Coord) -> usize {
        c.y as usize * self.width as usize + c.x as usize
    }

    /// Get the cell at `c`.
    #[inline]
    #[must_use]
    pub fn get(&self, c: Coord) -> &Cell {
        &self.cells[self.idx(c)]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, c: Coord) -> &mut Cell {
        let idx = self.idx(c);
        &mut self.cells[idx]
    }

    /// Owner of the cell at `c`.
    #[inline]
    #[must_use]
    pub fn owner(&self, c: Coord) -> Option<PlayerId> {
        self.get(c).owner
    }

    /// Area id of the cell at `c`.
    #[inline]
    #[must_use]
    pub fn area(&self, c: Coord) -> AreaId {
        self.get(c).area
    }

    pub(crate) fn set_owner(&mut self, c: Coord, owner: Option<PlayerId>) {
        self.get_mut(c).owner = owner;
    }

    pub(crate) fn set_area(&mut self, c: Coord, area: AreaId) {
        self.get_mut(c).area = area;
    }

    /// Orthogonal neighbors of `c` that lie on the board.
    ///
    /// Fixed order: up, left, right, down. Area merges rely on this order to
    /// break ties between equally sized areas.
    #[must_use]
    pub fn neighbors(&self, c: Coord) -> Neighbors {
        let mut out = Neighbors::new();
        if c.y + 1 < self.height {
            out.push(Coord::new(c.x, c.y + 1));
        }
        if c.x > 0 {
            out.push(Coord::new(c.x - 1, c.y));
        }
        if c.x + 1 < self.width {
            out.push(Coord::new(c.x + 1, c.y));
        }
        if c.y > 0 {
            out.push(Coord::new(c.x, c.y - 1));
        }
        out
    }

    /// Number of neighbors of `c` owned by `player`.
    #[must_use]
    pub fn owned_neighbor_count(&self, player: PlayerId, c: Coord) -> usize {
        self.neighbors(c)
            .into_iter()
            .filter(|&n| self.get(n).is_owned_by(player))
            .count()
    }

    /// Iterate over every coordinate, row by row from `y = 0`.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Coord::new(x, y)))
    }

    /// Check that no traversal marker is left set.
    #[must_use]
    pub fn markers_clear(&self) -> bool {
        self.cells.iter().all(|cell| !cell.visited)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(3, 2).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert!(grid.coords().all(|c| grid.get(c).is_empty()));
        assert_eq!(grid.coords().count(), 6);
    }

    #[test]
    fn test_contains() {
        let grid = Grid::new(3, 2).unwrap();
        assert!(grid.contains(2, 1));
        assert!(!grid.contains(3, 0));
        assert!(!grid.contains(0, 2));
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = Grid::new(4, 4).unwrap();
        let c = Coord::new(1, 3);
        grid.set_owner(c, Some(PlayerId::new(2)));
        grid.set_area(c, AreaId::new(7));

        assert_eq!(grid.owner(c), Some(PlayerId::new(2)));
        assert_eq!(grid.area(c), AreaId::new(7));
        assert!(grid.get(c).is_owned_by(PlayerId::new(2)));
        assert!(grid.get(Coord::new(3, 1)).is_empty());
    }

    #[test]
    fn test_neighbors_order_and_edges() {
        let grid = Grid::new(3, 3).unwrap();

        let center = grid.neighbors(Coord::new(1, 1));
        assert_eq!(
            center.as_slice(),
            &[Coord::new(1, 2), Coord::new(0, 1), Coord::new(2, 1), Coord::new(1, 0)]
        );

        let corner = grid.neighbors(Coord::new(0, 0));
        assert_eq!(corner.as_slice(), &[Coord::new(0, 1), Coord::new(1, 0)]);

        let single = Grid::new(1, 1).unwrap();
        assert!(single.neighbors(Coord::new(0, 0)).is_empty());
    }

    #[test]
    fn test_owned_neighbor_count() {
        let mut grid = Grid::new(3, 3).unwrap();
        let p = PlayerId::new(1);
        grid.set_owner(Coord::new(0, 1), Some(p));
        grid.set_owner(Coord::new(1, 2), Some(p));
        grid.set_owner(Coord::new(2, 1), Some(PlayerId::new(2)));

        assert_eq!(grid.owned_neighbor_count(p, Coord::new(1, 1)), 2);
        assert_eq!(grid.owned_neighbor_count(PlayerId::new(2), Coord::new(1, 1)), 1);
    }

    #[test]
    fn test_unallocatable_board_is_an_error() {
        assert!(matches!(
            Grid::new(u32::MAX, u32::MAX),
            Err(GammaError::BoardTooLarge { .. } | GammaError::OutOfMemory { .. })
        ));
    }
}
