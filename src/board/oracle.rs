//! Connectivity queries over one player's cells.
//!
//! All traversals are breadth-first over 4-connected cells and use the
//! grid's per-cell `visited` marker for de-duplication. Every cell a
//! traversal marks is pushed onto its frontier list, and the same list drives
//! the reset pass, so markers are always clear when a function returns.
//!
//! Traversals are not reentrant: one must finish before the next begins.

use smallvec::SmallVec;

use super::grid::{Grid, Neighbors};
use crate::core::{AreaId, Coord, PlayerId};

/// Distinct area ids among up to four neighbors.
pub type NeighborAreas = SmallVec<[AreaId; 4]>;

fn clear_marks(grid: &mut Grid, marked: &[Coord]) {
    for &c in marked {
        grid.get_mut(c).visited = false;
    }
}

fn in_region(grid: &Grid, owner: PlayerId, area: AreaId, c: Coord) -> bool {
    let cell = grid.get(c);
    !cell.visited && cell.is_owned_by(owner) && cell.area == area
}

/// Distinct areas of `owner` bordering `c`, in neighbor order (up, left,
/// right, down) with duplicates dropped.
#[must_use]
pub fn neighbor_areas(grid: &Grid, owner: PlayerId, c: Coord) -> NeighborAreas {
    let mut areas = NeighborAreas::new();
    for n in grid.neighbors(c) {
        let cell = grid.get(n);
        if cell.is_owned_by(owner) && !areas.contains(&cell.area) {
            areas.push(cell.area);
        }
    }
    areas
}

/// Number of distinct areas of `owner` bordering `c`.
#[must_use]
pub fn neighbor_area_count(grid: &Grid, owner: PlayerId, c: Coord) -> u32 {
    neighbor_areas(grid, owner, c).len() as u32
}

/// Check whether `to` is reachable from `from` through cells owned by
/// `owner` that carry `area`.
pub fn connected(grid: &mut Grid, owner: PlayerId, area: AreaId, from: Coord, to: Coord) -> bool {
    if from == to {
        return true;
    }

    let mut marked = vec![from];
    grid.get_mut(from).visited = true;

    let mut head = 0;
    let mut found = false;
    'search: while head < marked.len() {
        let current = marked[head];
        head += 1;

        for n in grid.neighbors(current) {
            if !in_region(grid, owner, area, n) {
                continue;
            }
            if n == to {
                found = true;
                break 'search;
            }
            grid.get_mut(n).visited = true;
            marked.push(n);
        }
    }

    clear_marks(grid, &marked);
    found
}

/// One representative neighbor per component that area `area` of `owner`
/// would fall into if `c` were taken away from it.
///
/// Only neighbors of `c` that belong to the area are considered. `c` is
/// fenced off with its marker while the pairwise searches run, so no path
/// may pass through it. At most six searches are needed for four neighbors.
pub fn split_components(grid: &mut Grid, owner: PlayerId, area: AreaId, c: Coord) -> Neighbors {
    let candidates: Neighbors = grid
        .neighbors(c)
        .into_iter()
        .filter(|&n| {
            let cell = grid.get(n);
            cell.is_owned_by(owner) && cell.area == area
        })
        .collect();

    if candidates.len() <= 1 {
        return candidates;
    }

    grid.get_mut(c).visited = true;

    let mut assigned = [false; 4];
    let mut representatives = Neighbors::new();
    for i in 0..candidates.len() {
        if assigned[i] {
            continue;
        }
        assigned[i] = true;
        representatives.push(candidates[i]);

        for j in (i + 1)..candidates.len() {
            if !assigned[j] && connected(grid, owner, area, candidates[i], candidates[j]) {
                assigned[j] = true;
            }
        }
    }

    grid.get_mut(c).visited = false;
    representatives
}

/// Number of components area `area` of `owner` would consist of after
/// removing `c`. Zero when `c` has no neighbor in that area.
pub fn would_split_if_removed(grid: &mut Grid, owner: PlayerId, area: AreaId, c: Coord) -> u32 {
    split_components(grid, owner, area, c).len() as u32
}

/// Flood-fill the cells of `owner` tagged `from` that are reachable from
/// `start`, retagging them `to`. Returns the number of cells retagged.
pub fn relabel(grid: &mut Grid, owner: PlayerId, from: AreaId, start: Coord, to: AreaId) -> u64 {
    if !in_region(grid, owner, from, start) {
        return 0;
    }

    let mut marked = vec![start];
    {
        let cell = grid.get_mut(start);
        cell.visited = true;
        cell.area = to;
    }

    let mut head = 0;
    while head < marked.len() {
        let current = marked[head];
        head += 1;

        for n in grid.neighbors(current) {
            if !in_region(grid, owner, from, n) {
                continue;
            }
            let cell = grid.get_mut(n);
            cell.visited = true;
            cell.area = to;
            marked.push(n);
        }
    }

    clear_marks(grid, &marked);
    marked.len() as u64
}
