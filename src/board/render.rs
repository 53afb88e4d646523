//! Text rendering of board ownership.
//!
//! Rows are printed top row (highest `y`) first. Each cell is its owner's
//! number, `.` when unclaimed, and owners from 10 upwards are wrapped in
//! brackets so multi-digit numbers parse unambiguously. Cells within a row
//! are separated by a single space and every row ends with a newline.

use std::fmt::Write;

use super::grid::Grid;
use crate::core::{Coord, PlayerId};

/// Render a single cell owner.
fn write_owner(out: &mut String, owner: Option<PlayerId>) {
    match owner {
        None => out.push('.'),
        Some(p) if p.raw() < 10 => {
            let _ = write!(out, "{}", p.raw());
        }
        Some(p) => {
            let _ = write!(out, "[{}]", p.raw());
        }
    }
}

/// Render the whole board.
#[must_use]
pub fn board_text(grid: &Grid) -> String {
    let mut out = String::with_capacity(grid.height() as usize * (grid.width() as usize * 2 + 1));

    for y in (0..grid.height()).rev() {
        for x in 0..grid.width() {
            if x > 0 {
                out.push(' ');
            }
            write_owner(&mut out, grid.owner(Coord::new(x, y)));
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board() {
        let grid = Grid::new(3, 2).unwrap();
        assert_eq!(board_text(&grid), ". . .\n. . .\n");
    }

    #[test]
    fn test_top_row_printed_first() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set_owner(Coord::new(0, 1), Some(PlayerId::new(1)));
        grid.set_owner(Coord::new(1, 0), Some(PlayerId::new(2)));
        assert_eq!(board_text(&grid), "1 .\n. 2\n");
    }

    #[test]
    fn test_multi_digit_owner_is_bracketed() {
        let mut grid = Grid::new(3, 1).unwrap();
        grid.set_owner(Coord::new(0, 0), Some(PlayerId::new(12)));
        grid.set_owner(Coord::new(2, 0), Some(PlayerId::new(9)));
        assert_eq!(board_text(&grid), "[12] . 9\n");
    }
}
