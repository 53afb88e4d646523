//! Move representation.
//!
//! A move is either an ordinary placement on an empty cell or a golden move
//! taking over an opponent's cell. Successful moves are kept as
//! `MoveRecord`s in the game history.

use serde::{Deserialize, Serialize};

use super::config::Coord;
use super::player::PlayerId;

/// A single move on the board.
///
/// ## Example
///
/// ```
/// use gamma::core::{Coord, Move};
///
/// let place = Move::Place(Coord::new(1, 2));
/// assert!(!place.is_golden());
/// assert_eq!(place.target(), Coord::new(1, 2));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Claim an empty cell.
    Place(Coord),
    /// Take an opponent's cell (once per game).
    Golden(Coord),
}

impl Move {
    /// The cell this move targets.
    #[must_use]
    pub const fn target(self) -> Coord {
        match self {
            Move::Place(c) | Move::Golden(c) => c,
        }
    }

    /// Check if this is a golden move.
    #[must_use]
    pub const fn is_golden(self) -> bool {
        matches!(self, Move::Golden(_))
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Place(c) => write!(f, "place {}", c),
            Move::Golden(c) => write!(f, "golden {}", c),
        }
    }
}

/// A move that was applied, with the player who made it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// The player who moved.
    pub player: PlayerId,

    /// The move taken.
    pub mv: Move,
}

impl MoveRecord {
    /// Create a new move record.
    #[must_use]
    pub const fn new(player: PlayerId, mv: Move) -> Self {
        Self { player, mv }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_target() {
        assert_eq!(Move::Place(Coord::new(0, 1)).target(), Coord::new(0, 1));
        assert_eq!(Move::Golden(Coord::new(4, 2)).target(), Coord::new(4, 2));
        assert!(Move::Golden(Coord::new(0, 0)).is_golden());
    }

    #[test]
    fn test_move_display() {
        assert_eq!(Move::Place(Coord::new(1, 2)).to_string(), "place (1, 2)");
        assert_eq!(Move::Golden(Coord::new(3, 0)).to_string(), "golden (3, 0)");
    }

    #[test]
    fn test_move_record_serialization() {
        let record = MoveRecord::new(PlayerId::new(2), Move::Golden(Coord::new(5, 5)));
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: MoveRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }
}
