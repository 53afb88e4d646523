//! # gamma
//!
//! Rules engine for gamma, a territory game on a rectangular board.
//!
//! Players take turns claiming empty cells. Each player may own at most
//! `max_areas` areas, an area being a maximal group of the player's cells
//! connected through their four sides. Once per game each player may make a
//! golden move and take a cell from an opponent, provided neither side ends
//! up over the cap.
//!
//! ## Design Principles
//!
//! 1. **Incremental**: busy counts, area counts and area sizes are kept up to
//!    date move by move. Only splitting an area costs a search, and that
//!    search is bounded by the four neighbors of the removed cell.
//!
//! 2. **N-Player**: any number of players, numbered from 1.
//!
//! 3. **All or nothing**: a rejected move leaves the game exactly as it was.
//!
//! ## Modules
//!
//! - `core`: Player ids, coordinates, configuration, moves, errors, RNG
//! - `board`: The cell grid, connectivity searches and text rendering
//! - `ledger`: Per-player area ids, sizes and counters
//! - `rules`: The `Game` move engine and its consistency audit
//! - `playout`: Random playouts for tests and benchmarks
//! - `python`: PyO3 bindings (feature `python`)

pub mod core;
pub mod board;
pub mod ledger;
pub mod rules;
pub mod playout;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    AreaId, Coord, GameConfig, GameRng, GammaError, Move, MoveRecord, PlayerId, PlayerMap,
};

pub use crate::board::{board_text, Cell, Grid};

pub use crate::ledger::{AreaLedger, PlayerAreas};

pub use crate::rules::{Game, GameResult};

pub use crate::playout::{PlayoutSummary, RandomPlayout};
