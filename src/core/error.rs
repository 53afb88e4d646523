//! Engine error type.
//!
//! Only construction and internal resource failures are errors. An illegal
//! move is an ordinary outcome and is reported as `false` by the mutating call.

use thiserror::Error;

/// Errors raised while building or auditing a game.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GammaError {
    /// Board width or height is zero.
    #[error("board dimensions must be positive (got {width}x{height})")]
    ZeroDimension { width: u32, height: u32 },

    /// Player count is zero.
    #[error("a game needs at least one player")]
    ZeroPlayers,

    /// Area cap is zero.
    #[error("the area cap must be positive")]
    ZeroAreas,

    /// The board has more cells than can be addressed.
    #[error("board {width}x{height} is too large")]
    BoardTooLarge { width: u32, height: u32 },

    /// Storage for the board or player tables could not be reserved.
    #[error("out of memory while allocating {what}")]
    OutOfMemory { what: &'static str },

    /// Incremental bookkeeping disagrees with a full recomputation.
    #[error("inconsistent game state: {0}")]
    Inconsistent(String),
}
