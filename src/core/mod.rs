//! Core engine types: players, coordinates, configuration, moves, errors, RNG.
//!
//! These are the building blocks shared by the board, the area ledger and
//! the move engine.

pub mod player;
pub mod config;
pub mod action;
pub mod error;
pub mod rng;

pub use player::{PlayerId, PlayerMap};
pub use config::{AreaId, Coord, GameConfig};
pub use action::{Move, MoveRecord};
pub use error::GammaError;
pub use rng::GameRng;
