//! The move engine: ordinary moves, golden moves and turn availability.
//!
//! `Game` is the single entry point for drivers. It validates every move,
//! keeps the area ledger in step with the board and answers the queries a
//! batch or interactive front end needs.

pub mod engine;
mod audit;

pub use engine::{Game, GameResult};
