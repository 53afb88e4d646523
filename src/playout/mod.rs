//! Random playouts.
//!
//! Drives a [`Game`](crate::rules::Game) through its turn order with
//! uniformly random legal moves. Used to stress the bookkeeping in tests and
//! to benchmark the engine; it is not an opponent.

mod random;

pub use random::{PlayoutSummary, RandomPlayout};
