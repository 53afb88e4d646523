//! Area ledger: which areas each player owns and how large they are.
//!
//! The board stores an area id per cell; the ledger stores, per player, the
//! size of every live id plus the running counters the move engine answers
//! queries from.

pub mod area;
pub mod player;

pub use area::AreaLedger;
pub use player::PlayerAreas;
