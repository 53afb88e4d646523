//! The board: cell storage, connectivity oracle and text rendering.
//!
//! - `grid`: arena of cells addressed by `Coord`
//! - `oracle`: breadth-first connectivity queries used by the move engine
//! - `render`: ownership text dump

pub mod grid;
pub mod oracle;
pub mod render;

pub use grid::{Cell, Grid, Neighbors};
pub use oracle::{
    connected, neighbor_area_count, neighbor_areas, relabel, split_components,
    would_split_if_removed, NeighborAreas,
};
pub use render::board_text;
