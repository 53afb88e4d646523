//! Python bindings for the gamma engine.
//!
//! # Quick Start
//!
//! ```python
//! import gamma
//!
//! game = gamma.Game(width=5, height=4, players=2, areas=3)
//! assert game.move(1, 0, 0)
//! assert game.golden_move(2, 0, 0)
//!
//! print(game.board())
//! owners = game.owners()  # numpy uint32 array, shape (height, width)
//! ```

use pyo3::prelude::*;

mod py_game;

pub use py_game::*;

/// gamma: territory game engine with area caps and golden moves.
#[pymodule]
fn gamma(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyGame>()?;
    m.add_class::<PyPlayoutSummary>()?;

    Ok(())
}
