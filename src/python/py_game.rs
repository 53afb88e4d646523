//! Game bindings for Python.

use numpy::{PyArray1, PyArray2, PyArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{GameConfig, GameRng, PlayerId};
use crate::playout::{PlayoutSummary, RandomPlayout};
use crate::rules::{Game, GameResult};

/// Python wrapper for Game.
///
/// Players are numbered from 1. Coordinates are `(x, y)` with `(0, 0)` in
/// the bottom-left corner.
#[pyclass(name = "Game")]
pub struct PyGame {
    game: Game,
}

#[pymethods]
impl PyGame {
    /// Create a new game.
    ///
    /// Raises `ValueError` if any argument is zero or the board is too large.
    #[new]
    #[pyo3(signature = (width = 10, height = 10, players = 2, areas = 4))]
    fn new(width: u32, height: u32, players: u32, areas: u32) -> PyResult<Self> {
        let game = Game::new(GameConfig::new(width, height, players, areas))
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(Self { game })
    }

    /// Claim an empty cell. Returns whether the move was legal.
    #[pyo3(name = "move")]
    fn place(&mut self, player: u32, x: u32, y: u32) -> bool {
        self.game.place(PlayerId::new(player), x, y)
    }

    /// Take an opponent's cell, once per game. Returns whether the move was legal.
    fn golden_move(&mut self, player: u32, x: u32, y: u32) -> bool {
        self.game.golden_move(PlayerId::new(player), x, y)
    }

    /// Cells owned by a player.
    fn busy_fields(&self, player: u32) -> u64 {
        self.game.busy_fields(PlayerId::new(player))
    }

    /// Cells a player could claim with an ordinary move.
    fn free_fields(&self, player: u32) -> u64 {
        self.game.free_fields(PlayerId::new(player))
    }

    /// Whether a player has any legal golden move.
    fn golden_possible(&mut self, player: u32) -> bool {
        self.game.golden_possible(PlayerId::new(player))
    }

    /// Number of areas a player owns.
    fn area_count(&self, player: u32) -> u32 {
        self.game.area_count(PlayerId::new(player))
    }

    /// Next player after `player` who can still act, or None.
    fn next_player(&mut self, player: u32) -> Option<u32> {
        self.game.next_player(PlayerId::new(player)).map(PlayerId::raw)
    }

    /// Whether nobody can act any more.
    fn is_finished(&mut self) -> bool {
        self.game.is_finished()
    }

    /// Players with the most cells once the game is finished, else None.
    fn winners(&mut self) -> Option<Vec<u32>> {
        self.game.result().map(|result| match result {
            GameResult::Winner(p) => vec![p.raw()],
            GameResult::Winners(ps) => ps.into_iter().map(PlayerId::raw).collect(),
        })
    }

    /// Board ownership as text, top row first.
    fn board(&self) -> String {
        self.game.board_text()
    }

    /// Owner of every cell as a `(height, width)` array, 0 for unclaimed.
    ///
    /// Row `y` of the array is board row `y`.
    fn owners<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<u32>>> {
        let grid = self.game.grid();
        let owners: Vec<u32> = grid
            .coords()
            .map(|c| grid.owner(c).map_or(0, PlayerId::raw))
            .collect();

        PyArray1::from_vec_bound(py, owners)
            .reshape([grid.height() as usize, grid.width() as usize])
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Finish the game with random legal moves.
    #[pyo3(signature = (seed = 42, max_steps = 0, golden_chance = 0.1))]
    fn play_random(&mut self, seed: u64, max_steps: u32, golden_chance: f64) -> PyPlayoutSummary {
        let mut rng = GameRng::new(seed);
        let summary = RandomPlayout::new(max_steps)
            .with_golden_chance(golden_chance)
            .run(&mut self.game, &mut rng);
        PyPlayoutSummary(summary)
    }

    /// Copy the game.
    fn copy(&self) -> Self {
        Self {
            game: self.game.clone(),
        }
    }

    #[getter]
    fn width(&self) -> u32 {
        self.game.width()
    }

    #[getter]
    fn height(&self) -> u32 {
        self.game.height()
    }

    #[getter]
    fn players(&self) -> u32 {
        self.game.player_count()
    }

    #[getter]
    fn areas(&self) -> u32 {
        self.game.max_areas()
    }

    fn __str__(&self) -> String {
        self.game.board_text()
    }

    fn __repr__(&self) -> String {
        format!(
            "Game(width={}, height={}, players={}, areas={}, moves={})",
            self.game.width(),
            self.game.height(),
            self.game.player_count(),
            self.game.max_areas(),
            self.game.history().len()
        )
    }
}

/// Python wrapper for PlayoutSummary.
#[pyclass(name = "PlayoutSummary")]
#[derive(Clone, Debug)]
pub struct PyPlayoutSummary(pub PlayoutSummary);

#[pymethods]
impl PyPlayoutSummary {
    #[getter]
    fn moves(&self) -> u32 {
        self.0.moves
    }

    #[getter]
    fn golden_moves(&self) -> u32 {
        self.0.golden_moves
    }

    #[getter]
    fn finished(&self) -> bool {
        self.0.finished
    }

    fn __repr__(&self) -> String {
        format!(
            "PlayoutSummary(moves={}, golden_moves={}, finished={})",
            self.0.moves, self.0.golden_moves, self.0.finished
        )
    }
}
