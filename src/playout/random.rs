//! Uniformly random playout policy.

use tracing::debug;

use crate::core::{GameRng, Move, PlayerId};
use crate::rules::{Game, GameResult};

/// Outcome of one playout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayoutSummary {
    /// Moves applied, golden moves included.
    pub moves: u32,
    /// Golden moves applied.
    pub golden_moves: u32,
    /// Whether the game ran to completion within the step limit.
    pub finished: bool,
    /// Final result if finished.
    pub result: Option<GameResult>,
}

/// Plays random legal moves in turn order.
///
/// On each turn the player picks a golden move with probability
/// `golden_chance` when one is available (or always, when nothing else is),
/// and otherwise a uniformly random placement.
///
/// ## Example
///
/// ```
/// use gamma::core::GameRng;
/// use gamma::playout::RandomPlayout;
/// use gamma::rules::Game;
///
/// let mut game = Game::with_dimensions(4, 4, 2, 3).unwrap();
/// let mut rng = GameRng::new(7);
///
/// let summary = RandomPlayout::default().run(&mut game, &mut rng);
/// assert!(summary.finished);
/// assert_eq!(game.unclaimed_fields(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct RandomPlayout {
    /// Maximum number of moves; 0 means unlimited.
    pub max_steps: u32,
    /// Probability of preferring a golden move when one is legal.
    pub golden_chance: f64,
}

impl Default for RandomPlayout {
    fn default() -> Self {
        Self {
            max_steps: 0,
            golden_chance: 0.1,
        }
    }
}

impl RandomPlayout {
    /// Create a playout with the given step limit (0 = unlimited).
    #[must_use]
    pub fn new(max_steps: u32) -> Self {
        Self {
            max_steps,
            ..Self::default()
        }
    }

    /// Set the golden move preference.
    #[must_use]
    pub fn with_golden_chance(mut self, chance: f64) -> Self {
        self.golden_chance = chance.clamp(0.0, 1.0);
        self
    }

    /// Play from the current position until nobody can move or the step
    /// limit is reached.
    pub fn run(&self, game: &mut Game, rng: &mut GameRng) -> PlayoutSummary {
        let mut moves = 0;
        let mut golden_moves = 0;
        // Start the cycle so that player 1 is asked first.
        let mut last = PlayerId::new(game.player_count());

        loop {
            if self.max_steps > 0 && moves >= self.max_steps {
                break;
            }
            let Some(player) = game.next_player(last) else {
                break;
            };
            last = player;

            let Some(mv) = self.pick(game, player, rng) else {
                break;
            };
            if !game.apply(player, mv) {
                break;
            }
            moves += 1;
            if mv.is_golden() {
                golden_moves += 1;
            }
        }

        let result = game.result();
        debug!(moves, golden_moves, finished = result.is_some(), "playout done");

        PlayoutSummary {
            moves,
            golden_moves,
            finished: result.is_some(),
            result,
        }
    }

    fn pick(&self, game: &mut Game, player: PlayerId, rng: &mut GameRng) -> Option<Move> {
        let (golden, place): (Vec<Move>, Vec<Move>) = game
            .legal_moves(player)
            .into_iter()
            .partition(|mv| mv.is_golden());

        let go_golden = !golden.is_empty() && (place.is_empty() || rng.gen_bool(self.golden_chance));
        let pool = if go_golden { &golden } else { &place };
        rng.choose(pool).copied()
    }
}
