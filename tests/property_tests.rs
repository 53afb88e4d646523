//! Property tests: arbitrary move sequences never corrupt the bookkeeping.
//!
//! After every attempted move, successful or not, the incremental counters
//! must agree with a full recount of the board.

use gamma::core::{GameRng, PlayerId};
use gamma::playout::RandomPlayout;
use gamma::rules::Game;
use proptest::prelude::*;

#[derive(Clone, Debug)]
struct Attempt {
    player: u32,
    golden: bool,
    x: u32,
    y: u32,
}

fn attempt() -> impl Strategy<Value = Attempt> {
    // Coordinates and players run slightly past the board to hit rejections.
    (0u32..6, prop::bool::weighted(0.2), 0u32..7, 0u32..7)
        .prop_map(|(player, golden, x, y)| Attempt { player, golden, x, y })
}

fn setup() -> impl Strategy<Value = (u32, u32, u32, u32)> {
    (1u32..7, 1u32..7, 1u32..5, 1u32..4)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_audit_holds_after_every_attempt(
        (width, height, players, areas) in setup(),
        attempts in prop::collection::vec(attempt(), 0..120),
    ) {
        let mut game = Game::with_dimensions(width, height, players, areas).unwrap();

        for (i, a) in attempts.into_iter().enumerate() {
            let player = PlayerId::new(a.player);
            let before = game.board_text();
            let moves_before = game.history().len();

            let ok = if a.golden {
                game.golden_move(player, a.x, a.y)
            } else {
                game.place(player, a.x, a.y)
            };

            game.audit().map_err(|e| TestCaseError::fail(format!("attempt {}: {}", i, e)))?;
            for p in PlayerId::all(players) {
                prop_assert!(game.area_count(p) <= areas);
            }
            if ok {
                prop_assert_eq!(game.history().len(), moves_before + 1);
            } else {
                prop_assert_eq!(game.board_text(), before);
                prop_assert_eq!(game.history().len(), moves_before);
            }
        }
    }

    #[test]
    fn test_queries_agree_with_legal_moves(
        (width, height, players, areas) in setup(),
        attempts in prop::collection::vec(attempt(), 0..60),
    ) {
        let mut game = Game::with_dimensions(width, height, players, areas).unwrap();
        for a in attempts {
            let player = PlayerId::new(a.player);
            if a.golden {
                game.golden_move(player, a.x, a.y);
            } else {
                game.place(player, a.x, a.y);
            }
        }

        for p in PlayerId::all(players) {
            let moves = game.legal_moves(p);
            let placements = moves.iter().filter(|m| !m.is_golden()).count() as u64;
            let golden = moves.iter().any(|m| m.is_golden());

            prop_assert_eq!(placements, game.free_fields(p));
            prop_assert_eq!(golden, game.golden_possible(p));
            prop_assert_eq!(!moves.is_empty(), game.can_act(p));
        }
    }

    #[test]
    fn test_second_golden_move_always_fails(
        (width, height, players, areas) in setup(),
        seed in any::<u64>(),
        x in 0u32..7,
        y in 0u32..7,
    ) {
        let mut game = Game::with_dimensions(width, height, players, areas).unwrap();
        let mut rng = GameRng::new(seed);
        RandomPlayout::default().with_golden_chance(1.0).run(&mut game, &mut rng);

        for p in PlayerId::all(players) {
            if game.golden_used(p) {
                prop_assert!(!game.golden_move(p, x, y));
                prop_assert!(!game.golden_possible(p));
            }
        }
    }
}

// Deterministic regression run, reproducible by seed.
#[test]
fn test_seeded_random_games_stay_consistent() {
    for seed in 0..40u64 {
        let mut rng = GameRng::new(seed);
        let width = 2 + rng.gen_range_usize(0..8) as u32;
        let height = 2 + rng.gen_range_usize(0..8) as u32;
        let players = 1 + rng.gen_range_usize(0..4) as u32;
        let areas = 1 + rng.gen_range_usize(0..4) as u32;
        let mut game = Game::with_dimensions(width, height, players, areas).unwrap();

        let mut last = PlayerId::new(players);
        while let Some(player) = game.next_player(last) {
            last = player;
            let moves = game.legal_moves(player);
            let mv = *rng.choose(&moves).expect("next_player promised a move");
            assert!(game.apply(player, mv), "seed {}: {} rejected", seed, mv);
            if let Err(e) = game.audit() {
                panic!("seed {} after {}: {}", seed, mv, e);
            }
        }

        assert!(game.is_finished());
        assert_eq!(game.unclaimed_fields(), 0, "seed {}", seed);
        assert!(game.result().is_some());
    }
}

#[test]
fn test_playout_summary_matches_history() {
    let mut game = Game::with_dimensions(8, 8, 4, 3).unwrap();
    let mut rng = GameRng::new(2024);

    let summary = RandomPlayout::default().with_golden_chance(0.3).run(&mut game, &mut rng);

    assert!(summary.finished);
    assert_eq!(summary.moves as usize, game.history().len());
    assert_eq!(summary.result, game.result());
    assert!(game.audit().is_ok());
}
