//! Property tests over reachable positions and random operation sequences.

use chrono::Duration;
use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use rust_checkers::board::Board;
use rust_checkers::core::{BlockTime, CheckersConfig, Clock, FixedClock, GameId, Side};
use rust_checkers::game::Ledger;
use rust_checkers::rules::{Checkers, Move, RulesEngine};

const ALICE: &str = "cosmos1jmjfq0tplp9tmx4v9uemw72y4d2wa5nr3xn9d3";
const BOB: &str = "cosmos1xyxs3skf3f4jfqeuv89yyaqvjc6lffavxqhc8g";
const CAROL: &str = "cosmos1e0w5t53nrq7p66fye6c8p0ynyhf6y24l4yuxd7";

/// Board after `steps` random legal steps from the opening.
fn reachable_board(seed: u64, steps: usize) -> Board {
    let rules = Checkers::standard();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut board = rules.initial_board();
    let mut turn = Side::Black;
    let mut pending = None;
    for _ in 0..steps {
        let moves = rules.legal_moves(&board, turn, pending);
        let Some(&mv) = moves.choose(&mut rng) else {
            break;
        };
        let Ok(outcome) = rules.apply_move(&board, turn, mv, pending) else {
            break;
        };
        board = outcome.board;
        if outcome.must_continue {
            pending = Some(mv.to);
        } else {
            pending = None;
            turn = turn.opponent();
        }
    }
    board
}

#[derive(Clone, Debug)]
enum Op {
    Create,
    Play(usize),
    Wait(i64),
    Sweep,
}

fn any_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => Just(Op::Create),
        4 => any::<usize>().prop_map(Op::Play),
        2 => (1i64..30).prop_map(Op::Wait),
        1 => Just(Op::Sweep),
    ]
}

fn start() -> BlockTime {
    FixedClock::at_unix(1_700_000_000).now()
}

proptest! {
    #[test]
    fn test_notation_round_trip(seed in any::<u64>(), steps in 0usize..120) {
        let board = reachable_board(seed, steps);
        let text = board.to_notation();
        prop_assert_eq!(Board::from_notation(&text).unwrap(), board);
    }

    #[test]
    fn test_reachable_boards_stay_legal(seed in any::<u64>(), steps in 0usize..120) {
        let board = reachable_board(seed, steps);
        prop_assert!(board.pieces_of(Side::Black).count() <= 12);
        prop_assert!(board.pieces_of(Side::Red).count() <= 12);
        prop_assert!(board.pieces().all(|(pos, _)| Board::is_playable(pos)));
    }

    /// Queue stays consistent and ordered by deadline whatever the host does.
    #[test]
    fn test_queue_invariants(ops in prop::collection::vec(any_op(), 1..60)) {
        let mut ledger = Ledger::new(CheckersConfig::default()).unwrap();
        let rules = Checkers::standard();
        let mut now = start();

        for op in ops {
            match op {
                Op::Create => {
                    ledger.create_game(ALICE, BOB, CAROL, now).unwrap();
                }
                Op::Play(pick) => {
                    let live = ledger.queue_order().unwrap();
                    if live.is_empty() {
                        continue;
                    }
                    let id = live[pick % live.len()];
                    let game = ledger.game(id).unwrap();
                    let moves = rules.legal_moves(&game.board, game.turn, game.pending_capture);
                    let mv = moves[pick % moves.len()];
                    let player = game.address_of(game.turn).unwrap().as_str().to_string();
                    ledger.play_move(id, &player, mv, now).unwrap();
                    if !ledger.game(id).unwrap().is_over() {
                        prop_assert_eq!(ledger.anchor().tail, Some(id));
                    }
                }
                Op::Wait(hours) => {
                    now += Duration::hours(hours);
                }
                Op::Sweep => {
                    for id in ledger.sweep_expired(now).unwrap() {
                        let game = ledger.game(id).unwrap();
                        prop_assert!(game.forfeited);
                        prop_assert!(game.deadline <= now);
                    }
                }
            }

            let order = ledger.check_integrity().unwrap();
            let deadlines: Vec<BlockTime> = order
                .iter()
                .map(|&id| ledger.game(id).unwrap().deadline)
                .collect();
            prop_assert!(deadlines.windows(2).all(|w| w[0] <= w[1]));
            prop_assert_eq!(ledger.anchor().next_id, GameId::new(ledger.games().len() as u64 + 1));
        }
    }

    /// Any rejected move leaves the store untouched.
    #[test]
    fn test_rejections_are_atomic(
        fx in -1i32..9, fy in -1i32..9, tx in -1i32..9, ty in -1i32..9, red_moves in any::<bool>(),
    ) {
        let mut ledger = Ledger::new(CheckersConfig::default()).unwrap();
        let id = ledger.create_game(ALICE, BOB, CAROL, start()).unwrap();
        let before = ledger.store().clone();
        let events = ledger.events().len();

        let player = if red_moves { BOB } else { CAROL };
        if ledger.play_move(id, player, Move::from_coords(fx, fy, tx, ty), start()).is_err() {
            prop_assert_eq!(ledger.store(), &before);
            prop_assert_eq!(ledger.events().len(), events);
        } else {
            prop_assert!(!red_moves);
            prop_assert_eq!(ledger.events().len(), events + 1);
        }
    }
}
