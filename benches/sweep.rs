use chrono::Duration;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use rust_checkers::core::{CheckersConfig, Clock, FixedClock};
use rust_checkers::game::Ledger;
use rust_checkers::rules::Move;

const ALICE: &str = "cosmos1jmjfq0tplp9tmx4v9uemw72y4d2wa5nr3xn9d3";
const BOB: &str = "cosmos1xyxs3skf3f4jfqeuv89yyaqvjc6lffavxqhc8g";
const CAROL: &str = "cosmos1e0w5t53nrq7p66fye6c8p0ynyhf6y24l4yuxd7";

fn ledger_with_games(count: usize) -> Ledger {
    let now = FixedClock::at_unix(0).now();
    let mut ledger = Ledger::new(CheckersConfig::default()).unwrap();
    for _ in 0..count {
        ledger.create_game(ALICE, BOB, CAROL, now).unwrap();
    }
    ledger
}

fn bench_sweep(c: &mut Criterion) {
    let expired = FixedClock::at_unix(0).now() + Duration::days(2);
    let fresh = FixedClock::at_unix(0).now() + Duration::hours(1);

    c.bench_function("sweep_1000_expired", |b| {
        b.iter_batched(
            || ledger_with_games(1000),
            |mut ledger| black_box(ledger.sweep_expired(expired).unwrap()),
            BatchSize::LargeInput,
        )
    });

    // Nothing due: the sweep only looks at the head.
    let mut idle = ledger_with_games(1000);
    c.bench_function("sweep_1000_idle", |b| {
        b.iter(|| black_box(idle.sweep_expired(fresh).unwrap()))
    });
}

fn bench_play(c: &mut Criterion) {
    let now = FixedClock::at_unix(0).now();
    c.bench_function("play_opening_move", |b| {
        b.iter_batched(
            || ledger_with_games(100),
            |mut ledger| {
                let id = ledger.anchor().head.unwrap();
                black_box(ledger.play_move(id, CAROL, Move::from_coords(1, 2, 2, 3), now).unwrap())
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_sweep, bench_play);
criterion_main!(benches);
