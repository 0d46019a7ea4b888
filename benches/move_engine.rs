//! Benchmarks for move resolution and whole games.

use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use mangala::core::{GameRng, GamerId, Move, Room};
use mangala::games::mangala::{Mangala, MangalaBuilder};
use mangala::rules::RulesEngine;

fn started(stones: usize) -> (Mangala, Room) {
    let (game, mut room) = MangalaBuilder::new().stones_per_pit(stones).build("owner");
    room.gamer2.id = Some(GamerId::new("guest"));
    room.is_game_started = true;
    (game, room)
}

fn bench_apply_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_move");
    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

    for stones in [4, 8, 16] {
        let (game, room) = started(stones);
        let mv = Move::new(GamerId::new("owner"), 5);

        group.bench_with_input(BenchmarkId::new("opening", stones), &stones, |b, _| {
            b.iter(|| game.apply_move(&room, &mv, now))
        });
    }

    group.finish();
}

fn bench_random_game(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_game");
    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

    for stones in [4, 6] {
        let (game, start) = started(stones);

        group.bench_with_input(BenchmarkId::new("playout", stones), &stones, |b, _| {
            b.iter(|| {
                let mut rng = GameRng::new(7);
                let mut room = start.clone();
                for _ in 0..1000 {
                    if room.is_game_completed {
                        break;
                    }
                    let legal = game.legal_moves(&room, &room.move_order);
                    let Some(mv) = rng.choose(&legal) else {
                        break;
                    };
                    match game.apply_move(&room, mv, now).into_transition() {
                        Some(t) => room = t.room,
                        None => break,
                    }
                }
                room
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_apply_move, bench_random_game);
criterion_main!(benches);
