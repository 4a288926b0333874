use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mahjong_cfr::engine::action_mask::ActionMask;
use mahjong_cfr::GameEngine;

fn bench_action_mask_discard(c: &mut Criterion) {
    let mut engine = GameEngine::with_seed(11);
    engine.step(None).ok();

    c.bench_function("action_mask_discard", |b| {
        b.iter(|| black_box(ActionMask::from_state(black_box(&engine.state))));
    });
}

fn bench_engine_clone_and_step(c: &mut Criterion) {
    let mut engine = GameEngine::with_seed(11);
    engine.step(None).ok();
    let action = engine.legal_actions().first().copied();

    c.bench_function("engine_clone_and_step", |b| {
        b.iter(|| {
            let mut next = engine.clone();
            black_box(next.step(black_box(action)).ok());
        });
    });
}

criterion_group!(benches, bench_action_mask_discard, bench_engine_clone_and_step);
criterion_main!(benches);
