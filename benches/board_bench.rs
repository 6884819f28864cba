use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tile_match_core::board::generate;
use tile_match_core::core::{GameRng, LevelConfig};

fn bench_generate_pyramid(c: &mut Criterion) {
    let config = LevelConfig::pyramid(3);

    c.bench_function("generate_pyramid_3", |b| {
        b.iter(|| {
            let mut rng = GameRng::new(black_box(42));
            generate(&config, &mut rng).unwrap()
        })
    });
}

fn bench_evaluate_blocking(c: &mut Criterion) {
    let mut rng = GameRng::new(42);
    let mut board = generate(&LevelConfig::pyramid(3), &mut rng).unwrap();

    c.bench_function("evaluate_blocking_116_tiles", |b| {
        b.iter(|| board.evaluate_blocking())
    });
}

fn bench_matchable_pairs(c: &mut Criterion) {
    let mut rng = GameRng::new(42);
    let board = generate(&LevelConfig::pyramid(3), &mut rng).unwrap();

    c.bench_function("matchable_pairs", |b| {
        b.iter(|| black_box(&board).matchable_pairs())
    });
}

fn bench_reshuffle(c: &mut Criterion) {
    let mut rng = GameRng::new(42);
    let mut board = generate(&LevelConfig::pyramid(3), &mut rng).unwrap();

    c.bench_function("reshuffle_types", |b| {
        b.iter(|| board.reshuffle_types(&mut rng))
    });
}

criterion_group!(
    benches,
    bench_generate_pyramid,
    bench_evaluate_blocking,
    bench_matchable_pairs,
    bench_reshuffle
);
criterion_main!(benches);
