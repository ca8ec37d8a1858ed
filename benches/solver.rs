//! Benchmarks for the rotation puzzle solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rotile::board::{encode, EncodeMode, FixedAreas};
use rotile::moves::DisabledMoves;
use rotile::outlines::generate_outline_boards;
use rotile::solve;

const OUTLINE: [i32; 16] = [0, 0, 1, 1, 0, 0, 1, 1, 2, 2, 3, 3, 2, 2, 3, 3];

/// A fixed scrambled board a handful of moves from the outline.
const SCRAMBLED: [i32; 16] = [2, 1, 1, 2, 1, 4, 2, 2, 3, 1, 4, 3, 3, 3, 4, 4];

/// Benchmark a complete solve of a mid-depth puzzle.
fn bench_solve(c: &mut Criterion) {
    let disabled = DisabledMoves::default();
    let fixed = FixedAreas::new();
    c.bench_function("solve_puzzle", |b| {
        b.iter(|| solve(black_box(&SCRAMBLED), &OUTLINE, &disabled, &fixed))
    });
}

/// Benchmark generating the full outline catalogue.
fn bench_outlines(c: &mut Criterion) {
    c.bench_function("generate_outline_boards", |b| {
        b.iter(generate_outline_boards)
    });
}

/// Benchmark the canonical encoder on a 4x4 state with pins.
fn bench_encode(c: &mut Criterion) {
    let fixed: FixedAreas = [(1, 1), (2, 2), (3, 4), (4, 3)].into_iter().collect();
    c.bench_function("encode_full", |b| {
        b.iter(|| encode(black_box(&SCRAMBLED), &fixed, EncodeMode::Full))
    });
}

criterion_group!(benches, bench_solve, bench_outlines, bench_encode);
criterion_main!(benches);
