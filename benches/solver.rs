//! Benchmarks for the battleship puzzle solver.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bimaru::LineCount::Known;
use bimaru::{puzzle, solver, PuzzleDef};

/// A 4x4 puzzle with two ships, solved exhaustively.
fn small_puzzle() -> PuzzleDef {
    PuzzleDef::new(
        vec![2, 1],
        vec![Known(1), Known(1), Known(1), Known(0)],
        vec![Known(2), Known(0), Known(1), Known(0)],
    )
    .unwrap()
}

/// Benchmark exhaustively solving a small puzzle.
fn bench_solve_small(c: &mut Criterion) {
    let puzzle = small_puzzle();
    c.bench_function("solve_small", |b| {
        b.iter(|| solver::solve(black_box(&puzzle), None))
    });
}

/// Benchmark finding the first solution of the built-in classic puzzle.
fn bench_solve_classic_first(c: &mut Criterion) {
    let puzzle = puzzle::classic();
    let mut group = c.benchmark_group("classic");
    group.sample_size(10);
    group.bench_function("solve_first", |b| {
        b.iter(|| solver::solve(black_box(&puzzle), Some(1)))
    });
    group.finish();
}

/// Benchmark computing a solution fingerprint.
fn bench_fingerprint(c: &mut Criterion) {
    let solutions = solver::solve(&small_puzzle(), None).unwrap();
    let solution = &solutions[0];

    c.bench_function("fingerprint", |b| b.iter(|| black_box(solution).fingerprint()));
}

/// Benchmark formatting a solution for display.
fn bench_render(c: &mut Criterion) {
    let puzzle = small_puzzle();
    let solutions = solver::solve(&puzzle, None).unwrap();
    let solution = &solutions[0];

    c.bench_function("render_with_counts", |b| {
        b.iter(|| puzzle.render_with_counts(black_box(solution)))
    });
}

criterion_group!(
    benches,
    bench_solve_small,
    bench_solve_classic_first,
    bench_fingerprint,
    bench_render
);
criterion_main!(benches);
