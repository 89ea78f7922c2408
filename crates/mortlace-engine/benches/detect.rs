//! Benchmarks for the detection engine.

use criterion::{Criterion, criterion_group, criterion_main};
use mortlace_core::{Digit, DigitSet, Grid, Position};
use mortlace_engine::{
    Engine, SearchContext, Searcher as _,
    pattern::{borescoper_patterns, extended_rectangle_patterns, matrix_patterns},
    searcher::{Bug, UniqueMatrix},
};
use std::hint::black_box;

fn ordinary_grid() -> Grid {
    "
        53_ _7_ ___
        6__ 195 ___
        _98 ___ _6_
        8__ _6_ __3
        4__ 8_3 __1
        7__ _2_ __6
        _6_ ___ 28_
        ___ 419 __5
        ___ _8_ _79
    "
    .parse()
    .unwrap()
}

/// A near-grave grid: everything solved except a rectangle of bi-value
/// cells and one tri-value cell.
fn near_grave_grid() -> Grid {
    let solved: Grid = "
        123 456 789
        456 789 123
        789 123 456
        231 564 897
        564 897 231
        897 231 564
        312 645 978
        645 978 312
        978 312 645
    "
    .parse()
    .unwrap();

    let reopen = [
        (Position::new(0, 0), DigitSet::from_iter([Digit::D1, Digit::D4])),
        (Position::new(3, 0), DigitSet::from_iter([Digit::D1, Digit::D4])),
        (Position::new(0, 1), DigitSet::from_iter([Digit::D1, Digit::D4])),
        (
            Position::new(3, 1),
            DigitSet::from_iter([Digit::D1, Digit::D4, Digit::D7]),
        ),
    ];
    let mut grid = Grid::new();
    for index in 0..81 {
        let pos = Position::from_index(index);
        let keep = reopen
            .iter()
            .find(|&&(cell, _)| cell == pos)
            .map_or_else(|| solved.candidates_at(pos), |&(_, mask)| mask);
        for digit in DigitSet::FULL.difference(keep) {
            grid.remove_candidate(pos, digit);
        }
    }
    grid
}

fn bench_catalog_access(c: &mut Criterion) {
    // First access pays the one-time construction; afterwards the lookups
    // are free.
    let _ = (
        matrix_patterns(),
        extended_rectangle_patterns(),
        borescoper_patterns(),
    );
    c.bench_function("catalog_lookup", |b| {
        b.iter(|| {
            black_box(matrix_patterns().len())
                + black_box(extended_rectangle_patterns().len())
                + black_box(borescoper_patterns().len())
        });
    });
}

fn bench_template_matching(c: &mut Criterion) {
    let grid = ordinary_grid();
    let searcher = UniqueMatrix::new();
    c.bench_function("unique_matrix_scan", |b| {
        b.iter(|| {
            let mut steps = Vec::new();
            let mut ctx = SearchContext::new(&mut steps, false);
            let _ = searcher.collect(black_box(&grid), &mut ctx);
            steps.len()
        });
    });
}

fn bench_bug_resolution(c: &mut Criterion) {
    let grid = near_grave_grid();
    let searcher = Bug::new();
    c.bench_function("bug_true_candidates", |b| {
        b.iter(|| {
            let mut steps = Vec::new();
            let mut ctx = SearchContext::new(&mut steps, false);
            let _ = searcher.collect(black_box(&grid), &mut ctx);
            steps.len()
        });
    });
}

fn bench_find_first(c: &mut Criterion) {
    let engine = Engine::with_all_searchers();
    let grid = near_grave_grid();
    c.bench_function("engine_find_first", |b| {
        b.iter(|| engine.find_first(black_box(&grid)).unwrap().is_some());
    });
}

criterion_group!(
    benches,
    bench_catalog_access,
    bench_template_matching,
    bench_bug_resolution,
    bench_find_first
);
criterion_main!(benches);
