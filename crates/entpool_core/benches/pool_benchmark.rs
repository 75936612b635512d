//! # Pool Benchmark
//!
//! Measures the cost of lifecycle signals on top of raw storage:
//! - batch insert with and without a construction listener
//! - full clear versus per-entity erase
//! - patch through the pool
//!
//! Run with: `cargo bench --package entpool_core`

// Benchmarks don't need docs
#![allow(missing_docs)]

use std::cell::Cell;
use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use entpool_core::{declare_component, PoolOf};

#[derive(Clone, Copy)]
struct Position {
    x: f32,
    y: f32,
}
declare_component!(Position);

type Positions = PoolOf<u32, Position, ()>;

const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

fn entities(count: u32) -> Vec<u32> {
    (0..count).collect()
}

/// Benchmark: batch insert, silent versus listened.
fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for count in [1_000u32, 100_000] {
        let batch = entities(count);

        group.bench_with_input(BenchmarkId::new("no_listener", count), &batch, |b, batch| {
            b.iter(|| {
                let pool = Positions::default();
                pool.insert(&mut (), batch, ORIGIN);
                black_box(pool.len())
            });
        });

        group.bench_with_input(BenchmarkId::new("one_listener", count), &batch, |b, batch| {
            b.iter(|| {
                let pool = Positions::default();
                let hits = Rc::new(Cell::new(0u32));
                let counter = Rc::clone(&hits);
                let _conn = pool.on_construct().connect(move |_: &mut (), _| counter.set(counter.get() + 1));
                pool.insert(&mut (), batch, ORIGIN);
                black_box(hits.get())
            });
        });
    }

    group.finish();
}

/// Benchmark: emptying a pool in one call versus entity by entity.
fn bench_erase(c: &mut Criterion) {
    let mut group = c.benchmark_group("erase_100k");
    let batch = entities(100_000);
    let half = &batch[..batch.len() / 2];

    group.bench_function("full_clear", |b| {
        b.iter(|| {
            let pool = Positions::default();
            let _conn = pool.on_destroy().connect(|_: &mut (), entity| {
                black_box(entity);
            });
            pool.insert(&mut (), &batch, ORIGIN);
            pool.erase_many(&mut (), &batch);
            black_box(pool.len())
        });
    });

    group.bench_function("half_one_by_one", |b| {
        b.iter(|| {
            let pool = Positions::default();
            let _conn = pool.on_destroy().connect(|_: &mut (), entity| {
                black_box(entity);
            });
            pool.insert(&mut (), &batch, ORIGIN);
            pool.erase_many(&mut (), half);
            black_box(pool.len())
        });
    });

    group.finish();
}

/// Benchmark: patch every entity with one update listener.
fn bench_patch(c: &mut Criterion) {
    let batch = entities(100_000);
    let pool = Positions::default();
    pool.insert(&mut (), &batch, ORIGIN);
    let _conn = pool.on_update().connect(|_: &mut (), entity| {
        black_box(entity);
    });

    c.bench_function("patch_100k", |b| {
        b.iter(|| {
            for &entity in &batch {
                let position = pool.patch(&mut (), entity, (|p: &mut Position| p.x += 1.0, |p: &mut Position| p.y -= 1.0));
                black_box(position.map(|p| p.x));
            }
        });
    });
}

criterion_group!(benches, bench_insert, bench_erase, bench_patch);
criterion_main!(benches);
