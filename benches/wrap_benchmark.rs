//! History wrap benchmarks.
//!
//! Resizing rewraps the whole history, so rewrap cost grows with session
//! length. These measure a single append and a full rewrap.
//!
//! Run with: cargo bench --bench wrap_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use mltc::model::LogicalEntry;
use mltc::state::{wrap_entry, LineBuffer};

const BODY: &str = "the quick brown fox jumps over the lazy dog while a superlongwordwithoutanyspaces wanders past";

fn history(entries: usize, width: usize) -> LineBuffer {
    let mut buffer = LineBuffer::new(width);
    for i in 0..entries {
        buffer
            .append(LogicalEntry::system(format!("{} {}", i, BODY)))
            .expect("wrap");
    }
    buffer
}

fn bench_wrap_entry(c: &mut Criterion) {
    let mut group = c.benchmark_group("wrap_entry");
    for width in [8usize, 40, 120] {
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, &width| {
            b.iter(|| wrap_entry(black_box(BODY), width))
        });
    }
    group.finish();
}

fn bench_rewrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("rewrap");
    for entries in [100usize, 1_000, 10_000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(entries),
            &entries,
            |b, &entries| {
                b.iter_batched(
                    || history(entries, 80),
                    |mut buffer| buffer.rewrap(black_box(57)),
                    BatchSize::LargeInput,
                )
            },
        );
    }
    group.finish();
}

fn bench_append(c: &mut Criterion) {
    c.bench_function("append_to_long_history", |b| {
        b.iter_batched(
            || history(10_000, 80),
            |mut buffer| buffer.append(LogicalEntry::system(black_box(BODY))),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_wrap_entry, bench_rewrap, bench_append);
criterion_main!(benches);
