//! Criterion micro-benchmarks for arena cell access and sweep stepping.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lumen_arena::Arena;
use lumen_bench::scattered_indices;
use lumen_core::{TickSource, WidthClass};
use lumen_engine::{Properties, Sweep, DEFAULT_OUTPUT_PRECISION};
use lumen_test_utils::{FakeClock, MemorySink};

/// Sequential set/clear in sweep order.
fn bench_arena_sequential(c: &mut Criterion) {
    let arena = Arena::for_class(WidthClass::W16);
    let capacity = arena.capacity();
    let mut pos = 0u64;
    c.bench_function("arena_sequential_set_clear", |b| {
        b.iter(|| {
            arena.clear((pos + capacity - 1) % capacity);
            arena.set(black_box(pos));
            pos = (pos + 1) % capacity;
        })
    });
}

/// Scattered set/clear, defeating the prefetcher.
fn bench_arena_scattered(c: &mut Criterion) {
    let arena = Arena::for_class(WidthClass::W16);
    let indices = scattered_indices(arena.capacity(), 4096, 42);
    let mut i = 0;
    c.bench_function("arena_scattered_set_clear", |b| {
        b.iter(|| {
            let index = indices[i % indices.len()];
            arena.set(black_box(index));
            arena.clear(index);
            i += 1;
        })
    });
}

/// One sweep step over the full 16-bit arena, the unit of work the
/// throughput estimate prices.
fn bench_sweep_step(c: &mut Criterion) {
    let arena = Arc::new(Arena::for_class(WidthClass::W16));
    let clock = Arc::new(FakeClock::new());
    let props = Arc::new(Properties::new(
        1,
        arena.capacity(),
        WidthClass::W16,
        DEFAULT_OUTPUT_PRECISION,
    ));
    let mut sweep = Sweep::new(
        Arc::clone(&arena),
        clock as Arc<dyn TickSource>,
        props,
        Box::new(MemorySink::new()),
    );
    c.bench_function("sweep_step", |b| b.iter(|| black_box(sweep.step())));
}

criterion_group!(
    benches,
    bench_arena_sequential,
    bench_arena_scattered,
    bench_sweep_step
);
criterion_main!(benches);
