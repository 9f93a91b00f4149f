use std::collections::VecDeque;

use block_queue::{BlockQueue, RawQueue};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const ITEMS: u32 = 100_000;

fn push_pop_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_pop");

    group.bench_function(BenchmarkId::new("raw_queue", ITEMS), |b| {
        b.iter(|| {
            let mut queue = RawQueue::<u32>::new();
            for i in 0..black_box(ITEMS) {
                queue.push(i);
            }
            let mut sum = 0u64;
            while let Ok(i) = queue.pop() {
                sum += u64::from(i);
            }
            black_box(sum)
        });
    });

    group.bench_function(BenchmarkId::new("block_queue", ITEMS), |b| {
        b.iter(|| {
            let queue = BlockQueue::<u32>::new();
            for i in 0..black_box(ITEMS) {
                queue.push(i);
            }
            let mut sum = 0u64;
            while let Ok(i) = queue.pop() {
                sum += u64::from(i);
            }
            black_box(sum)
        });
    });

    group.bench_function(BenchmarkId::new("vec_deque", ITEMS), |b| {
        b.iter(|| {
            let mut queue = VecDeque::<u32>::new();
            for i in 0..black_box(ITEMS) {
                queue.push_back(i);
            }
            let mut sum = 0u64;
            while let Some(i) = queue.pop_front() {
                sum += u64::from(i);
            }
            black_box(sum)
        });
    });

    group.finish();
}

fn steady_state_benchmark(c: &mut Criterion) {
    // half-full queue straddling a block boundary
    let mut queue = RawQueue::<u32, 64>::from_iter(0..96);

    c.bench_function("raw_queue_steady_state", |b| {
        b.iter(
            #[inline(never)]
            || {
                let item = queue.pop().unwrap_or_default();
                queue.push(black_box(item));
            },
        );
    });
}

criterion_group!(benches, push_pop_benchmark, steady_state_benchmark);
criterion_main!(benches);
