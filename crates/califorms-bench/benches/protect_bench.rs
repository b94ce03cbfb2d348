//! Primitive-application microbenchmarks: cost of tagging a range.

use std::cell::RefCell;
use std::time::{Duration, Instant};

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use califorms_bench::BenchStats;
use califorms_core::ArrayFixture;

const RANGE: usize = 4096;

fn bench_protect_full_range(c: &mut Criterion) {
    let mut fx = ArrayFixture::with_capacity(RANGE);
    fx.initialize(RANGE).expect("fixture init");

    let stats = RefCell::new(BenchStats::default());
    let mut group = c.benchmark_group("protect");
    group.throughput(Throughput::Elements(RANGE as u64));
    group.bench_function(BenchmarkId::new("protect_range", "stride1"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                fx.protect_range(RANGE, 1, 0xFF00_FF00, 0xFF00_FF00)
                    .expect("protect range");
            }
            let dur = start.elapsed().max(Duration::from_nanos(1));
            stats.borrow_mut().record(iters * RANGE as u64, dur);
            dur
        });
    });
    group.finish();
    stats.borrow().report("protect_range_stride1");
}

fn bench_protect_alternate_words(c: &mut Criterion) {
    let mut fx = ArrayFixture::with_capacity(RANGE);
    fx.initialize(RANGE).expect("fixture init");

    let stats = RefCell::new(BenchStats::default());
    let mut group = c.benchmark_group("protect");
    group.throughput(Throughput::Elements((RANGE / 2) as u64));
    group.bench_function(BenchmarkId::new("protect_range", "stride2"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                fx.protect_range(RANGE, 2, 0xFFFF_FFFF, 0xFFFF_0000)
                    .expect("protect range");
            }
            let dur = start.elapsed().max(Duration::from_nanos(1));
            stats.borrow_mut().record(iters * (RANGE / 2) as u64, dur);
            dur
        });
    });
    group.finish();
    stats.borrow().report("protect_range_stride2");
}

fn bench_single_word_apply(c: &mut Criterion) {
    let mut fx = ArrayFixture::with_capacity(1);
    fx.initialize(1).expect("fixture init");

    let mut group = c.benchmark_group("protect");
    group.throughput(Throughput::Elements(1));
    group.bench_function(BenchmarkId::new("apply", "single_word"), |b| {
        b.iter(|| {
            fx.protect_word(black_box(0), black_box(0xFF00_FF00), black_box(0xFF00_FF00));
            black_box(fx.raw_read(0));
        });
    });
    group.finish();
}

criterion_group!(
    protect_benches,
    bench_protect_full_range,
    bench_protect_alternate_words,
    bench_single_word_apply
);
criterion_main!(protect_benches);
