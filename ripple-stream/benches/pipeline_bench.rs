// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::{BenchmarkId, Criterion, Throughput};
use ripple_core::Stream;
use ripple_stream::prelude::*;
use ripple_test_utils::VirtualScheduler;
use std::hint::black_box;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_filter_scan");

    for &size in &[100usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));
        let source = Stream::from_iter((0..size as u64).collect::<Vec<_>>());
        let pipeline = source
            .map(|x| x.wrapping_mul(3))
            .filter(|x| x % 2 == 0)
            .scan(0u64, |acc, x| acc.wrapping_add(x));

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |bencher, _| {
            bencher.iter(|| {
                let scheduler = VirtualScheduler::new();
                let last = Arc::new(AtomicU64::new(0));
                let sink = last.clone();
                let _disposer = pipeline.each(
                    scheduler.clone(),
                    move |x| sink.store(x, Ordering::Relaxed),
                    |_| {},
                );
                scheduler.run_until_idle();
                black_box(last.load(Ordering::Relaxed));
            });
        });
    }

    group.finish();
}
