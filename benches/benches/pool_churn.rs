// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_double_touch::clock::ManualClock;
use understory_double_touch::detector::GestureDetector;
use understory_double_touch::pool::EventPool;

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

/// A touch stream: (milliseconds since previous touch, target).
fn gen_touches(count: usize, targets: u64, max_gap_ms: u64, seed: u64) -> Vec<(u64, u32)> {
    let mut rng = Rng::new(seed);
    (0..count)
        .map(|_| {
            let gap = rng.next_u64() % (max_gap_ms + 1);
            let target = (rng.next_u64() % targets) as u32;
            (gap, target)
        })
        .collect()
}

fn bench_notify_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("notify_hit");
    for &targets in &[1_u64, 4, 64] {
        let touches = gen_touches(10_000, targets, 40, 0xCAFE_F00D_DEAD_BEEF);
        group.throughput(Throughput::Elements(touches.len() as u64));
        group.bench_function(format!("stream_targets{}", targets), |b| {
            b.iter_batched(
                || ManualClock::new(0),
                |clock| {
                    let mut detector = GestureDetector::new(&clock);
                    let mut fired = 0_usize;
                    let mut sink = |_t: u32, _kind: &str, _e: &()| fired += 1;
                    for &(gap, target) in &touches {
                        clock.advance(gap);
                        detector.notify_hit(target, &(), &mut sink);
                        // One 60 Hz frame per touch keeps the sweep running.
                        detector.tick(1.0);
                    }
                    black_box(fired);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep");
    for &n in &[1_000_usize, 10_000, 100_000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("scan_n{}", n), |b| {
            b.iter_batched(
                || {
                    let clock = ManualClock::new(0);
                    let mut pool = EventPool::new(clock);
                    for i in 0..n {
                        let _ = pool.add(i as u32);
                    }
                    pool
                },
                |mut pool| {
                    // Nothing has aged, so this measures the scan alone.
                    let removed = pool.tick(60.0);
                    black_box(removed);
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_notify_hit, bench_sweep);
criterion_main!(benches);
