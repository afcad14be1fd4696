// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use understory_snap::{Slide, Snap, SnapProps, TransitionOptions, Viewport, WheelInput};

#[derive(Clone)]
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1_u64 << 53) as f64
    }
}

fn build_snap(n: usize, looped: bool, seed: u64) -> Snap {
    let mut rng = Lcg(seed);
    let slides = (0..n)
        .map(|_| Slide::fixed(80.0 + rng.next_f64() * 240.0))
        .collect();
    let props = SnapProps {
        looped,
        wheel: true,
        ..SnapProps::default()
    };
    Snap::new(props, Viewport::default(), slides).with_container_size(1_000.0, 600.0)
}

fn bench_reflow(c: &mut Criterion) {
    let mut group = c.benchmark_group("snap_reflow");
    for &n in &[100_usize, 1_000, 10_000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || build_snap(n, false, 0x5AA7_0000_0000_0001),
                |mut snap| {
                    snap.resize(true);
                    black_box(snap.dom_size());
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("snap_render");
    for &looped in &[false, true] {
        for &n in &[100_usize, 1_000, 10_000] {
            let mut snap = build_snap(n, looped, 0x5AA7_0000_0000_0002);
            group.throughput(Throughput::Elements(n as u64));
            let id = BenchmarkId::new(if looped { "looped" } else { "bounded" }, n);
            group.bench_with_input(id, &n, |b, _| {
                b.iter(|| {
                    snap.render(16.0);
                    snap.drain_events().for_each(drop);
                    black_box(snap.active_index());
                });
            });
        }
    }
    group.finish();
}

fn bench_navigation(c: &mut Criterion) {
    let mut group = c.benchmark_group("snap_navigation");
    group.sample_size(30);
    for &n in &[100_usize, 1_000] {
        group.bench_with_input(BenchmarkId::new("to_slide_settle", n), &n, |b, &n| {
            b.iter_batched(
                || build_snap(n, true, 0x5AA7_0000_0000_0003),
                |mut snap| {
                    snap.to_slide(n / 2, TransitionOptions::default());
                    let mut now = 0;
                    while snap.wants_frame() && now < 5_000 {
                        now += 16;
                        snap.advance(now);
                    }
                    black_box(snap.track().current());
                },
                BatchSize::LargeInput,
            );
        });
        group.bench_with_input(BenchmarkId::new("wheel_and_swipe", n), &n, |b, &n| {
            b.iter_batched(
                || build_snap(n, false, 0x5AA7_0000_0000_0004),
                |mut snap| {
                    for i in 0..20_u64 {
                        snap.on_wheel(WheelInput::pixels(0.0, 12.0), i * 16);
                        snap.advance(i * 16);
                    }
                    snap.on_pointer_down(Point::new(500.0, 300.0), 400);
                    snap.on_pointer_move(Point::new(420.0, 300.0), 416);
                    snap.on_pointer_up(432);
                    snap.advance(448);
                    black_box(snap.track().target());
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reflow, bench_render, bench_navigation);
criterion_main!(benches);
