// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_pull_refresh::completion::Completion;
use understory_pull_refresh::config::PullToRefreshConfig;
use understory_pull_refresh::controller::PullToRefresh;
use understory_pull_refresh::pointer::{PointerEvent, PointerPhase};
use understory_pull_refresh::probe::{AncestorProbe, ScrollDirection, ScrollProbe, ScrollTree};
use understory_pull_refresh::threshold::{BreachLatch, ThresholdEngine};
use understory_pull_refresh::tracker::ContainerContext;
use understory_pull_refresh::types::{PullDirection, ScrollMetrics};

// Simple deterministic RNG (xorshift64*) to avoid external deps.
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// A jittery drag that wanders between -`span` and +`span` around the start.
fn gen_jitter_path(n: usize, span: f64) -> Vec<f64> {
    let mut rng = Rng::new(0x5EED_1234_ABCD_0042);
    let mut y = 0.0_f64;
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        y = (y + (rng.next_f64() - 0.5) * 24.0).clamp(-span, span);
        out.push(y);
    }
    out
}

/// Steady pull from 0 to `end`.
fn gen_linear_path(n: usize, end: f64) -> Vec<f64> {
    (0..n).map(|i| end * i as f64 / n as f64).collect()
}

fn controller() -> PullToRefresh<()> {
    let config = PullToRefreshConfig::new(80.0).with_pull_up_threshold(60.0);
    let mut ptr = PullToRefresh::new(config, Completion::ready)
        .expect("valid config")
        .with_pull_up(Completion::ready);
    ptr.set_indicator_extent(PullDirection::Down, 120.0);
    ptr.set_indicator_extent(PullDirection::Up, 120.0);
    ptr
}

fn bench_controller(c: &mut Criterion) {
    let mut group = c.benchmark_group("controller");
    // Short content sits at both boundaries, so both directions stay eligible.
    let ctx = ContainerContext::new(
        ScrollMetrics::new(0.0, 400.0, 600.0),
        Rect::new(0.0, 0.0, 400.0, 600.0),
        800.0,
    );
    for &n in &[64usize, 512, 4096] {
        for (name, path) in [
            ("linear", gen_linear_path(n, 200.0)),
            ("jitter", gen_jitter_path(n, 150.0)),
        ] {
            group.throughput(Throughput::Elements(n as u64));
            group.bench_function(format!("drag_{name}_n{n}"), |b| {
                b.iter_batched(
                    controller,
                    |mut ptr| {
                        let start = Point::new(10.0, 300.0);
                        let mut updates = ptr
                            .handle_pointer(&PointerEvent::mouse(PointerPhase::Down, start), &ctx)
                            .len();
                        for &dy in &path {
                            updates += ptr
                                .pointer_move(Point::new(10.0, start.y + dy))
                                .len();
                        }
                        updates += ptr.pointer_up().len();
                        black_box((updates, ptr.state()));
                    },
                    BatchSize::SmallInput,
                )
            });
        }
    }
    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("threshold");
    let mut thresholds = PullToRefreshConfig::new(80.0).thresholds();
    thresholds.set_max_distance(PullDirection::Down, 120.0);
    let engine = ThresholdEngine::new(thresholds, true);
    let snapshot = ScrollMetrics::new(0.0, 400.0, 600.0);
    let path = gen_jitter_path(4096, 200.0);
    group.throughput(Throughput::Elements(path.len() as u64));
    group.bench_function("classify_and_latch_n4096", |b| {
        b.iter(|| {
            let mut latch = BreachLatch::default();
            let mut latched = 0_usize;
            for &d in &path {
                let c = engine.classify(d, &snapshot);
                if latch.observe(d, c).is_some() {
                    latched += 1;
                }
                black_box(engine.visual_offset(d, &snapshot));
            }
            black_box(latched)
        })
    });
    group.finish();
}

/// A single chain `depth → depth-1 → … → 0` with one scroller at the root.
struct Chain;

impl ScrollTree<u32> for Chain {
    fn parent_of(&self, node: &u32) -> Option<u32> {
        node.checked_sub(1)
    }
    fn scroll_metrics(&self, node: &u32) -> Option<ScrollMetrics> {
        (*node == 0).then(|| ScrollMetrics::new(10.0, 2000.0, 500.0))
    }
}

fn bench_probe(c: &mut Criterion) {
    let mut group = c.benchmark_group("probe");
    let probe = AncestorProbe::new(Chain);
    for &depth in &[8u32, 64, 255] {
        group.bench_function(format!("ancestor_walk_depth{depth}"), |b| {
            b.iter(|| black_box(probe.can_scroll(black_box(&depth), ScrollDirection::Up)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_controller, bench_classify, bench_probe);
criterion_main!(benches);
