// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_view::kurbo::{Point, Rect};
use arbor_view::{NoHooks, Tree, ViewId, ViewProps};
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

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
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// An `n` by `n` grid of panels, each holding `per_panel` overlapping children.
fn build_grid(n: usize, per_panel: usize) -> (Tree, ViewId) {
    let cell = 64.0;
    let side = n as f64 * cell;
    let mut tree = Tree::new();
    let root = tree
        .insert(ViewProps::with_frame(Rect::new(0.0, 0.0, side, side)))
        .unwrap();
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            let panel = tree
                .insert_child(root, ViewProps::with_frame(Rect::new(x0, y0, x0 + cell, y0 + cell)))
                .unwrap();
            for k in 0..per_panel {
                let o = k as f64 * 4.0;
                tree.insert_child(panel, ViewProps::with_frame(Rect::new(o, o, o + 32.0, o + 32.0)))
                    .unwrap();
            }
        }
    }
    tree.layout(&mut NoHooks);
    (tree, root)
}

fn bench_hit_test(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_test");
    for &(n, per_panel) in &[(8_usize, 4_usize), (32, 4), (32, 16)] {
        let (tree, root) = build_grid(n, per_panel);
        let side = n as f64 * 64.0;
        let mut rng = Rng::new(0x9e37_79b9_7f4a_7c15);
        let points: Vec<Point> = (0..1024)
            .map(|_| Point::new(rng.next_f64() * side, rng.next_f64() * side))
            .collect();
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("grid{n}_children{per_panel}"), |b| {
            b.iter(|| {
                for &pt in &points {
                    black_box(tree.hit_test(root, pt));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_hit_test);
criterion_main!(benches);
