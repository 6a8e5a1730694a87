// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_view::kurbo::{Rect, Size};
use arbor_view::{Alignment, Autoresizing, NoHooks, Padding, Tree, ViewId, ViewProps};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};

/// A root holding `rows` contained rows of `cols` fixed cells each.
fn build_rows(rows: usize, cols: usize) -> (Tree, ViewId, Vec<ViewId>) {
    let mut tree = Tree::new();
    let root = tree
        .insert(ViewProps {
            padding: Padding::uniform(4.0),
            ..ViewProps::with_frame(Rect::new(0.0, 0.0, 1024.0, 768.0))
        })
        .unwrap();
    let mut cells = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        let row = tree
            .insert_child(
                root,
                ViewProps {
                    autoresizing: Autoresizing::CONTAIN,
                    padding: Padding::uniform(2.0),
                    ..ViewProps::with_frame(Rect::new(0.0, r as f64 * 24.0, 0.0, r as f64 * 24.0))
                },
            )
            .unwrap();
        for c in 0..cols {
            let x = c as f64 * 20.0;
            let cell = tree
                .insert_child(row, ViewProps::with_frame(Rect::new(x, 0.0, x + 16.0, 16.0)))
                .unwrap();
            cells.push(cell);
        }
    }
    (tree, root, cells)
}

/// `depth` nested views, each filling its parent minus padding, with a centered leaf.
fn build_nested(depth: usize) -> Tree {
    let mut tree = Tree::new();
    let mut parent = tree
        .insert(ViewProps {
            padding: Padding::uniform(1.0),
            ..ViewProps::with_frame(Rect::new(0.0, 0.0, 2048.0, 2048.0))
        })
        .unwrap();
    for _ in 0..depth {
        parent = tree
            .insert_child(
                parent,
                ViewProps {
                    autoresizing: Autoresizing::FILL,
                    padding: Padding::uniform(1.0),
                    ..Default::default()
                },
            )
            .unwrap();
    }
    tree.insert_child(
        parent,
        ViewProps {
            alignment: Alignment::MiddleCenter,
            ..ViewProps::with_frame(Rect::new(0.0, 0.0, 8.0, 8.0))
        },
    )
    .unwrap();
    tree
}

fn bench_full_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_full");
    for &(rows, cols) in &[(10_usize, 10_usize), (50, 20), (100, 50)] {
        group.throughput(Throughput::Elements((rows * cols) as u64));
        group.bench_function(format!("contained_rows_{rows}x{cols}"), |b| {
            b.iter_batched(
                || build_rows(rows, cols).0,
                |mut tree| {
                    tree.layout(&mut NoHooks);
                    black_box(tree)
                },
                BatchSize::LargeInput,
            );
        });
    }
    for &depth in &[16_usize, 128] {
        group.bench_function(format!("nested_fill_depth{depth}"), |b| {
            b.iter_batched(
                || build_nested(depth),
                |mut tree| {
                    tree.layout(&mut NoHooks);
                    black_box(tree)
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_incremental_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_incremental");
    let (mut tree, _, cells) = build_rows(100, 50);
    tree.layout(&mut NoHooks);
    let mut i = 0_usize;
    group.bench_function("resize_one_cell", |b| {
        b.iter(|| {
            let cell = cells[i % cells.len()];
            let w = if i % 2 == 0 { 18.0 } else { 16.0 };
            tree.set_size(cell, Size::new(w, 16.0));
            tree.layout(&mut NoHooks);
            i += 1;
        });
    });
    group.bench_function("clean_tree", |b| {
        b.iter(|| {
            tree.layout(&mut NoHooks);
        });
    });
    group.finish();
}

criterion_group!(benches, bench_full_layout, bench_incremental_layout);
criterion_main!(benches);
