//! Benchmarks for the scroll-tick hot path.
//!
//! Run with: cargo bench
//!
//! The scroll tick fires on every pixel of scroll, so its cost must stay
//! proportional to the visible tile count and independent of the matrix
//! size. The stationary tick measures the diffing floor; the alternating
//! tick includes the flip and notification work.
#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::cast_possible_truncation
)]

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use matview::{
    BoxSides, BoxSize, DefaultTileRenderStrategy, HostEnvironment, MatrixView, MatrixViewConfig,
    NullLog, Point2D, ScrollState, TileRenderStrategy,
};

struct BenchEnv;

impl HostEnvironment for BenchEnv {
    fn container_size(&self) -> Option<BoxSize> {
        Some(BoxSize {
            width: 1280.0,
            height: 800.0,
        })
    }

    fn scrollbar_width(&self) -> f32 {
        17.0
    }

    fn legacy_scrollbar_quirk(&self) -> bool {
        false
    }
}

/// Engine over a `rows`x`cols` matrix with one frozen band on each side.
fn build_view(rows: usize, cols: usize) -> MatrixView<u32> {
    let mut view = MatrixView::new(Box::new(BenchEnv), Arc::new(NullLog));
    view.set_config(MatrixViewConfig {
        show_fixed: Some(BoxSides {
            top: 1,
            left: 1,
            right: 1,
            bottom: 1,
        }),
        ..MatrixViewConfig::default()
    })
    .expect("config must apply");
    let cells: Vec<Vec<u32>> = (0..rows)
        .map(|row| (0..cols).map(|col| (row ^ col) as u32).collect())
        .collect();
    view.set_matrix(&cells).expect("matrix must build");
    view
}

/// Stationary tick: visibility diffing with nothing to flip.
fn bench_stationary_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("stationary_tick");
    for &rows in &[1_000usize, 10_000] {
        let mut view = build_view(rows, 50);
        let scroll = ScrollState {
            left: 400.0,
            top: 2_000.0,
        };
        view.scroll_to(scroll);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, _| {
            b.iter(|| view.scroll_to(black_box(scroll)))
        });
    }
    group.finish();
}

/// Alternating tick: every iteration scrolls a full viewport, flipping
/// tiles in and out.
fn bench_alternating_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("alternating_tick");
    for &rows in &[1_000usize, 10_000] {
        let mut view = build_view(rows, 50);
        let near = ScrollState {
            left: 0.0,
            top: 0.0,
        };
        let far = ScrollState {
            left: 600.0,
            top: 4_000.0,
        };
        view.scroll_to(near);
        let mut at_far = false;
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, _| {
            b.iter(|| {
                at_far = !at_far;
                view.scroll_to(black_box(if at_far { far } else { near }))
            })
        });
    }
    group.finish();
}

/// The pure visibility window computation on its own.
fn bench_visibility_strategy(c: &mut Criterion) {
    let strategy = DefaultTileRenderStrategy::default();
    let tile = BoxSize {
        width: 200.0,
        height: 500.0,
    };
    let canvas = BoxSize {
        width: 100_000.0,
        height: 4_000_000.0,
    };
    let viewport = BoxSize {
        width: 1263.0,
        height: 783.0,
    };
    c.bench_function("visibility_strategy", |b| {
        b.iter(|| {
            strategy.visible_tiles(
                black_box(Point2D {
                    top: 1_999_999.0,
                    left: 50_000.0,
                }),
                tile,
                Some(canvas),
                Some(viewport),
            )
        })
    });
}

/// Full structural rebuild (geometry, partition, tiling).
fn bench_structural_rebuild(c: &mut Criterion) {
    let cells: Vec<Vec<u32>> = (0..500)
        .map(|row| (0..100).map(|col| (row * col) as u32).collect())
        .collect();
    let mut view = build_view(1, 1);
    c.bench_function("structural_rebuild_500x100", |b| {
        b.iter(|| view.set_matrix(black_box(&cells)).expect("rebuild"))
    });
}

criterion_group!(
    benches,
    bench_stationary_tick,
    bench_alternating_tick,
    bench_visibility_strategy,
    bench_structural_rebuild,
);

criterion_main!(benches);
