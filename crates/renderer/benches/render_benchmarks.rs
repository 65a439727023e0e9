//! Benchmarks for resampling, map rendering and image encoding.
//!
//! Run with: cargo bench --package renderer --bench render_benchmarks

use contour_common::Grid;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use renderer::encode::{encode_raster, OutputFormat};
use renderer::png;
use renderer::render::{render_contour_map, RenderConfig};
use renderer::resample::resample;
use test_utils::{grid_from_fn, terrain_grid};

/// Elevation-like grid with per-sample noise.
fn generate_elevation_grid(cols: usize, rows: usize) -> Grid {
    let mut rng = rand::thread_rng();
    let base = terrain_grid(cols, rows);
    let noise: Vec<f32> = (0..cols * rows).map(|_| rng.gen_range(-2.0..2.0)).collect();
    grid_from_fn(cols, rows, |x, y| base.get(x, y) + noise[y * cols + x])
}

// =============================================================================
// RESAMPLE BENCHMARKS
// =============================================================================

fn bench_resample(c: &mut Criterion) {
    let mut group = c.benchmark_group("resample");

    let scenarios = [
        // (src_cols, src_rows, dst_cols, dst_rows, name)
        (100, 100, 60, 60, "downscale_small"),
        (256, 256, 512, 512, "upscale_2x"),
        (512, 512, 256, 256, "downscale_2x"),
        (1000, 500, 200, 100, "wide_to_thumbnail"),
    ];

    for (src_cols, src_rows, dst_cols, dst_rows, name) in scenarios {
        let grid = terrain_grid(src_cols, src_rows);

        group.throughput(Throughput::Elements((dst_cols * dst_rows) as u64));
        group.bench_with_input(BenchmarkId::new(name, "bilinear"), &grid, |b, grid| {
            b.iter(|| resample(black_box(grid), dst_cols, dst_rows));
        });
    }

    group.finish();
}

// =============================================================================
// RENDER BENCHMARKS
// =============================================================================

fn bench_render_contour_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_contour_map");
    group.sample_size(20); // Slower benchmark

    let grids = [(60, 60), (128, 128), (256, 256)];

    for (cols, rows) in grids {
        let grid = generate_elevation_grid(cols, rows);
        let config = RenderConfig::default();

        group.throughput(Throughput::Elements((cols * rows) as u64));
        for step in [20.0f32, 5.0] {
            group.bench_with_input(
                BenchmarkId::new(format!("step_{}", step), format!("{}x{}", cols, rows)),
                &grid,
                |b, grid| {
                    b.iter(|| render_contour_map(black_box(grid), step, &config));
                },
            );
        }
    }

    group.finish();
}

fn bench_anti_alias_impact(c: &mut Criterion) {
    let mut group = c.benchmark_group("anti_alias_impact");
    group.sample_size(20);

    let grid = generate_elevation_grid(128, 128);

    for anti_alias in [false, true] {
        let config = RenderConfig {
            anti_alias,
            stroke_width: 2.0,
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::new("anti_alias", anti_alias), &config, |b, config| {
            b.iter(|| render_contour_map(black_box(&grid), 5.0, config));
        });
    }

    group.finish();
}

// =============================================================================
// ENCODING BENCHMARKS
// =============================================================================

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding");

    let grid = generate_elevation_grid(60, 60);
    let plain = render_contour_map(&grid, 5.0, &RenderConfig::default()).map(|m| m.raster);
    let smooth = render_contour_map(
        &grid,
        5.0,
        &RenderConfig {
            anti_alias: true,
            ..Default::default()
        },
    )
    .map(|m| m.raster);

    let (Ok(plain), Ok(smooth)) = (plain, smooth) else {
        return;
    };

    group.throughput(Throughput::Elements((plain.width() * plain.height()) as u64));

    group.bench_function("png_auto_plain", |b| {
        b.iter(|| encode_raster(black_box(&plain), OutputFormat::Png));
    });

    group.bench_function("png_auto_anti_aliased", |b| {
        b.iter(|| encode_raster(black_box(&smooth), OutputFormat::Png));
    });

    group.bench_function("png_truecolor", |b| {
        b.iter(|| png::create_png(black_box(plain.pixels()), plain.width(), plain.height()));
    });

    for quality in [50u8, 90] {
        group.bench_with_input(BenchmarkId::new("jpeg", quality), &quality, |b, &quality| {
            b.iter(|| encode_raster(black_box(&plain), OutputFormat::Jpeg { quality }));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_resample,
    bench_render_contour_map,
    bench_anti_alias_impact,
    bench_encoding,
);
criterion_main!(benches);
