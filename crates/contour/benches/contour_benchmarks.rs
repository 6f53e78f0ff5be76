//! Benchmarks for contour extraction.
//!
//! Run with: cargo bench --package contour --bench contour_benchmarks

use contour::{
    connect_segments, extract, extract_par, generate_contour_levels, march_level, smooth_polyline,
    Elevation, Grid, Planar, Spacing,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use test_utils::{create_hash_noise_grid, create_wave_grid};

/// Wave field with deterministic noise (more contour segments).
fn generate_noisy_field(width: usize, height: usize) -> Vec<f32> {
    create_wave_grid(width, height, 0.0)
        .iter()
        .zip(create_hash_noise_grid(width, height, 42))
        .map(|(&v, noise)| v + noise / 10.0 - 5.0)
        .collect()
}

fn grid(width: usize, height: usize, data: Vec<f32>) -> Grid {
    Grid::new(width, height, data).expect("benchmark grid dimensions")
}

// =============================================================================
// CONTOUR LEVEL GENERATION BENCHMARKS
// =============================================================================

fn bench_generate_contour_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_contour_levels");

    let ranges = [
        (0.0f32, 100.0, 10.0, "0-100_by_10"),
        (0.0f32, 100.0, 2.0, "0-100_by_2"),
        (-50.0f32, 50.0, 5.0, "neg50-50_by_5"),
    ];

    for (min, max, interval, name) in ranges {
        group.bench_with_input(
            BenchmarkId::new("levels", name),
            &(min, max, interval),
            |b, &(min, max, interval)| {
                b.iter(|| generate_contour_levels(black_box(min), black_box(max), black_box(interval)));
            },
        );
    }

    group.finish();
}

// =============================================================================
// SINGLE LEVEL BENCHMARKS
// =============================================================================

fn bench_march_level(c: &mut Criterion) {
    let mut group = c.benchmark_group("march_level");

    let sizes = [(64, 64), (128, 128), (256, 256)];

    for (width, height) in sizes {
        let smooth = grid(width, height, create_wave_grid(width, height, 0.0));
        let noisy = grid(width, height, generate_noisy_field(width, height));

        group.throughput(Throughput::Elements((width * height) as u64));

        group.bench_with_input(
            BenchmarkId::new("smooth_planar", format!("{}x{}", width, height)),
            &smooth,
            |b, g| {
                b.iter(|| march_level(black_box(g), &Planar::default(), black_box(50.0), 0));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("noisy_planar", format!("{}x{}", width, height)),
            &noisy,
            |b, g| {
                b.iter(|| march_level(black_box(g), &Planar::default(), black_box(50.0), 0));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("smooth_elevation", format!("{}x{}", width, height)),
            &smooth,
            |b, g| {
                let embedding = Elevation::new(Spacing::uniform(10.0));
                b.iter(|| march_level(black_box(g), &embedding, black_box(50.0), 0));
            },
        );
    }

    group.finish();
}

// =============================================================================
// MULTI-LEVEL BENCHMARKS
// =============================================================================

fn bench_multi_level(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_level");
    group.sample_size(30);

    let levels = generate_contour_levels(0.0, 100.0, 5.0);

    for (width, height) in [(128, 128), (256, 256)] {
        let g = grid(width, height, create_wave_grid(width, height, 0.5));
        group.throughput(Throughput::Elements((width * height * levels.len()) as u64));

        group.bench_with_input(
            BenchmarkId::new("sequential", format!("{}x{}", width, height)),
            &g,
            |b, g| b.iter(|| extract(black_box(g), &Planar::default(), &levels)),
        );

        group.bench_with_input(
            BenchmarkId::new("parallel", format!("{}x{}", width, height)),
            &g,
            |b, g| b.iter(|| extract_par(black_box(g), &Planar::default(), &levels)),
        );
    }

    group.finish();
}

// =============================================================================
// POLYLINE BENCHMARKS
// =============================================================================

fn bench_polylines(c: &mut Criterion) {
    let mut group = c.benchmark_group("polylines");

    let g = grid(128, 128, create_wave_grid(128, 128, 0.0));
    let segments = march_level(&g, &Planar::default(), 50.0, 0);

    group.bench_function("connect_128x128", |b| {
        b.iter(|| connect_segments(black_box(&segments), 1e-3));
    });

    let lines = connect_segments(&segments, 1e-3);
    group.bench_function("smooth_2_passes", |b| {
        b.iter(|| {
            lines
                .iter()
                .map(|l| smooth_polyline(black_box(l), 2))
                .collect::<Vec<_>>()
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_generate_contour_levels,
    bench_march_level,
    bench_multi_level,
    bench_polylines,
);
criterion_main!(benches);
