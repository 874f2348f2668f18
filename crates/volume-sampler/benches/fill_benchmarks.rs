//! Benchmarks for filling texture buffers from sparse grids.
//!
//! Run with: cargo bench --package volume-sampler -- fill_buffer
//! Or: cargo bench --package volume-sampler --bench fill_benchmarks

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nalgebra::Vector3;
use test_utils::{bounds, grid_from_field, sphere_distance_field, transform_with_voxel_size};
use volume_sampler::{
    normalize_samples, DegenerateRangePolicy, LatticeExtents, SparseGrid, ValueRange, Volume,
    VolumeConfig,
};

/// Sphere distance field over the 16-cube, the usual shape of level-set input.
fn sphere_grid() -> Arc<SparseGrid> {
    Arc::new(grid_from_field(
        "bench_sphere",
        &bounds::cube_16(),
        transform_with_voxel_size(0.5),
        sphere_distance_field(Vector3::new(8.0, 8.0, 8.0), 6.0),
    ))
}

// =============================================================================
// FILL BUFFER BENCHMARKS
// =============================================================================

fn bench_fill_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_buffer");
    let grid = sphere_grid();

    let sizes = [(16, 16, 16), (64, 64, 64), (128, 128, 64)];

    for (width, height, depth) in sizes {
        let extents = LatticeExtents::new(width, height, depth).unwrap();
        let mut volume = Volume::new(grid.clone(), extents).unwrap();
        let mut buffer = vec![0.0f32; volume.required_samples()];

        group.throughput(Throughput::Elements(extents.cell_count() as u64));
        group.bench_function(
            BenchmarkId::new("sphere", format!("{}x{}x{}", width, height, depth)),
            |b| {
                b.iter(|| volume.fill_buffer(Some(black_box(buffer.as_mut_slice()))).unwrap());
            },
        );
    }

    group.finish();
}

// =============================================================================
// PARTITION SIZE BENCHMARKS
// =============================================================================

fn bench_partition_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition_size");
    let grid = sphere_grid();
    let extents = LatticeExtents::new(64, 64, 64).unwrap();

    group.throughput(Throughput::Elements(extents.cell_count() as u64));

    for partition_cells in [64, 1024, 4096, 65536] {
        let config = VolumeConfig {
            partition_cells,
            ..VolumeConfig::default()
        };
        let mut volume = Volume::with_config(grid.clone(), extents, config).unwrap();
        let mut buffer = vec![0.0f32; volume.required_samples()];

        group.bench_function(BenchmarkId::new("cells", partition_cells), |b| {
            b.iter(|| volume.fill_buffer(Some(black_box(buffer.as_mut_slice()))).unwrap());
        });
    }

    group.finish();
}

// =============================================================================
// NORMALIZE BENCHMARKS
// =============================================================================

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for samples in [64 * 64 * 64 * 4, 128 * 128 * 128 * 4] {
        let data: Vec<f32> = (0..samples).map(|i| (i % 1000) as f32).collect();
        let range: ValueRange = data.iter().copied().collect();

        group.throughput(Throughput::Elements(samples as u64));
        group.bench_with_input(BenchmarkId::new("unlerp", samples), &data, |b, data| {
            b.iter_batched_ref(
                || data.clone(),
                |buffer| normalize_samples(black_box(buffer), &range, DegenerateRangePolicy::Zero),
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fill_buffer, bench_partition_size, bench_normalize);
criterion_main!(benches);
