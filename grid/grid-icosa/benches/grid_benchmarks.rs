//! Benchmarks for grid generation and hashing.
//!
//! Run with: cargo bench -p grid-icosa
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p grid-icosa -- --save-baseline main
//! 2. After changes: cargo bench -p grid-icosa -- --baseline main

#![allow(missing_docs, clippy::unwrap_used, clippy::cast_possible_truncation)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use grid_icosa::{GridConfig, IcosahedronMesh, generate_all_phexes};
use grid_types::{Point3, Resolution, from_coordinates};

// =============================================================================
// Fixtures
// =============================================================================

/// Sample surface points spread over both hemispheres.
fn sample_points(radius: f64) -> Vec<Point3<f64>> {
    let mut points = Vec::new();
    for lat in (-80..=80).step_by(20) {
        for lon in (-170..=170).step_by(40) {
            points.push(
                from_coordinates(f64::from(lat), f64::from(lon), radius)
                    .unwrap()
                    .position,
            );
        }
    }
    points
}

// =============================================================================
// Generation
// =============================================================================

fn bench_all_points(c: &mut Criterion) {
    let parallel = IcosahedronMesh::new(GridConfig::default()).unwrap();
    let sequential = IcosahedronMesh::new(GridConfig::default().with_parallel(false)).unwrap();

    let mut group = c.benchmark_group("all_points");
    for value in [4, 16, 32] {
        let resolution = Resolution::new(value).unwrap();
        group.throughput(Throughput::Elements(resolution.point_count() as u64));

        group.bench_with_input(BenchmarkId::new("parallel", value), &resolution, |b, &r| {
            b.iter(|| parallel.all_points(black_box(r)));
        });
        group.bench_with_input(BenchmarkId::new("sequential", value), &resolution, |b, &r| {
            b.iter(|| sequential.all_points(black_box(r)));
        });
    }
    group.finish();
}

fn bench_phexes(c: &mut Criterion) {
    let mesh = IcosahedronMesh::new(GridConfig::default()).unwrap();
    let grid = mesh.all_points(Resolution::new(8).unwrap());

    c.bench_function("generate_all_phexes_res8", |b| {
        b.iter(|| generate_all_phexes(black_box(&grid)));
    });
}

// =============================================================================
// Hashing
// =============================================================================

fn bench_hashing(c: &mut Criterion) {
    let mesh = IcosahedronMesh::new(GridConfig::default()).unwrap();
    let points = sample_points(mesh.config().radius);

    let mut group = c.benchmark_group("hashing");
    group.throughput(Throughput::Elements(points.len() as u64));

    for value in [1, 64, 4096] {
        let resolution = Resolution::new(value).unwrap();
        group.bench_with_input(BenchmarkId::new("generate_hash", value), &resolution, |b, &r| {
            b.iter(|| {
                for p in &points {
                    let _ = black_box(mesh.generate_hash(p, r));
                }
            });
        });

        let hashes: Vec<String> = points
            .iter()
            .filter_map(|p| mesh.generate_hash(p, resolution).ok())
            .collect();
        group.bench_with_input(BenchmarkId::new("parse_hash", value), &hashes, |b, hashes| {
            b.iter(|| {
                for h in hashes {
                    let _ = black_box(mesh.parse_hash(h));
                }
            });
        });
    }
    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_all_points, bench_phexes, bench_hashing);
criterion_main!(benches);
