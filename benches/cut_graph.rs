//! Benchmarks for the cut-graph stages.

use criterion::{criterion_group, criterion_main, Criterion};
use nalgebra::Point3;
use seamcut::algo::cut_graph::{build_spanning_forest, trim_cut_graph, SpanningOptions};
use seamcut::algo::geodesic::{distance_to_constraints, DistanceOptions};
use seamcut::prelude::*;

/// Grid of `n` x `n` cells with a feature line across the middle row and a
/// singularity in each half.
fn create_grid_mesh(n: usize) -> TriMesh {
    let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
    let mut faces = Vec::with_capacity(n * n * 2);

    for j in 0..=n {
        for i in 0..=n {
            vertices.push(Point3::new(i as f64, j as f64, 0.0));
        }
    }

    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;

            faces.push([v00, v10, v11]);
            faces.push([v00, v11, v01]);
        }
    }

    let row = (n / 2) * (n + 1);
    let lines: Vec<[usize; 2]> = (0..n).map(|i| [row + i, row + i + 1]).collect();

    let mut mesh: TriMesh = build_from_triangles(&vertices, &faces, &lines).unwrap();
    let quarter = (n / 4) * (n + 1) + n / 2;
    let three_quarters = (3 * n / 4) * (n + 1) + n / 2;
    mesh.set_singularity(VertexId::new(quarter), SingularityIndex::Three).unwrap();
    mesh.set_singularity(VertexId::new(three_quarters), SingularityIndex::Five).unwrap();
    mesh
}

fn bench_feature_cut(c: &mut Criterion) {
    let mesh = create_grid_mesh(50);

    c.bench_function("cut_along_features_50x50", |b| {
        b.iter(|| cut_along_features(&mesh).unwrap());
    });
}

fn bench_stages(c: &mut Criterion) {
    let mesh = cut_along_features(&create_grid_mesh(50)).unwrap().into_mesh();
    let field = distance_to_constraints(&mesh, &DistanceOptions::default());
    let forest = build_spanning_forest(&mesh, &field, &SpanningOptions::default());

    c.bench_function("distance_to_constraints_50x50", |b| {
        b.iter(|| distance_to_constraints(&mesh, &DistanceOptions::default()));
    });

    c.bench_function("spanning_forest_50x50", |b| {
        b.iter(|| build_spanning_forest(&mesh, &field, &SpanningOptions::default()));
    });

    c.bench_function("trim_cut_graph_50x50", |b| {
        b.iter(|| trim_cut_graph(&mesh, forest.candidates()));
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let mesh = create_grid_mesh(50);

    c.bench_function("compute_cut_graph_50x50", |b| {
        b.iter(|| compute_cut_graph(&mesh, &CutGraphOptions::default()).unwrap());
    });
}

criterion_group!(benches, bench_feature_cut, bench_stages, bench_pipeline);
criterion_main!(benches);
