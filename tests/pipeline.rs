use std::collections::BTreeSet;

use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use seamcut::algo::cut_graph::{
    build_spanning_forest, trim_cut_graph, GrowthOrder, SpanningOptions,
};
use seamcut::algo::geodesic::{distance_to_constraints, DistanceOptions};
use seamcut::prelude::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn grid_points(n: usize) -> Vec<Point3<f64>> {
    let mut vertices = Vec::new();
    for j in 0..=n {
        for i in 0..=n {
            vertices.push(Point3::new(i as f64, j as f64, 0.0));
        }
    }
    vertices
}

fn grid_triangles(n: usize) -> Vec<[usize; 3]> {
    let mut faces = Vec::new();
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
    faces
}

fn boundary_segments(n: usize) -> Vec<[usize; 2]> {
    let w = n + 1;
    let mut segments = Vec::new();
    for i in 0..n {
        segments.push([i, i + 1]);
        segments.push([i + 1 + n * w, i + n * w]);
        segments.push([i * w, (i + 1) * w]);
        segments.push([(i + 1) * w + n, i * w + n]);
    }
    segments
}

fn octahedron() -> TriMesh {
    let vertices = vec![
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(-1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(0.0, -1.0, 0.0),
        Point3::new(0.0, 0.0, 1.0),
        Point3::new(0.0, 0.0, -1.0),
    ];
    let faces = vec![
        [0, 2, 4],
        [2, 1, 4],
        [1, 3, 4],
        [3, 0, 4],
        [2, 0, 5],
        [1, 2, 5],
        [3, 1, 5],
        [0, 3, 5],
    ];
    build_from_triangles(&vertices, &faces, &[]).unwrap()
}

/// 4x4 grid: curve 1 is the outer boundary, curve 2 the middle row, and one
/// singularity sits in each half.
fn split_grid_model() -> SurfaceModel {
    let n = 4;
    let middle: Vec<[usize; 2]> = (10..14).map(|i| [i, i + 1]).collect();
    SurfaceModel {
        points: grid_points(n).into_iter().map(ModelPoint::new).collect(),
        surfaces: vec![SurfacePatch {
            tag: 1,
            triangles: grid_triangles(n),
            curves: vec![1, 2],
        }],
        curves: vec![
            FeatureCurve {
                tag: 1,
                segments: boundary_segments(n),
            },
            FeatureCurve {
                tag: 2,
                segments: middle,
            },
        ],
        groups: vec![
            PhysicalGroup {
                name: "SINGULARITY_OF_INDEX_FIVE".to_string(),
                points: vec![PointEntity {
                    tag: 1,
                    vertices: vec![6],
                }],
            },
            PhysicalGroup {
                name: "SINGULARITY_OF_INDEX_THREE".to_string(),
                points: vec![PointEntity {
                    tag: 2,
                    vertices: vec![18],
                }],
            },
        ],
    }
}

#[test]
fn unit_square_has_empty_cut_graph() {
    init_logger();
    let mesh: TriMesh = build_from_triangles(&grid_points(1), &grid_triangles(1), &[]).unwrap();

    let result = compute_cut_graph(&mesh, &CutGraphOptions::default()).unwrap();
    assert!(result.cut_graph.is_empty());

    // Running the stages by hand gives the same answer.
    let field = distance_to_constraints(&mesh, &DistanceOptions::default());
    let forest = build_spanning_forest(&mesh, &field, &SpanningOptions::default());
    assert_eq!(forest.num_connections(), 1);
    assert!(trim_cut_graph(&mesh, forest.candidates()).is_empty());
}

#[test]
fn two_singularities_are_joined_by_a_simple_path() {
    init_logger();
    let mut mesh = octahedron();
    mesh.set_singularity(VertexId::new(4), SingularityIndex::Three).unwrap();
    mesh.set_singularity(VertexId::new(5), SingularityIndex::Three).unwrap();

    for order in [GrowthOrder::FarthestFirst, GrowthOrder::NearestFirst] {
        let options =
            CutGraphOptions::default().with_spanning(SpanningOptions::default().with_order(order));
        let result = compute_cut_graph(&mesh, &options).unwrap();

        assert_eq!(result.num_components, 1);
        assert_eq!(result.num_connections, 7);
        // Closed surface: the uncrossed edges span every vertex.
        assert_eq!(result.num_candidates, 5);

        let degrees = result.cut_graph.degrees(&result.mesh);
        assert!(degrees.values().all(|&d| d <= 2));
        assert_eq!(degrees.len(), result.cut_graph.len() + 1);
        assert_eq!(
            result.cut_graph.leaves(&result.mesh),
            vec![VertexId::new(4), VertexId::new(5)]
        );
    }
}

#[test]
fn singularities_on_an_open_patch_reach_the_boundary() {
    init_logger();
    let n = 4;
    let mut mesh: TriMesh = build_from_triangles(&grid_points(n), &grid_triangles(n), &[]).unwrap();
    mesh.set_singularity(VertexId::new(6), SingularityIndex::Five).unwrap();
    mesh.set_singularity(VertexId::new(18), SingularityIndex::Three).unwrap();

    for order in [GrowthOrder::FarthestFirst, GrowthOrder::NearestFirst] {
        let options =
            CutGraphOptions::default().with_spanning(SpanningOptions::default().with_order(order));
        let result = compute_cut_graph(&mesh, &options).unwrap();
        let cut = &result.mesh;
        let on_border = |v: VertexId| {
            let p = cut.position(v);
            p.x == 0.0 || p.y == 0.0 || p.x == n as f64 || p.y == n as f64
        };

        assert_eq!(result.num_components, 1);
        assert!(!result.cut_graph.is_empty());
        for v in [VertexId::new(6), VertexId::new(18)] {
            assert!(result.cut_graph.degree(cut, v) >= 1, "{:?} is not on the cut graph", v);
        }
        for v in result.cut_graph.leaves(cut) {
            assert!(cut.is_singular(v) || on_border(v), "leaf {:?} dangles", v);
        }
        for e in result.cut_graph.edges() {
            assert!(!cut.is_boundary_edge(e));
        }
    }
}

#[test]
fn model_without_triangles_gives_empty_cut_graph() {
    init_logger();
    let mesh: TriMesh = TriMesh::from_model(&SurfaceModel::default()).unwrap();
    let result = compute_cut_graph(&mesh, &CutGraphOptions::default()).unwrap();

    assert!(result.cut_graph.is_empty());
    assert_eq!(result.num_candidates, 0);
    assert!(result.origin.is_empty());
}

#[test]
fn patch_of_a_two_surface_model() {
    init_logger();
    // A second 1x1 surface to the right of the split grid, sharing its
    // right border column.
    let mut model = split_grid_model();
    let first = model.points.len();
    for j in 0..=4 {
        model.points.push(ModelPoint::new(Point3::new(5.0, j as f64, 0.0)));
    }
    let triangles = (0..4)
        .flat_map(|j| {
            let (a, b) = (j * 5 + 4, (j + 1) * 5 + 4);
            let (c, d) = (first + j, first + j + 1);
            [[a, c, d], [a, d, b]]
        })
        .collect();
    model.surfaces.push(SurfacePatch {
        tag: 2,
        triangles,
        curves: Vec::new(),
    });

    let patch: PatchMesh = TriMesh::from_patch(&model, 1).unwrap();
    assert_eq!(patch.mesh().num_vertices(), 25);
    assert_eq!(patch.model_vertices(), (0..25).collect::<Vec<_>>().as_slice());

    let result = compute_cut_graph(patch.mesh(), &CutGraphOptions::default()).unwrap();
    assert_eq!(result.distances.reachable_count(), result.mesh.num_vertices());
    assert_eq!(result.num_components, 2);

    let strip: PatchMesh = TriMesh::from_patch(&model, 2).unwrap();
    assert_eq!(strip.mesh().num_vertices(), 10);
    assert_eq!(strip.model_vertex(VertexId::new(0)), 4);
    assert_eq!(strip.mesh().num_singularities(), 0);
}

#[test]
fn feature_grid_end_to_end() {
    init_logger();
    let model = split_grid_model();
    let mesh: TriMesh = TriMesh::from_model(&model).unwrap();
    assert_eq!(mesh.num_singularities(), 2);
    assert_eq!(mesh.num_feature_edges(), 20);

    let result = compute_cut_graph(&mesh, &CutGraphOptions::default()).unwrap();
    let cut = &result.mesh;

    // The middle row, end points included, is duplicated.
    assert_eq!(cut.num_vertices(), mesh.num_vertices() + 5);
    let copied: BTreeSet<usize> = (25..30).map(|v| result.origin[v].index()).collect();
    assert_eq!(copied, (10..15).collect());
    assert_eq!(cut.num_feature_edges(), 24);

    // Each half is its own tree.
    assert_eq!(result.num_components, 2);
    assert_eq!(result.num_connections, cut.num_triangles() - 2);

    // Features stay in the cut graph and singularities hang off them.
    for e in cut.feature_edges() {
        assert!(result.cut_graph.contains(e));
    }
    for v in [VertexId::new(6), VertexId::new(18)] {
        assert_eq!(result.cut_graph.degree(cut, v), 1);
    }
    for v in result.cut_graph.leaves(cut) {
        assert!(cut.is_singular(v), "leaf {:?} is not singular", v);
    }

    // Distances are measured on the cut mesh.
    for v in cut.feature_vertices() {
        assert_eq!(result.distances.distance(v), 0.0);
    }
    assert_relative_eq!(result.distances.distance(VertexId::new(7)), 1.0);
}

#[test]
fn pipeline_is_deterministic() {
    let mesh: TriMesh = TriMesh::from_model(&split_grid_model()).unwrap();
    let a = compute_cut_graph(&mesh, &CutGraphOptions::default()).unwrap();
    let b = compute_cut_graph(&mesh, &CutGraphOptions::default()).unwrap();

    assert_eq!(
        a.cut_graph.edges().collect::<Vec<_>>(),
        b.cut_graph.edges().collect::<Vec<_>>()
    );
    assert_eq!(a.original_vertex_pairs(), b.original_vertex_pairs());
}

#[test]
fn darboux_frames_on_split_grid() {
    init_logger();
    let mesh: TriMesh = TriMesh::from_model(&split_grid_model()).unwrap();
    let options = CutGraphOptions::default().with_darboux_frames(true);
    let result = compute_cut_graph(&mesh, &options).unwrap();

    let frames = result.darboux_frames.unwrap();
    assert_eq!(frames.len(), result.mesh.feature_vertices().count());

    for frame in frames.values() {
        assert_relative_eq!(frame.normal, Vector3::z(), epsilon = 1e-10);
        assert_relative_eq!(frame.tangent.dot(&frame.inner_normal), 0.0, epsilon = 1e-10);
    }

    // The two copies of an interior middle-row vertex face opposite halves.
    for origin in 11..14 {
        let inner: Vec<Vector3<f64>> = frames
            .iter()
            .filter(|(v, _)| result.origin[v.index()].index() == origin)
            .map(|(_, frame)| frame.inner_normal)
            .collect();
        assert_eq!(inner.len(), 2);
        assert_relative_eq!(inner[0].y.abs(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(inner[0] + inner[1], Vector3::zeros(), epsilon = 1e-10);
    }
}

#[test]
fn small_index_type() {
    let mesh: TriMesh<u16> = TriMesh::from_model(&split_grid_model()).unwrap();
    let result = compute_cut_graph(&mesh, &CutGraphOptions::default()).unwrap();
    assert_eq!(result.num_components, 2);
}

#[test]
fn conflicting_singularity_is_rejected() {
    let mut model = split_grid_model();
    model.groups.push(PhysicalGroup {
        name: "SINGULARITY_OF_INDEX_SIX".to_string(),
        points: vec![PointEntity {
            tag: 3,
            vertices: vec![6],
        }],
    });

    let result: Result<TriMesh> = TriMesh::from_model(&model);
    assert_eq!(
        result.unwrap_err(),
        MeshError::ConflictingSingularity {
            vertex: 6,
            first: 1,
            second: 2
        }
    );
}

#[test]
fn segment_off_the_mesh_is_rejected() {
    // 0 and 8 share no triangle.
    let result: Result<TriMesh> =
        build_from_triangles(&grid_points(2), &grid_triangles(2), &[[0, 8]]);
    assert_eq!(
        result.unwrap_err(),
        MeshError::FeatureEdgeNotFound { v0: 0, v1: 8 }
    );
}
