//! # Seamcut
//!
//! Cut graphs on triangle meshes with feature curves and singularities.
//!
//! Quad-layout and conformal parametrization methods need a surface that is
//! a topological disk whose boundary passes through every singular vertex.
//! Seamcut computes the set of mesh edges along which to slit the surface:
//!
//! 1. The mesh is cut open along its feature curves by duplicating vertices.
//! 2. A distance field to the nearest feature vertex or singularity is
//!    computed on the cut mesh.
//! 3. A spanning forest of the dual graph is grown from the triangles
//!    farthest from those constraints; the edges it never crosses are the
//!    candidate cut.
//! 4. Dangling candidate branches that do not end at a singularity are
//!    trimmed away.
//!
//! ## Features
//!
//! - **Indexed triangle mesh**: dense arenas with type-safe indices
//! - **Flexible indexing**: Support for 16-bit, 32-bit, and 64-bit indices
//! - **Model input**: surfaces, curves and singularity groups of a meshed CAD model
//! - **Darboux frames**: boundary frames on the feature vertices of the cut mesh
//!
//! ## Quick Start
//!
//! ```
//! use seamcut::prelude::*;
//! use nalgebra::Point3;
//!
//! // Octahedron
//! let vertices = vec![
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(-1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(0.0, -1.0, 0.0),
//!     Point3::new(0.0, 0.0, 1.0),
//!     Point3::new(0.0, 0.0, -1.0),
//! ];
//! let faces = vec![
//!     [0, 2, 4], [2, 1, 4], [1, 3, 4], [3, 0, 4],
//!     [2, 0, 5], [1, 2, 5], [3, 1, 5], [0, 3, 5],
//! ];
//! let mut mesh: TriMesh = build_from_triangles(&vertices, &faces, &[]).unwrap();
//!
//! // Two singular poles
//! mesh.set_singularity(VertexId::new(4), SingularityIndex::Three).unwrap();
//! mesh.set_singularity(VertexId::new(5), SingularityIndex::Three).unwrap();
//!
//! let result = compute_cut_graph(&mesh, &CutGraphOptions::default()).unwrap();
//!
//! // A single path from pole to pole
//! let degrees = result.cut_graph.degrees(&result.mesh);
//! assert!(degrees.values().all(|&d| d <= 2));
//! assert_eq!(
//!     result.cut_graph.leaves(&result.mesh),
//!     vec![VertexId::new(4), VertexId::new(5)]
//! );
//! ```
//!
//! ## Building from a model
//!
//! ```
//! use seamcut::prelude::*;
//! use nalgebra::Point3;
//!
//! let model = SurfaceModel {
//!     points: vec![
//!         ModelPoint::new(Point3::new(0.0, 0.0, 0.0)),
//!         ModelPoint::new(Point3::new(1.0, 0.0, 0.0)),
//!         ModelPoint::new(Point3::new(1.0, 1.0, 0.0)),
//!         ModelPoint::new(Point3::new(0.0, 1.0, 0.0)),
//!     ],
//!     surfaces: vec![SurfacePatch {
//!         tag: 1,
//!         triangles: vec![[0, 1, 2], [0, 2, 3]],
//!         curves: vec![7],
//!     }],
//!     curves: vec![FeatureCurve { tag: 7, segments: vec![[0, 2]] }],
//!     groups: vec![PhysicalGroup {
//!         name: "SINGULARITY_OF_INDEX_FIVE".to_string(),
//!         points: vec![PointEntity { tag: 1, vertices: vec![1] }],
//!     }],
//! };
//!
//! let mesh: TriMesh = TriMesh::from_model(&model).unwrap();
//! assert_eq!(mesh.num_feature_edges(), 1);
//! assert_eq!(mesh.singularity(VertexId::new(1)), Some(SingularityIndex::Five));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use seamcut::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::cut_graph::CutGraph;
    pub use crate::algo::feature_cut::{cut_along_features, FeatureCut};
    pub use crate::algo::pipeline::{compute_cut_graph, CutGraphOptions, CutGraphResult};
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_from_triangles, to_face_vertex, EdgeId, FeatureCurve, MeshIndex, ModelPoint,
        PatchMesh, PhysicalGroup, PointEntity, SingularityIndex, SurfaceModel, SurfacePatch,
        TriMesh, TriangleId, VertexId,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;
