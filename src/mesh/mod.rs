//! Core mesh data structures.
//!
//! This module provides the indexed triangle mesh used by every stage of the
//! cut-graph pipeline, together with the input model it is built from.
//!
//! # Overview
//!
//! The primary type is [`TriMesh`]. Vertices, edges and triangles live in
//! dense arenas addressed by type-safe indices:
//! - [`VertexId`] - Identifies a vertex
//! - [`EdgeId`] - Identifies an undirected edge
//! - [`TriangleId`] - Identifies a triangle
//!
//! These indices are generic over the underlying integer type ([`MeshIndex`] trait),
//! allowing you to choose `u16`, `u32`, or `u64` based on mesh size.
//!
//! Splitting a vertex is an index rewrite: a new vertex is pushed and the
//! corners of the affected triangles are re-pointed at it, after which the
//! edge maps are re-derived.
//!
//! # Construction
//!
//! ```
//! use seamcut::mesh::{build_from_triangles, TriMesh};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let triangles = vec![[0, 1, 2]];
//!
//! let mesh: TriMesh = build_from_triangles(&vertices, &triangles, &[]).unwrap();
//! assert_eq!(mesh.num_edges(), 3);
//! ```

mod builder;
mod index;
mod model;
mod trimesh;

pub use builder::{build_from_triangles, to_face_vertex, PatchMesh};
pub use index::{EdgeId, MeshIndex, TriangleId, VertexId};
pub use model::{
    EntityRef, FeatureCurve, ModelPoint, PhysicalGroup, PointEntity, SingularityIndex,
    SurfaceModel, SurfacePatch,
};
pub use trimesh::{edge_key, Edge, FeatureLine, TriMesh, Vertex};
