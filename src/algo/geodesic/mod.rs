//! Distance fields on meshes.
//!
//! The cut-graph construction needs, for every vertex, the length of the
//! shortest edge path to the nearest constrained vertex (a feature vertex or
//! a singularity). [`distance_to_constraints`] computes exactly that with a
//! multi-source Dijkstra over the mesh edges.
//!
//! # Example
//!
//! ```
//! use seamcut::prelude::*;
//! use seamcut::algo::geodesic::{distance_to_constraints, DistanceOptions};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let triangles = [[0, 1, 2], [0, 2, 3]];
//! let mesh: TriMesh = build_from_triangles(&vertices, &triangles, &[[0, 1]]).unwrap();
//!
//! let field = distance_to_constraints(&mesh, &DistanceOptions::default());
//! assert_eq!(field.distance(VertexId::new(0)), 0.0);
//! assert_eq!(field.distance(VertexId::new(3)), 1.0);
//! ```

mod dijkstra;

use std::marker::PhantomData;

pub use dijkstra::{dijkstra_multiple, distance_to_constraints, DistanceOptions};

use crate::mesh::{MeshIndex, TriMesh, TriangleId, VertexId};

/// Per-vertex distance to the nearest source.
///
/// Scoped to the mesh it was computed on: vertex ids index into that mesh,
/// and any topology change invalidates the field.
#[derive(Debug, Clone)]
pub struct DistanceField<I: MeshIndex = u32> {
    /// Distance from the nearest source to each vertex.
    /// `f64::INFINITY` if the vertex is unreachable.
    distances: Vec<f64>,

    /// Number of distinct sources the field was seeded with.
    num_sources: usize,

    _marker: PhantomData<I>,
}

impl<I: MeshIndex> DistanceField<I> {
    pub(crate) fn new(distances: Vec<f64>, num_sources: usize) -> Self {
        Self {
            distances,
            num_sources,
            _marker: PhantomData,
        }
    }

    /// A field with every vertex unreachable.
    pub fn unreachable(num_vertices: usize) -> Self {
        Self::new(vec![f64::INFINITY; num_vertices], 0)
    }

    /// Get the distance to a vertex.
    ///
    /// Returns `f64::INFINITY` if the vertex is unreachable from every source.
    #[inline]
    pub fn distance(&self, v: VertexId<I>) -> f64 {
        self.distances[v.index()]
    }

    /// Get all distances as a slice.
    #[inline]
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Get the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Number of sources the field was seeded with.
    #[inline]
    pub fn num_sources(&self) -> usize {
        self.num_sources
    }

    /// Mean of the distances at the three corners of a triangle.
    pub fn triangle_mean(&self, mesh: &TriMesh<I>, t: TriangleId<I>) -> f64 {
        let [v0, v1, v2] = mesh.triangle(t);
        (self.distance(v0) + self.distance(v1) + self.distance(v2)) / 3.0
    }

    /// Find the vertex with the maximum finite distance.
    ///
    /// Returns `None` if every vertex is a source or unreachable.
    pub fn farthest_vertex(&self) -> Option<(VertexId<I>, f64)> {
        let mut max_dist = 0.0;
        let mut max_vertex = None;

        for (i, &d) in self.distances.iter().enumerate() {
            if d.is_finite() && d > max_dist {
                max_dist = d;
                max_vertex = Some(i);
            }
        }

        max_vertex.map(|i| (VertexId::new(i), max_dist))
    }

    /// Check if a vertex is reachable from a source.
    #[inline]
    pub fn is_reachable(&self, v: VertexId<I>) -> bool {
        self.distances[v.index()].is_finite()
    }

    /// Count the number of reachable vertices.
    pub fn reachable_count(&self) -> usize {
        self.distances.iter().filter(|d| d.is_finite()).count()
    }

    /// Iterate over all vertices with their distances.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId<I>, f64)> + '_ {
        self.distances
            .iter()
            .enumerate()
            .map(|(i, &d)| (VertexId::new(i), d))
    }

    /// Iterate over only reachable vertices with their distances.
    pub fn reachable_iter(&self) -> impl Iterator<Item = (VertexId<I>, f64)> + '_ {
        self.iter().filter(|(_, d)| d.is_finite())
    }
}
