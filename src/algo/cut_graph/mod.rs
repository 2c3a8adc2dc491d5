//! Cut-graph construction.
//!
//! A cut graph is a set of mesh edges along which the surface must be slit
//! to become a topological disk whose boundary passes through every
//! singularity. It is built in two steps:
//!
//! 1. [`build_spanning_forest`] grows a spanning forest over the dual graph
//!    (triangles joined through non-feature edges), visiting triangles far
//!    from features and singularities first. Every edge the forest does not
//!    cross stays a candidate.
//! 2. [`trim_cut_graph`] repeatedly removes dangling candidate edges whose
//!    free end is not a singularity.
//!
//! # Example
//!
//! ```
//! use seamcut::prelude::*;
//! use seamcut::algo::cut_graph::{build_spanning_forest, trim_cut_graph, SpanningOptions};
//! use seamcut::algo::geodesic::{distance_to_constraints, DistanceOptions};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let mesh: TriMesh = build_from_triangles(&vertices, &[[0, 1, 2], [0, 2, 3]], &[]).unwrap();
//!
//! let field = distance_to_constraints(&mesh, &DistanceOptions::default());
//! let forest = build_spanning_forest(&mesh, &field, &SpanningOptions::default());
//! assert_eq!(forest.num_connections(), 1);
//!
//! let cut_graph = trim_cut_graph(&mesh, forest.candidates());
//! assert!(cut_graph.is_empty());
//! ```

mod spanning;
mod trim;

use std::collections::{BTreeMap, BTreeSet};

pub use spanning::{build_spanning_forest, GrowthOrder, SpanningForest, SpanningOptions};
pub use trim::trim_cut_graph;

use crate::mesh::{EdgeId, MeshIndex, TriMesh, VertexId};

/// The trimmed cut graph: a set of edges of the mesh it was built on.
#[derive(Debug, Clone, Default)]
pub struct CutGraph<I: MeshIndex = u32> {
    edges: BTreeSet<EdgeId<I>>,
    removed: usize,
}

impl<I: MeshIndex> CutGraph<I> {
    pub(crate) fn new(edges: BTreeSet<EdgeId<I>>, removed: usize) -> Self {
        Self { edges, removed }
    }

    /// An empty cut graph.
    pub fn empty() -> Self {
        Self::new(BTreeSet::new(), 0)
    }

    /// Edges of the cut graph in id order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeId<I>> + '_ {
        self.edges.iter().copied()
    }

    /// Get the number of edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Check if the cut graph has no edge.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Check whether an edge is part of the cut graph.
    #[inline]
    pub fn contains(&self, e: EdgeId<I>) -> bool {
        self.edges.contains(&e)
    }

    /// Number of candidate edges removed by trimming.
    #[inline]
    pub fn num_removed(&self) -> usize {
        self.removed
    }

    /// The edges as canonical vertex pairs.
    pub fn vertex_pairs(&self, mesh: &TriMesh<I>) -> Vec<(VertexId<I>, VertexId<I>)> {
        self.edges
            .iter()
            .map(|&e| {
                let [v0, v1] = mesh.edge_vertices(e);
                (v0, v1)
            })
            .collect()
    }

    /// Number of cut-graph edges at each vertex the graph touches.
    pub fn degrees(&self, mesh: &TriMesh<I>) -> BTreeMap<VertexId<I>, usize> {
        let mut degrees = BTreeMap::new();
        for &e in &self.edges {
            for v in mesh.edge_vertices(e) {
                *degrees.entry(v).or_insert(0) += 1;
            }
        }
        degrees
    }

    /// Number of cut-graph edges at `v`.
    pub fn degree(&self, mesh: &TriMesh<I>, v: VertexId<I>) -> usize {
        self.edges
            .iter()
            .filter(|&&e| mesh.edge(e).contains(v))
            .count()
    }

    /// Vertices with exactly one cut-graph edge.
    pub fn leaves(&self, mesh: &TriMesh<I>) -> Vec<VertexId<I>> {
        self.degrees(mesh)
            .into_iter()
            .filter(|&(_, d)| d == 1)
            .map(|(v, _)| v)
            .collect()
    }
}
