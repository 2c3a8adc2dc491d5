//! Error types for seamcut.
//!
//! Every variant is a fatal condition: the input mesh does not satisfy a
//! structural precondition and the pipeline stops. Recoverable degenerate
//! geometry is reported through `log::warn!` instead.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while building meshes or cut graphs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// A triangle or curve segment references an invalid vertex index.
    #[error("element {element} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The element (triangle or segment) index.
        element: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A vertex id does not belong to the mesh.
    #[error("vertex {vertex} is out of range for a mesh of {num_vertices} vertices")]
    VertexOutOfRange {
        /// The vertex index.
        vertex: usize,
        /// Number of vertices in the mesh.
        num_vertices: usize,
    },

    /// A triangle has duplicate vertex indices.
    #[error("triangle {triangle} is degenerate (has duplicate vertices)")]
    DegenerateTriangle {
        /// The triangle index.
        triangle: usize,
    },

    /// An edge has more than two incident triangles.
    #[error("edge ({v0}, {v1}) has more than two incident triangles")]
    NonManifoldEdge {
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
    },

    /// A curve segment is not an edge of any triangle.
    #[error("cannot find feature edge ({v0}, {v1}) in mesh edges")]
    FeatureEdgeNotFound {
        /// First vertex of the segment.
        v0: usize,
        /// Second vertex of the segment.
        v1: usize,
    },

    /// A triangle edge is missing from the derived edge set.
    #[error("reached edge ({v0}, {v1}) not listed in the edge set")]
    MissingEdge {
        /// First vertex of the edge.
        v0: usize,
        /// Second vertex of the edge.
        v1: usize,
    },

    /// The requested surface patch does not exist in the model.
    #[error("model has no surface with tag {tag}")]
    UnknownSurface {
        /// The surface tag.
        tag: i32,
    },

    /// A vertex is designated as two different singularities.
    #[error("vertex {vertex} is both a singularity of index {first} and of index {second}")]
    ConflictingSingularity {
        /// The vertex index.
        vertex: usize,
        /// Index from the first group naming the vertex.
        first: i32,
        /// Index from the conflicting group.
        second: i32,
    },

    /// A feature vertex does not have exactly two incident feature edges.
    #[error("feature vertex {vertex} has {count} incident feature edges, expected 2")]
    FeatureValence {
        /// The vertex index.
        vertex: usize,
        /// Number of incident feature edges.
        count: usize,
    },

    /// A feature edge still has two incident triangles.
    #[error("mesh is not split along feature edges at vertex {vertex}")]
    NotSplitAlongFeatures {
        /// The vertex index.
        vertex: usize,
    },

    /// No non-feature edge at the vertex to orient its frame against.
    #[error("cannot find reference edge for orientability at vertex {vertex}")]
    MissingReferenceEdge {
        /// The vertex index.
        vertex: usize,
    },
}
