//! The full cut-graph pipeline.
//!
//! [`compute_cut_graph`] chains the stages in order:
//!
//! 1. cut the mesh open along its feature curves,
//! 2. compute the distance to the nearest feature vertex or singularity,
//! 3. grow the spanning forest over the dual graph,
//! 4. trim the uncrossed edges down to the cut graph,
//! 5. optionally compute Darboux frames on the feature vertices.
//!
//! Every result refers to the cut mesh, which is returned alongside the map
//! back to the input vertices.
//!
//! # Example
//!
//! ```
//! use seamcut::prelude::*;
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
//! let result = compute_cut_graph(&mesh, &CutGraphOptions::default()).unwrap();
//! assert!(result.cut_graph.is_empty());
//! ```

use std::collections::BTreeMap;

use crate::algo::cut_graph::{build_spanning_forest, trim_cut_graph, CutGraph, SpanningOptions};
use crate::algo::darboux::{darboux_frames, DarbouxFrame};
use crate::algo::feature_cut::cut_along_features;
use crate::algo::geodesic::{distance_to_constraints, DistanceField, DistanceOptions};
use crate::algo::inspect::{Inspector, Payload};
use crate::error::Result;
use crate::mesh::{MeshIndex, TriMesh, VertexId};

/// Options for [`compute_cut_graph`].
#[derive(Debug, Default)]
pub struct CutGraphOptions {
    /// Distance field options.
    pub distance: DistanceOptions,

    /// Spanning forest options.
    pub spanning: SpanningOptions,

    /// Whether to compute Darboux frames on the feature vertices of the
    /// cut mesh.
    pub darboux_frames: bool,

    /// Receives intermediate results.
    pub inspector: Inspector,
}

impl CutGraphOptions {
    /// Set the distance field options.
    pub fn with_distance(mut self, distance: DistanceOptions) -> Self {
        self.distance = distance;
        self
    }

    /// Set the spanning forest options.
    pub fn with_spanning(mut self, spanning: SpanningOptions) -> Self {
        self.spanning = spanning;
        self
    }

    /// Enable or disable Darboux frames.
    pub fn with_darboux_frames(mut self, enabled: bool) -> Self {
        self.darboux_frames = enabled;
        self
    }

    /// Set the inspector.
    pub fn with_inspector(mut self, inspector: Inspector) -> Self {
        self.inspector = inspector;
        self
    }
}

/// Everything the pipeline produced.
#[derive(Debug, Clone)]
pub struct CutGraphResult<I: MeshIndex = u32> {
    /// The mesh cut open along its feature curves.
    pub mesh: TriMesh<I>,

    /// Input vertex of each cut-mesh vertex.
    pub origin: Vec<VertexId<I>>,

    /// Distance of each cut-mesh vertex to the nearest feature vertex or
    /// singularity.
    pub distances: DistanceField<I>,

    /// Number of triangle connections made by the spanning forest.
    pub num_connections: usize,

    /// Number of trees in the spanning forest.
    pub num_components: usize,

    /// Number of candidate edges before trimming.
    pub num_candidates: usize,

    /// The trimmed cut graph, as edges of `mesh`.
    pub cut_graph: CutGraph<I>,

    /// Darboux frames, when requested.
    pub darboux_frames: Option<BTreeMap<VertexId<I>, DarbouxFrame>>,
}

impl<I: MeshIndex> CutGraphResult<I> {
    fn trivial(mesh: &TriMesh<I>) -> Self {
        Self {
            mesh: mesh.clone(),
            origin: mesh.vertex_ids().collect(),
            distances: DistanceField::unreachable(mesh.num_vertices()),
            num_connections: 0,
            num_components: 0,
            num_candidates: 0,
            cut_graph: CutGraph::empty(),
            darboux_frames: None,
        }
    }

    /// Cut-graph edges as pairs of input-mesh vertices.
    pub fn original_vertex_pairs(&self) -> Vec<(VertexId<I>, VertexId<I>)> {
        self.cut_graph
            .vertex_pairs(&self.mesh)
            .into_iter()
            .map(|(a, b)| (self.origin[a.index()], self.origin[b.index()]))
            .collect()
    }
}

/// Compute the cut graph of `mesh`.
///
/// A mesh without triangles, or without any feature edge and singularity,
/// has nothing to anchor a cut graph: a warning is logged and the result
/// carries an empty cut graph.
///
/// # Errors
///
/// Propagates topology errors from the feature cut and, when enabled, the
/// precondition errors of [`darboux_frames`].
pub fn compute_cut_graph<I: MeshIndex>(
    mesh: &TriMesh<I>,
    options: &CutGraphOptions,
) -> Result<CutGraphResult<I>> {
    if mesh.num_triangles() == 0 {
        log::warn!("Mesh has no triangles, cut graph is empty");
        return Ok(CutGraphResult::trivial(mesh));
    }
    if mesh.num_feature_edges() == 0 && mesh.num_singularities() == 0 {
        log::warn!("No feature edges and no singularities, cut graph is empty");
        return Ok(CutGraphResult::trivial(mesh));
    }
    let inspector = &options.inspector;

    log::info!("Cutting mesh on feature lines");
    let (cut_mesh, origin) = cut_along_features(mesh)?.into_parts();
    log::debug!(
        "cut mesh: {} vertices ({} new), {} edges, {} feature edges",
        cut_mesh.num_vertices(),
        cut_mesh.num_vertices() - mesh.num_vertices(),
        cut_mesh.num_edges(),
        cut_mesh.num_feature_edges()
    );
    inspector.emit(
        "normals",
        &Payload::Vectors(
            cut_mesh
                .vertex_ids()
                .map(|v| (*cut_mesh.position(v), *cut_mesh.vertex_normal(v)))
                .collect(),
        ),
    );

    log::info!("Computing distances");
    let distances = distance_to_constraints(&cut_mesh, &options.distance);
    let unreachable = count_unreachable(&cut_mesh, &distances);
    if unreachable > 0 {
        log::warn!(
            "{} vertices are not connected to any feature or singularity",
            unreachable
        );
    }
    inspector.emit(
        "distances",
        &Payload::vertex_scalars(
            &cut_mesh,
            distances.reachable_iter().map(|(v, _)| v),
            |v| distances.distance(v),
        ),
    );

    log::info!("Creating cut graph");
    let forest = build_spanning_forest(&cut_mesh, &distances, &options.spanning);
    let num_connections = forest.num_connections();
    let num_components = forest.num_components();
    let candidates = forest.into_candidates();
    inspector.emit(
        "cut_graph_candidates",
        &Payload::edge_lines(&cut_mesh, candidates.iter().copied()),
    );

    let cut_graph = trim_cut_graph(&cut_mesh, &candidates);
    inspector.emit("cut_graph", &Payload::edge_lines(&cut_mesh, cut_graph.edges()));
    log::debug!(
        "cut graph: {} edges kept, {} trimmed",
        cut_graph.len(),
        cut_graph.num_removed()
    );

    let frames = if options.darboux_frames {
        let frames = darboux_frames(&cut_mesh)?;
        inspector.emit(
            "darboux_frames",
            &Payload::Vectors(
                frames
                    .iter()
                    .flat_map(|(&v, frame)| {
                        let p = *cut_mesh.position(v);
                        frame.axes().map(|axis| (p, axis))
                    })
                    .collect(),
            ),
        );
        Some(frames)
    } else {
        None
    };

    Ok(CutGraphResult {
        mesh: cut_mesh,
        origin,
        distances,
        num_connections,
        num_components,
        num_candidates: candidates.len(),
        cut_graph,
        darboux_frames: frames,
    })
}

/// Vertices of some triangle that no distance reached. Points no triangle
/// uses have nothing to connect and are not counted.
fn count_unreachable<I: MeshIndex>(mesh: &TriMesh<I>, distances: &DistanceField<I>) -> usize {
    let mut used = vec![false; mesh.num_vertices()];
    for t in mesh.triangle_ids() {
        for v in mesh.triangle(t) {
            used[v.index()] = true;
        }
    }
    mesh.vertex_ids()
        .filter(|&v| used[v.index()] && distances.distance(v).is_infinite())
        .count()
}
