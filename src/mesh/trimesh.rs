//! Indexed triangle mesh with derived edge topology.
//!
//! This module provides [`TriMesh`], an arena-based triangle mesh that keeps
//! the undirected edge set and all adjacency maps the cut-graph algorithms
//! need: triangle to edges, edge to triangles, and vertex to incident feature
//! edges.
//!
//! # Structure
//!
//! - **Vertices** carry a position, the model entity they are classified on,
//!   and an aggregated normal
//! - **Triangles** are ordered vertex triples; corner `k` and corner `k + 1`
//!   bound the triangle's edge `k`
//! - **Edges** are canonical vertex pairs (smaller id first), so `(a, b)` and
//!   `(b, a)` name the same edge
//! - **Lines** are the feature segments the mesh was built with; every line
//!   is an edge flagged as a feature
//!
//! Edges are never authored directly. They are derived from triangles and
//! feature lines, and re-derived after the vertex references of triangles
//! change.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use nalgebra::{Point3, Vector3};

use super::index::{EdgeId, MeshIndex, TriangleId, VertexId};
use super::model::{EntityRef, SingularityIndex};
use crate::error::{MeshError, Result};

/// A vertex of the mesh.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// The 3D position of this vertex.
    pub position: Point3<f64>,

    /// The model entity this vertex is classified on.
    pub entity: Option<EntityRef>,

    /// Area-weighted average of the incident triangle normals.
    pub normal: Vector3<f64>,
}

impl Vertex {
    /// Create a new vertex at the given position.
    pub fn new(position: Point3<f64>, entity: Option<EntityRef>) -> Self {
        Self {
            position,
            entity,
            normal: Vector3::zeros(),
        }
    }
}

/// An undirected edge of the mesh.
#[derive(Debug, Clone)]
pub struct Edge<I: MeshIndex = u32> {
    /// End points, smaller id first.
    pub vertices: [VertexId<I>; 2],

    /// Area-weighted average of the incident triangle normals.
    pub normal: Vector3<f64>,

    /// Whether this edge lies on a feature curve.
    pub is_feature: bool,

    /// Tag of the model curve a feature edge belongs to.
    pub curve: Option<i32>,
}

impl<I: MeshIndex> Edge<I> {
    fn new(a: VertexId<I>, b: VertexId<I>) -> Self {
        let (v0, v1) = edge_key(a, b);
        Self {
            vertices: [v0, v1],
            normal: Vector3::zeros(),
            is_feature: false,
            curve: None,
        }
    }

    /// The end point of this edge that is not `v`.
    #[inline]
    pub fn opposite(&self, v: VertexId<I>) -> VertexId<I> {
        if self.vertices[0] == v {
            self.vertices[1]
        } else {
            self.vertices[0]
        }
    }

    /// Whether `v` is an end point of this edge.
    #[inline]
    pub fn contains(&self, v: VertexId<I>) -> bool {
        self.vertices[0] == v || self.vertices[1] == v
    }
}

/// A feature segment: one element of a model curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureLine<I: MeshIndex = u32> {
    /// The two end points, in the order the curve supplied them.
    pub vertices: [VertexId<I>; 2],

    /// Tag of the model curve this segment belongs to.
    pub curve: Option<i32>,
}

/// Canonical key of the undirected edge `(a, b)`.
#[inline]
pub fn edge_key<I: MeshIndex>(a: VertexId<I>, b: VertexId<I>) -> (VertexId<I>, VertexId<I>) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// An indexed triangle mesh with feature curves and singular vertices.
#[derive(Debug, Clone)]
pub struct TriMesh<I: MeshIndex = u32> {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) triangles: Vec<[VertexId<I>; 3]>,
    pub(crate) lines: Vec<FeatureLine<I>>,

    pub(crate) edges: Vec<Edge<I>>,
    pub(crate) edge_lookup: HashMap<(VertexId<I>, VertexId<I>), EdgeId<I>>,
    pub(crate) triangle_edges: Vec<[EdgeId<I>; 3]>,
    pub(crate) edge_triangles: Vec<Vec<TriangleId<I>>>,

    pub(crate) feature_edges: BTreeSet<EdgeId<I>>,
    pub(crate) feature_vertices: BTreeSet<VertexId<I>>,
    pub(crate) vertex_feature_edges: BTreeMap<VertexId<I>, Vec<EdgeId<I>>>,

    pub(crate) singularities: BTreeMap<VertexId<I>, SingularityIndex>,
}

impl<I: MeshIndex> Default for TriMesh<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: MeshIndex> TriMesh<I> {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
            lines: Vec::new(),
            edges: Vec::new(),
            edge_lookup: HashMap::new(),
            triangle_edges: Vec::new(),
            edge_triangles: Vec::new(),
            feature_edges: BTreeSet::new(),
            feature_vertices: BTreeSet::new(),
            vertex_feature_edges: BTreeMap::new(),
            singularities: BTreeMap::new(),
        }
    }

    /// Produce an independent copy whose topology can be edited without
    /// affecting `self`.
    ///
    /// Vertices, triangles, feature lines and singularities are copied as
    /// they are; edges, adjacency, normals and feature markings are derived
    /// afresh.
    pub fn copy_of(mesh: &TriMesh<I>) -> Result<Self> {
        let mut copy = Self {
            vertices: mesh.vertices.clone(),
            triangles: mesh.triangles.clone(),
            lines: mesh.lines.clone(),
            singularities: mesh.singularities.clone(),
            ..Self::new()
        };
        copy.derive_topology()?;
        Ok(copy)
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of derived edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Get the number of triangles.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Get the number of feature lines.
    #[inline]
    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }

    /// Get a vertex by ID.
    #[inline]
    pub fn vertex(&self, id: VertexId<I>) -> &Vertex {
        &self.vertices[id.index()]
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId<I>) -> &Point3<f64> {
        &self.vertex(v).position
    }

    /// Get the aggregated normal of a vertex.
    #[inline]
    pub fn vertex_normal(&self, v: VertexId<I>) -> &Vector3<f64> {
        &self.vertex(v).normal
    }

    /// Get an edge by ID.
    #[inline]
    pub fn edge(&self, id: EdgeId<I>) -> &Edge<I> {
        &self.edges[id.index()]
    }

    /// Get the two end points of an edge.
    #[inline]
    pub fn edge_vertices(&self, id: EdgeId<I>) -> [VertexId<I>; 2] {
        self.edge(id).vertices
    }

    /// Get the vertices of a triangle.
    #[inline]
    pub fn triangle(&self, id: TriangleId<I>) -> [VertexId<I>; 3] {
        self.triangles[id.index()]
    }

    /// Get the three edges of a triangle. Edge `k` joins corners `k` and `k + 1`.
    #[inline]
    pub fn triangle_edges(&self, id: TriangleId<I>) -> [EdgeId<I>; 3] {
        self.triangle_edges[id.index()]
    }

    /// Get the triangles incident to an edge.
    #[inline]
    pub fn edge_triangles(&self, id: EdgeId<I>) -> &[TriangleId<I>] {
        &self.edge_triangles[id.index()]
    }

    /// Look up the edge joining `a` and `b`, in either order.
    #[inline]
    pub fn find_edge(&self, a: VertexId<I>, b: VertexId<I>) -> Option<EdgeId<I>> {
        self.edge_lookup.get(&edge_key(a, b)).copied()
    }

    /// Check whether an edge lies on a feature curve.
    #[inline]
    pub fn is_feature_edge(&self, id: EdgeId<I>) -> bool {
        self.edge(id).is_feature
    }

    /// Check whether an edge has a single incident triangle.
    #[inline]
    pub fn is_boundary_edge(&self, id: EdgeId<I>) -> bool {
        self.edge_triangles(id).len() < 2
    }

    /// Iterate over feature edges in id order.
    pub fn feature_edges(&self) -> impl Iterator<Item = EdgeId<I>> + '_ {
        self.feature_edges.iter().copied()
    }

    /// Get the number of feature edges.
    #[inline]
    pub fn num_feature_edges(&self) -> usize {
        self.feature_edges.len()
    }

    /// Iterate over vertices lying on a feature edge, in id order.
    pub fn feature_vertices(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        self.feature_vertices.iter().copied()
    }

    /// Check whether a vertex lies on a feature edge.
    #[inline]
    pub fn is_feature_vertex(&self, v: VertexId<I>) -> bool {
        self.feature_vertices.contains(&v)
    }

    /// Feature edges incident to a vertex.
    pub fn vertex_feature_edges(&self, v: VertexId<I>) -> &[EdgeId<I>] {
        self.vertex_feature_edges
            .get(&v)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterate over singular vertices with their index, in id order.
    pub fn singularities(&self) -> impl Iterator<Item = (VertexId<I>, SingularityIndex)> + '_ {
        self.singularities.iter().map(|(&v, &s)| (v, s))
    }

    /// Get the number of singular vertices.
    #[inline]
    pub fn num_singularities(&self) -> usize {
        self.singularities.len()
    }

    /// Singularity index of a vertex, if it is singular.
    #[inline]
    pub fn singularity(&self, v: VertexId<I>) -> Option<SingularityIndex> {
        self.singularities.get(&v).copied()
    }

    /// Check whether a vertex is singular.
    #[inline]
    pub fn is_singular(&self, v: VertexId<I>) -> bool {
        self.singularities.contains_key(&v)
    }

    /// The feature lines of this mesh.
    #[inline]
    pub fn lines(&self) -> &[FeatureLine<I>] {
        &self.lines
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId<I>> + '_ {
        (0..self.vertices.len()).map(VertexId::new)
    }

    /// Iterate over all edge IDs.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId<I>> + '_ {
        (0..self.edges.len()).map(EdgeId::new)
    }

    /// Iterate over all triangle IDs.
    pub fn triangle_ids(&self) -> impl Iterator<Item = TriangleId<I>> + '_ {
        (0..self.triangles.len()).map(TriangleId::new)
    }

    // ==================== Geometry ====================

    /// Get the positions of the three corners of a triangle.
    pub fn triangle_positions(&self, t: TriangleId<I>) -> [Point3<f64>; 3] {
        let [v0, v1, v2] = self.triangle(t);
        [*self.position(v0), *self.position(v1), *self.position(v2)]
    }

    /// Unnormalized triangle normal; its length is twice the triangle area.
    pub fn triangle_area_normal(&self, t: TriangleId<I>) -> Vector3<f64> {
        let [p0, p1, p2] = self.triangle_positions(t);
        (p1 - p0).cross(&(p2 - p0))
    }

    /// Compute the area of a triangle.
    pub fn triangle_area(&self, t: TriangleId<I>) -> f64 {
        0.5 * self.triangle_area_normal(t).norm()
    }

    /// Euclidean length of an edge.
    pub fn edge_length(&self, e: EdgeId<I>) -> f64 {
        let [v0, v1] = self.edge_vertices(e);
        (self.position(v1) - self.position(v0)).norm()
    }

    /// Midpoint of an edge.
    pub fn edge_midpoint(&self, e: EdgeId<I>) -> Point3<f64> {
        let [v0, v1] = self.edge_vertices(e);
        Point3::from((self.position(v0).coords + self.position(v1).coords) * 0.5)
    }

    /// Aggregated normal of an edge.
    #[inline]
    pub fn edge_normal(&self, e: EdgeId<I>) -> &Vector3<f64> {
        &self.edge(e).normal
    }

    // ==================== Construction ====================

    /// Add a new vertex and return its ID.
    pub(crate) fn add_vertex(
        &mut self,
        position: Point3<f64>,
        entity: Option<EntityRef>,
    ) -> VertexId<I> {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Vertex::new(position, entity));
        id
    }

    /// Insert the edge `(a, b)` unless it exists. Returns the edge and whether
    /// it was newly created.
    pub(crate) fn insert_edge(&mut self, a: VertexId<I>, b: VertexId<I>) -> (EdgeId<I>, bool) {
        let key = edge_key(a, b);
        if let Some(&id) = self.edge_lookup.get(&key) {
            return (id, false);
        }
        let id = EdgeId::new(self.edges.len());
        self.edges.push(Edge::new(a, b));
        self.edge_triangles.push(Vec::new());
        self.edge_lookup.insert(key, id);
        (id, true)
    }

    /// Insert the edge `(a, b)` as a feature edge of `curve`, recording a
    /// feature line for it when the edge is new.
    pub(crate) fn insert_feature_edge(
        &mut self,
        a: VertexId<I>,
        b: VertexId<I>,
        curve: Option<i32>,
    ) -> (EdgeId<I>, bool) {
        let (id, created) = self.insert_edge(a, b);
        if created {
            let edge = &mut self.edges[id.index()];
            edge.is_feature = true;
            edge.curve = curve;
            self.feature_edges.insert(id);
            self.lines.push(FeatureLine {
                vertices: edge.vertices,
                curve,
            });
        }
        (id, created)
    }

    /// Point corner `corner` of triangle `t` at vertex `v`.
    #[inline]
    pub(crate) fn set_corner(&mut self, t: TriangleId<I>, corner: usize, v: VertexId<I>) {
        self.triangles[t.index()][corner] = v;
    }

    /// Drop every derived structure together with the feature lines.
    pub(crate) fn clear_topology(&mut self) {
        self.lines.clear();
        self.edges.clear();
        self.edge_lookup.clear();
        self.triangle_edges.clear();
        self.edge_triangles.clear();
        self.feature_edges.clear();
        self.feature_vertices.clear();
        self.vertex_feature_edges.clear();
        for v in &mut self.vertices {
            v.normal = Vector3::zeros();
        }
    }

    /// Derive edges, adjacency, normals and feature markings from the
    /// triangles and feature lines.
    pub(crate) fn derive_topology(&mut self) -> Result<()> {
        let lines = std::mem::take(&mut self.lines);
        self.clear_topology();
        self.lines = lines;
        self.update_edges()?;
        self.update_normals()?;
        self.mark_feature_lines()?;
        self.update_feature_incidence();
        Ok(())
    }

    // ==================== Re-derivation ====================

    /// Rebuild triangle/edge adjacency from the current triangle corners.
    ///
    /// Existing edges and their feature flags are kept; edges introduced by
    /// the current triangles are added as non-feature edges. Non-feature
    /// edges no triangle uses any more are dropped, which renumbers the
    /// remaining edges. Idempotent.
    pub fn update_edges(&mut self) -> Result<()> {
        self.triangle_edges.clear();
        self.triangle_edges.reserve(self.triangles.len());
        for adjacent in &mut self.edge_triangles {
            adjacent.clear();
        }

        for ti in 0..self.triangles.len() {
            let t = TriangleId::new(ti);
            let corners = self.triangles[ti];
            let mut ids = [EdgeId::invalid(); 3];
            for k in 0..3 {
                let (e, _) = self.insert_edge(corners[k], corners[(k + 1) % 3]);
                let adjacent = &mut self.edge_triangles[e.index()];
                if adjacent.len() == 2 {
                    let [v0, v1] = self.edges[e.index()].vertices;
                    return Err(MeshError::NonManifoldEdge {
                        v0: v0.index(),
                        v1: v1.index(),
                    });
                }
                adjacent.push(t);
                ids[k] = e;
            }
            self.triangle_edges.push(ids);
        }
        self.drop_unused_edges();
        Ok(())
    }

    /// Remove non-feature edges without triangles and renumber the rest.
    fn drop_unused_edges(&mut self) {
        let keep: Vec<bool> = self
            .edges
            .iter()
            .zip(&self.edge_triangles)
            .map(|(edge, adjacent)| edge.is_feature || !adjacent.is_empty())
            .collect();
        if keep.iter().all(|&k| k) {
            return;
        }

        let edges = std::mem::take(&mut self.edges);
        let adjacency = std::mem::take(&mut self.edge_triangles);
        let mut remap = vec![None; edges.len()];
        self.edge_lookup.clear();
        for (old, (edge, adjacent)) in edges.into_iter().zip(adjacency).enumerate() {
            if !keep[old] {
                continue;
            }
            let id = EdgeId::new(self.edges.len());
            let [v0, v1] = edge.vertices;
            self.edge_lookup.insert((v0, v1), id);
            self.edges.push(edge);
            self.edge_triangles.push(adjacent);
            remap[old] = Some(id);
        }

        for ids in &mut self.triangle_edges {
            for e in ids.iter_mut() {
                if let Some(id) = remap[e.index()] {
                    *e = id;
                }
            }
        }
        self.feature_edges = self
            .feature_edges
            .iter()
            .filter_map(|e| remap[e.index()])
            .collect();
        self.update_feature_incidence();
        log::debug!("dropped {} unused edges", keep.len() - self.edges.len());
    }

    /// Recompute vertex and edge normals.
    ///
    /// Fails with [`MeshError::MissingEdge`] if a triangle edge is not in the
    /// edge set, which means [`update_edges`](Self::update_edges) was not run
    /// after the triangles changed.
    pub fn update_normals(&mut self) -> Result<()> {
        for v in &mut self.vertices {
            v.normal = Vector3::zeros();
        }
        for e in &mut self.edges {
            e.normal = Vector3::zeros();
        }

        for t in 0..self.triangles.len() {
            let n = self.triangle_area_normal(TriangleId::new(t));
            let corners = self.triangles[t];
            for k in 0..3 {
                let (a, b) = (corners[k], corners[(k + 1) % 3]);
                let e = self.find_edge(a, b).ok_or(MeshError::MissingEdge {
                    v0: a.index(),
                    v1: b.index(),
                })?;
                self.edges[e.index()].normal += n;
                self.vertices[a.index()].normal += n;
            }
        }

        for v in &mut self.vertices {
            v.normal = v.normal.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros);
        }
        for e in &mut self.edges {
            e.normal = e.normal.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros);
        }
        Ok(())
    }

    /// Flag the edge of every feature line as a feature edge.
    fn mark_feature_lines(&mut self) -> Result<()> {
        for li in 0..self.lines.len() {
            let FeatureLine {
                vertices: [a, b],
                curve,
            } = self.lines[li];
            let e = self.find_edge(a, b).ok_or(MeshError::FeatureEdgeNotFound {
                v0: a.index(),
                v1: b.index(),
            })?;
            let edge = &mut self.edges[e.index()];
            edge.is_feature = true;
            edge.curve = curve;
            self.feature_edges.insert(e);
        }
        Ok(())
    }

    /// Rebuild feature-vertex membership and vertex→feature-edge incidence
    /// from the feature edge set.
    pub(crate) fn update_feature_incidence(&mut self) {
        self.feature_vertices.clear();
        self.vertex_feature_edges.clear();
        for &e in &self.feature_edges {
            for v in self.edges[e.index()].vertices {
                self.feature_vertices.insert(v);
                self.vertex_feature_edges.entry(v).or_default().push(e);
            }
        }
    }

    // ==================== Validation ====================

    /// Check that the derived topology is consistent with the triangles.
    pub fn is_valid(&self) -> bool {
        if self.triangle_edges.len() != self.triangles.len()
            || self.edge_triangles.len() != self.edges.len()
            || self.edge_lookup.len() != self.edges.len()
        {
            return false;
        }

        for (ti, corners) in self.triangles.iter().enumerate() {
            let t = TriangleId::new(ti);
            for k in 0..3 {
                let e = self.triangle_edges[ti][k];
                let edge = &self.edges[e.index()];
                if !edge.contains(corners[k]) || !edge.contains(corners[(k + 1) % 3]) {
                    return false;
                }
                if !self.edge_triangles[e.index()].contains(&t) {
                    return false;
                }
            }
        }

        for (ei, edge) in self.edges.iter().enumerate() {
            let [v0, v1] = edge.vertices;
            if v0 >= v1 || self.edge_lookup.get(&(v0, v1)) != Some(&EdgeId::new(ei)) {
                return false;
            }
            if edge.is_feature != self.feature_edges.contains(&EdgeId::new(ei)) {
                return false;
            }
            let adjacent = self.edge_triangles[ei].len();
            if adjacent > 2 || (adjacent == 0 && !edge.is_feature) {
                return false;
            }
        }

        true
    }
}
