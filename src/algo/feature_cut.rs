//! Cutting a mesh open along its feature curves.
//!
//! Vertices on feature edges are duplicated so that triangles on different
//! sides of a feature curve stop sharing vertex identity. Around a feature
//! vertex the incident triangles fall into fans separated by feature edges;
//! the first fan keeps the original vertex and every further fan receives a
//! fresh copy at the same position, classified on the same model entity.
//!
//! A vertex in the middle of a feature line therefore ends up with two
//! copies, and a junction where `k` feature edges meet ends up with one copy
//! per fan.

use std::collections::HashSet;

use crate::error::Result;
use crate::mesh::{edge_key, EdgeId, MeshIndex, TriMesh, TriangleId, VertexId};

/// A mesh cut open along its feature curves.
#[derive(Debug, Clone)]
pub struct FeatureCut<I: MeshIndex = u32> {
    mesh: TriMesh<I>,
    origin: Vec<VertexId<I>>,
    duplicated: usize,
}

impl<I: MeshIndex> FeatureCut<I> {
    /// The cut mesh.
    #[inline]
    pub fn mesh(&self) -> &TriMesh<I> {
        &self.mesh
    }

    /// Consume the result, keeping the cut mesh.
    pub fn into_mesh(self) -> TriMesh<I> {
        self.mesh
    }

    /// The vertex of the input mesh a cut-mesh vertex was copied from.
    #[inline]
    pub fn origin(&self, v: VertexId<I>) -> VertexId<I> {
        self.origin[v.index()]
    }

    /// Cut-mesh vertex to input vertex map, indexed by cut-mesh vertex.
    #[inline]
    pub fn origins(&self) -> &[VertexId<I>] {
        &self.origin
    }

    /// Number of vertices created by the cut.
    #[inline]
    pub fn num_duplicated(&self) -> usize {
        self.duplicated
    }

    /// Split into the cut mesh and the vertex origin map.
    pub fn into_parts(self) -> (TriMesh<I>, Vec<VertexId<I>>) {
        (self.mesh, self.origin)
    }
}

/// Cut `mesh` along every feature edge.
///
/// The input is left untouched; the returned mesh is an independent copy
/// with re-derived edges, normals and feature markings. Feature edges of the
/// cut mesh keep the curve tag of the feature edge they were split from.
///
/// # Example
///
/// ```
/// use seamcut::algo::feature_cut::cut_along_features;
/// use seamcut::mesh::{build_from_triangles, TriMesh};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ];
/// let triangles = vec![[0, 1, 2], [0, 2, 3]];
/// let mesh: TriMesh = build_from_triangles(&vertices, &triangles, &[[0, 2]]).unwrap();
///
/// let cut = cut_along_features(&mesh).unwrap();
/// assert_eq!(cut.num_duplicated(), 2);
/// assert_eq!(cut.mesh().num_feature_edges(), 2);
/// ```
pub fn cut_along_features<I: MeshIndex>(mesh: &TriMesh<I>) -> Result<FeatureCut<I>> {
    let mut cut = TriMesh::copy_of(mesh)?;
    cut.clear_topology();

    let mut origin: Vec<VertexId<I>> = mesh.vertex_ids().collect();
    let mut claimed: HashSet<VertexId<I>> = HashSet::new();
    let mut processed: HashSet<(TriangleId<I>, VertexId<I>)> = HashSet::new();
    let mut stack: Vec<TriangleId<I>> = Vec::new();

    for fe in mesh.feature_edges() {
        for current in mesh.edge_vertices(fe) {
            for &seed in mesh.edge_triangles(fe) {
                if !processed.insert((seed, current)) {
                    continue;
                }

                let target = if claimed.insert(current) {
                    current
                } else {
                    let vertex = mesh.vertex(current);
                    let copy = cut.add_vertex(vertex.position, vertex.entity);
                    origin.push(current);
                    copy
                };

                stack.clear();
                stack.push(seed);
                while let Some(t) = stack.pop() {
                    let corners = mesh.triangle(t);
                    let Some(corner) = corners.iter().position(|&v| v == current) else {
                        continue;
                    };
                    cut.set_corner(t, corner, target);

                    let edges = mesh.triangle_edges(t);
                    for e in [edges[corner], edges[(corner + 2) % 3]] {
                        if mesh.is_feature_edge(e) {
                            continue;
                        }
                        for &neighbor in mesh.edge_triangles(e) {
                            if neighbor != t && processed.insert((neighbor, current)) {
                                stack.push(neighbor);
                            }
                        }
                    }
                }
            }
        }

        add_split_feature_edges(mesh, &mut cut, fe);
    }

    cut.update_edges()?;
    cut.update_normals()?;
    cut.update_feature_incidence();

    let duplicated = cut.num_vertices() - mesh.num_vertices();
    log::debug!(
        "feature cut: {} duplicated vertices, {} feature edges (was {})",
        duplicated,
        cut.num_feature_edges(),
        mesh.num_feature_edges()
    );

    Ok(FeatureCut {
        mesh: cut,
        origin,
        duplicated,
    })
}

/// Record on the cut mesh the copies of feature edge `fe` seen from each of
/// its triangles.
fn add_split_feature_edges<I: MeshIndex>(mesh: &TriMesh<I>, cut: &mut TriMesh<I>, fe: EdgeId<I>) {
    let [a, b] = mesh.edge_vertices(fe);
    let curve = mesh.edge(fe).curve;
    for &t in mesh.edge_triangles(fe) {
        let before = mesh.triangle(t);
        let after = cut.triangle(t);
        for k in 0..3 {
            if edge_key(before[k], before[(k + 1) % 3]) == (a, b) {
                cut.insert_feature_edge(after[k], after[(k + 1) % 3], curve);
            }
        }
    }
}
