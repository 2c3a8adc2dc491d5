//! Mesh construction utilities.
//!
//! This module builds [`TriMesh`] values from a [`SurfaceModel`] (the whole
//! model or one surface patch) or from raw index arrays, and converts meshes
//! back to a face-vertex representation.

use std::collections::btree_map::Entry;
use std::collections::BTreeSet;

use nalgebra::Point3;

use super::index::{MeshIndex, VertexId};
use super::model::{ModelPoint, SingularityIndex, SurfaceModel};
use super::trimesh::{FeatureLine, TriMesh};
use crate::error::{MeshError, Result};

/// Build a mesh from vertex positions, triangles and feature segments.
///
/// # Arguments
/// * `vertices` - List of vertex positions
/// * `triangles` - List of triangles, each as [v0, v1, v2] indices
/// * `lines` - Feature segments, each as [v0, v1] indices
///
/// # Example
/// ```
/// use seamcut::mesh::{build_from_triangles, TriMesh};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
/// ];
/// let triangles = vec![[0, 1, 2]];
///
/// let mesh: TriMesh = build_from_triangles(&vertices, &triangles, &[[0, 1]]).unwrap();
/// assert_eq!(mesh.num_edges(), 3);
/// assert_eq!(mesh.num_feature_edges(), 1);
/// ```
pub fn build_from_triangles<I: MeshIndex>(
    vertices: &[Point3<f64>],
    triangles: &[[usize; 3]],
    lines: &[[usize; 2]],
) -> Result<TriMesh<I>> {
    let points: Vec<ModelPoint> = vertices.iter().map(|&p| ModelPoint::new(p)).collect();
    let segments: Vec<([usize; 2], Option<i32>)> = lines.iter().map(|&l| (l, None)).collect();
    assemble(&points, triangles, &segments)
}

/// A mesh built from one surface of a model.
///
/// Only the points the surface's triangles use become vertices, numbered in
/// increasing model order. [`PatchMesh::model_vertex`] maps them back.
#[derive(Debug, Clone)]
pub struct PatchMesh<I: MeshIndex = u32> {
    mesh: TriMesh<I>,
    model_vertices: Vec<usize>,
}

impl<I: MeshIndex> PatchMesh<I> {
    /// The patch mesh.
    #[inline]
    pub fn mesh(&self) -> &TriMesh<I> {
        &self.mesh
    }

    /// Consume the result, keeping the mesh.
    pub fn into_mesh(self) -> TriMesh<I> {
        self.mesh
    }

    /// The model point a patch vertex was built from.
    #[inline]
    pub fn model_vertex(&self, v: VertexId<I>) -> usize {
        self.model_vertices[v.index()]
    }

    /// Patch vertex to model point map, indexed by patch vertex.
    #[inline]
    pub fn model_vertices(&self) -> &[usize] {
        &self.model_vertices
    }

    /// Split into the mesh and the model point map.
    pub fn into_parts(self) -> (TriMesh<I>, Vec<usize>) {
        (self.mesh, self.model_vertices)
    }
}

impl<I: MeshIndex> TriMesh<I> {
    /// Build a mesh from every surface and curve of `model`, with the
    /// singularities its physical groups designate.
    ///
    /// Vertex ids equal model point indices. A model without triangles gives
    /// an empty mesh and a warning.
    pub fn from_model(model: &SurfaceModel) -> Result<Self> {
        let triangles: Vec<[usize; 3]> = model
            .surfaces
            .iter()
            .flat_map(|s| s.triangles.iter().copied())
            .collect();
        let segments: Vec<([usize; 2], Option<i32>)> = model
            .curves
            .iter()
            .flat_map(|c| c.segments.iter().map(move |&s| (s, Some(c.tag))))
            .collect();

        let mut mesh = assemble(&model.points, &triangles, &segments)?;
        if mesh.num_triangles() > 0 {
            mesh.collect_singularities(model, Some)?;
        }
        Ok(mesh)
    }

    /// Build a mesh from the surface tagged `surface` and the curves bounding
    /// or embedded in it.
    ///
    /// Points outside the surface are left out and singularities designated
    /// on them are skipped. A surface without triangles gives an empty mesh
    /// and a warning.
    pub fn from_patch(model: &SurfaceModel, surface: i32) -> Result<PatchMesh<I>> {
        let patch = model
            .surface(surface)
            .ok_or(MeshError::UnknownSurface { tag: surface })?;
        if patch.triangles.is_empty() {
            log::warn!("surface {} has no triangles, mesh is empty", surface);
            return Ok(PatchMesh {
                mesh: TriMesh::new(),
                model_vertices: Vec::new(),
            });
        }

        let num_points = model.points.len();
        for (ti, tri) in patch.triangles.iter().enumerate() {
            if let Some(&vi) = tri.iter().find(|&&vi| vi >= num_points) {
                return Err(MeshError::InvalidVertexIndex {
                    element: ti,
                    vertex: vi,
                });
            }
        }

        let model_vertices: Vec<usize> = patch
            .triangles
            .iter()
            .flatten()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let mut local = vec![None; num_points];
        for (li, &vi) in model_vertices.iter().enumerate() {
            local[vi] = Some(li);
        }

        let mut segments = Vec::new();
        for curve in patch.curves.iter().filter_map(|&tag| model.curve(tag)) {
            for (si, &[a, b]) in curve.segments.iter().enumerate() {
                if let Some(&vi) = [a, b].iter().find(|&&vi| vi >= num_points) {
                    return Err(MeshError::InvalidVertexIndex {
                        element: si,
                        vertex: vi,
                    });
                }
                let (Some(la), Some(lb)) = (local[a], local[b]) else {
                    return Err(MeshError::FeatureEdgeNotFound { v0: a, v1: b });
                };
                segments.push(([la, lb], Some(curve.tag)));
            }
        }

        let points: Vec<ModelPoint> = model_vertices.iter().map(|&vi| model.points[vi]).collect();
        let triangles: Vec<[usize; 3]> = patch
            .triangles
            .iter()
            .map(|t| t.map(|vi| local[vi].unwrap_or(vi)))
            .collect();

        let mut mesh = assemble(&points, &triangles, &segments)
            .map_err(|e| to_model_indices(e, &model_vertices))?;
        mesh.collect_singularities(model, |vi| local.get(vi).copied().flatten())?;
        Ok(PatchMesh {
            mesh,
            model_vertices,
        })
    }

    /// Designate singular vertices from the model's named point groups.
    ///
    /// Each point entity contributes its first mesh vertex, translated by
    /// `to_local`. Unknown group names and points without a mesh vertex are
    /// skipped.
    fn collect_singularities<F>(&mut self, model: &SurfaceModel, to_local: F) -> Result<()>
    where
        F: Fn(usize) -> Option<usize>,
    {
        for (gi, group) in model.groups.iter().enumerate() {
            let Some(index) = SingularityIndex::from_group_name(&group.name) else {
                log::debug!("ignoring physical group '{}'", group.name);
                continue;
            };
            for entity in &group.points {
                let Some(&vi) = entity.vertices.first() else {
                    continue;
                };
                if vi >= model.points.len() {
                    return Err(MeshError::InvalidVertexIndex {
                        element: gi,
                        vertex: vi,
                    });
                }
                let Some(li) = to_local(vi) else {
                    log::debug!("singular point {} is not on the mesh", vi);
                    continue;
                };
                self.set_singularity(VertexId::new(li), index)?;
            }
        }
        log::debug!("found {} singular vertices", self.singularities.len());
        Ok(())
    }

    /// Designate `v` as a singular vertex of the given index.
    ///
    /// Naming a vertex again with the same index is accepted; a different
    /// index is a [`MeshError::ConflictingSingularity`]. A vertex outside the
    /// mesh is a [`MeshError::VertexOutOfRange`].
    pub fn set_singularity(&mut self, v: VertexId<I>, index: SingularityIndex) -> Result<()> {
        if v.index() >= self.num_vertices() {
            return Err(MeshError::VertexOutOfRange {
                vertex: v.index(),
                num_vertices: self.num_vertices(),
            });
        }
        match self.singularities.entry(v) {
            Entry::Vacant(slot) => {
                slot.insert(index);
            }
            Entry::Occupied(slot) if *slot.get() != index => {
                return Err(MeshError::ConflictingSingularity {
                    vertex: v.index(),
                    first: slot.get().value(),
                    second: index.value(),
                });
            }
            Entry::Occupied(_) => {}
        }
        Ok(())
    }
}

/// Report vertex pairs of a patch error with model indices.
fn to_model_indices(error: MeshError, model_vertices: &[usize]) -> MeshError {
    let model = |v: usize| model_vertices.get(v).copied().unwrap_or(v);
    match error {
        MeshError::FeatureEdgeNotFound { v0, v1 } => MeshError::FeatureEdgeNotFound {
            v0: model(v0),
            v1: model(v1),
        },
        MeshError::NonManifoldEdge { v0, v1 } => MeshError::NonManifoldEdge {
            v0: model(v0),
            v1: model(v1),
        },
        other => other,
    }
}

/// Validate the index arrays and derive the topology.
fn assemble<I: MeshIndex>(
    points: &[ModelPoint],
    triangles: &[[usize; 3]],
    segments: &[([usize; 2], Option<i32>)],
) -> Result<TriMesh<I>> {
    if triangles.is_empty() {
        log::warn!("no triangles to build from, mesh is empty");
        return Ok(TriMesh::new());
    }

    for (ti, tri) in triangles.iter().enumerate() {
        for &vi in tri {
            if vi >= points.len() {
                return Err(MeshError::InvalidVertexIndex {
                    element: ti,
                    vertex: vi,
                });
            }
        }
        if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
            return Err(MeshError::DegenerateTriangle { triangle: ti });
        }
    }
    for (si, (segment, _)) in segments.iter().enumerate() {
        for &vi in segment {
            if vi >= points.len() {
                return Err(MeshError::InvalidVertexIndex {
                    element: si,
                    vertex: vi,
                });
            }
        }
    }

    let mut mesh = TriMesh::new();
    for p in points {
        mesh.add_vertex(p.position, p.entity);
    }
    mesh.triangles = triangles
        .iter()
        .map(|t| t.map(VertexId::new))
        .collect();
    mesh.lines = segments
        .iter()
        .map(|&(s, curve)| FeatureLine {
            vertices: s.map(VertexId::new),
            curve,
        })
        .collect();

    mesh.derive_topology()?;
    log::debug!(
        "built mesh: {} vertices, {} edges, {} triangles, {} feature edges",
        mesh.num_vertices(),
        mesh.num_edges(),
        mesh.num_triangles(),
        mesh.num_feature_edges()
    );
    Ok(mesh)
}

/// Convert a mesh back to a face-vertex representation.
///
/// Returns (vertices, triangles) tuple.
pub fn to_face_vertex<I: MeshIndex>(mesh: &TriMesh<I>) -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
    let vertices: Vec<Point3<f64>> = mesh.vertex_ids().map(|v| *mesh.position(v)).collect();
    let triangles: Vec<[usize; 3]> = mesh
        .triangle_ids()
        .map(|t| mesh.triangle(t).map(|v| v.index()))
        .collect();
    (vertices, triangles)
}
