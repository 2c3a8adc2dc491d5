//! Darboux frames on feature vertices.
//!
//! On a mesh that has been split along its feature lines, every feature
//! vertex sits on the boundary of the surface with exactly two feature
//! neighbours. Its Darboux frame is the orthonormal triple
//! (tangent, inner geodesic normal, normal): the normal is the vertex
//! normal, the inner geodesic normal bisects the angle between the two
//! feature edges on the side of the surface, and the tangent completes the
//! frame.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use nalgebra::{Point3, Vector3};

use crate::error::{MeshError, Result};
use crate::mesh::{MeshIndex, TriMesh, VertexId};

/// Angles closer to zero than this are treated as zero when choosing the
/// interior side.
const ANGLE_TOLERANCE: f64 = 1e-10;

/// Orthonormal frame at a feature vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DarbouxFrame {
    /// Direction along the feature line.
    pub tangent: Vector3<f64>,
    /// In-surface direction pointing away from the feature line, into the
    /// surface.
    pub inner_normal: Vector3<f64>,
    /// Surface normal.
    pub normal: Vector3<f64>,
}

impl DarbouxFrame {
    /// Frame aligned with the world axes.
    pub fn world() -> Self {
        Self {
            tangent: Vector3::x(),
            inner_normal: Vector3::y(),
            normal: Vector3::z(),
        }
    }

    /// The three axes in the order tangent, inner normal, normal.
    pub fn axes(&self) -> [Vector3<f64>; 3] {
        [self.tangent, self.inner_normal, self.normal]
    }
}

fn unit_direction(from: &Point3<f64>, to: &Point3<f64>) -> Option<Vector3<f64>> {
    (to - from).try_normalize(f64::EPSILON)
}

/// Compute the Darboux frame of every feature vertex of a split mesh.
///
/// # Errors
///
/// - [`MeshError::FeatureValence`] if a feature vertex does not have exactly
///   two feature edges.
/// - [`MeshError::NotSplitAlongFeatures`] if the first feature edge at a
///   vertex is not bounded by exactly one triangle.
/// - [`MeshError::MissingReferenceEdge`] if that triangle has no other edge
///   at the vertex.
pub fn darboux_frames<I: MeshIndex>(
    mesh: &TriMesh<I>,
) -> Result<BTreeMap<VertexId<I>, DarbouxFrame>> {
    let mut frames = BTreeMap::new();

    for v in mesh.feature_vertices() {
        let feature_edges = mesh.vertex_feature_edges(v);
        let &[e1, e2] = feature_edges else {
            return Err(MeshError::FeatureValence {
                vertex: v.index(),
                count: feature_edges.len(),
            });
        };

        let &[triangle] = mesh.edge_triangles(e1) else {
            return Err(MeshError::NotSplitAlongFeatures { vertex: v.index() });
        };
        let reference = mesh
            .triangle_edges(triangle)
            .into_iter()
            .find(|&e| e != e1 && mesh.edge(e).contains(v))
            .ok_or(MeshError::MissingReferenceEdge { vertex: v.index() })?;

        let p = mesh.position(v);
        let v1 = mesh.edge(e1).opposite(v);
        let v2 = mesh.edge(e2).opposite(v);
        let v_ref = mesh.edge(reference).opposite(v);
        let normal = *mesh.vertex_normal(v);

        let basis = unit_direction(p, mesh.position(v1)).and_then(|d1| {
            let d2 = unit_direction(p, mesh.position(v2))?;
            let d_ref = unit_direction(p, mesh.position(v_ref))?;
            let t1 = normal.cross(&d1).try_normalize(f64::EPSILON)?;
            Some((d1, t1, d2, d_ref))
        });
        let Some((d1, t1, d2, d_ref)) = basis else {
            log::warn!(
                "Degenerate geometry at feature vertex {}, using world frame",
                v.index()
            );
            frames.insert(v, DarbouxFrame::world());
            continue;
        };

        let angle_ref = d_ref.dot(&t1).atan2(d_ref.dot(&d1));
        let mut angle = d2.dot(&t1).atan2(d2.dot(&d1));
        // Sweep from d1 to d2 through the side the reference edge lies on.
        if angle_ref > 0.0 {
            if angle <= ANGLE_TOLERANCE {
                angle += 2.0 * PI;
            }
        } else if angle >= -ANGLE_TOLERANCE {
            angle -= 2.0 * PI;
        }

        let half = angle / 2.0;
        let inner = (d1 * half.cos() + t1 * half.sin()).normalize();
        let tangent = inner.cross(&normal).normalize();

        frames.insert(
            v,
            DarbouxFrame {
                tangent,
                inner_normal: inner,
                normal,
            },
        );
    }

    log::debug!("computed {} Darboux frames", frames.len());
    Ok(frames)
}
