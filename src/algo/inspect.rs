//! Optional inspection of intermediate results.
//!
//! Stages hand named payloads (point scalars, point vectors, line sets) to an
//! [`Inspector`] after they complete. The default inspector discards them, so
//! the algorithms carry no dependency on any viewer.
//!
//! # Example
//!
//! ```
//! use seamcut::algo::inspect::{Inspector, Payload};
//!
//! let inspector = Inspector::new(|name, payload| {
//!     println!("{}: {} items", name, payload.len());
//! });
//! inspector.emit("empty", &Payload::Lines(Vec::new()));
//! ```

use nalgebra::{Point3, Vector3};

use crate::mesh::{EdgeId, MeshIndex, TriMesh, VertexId};

/// Data handed to an [`Inspector`].
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A scalar value attached to each point.
    Scalars(Vec<(Point3<f64>, f64)>),
    /// A vector attached to each point.
    Vectors(Vec<(Point3<f64>, Vector3<f64>)>),
    /// Line segments.
    Lines(Vec<(Point3<f64>, Point3<f64>)>),
}

impl Payload {
    /// Number of items in the payload.
    pub fn len(&self) -> usize {
        match self {
            Payload::Scalars(items) => items.len(),
            Payload::Vectors(items) => items.len(),
            Payload::Lines(items) => items.len(),
        }
    }

    /// Check if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Scalars attached to vertices.
    pub fn vertex_scalars<I, F>(
        mesh: &TriMesh<I>,
        vertices: impl IntoIterator<Item = VertexId<I>>,
        value: F,
    ) -> Self
    where
        I: MeshIndex,
        F: Fn(VertexId<I>) -> f64,
    {
        Payload::Scalars(
            vertices
                .into_iter()
                .map(|v| (*mesh.position(v), value(v)))
                .collect(),
        )
    }

    /// Segments of the given edges.
    pub fn edge_lines<I: MeshIndex>(
        mesh: &TriMesh<I>,
        edges: impl IntoIterator<Item = EdgeId<I>>,
    ) -> Self {
        Payload::Lines(
            edges
                .into_iter()
                .map(|e| {
                    let [v0, v1] = mesh.edge_vertices(e);
                    (*mesh.position(v0), *mesh.position(v1))
                })
                .collect(),
        )
    }
}

/// A sink receiving named payloads from the pipeline stages.
pub struct Inspector {
    callback: Box<dyn Fn(&str, &Payload) + Send + Sync>,
}

impl Inspector {
    /// Create a new inspector with the given callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&str, &Payload) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }

    /// Hand a payload to the callback.
    #[inline]
    pub fn emit(&self, name: &str, payload: &Payload) {
        (self.callback)(name, payload);
    }

    /// Create an inspector that discards all payloads.
    pub fn none() -> Self {
        Self::new(|_, _| {})
    }
}

impl Default for Inspector {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Inspector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inspector").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_inspector_receives_payloads() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let inspector = Inspector::new(move |name, payload| {
            sink.lock().unwrap().push((name.to_string(), payload.len()));
        });

        let segment = (Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        inspector.emit("lines", &Payload::Lines(vec![segment]));
        inspector.emit("scalars", &Payload::Scalars(Vec::new()));

        let seen = seen.lock().unwrap();
        assert_eq!(*seen, vec![("lines".to_string(), 1), ("scalars".to_string(), 0)]);
    }

    #[test]
    fn test_default_is_silent() {
        let inspector = Inspector::default();
        inspector.emit("anything", &Payload::Vectors(Vec::new()));
        assert_eq!(format!("{:?}", inspector), "Inspector { .. }");
    }
}
