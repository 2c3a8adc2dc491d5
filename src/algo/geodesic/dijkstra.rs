//! Multi-source Dijkstra over the mesh edge graph.
//!
//! Nodes are vertices, arcs are the derived mesh edges weighted by their
//! Euclidean length. The result is exact on the edge graph, which
//! approximates geodesic distance on the surface.

use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap};

use crate::mesh::{MeshIndex, TriMesh, VertexId};

use super::DistanceField;

/// Options for the distance field computation.
#[derive(Debug, Clone, Default)]
pub struct DistanceOptions {
    /// Maximum distance to explore. Vertices beyond this distance keep
    /// `f64::INFINITY`. Set to `None` for no limit.
    pub max_distance: Option<f64>,
}

impl DistanceOptions {
    /// Set maximum distance to explore.
    pub fn with_max_distance(mut self, max_dist: f64) -> Self {
        self.max_distance = Some(max_dist);
        self
    }
}

/// Entry in the priority queue.
#[derive(Debug, Clone)]
struct DijkstraEntry {
    vertex: usize,
    distance: f64,
}

impl DijkstraEntry {
    fn new(vertex: usize, distance: f64) -> Self {
        Self { vertex, distance }
    }
}

// BinaryHeap is a max-heap; order entries so the smallest distance pops first.
impl PartialEq for DijkstraEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DijkstraEntry {}

impl PartialOrd for DijkstraEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DijkstraEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

/// Weighted vertex adjacency built from the derived edges.
fn weighted_adjacency<I: MeshIndex>(mesh: &TriMesh<I>) -> Vec<Vec<(usize, f64)>> {
    let mut adjacency = vec![Vec::new(); mesh.num_vertices()];
    for e in mesh.edge_ids() {
        let [v0, v1] = mesh.edge_vertices(e);
        let length = mesh.edge_length(e);
        adjacency[v0.index()].push((v1.index(), length));
        adjacency[v1.index()].push((v0.index(), length));
    }
    adjacency
}

/// Compute distances from the nearest of several source vertices.
///
/// All source vertices have distance 0. Sources outside the mesh are
/// ignored. Vertices not connected to any source keep `f64::INFINITY`.
pub fn dijkstra_multiple<I: MeshIndex>(
    mesh: &TriMesh<I>,
    sources: &[VertexId<I>],
    options: &DistanceOptions,
) -> DistanceField<I> {
    let n = mesh.num_vertices();
    let sources: BTreeSet<usize> = sources
        .iter()
        .map(|s| s.index())
        .filter(|&s| s < n)
        .collect();

    if n == 0 || sources.is_empty() {
        return DistanceField::unreachable(n);
    }

    let adjacency = weighted_adjacency(mesh);
    let mut distances = vec![f64::INFINITY; n];
    let mut heap = BinaryHeap::new();

    for &s in &sources {
        distances[s] = 0.0;
        heap.push(DijkstraEntry::new(s, 0.0));
    }

    while let Some(entry) = heap.pop() {
        let u = entry.vertex;
        let dist_u = entry.distance;

        // Stale entry: a shorter path was already found.
        if dist_u > distances[u] {
            continue;
        }

        for &(v, edge_len) in &adjacency[u] {
            let new_dist = dist_u + edge_len;
            if let Some(max_dist) = options.max_distance {
                if new_dist > max_dist {
                    continue;
                }
            }
            if new_dist < distances[v] {
                distances[v] = new_dist;
                heap.push(DijkstraEntry::new(v, new_dist));
            }
        }
    }

    DistanceField::new(distances, sources.len())
}

/// Distance from every vertex to the nearest feature vertex or singularity.
///
/// # Example
///
/// ```
/// use seamcut::prelude::*;
/// use seamcut::algo::geodesic::{distance_to_constraints, DistanceOptions};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
/// ];
/// let mesh: TriMesh = build_from_triangles(&vertices, &[[0, 1, 2]], &[]).unwrap();
///
/// // No feature and no singularity: nothing is reachable.
/// let field = distance_to_constraints(&mesh, &DistanceOptions::default());
/// assert_eq!(field.reachable_count(), 0);
/// ```
pub fn distance_to_constraints<I: MeshIndex>(
    mesh: &TriMesh<I>,
    options: &DistanceOptions,
) -> DistanceField<I> {
    let sources: Vec<VertexId<I>> = mesh
        .feature_vertices()
        .chain(mesh.singularities().map(|(v, _)| v))
        .collect();
    dijkstra_multiple(mesh, &sources, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{build_from_triangles, SingularityIndex};
    use nalgebra::Point3;

    fn create_grid_mesh(n: usize, lines: &[[usize; 2]]) -> TriMesh {
        let mut vertices = Vec::new();
        let mut faces = Vec::new();

        for j in 0..=n {
            for i in 0..=n {
                vertices.push(Point3::new(i as f64, j as f64, 0.0));
            }
        }

        for j in 0..n {
            for i in 0..n {
                let v00 = j * (n + 1) + i;
                let v10 = j * (n + 1) + i + 1;
                let v01 = (j + 1) * (n + 1) + i;
                let v11 = (j + 1) * (n + 1) + i + 1;

                faces.push([v00, v10, v11]);
                faces.push([v00, v11, v01]);
            }
        }

        build_from_triangles(&vertices, &faces, lines).unwrap()
    }

    #[test]
    fn test_single_source_on_triangle() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
        ];
        let mesh: TriMesh = build_from_triangles(&vertices, &[[0, 1, 2]], &[]).unwrap();
        let result = dijkstra_multiple(&mesh, &[VertexId::new(0)], &DistanceOptions::default());

        assert_eq!(result.distance(VertexId::new(0)), 0.0);
        assert!((result.distance(VertexId::new(1)) - 1.0).abs() < 1e-10);
        let expected = (0.5_f64.powi(2) + 1.0).sqrt();
        assert!((result.distance(VertexId::new(2)) - expected).abs() < 1e-10);
        assert_eq!(result.num_sources(), 1);
    }

    #[test]
    fn test_feature_line_sources() {
        // Bottom row 0 - 1 - 2 is a feature line.
        let mesh = create_grid_mesh(2, &[[0, 1], [1, 2]]);
        let result = distance_to_constraints(&mesh, &DistanceOptions::default());

        assert_eq!(result.num_sources(), 3);
        for v in 0..3 {
            assert_eq!(result.distance(VertexId::new(v)), 0.0);
        }
        for v in 3..6 {
            assert!((result.distance(VertexId::new(v)) - 1.0).abs() < 1e-10);
        }
        for v in 6..9 {
            assert!((result.distance(VertexId::new(v)) - 2.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_singularities_are_sources() {
        let mut mesh = create_grid_mesh(2, &[]);
        mesh.singularities.insert(VertexId::new(4), SingularityIndex::Five);
        let result = distance_to_constraints(&mesh, &DistanceOptions::default());

        assert_eq!(result.distance(VertexId::new(4)), 0.0);
        assert_eq!(result.reachable_count(), 9);
        // Corner 0 is one diagonal away from the centre.
        assert!((result.distance(VertexId::new(0)) - 2.0_f64.sqrt()).abs() < 1e-10);
        // Corner 2 needs two axis-aligned steps.
        assert!((result.distance(VertexId::new(2)) - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_lipschitz_along_edges() {
        let mut mesh = create_grid_mesh(4, &[[0, 1]]);
        mesh.singularities.insert(VertexId::new(18), SingularityIndex::Three);
        let result = distance_to_constraints(&mesh, &DistanceOptions::default());

        for e in mesh.edge_ids() {
            let [a, b] = mesh.edge_vertices(e);
            let (da, db) = (result.distance(a), result.distance(b));
            assert!(da >= 0.0 && db >= 0.0);
            assert!(
                (da - db).abs() <= mesh.edge_length(e) + 1e-10,
                "|{} - {}| > {}",
                da,
                db,
                mesh.edge_length(e)
            );
        }
    }

    #[test]
    fn test_no_sources() {
        let mesh = create_grid_mesh(2, &[]);
        let result = distance_to_constraints(&mesh, &DistanceOptions::default());

        assert_eq!(result.reachable_count(), 0);
        assert_eq!(result.num_sources(), 0);
        assert!(result.farthest_vertex().is_none());
    }

    #[test]
    fn test_disconnected_vertex_stays_infinite() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(5.0, 5.0, 5.0),
        ];
        let mesh: TriMesh = build_from_triangles(&vertices, &[[0, 1, 2]], &[[0, 1]]).unwrap();
        let result = distance_to_constraints(&mesh, &DistanceOptions::default());

        assert!(!result.is_reachable(VertexId::new(3)));
        assert_eq!(result.reachable_count(), 3);
    }

    #[test]
    fn test_max_distance() {
        let mesh = create_grid_mesh(3, &[]);
        let options = DistanceOptions::default().with_max_distance(1.5);
        let result = dijkstra_multiple(&mesh, &[VertexId::new(0)], &options);

        assert!(result.is_reachable(VertexId::new(1)));
        assert!(result.is_reachable(VertexId::new(5)));
        assert!(!result.is_reachable(VertexId::new(15)));
    }

    #[test]
    fn test_farthest_vertex() {
        let mesh = create_grid_mesh(2, &[[0, 1], [1, 2]]);
        let result = distance_to_constraints(&mesh, &DistanceOptions::default());

        let (_, dist) = result.farthest_vertex().unwrap();
        assert!((dist - 2.0).abs() < 1e-10);
    }
}
