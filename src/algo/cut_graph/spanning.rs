//! Best-first spanning forest over the dual graph.

use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap};

use crate::algo::geodesic::DistanceField;
use crate::mesh::{EdgeId, MeshIndex, TriMesh, TriangleId};

/// Order in which the frontier releases triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrowthOrder {
    /// Largest mean distance first: growth starts far from features and
    /// singularities and reaches them last.
    #[default]
    FarthestFirst,
    /// Smallest mean distance first.
    NearestFirst,
}

/// Options for the spanning forest.
#[derive(Debug, Clone, Default)]
pub struct SpanningOptions {
    /// Frontier order.
    pub order: GrowthOrder,
}

impl SpanningOptions {
    /// Set the frontier order.
    pub fn with_order(mut self, order: GrowthOrder) -> Self {
        self.order = order;
        self
    }
}

/// Frontier entry. Higher `key` pops first; equal keys pop the lower
/// triangle index first.
#[derive(Debug, Clone)]
struct FrontierEntry {
    key: f64,
    triangle: usize,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .total_cmp(&other.key)
            .then_with(|| other.triangle.cmp(&self.triangle))
    }
}

/// A spanning forest of the dual graph and the edges it leaves uncrossed.
#[derive(Debug, Clone)]
pub struct SpanningForest<I: MeshIndex = u32> {
    candidates: BTreeSet<EdgeId<I>>,
    parent_edge: Vec<Option<EdgeId<I>>>,
    roots: Vec<TriangleId<I>>,
}

impl<I: MeshIndex> SpanningForest<I> {
    /// Candidate cut edges: every edge not crossed by the forest, except
    /// open-boundary edges that are not features.
    #[inline]
    pub fn candidates(&self) -> &BTreeSet<EdgeId<I>> {
        &self.candidates
    }

    /// Consume the forest, keeping the candidate edges.
    pub fn into_candidates(self) -> BTreeSet<EdgeId<I>> {
        self.candidates
    }

    /// The edge a triangle was reached through, `None` for roots.
    #[inline]
    pub fn parent_edge(&self, t: TriangleId<I>) -> Option<EdgeId<I>> {
        self.parent_edge[t.index()]
    }

    /// First triangle of each tree, in visiting order.
    #[inline]
    pub fn roots(&self) -> &[TriangleId<I>] {
        &self.roots
    }

    /// Number of trees, one per connected component of the dual graph.
    #[inline]
    pub fn num_components(&self) -> usize {
        self.roots.len()
    }

    /// Number of (triangle, edge) connections the forest made.
    pub fn num_connections(&self) -> usize {
        self.parent_edge.iter().filter(|e| e.is_some()).count()
    }

    /// Number of triangles reached, as a root or through a connection.
    pub fn num_visited(&self) -> usize {
        self.num_components() + self.num_connections()
    }
}

/// Grow a spanning forest over the triangles of `mesh`, prioritised by the
/// mean corner distance of each triangle.
///
/// Two triangles are adjacent when they share a non-feature edge. Each tree
/// starts at the lowest-indexed unvisited triangle. Every edge used to reach
/// a new triangle is removed from the candidate set, which starts as all
/// feature edges and all edges with two incident triangles.
pub fn build_spanning_forest<I: MeshIndex>(
    mesh: &TriMesh<I>,
    field: &DistanceField<I>,
    options: &SpanningOptions,
) -> SpanningForest<I> {
    let n = mesh.num_triangles();
    let keys: Vec<f64> = mesh
        .triangle_ids()
        .map(|t| {
            let mean = field.triangle_mean(mesh, t);
            match options.order {
                GrowthOrder::FarthestFirst => mean,
                GrowthOrder::NearestFirst => -mean,
            }
        })
        .collect();

    let mut candidates: BTreeSet<EdgeId<I>> = mesh
        .edge_ids()
        .filter(|&e| mesh.is_feature_edge(e) || !mesh.is_boundary_edge(e))
        .collect();
    let mut visited = vec![false; n];
    let mut parent_edge = vec![None; n];
    let mut roots = Vec::new();
    let mut heap = BinaryHeap::new();
    let mut next_root = 0;

    loop {
        while next_root < n && visited[next_root] {
            next_root += 1;
        }
        if next_root == n {
            break;
        }

        visited[next_root] = true;
        roots.push(TriangleId::new(next_root));
        heap.push(FrontierEntry {
            key: keys[next_root],
            triangle: next_root,
        });

        while let Some(entry) = heap.pop() {
            let t = TriangleId::new(entry.triangle);
            for e in mesh.triangle_edges(t) {
                if mesh.is_feature_edge(e) {
                    continue;
                }
                for &neighbor in mesh.edge_triangles(e) {
                    let ni = neighbor.index();
                    if visited[ni] {
                        continue;
                    }
                    visited[ni] = true;
                    parent_edge[ni] = Some(e);
                    candidates.remove(&e);
                    heap.push(FrontierEntry {
                        key: keys[ni],
                        triangle: ni,
                    });
                }
            }
        }
    }

    log::debug!(
        "spanning forest: {} trees, {} connections, {} candidate edges",
        roots.len(),
        n - roots.len(),
        candidates.len()
    );

    SpanningForest {
        candidates,
        parent_edge,
        roots,
    }
}
