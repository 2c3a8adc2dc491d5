//! Leaf trimming of the candidate edge set.

use std::collections::BTreeSet;

use crate::mesh::{EdgeId, MeshIndex, TriMesh, VertexId};

use super::CutGraph;

/// Remove dangling candidate edges until every remaining leaf is anchored.
///
/// A vertex's degree counts the candidate edges, feature edges and open
/// boundary edges touching it, plus one if it is a singularity. A vertex of
/// degree 1 that still owns a removable (non-feature candidate) edge is a
/// leaf: the edge is dropped and the neighbour at its other end is
/// re-examined. Feature edges are never dropped and singularities never
/// become leaves.
///
/// Open boundary edges anchor branches the way feature edges do, so a
/// singularity on a patch without features keeps its path to the boundary.
/// They are not part of the returned graph.
///
/// Leaf removal order does not change the result, so the trimmed graph is
/// independent of the order leaves are discovered in.
pub fn trim_cut_graph<I: MeshIndex>(
    mesh: &TriMesh<I>,
    candidates: &BTreeSet<EdgeId<I>>,
) -> CutGraph<I> {
    let n = mesh.num_vertices();
    let mut degree = vec![0usize; n];
    let mut adjacency: Vec<Vec<(VertexId<I>, EdgeId<I>)>> = vec![Vec::new(); n];

    let graph_edges: BTreeSet<EdgeId<I>> = candidates
        .iter()
        .copied()
        .chain(mesh.feature_edges())
        .chain(mesh.edge_ids().filter(|&e| mesh.is_boundary_edge(e)))
        .collect();
    for &e in &graph_edges {
        let [v0, v1] = mesh.edge_vertices(e);
        degree[v0.index()] += 1;
        degree[v1.index()] += 1;
        if candidates.contains(&e) && !mesh.is_feature_edge(e) {
            adjacency[v0.index()].push((v1, e));
            adjacency[v1.index()].push((v0, e));
        }
    }
    for (v, _) in mesh.singularities() {
        degree[v.index()] += 1;
    }

    let is_leaf = |v: usize, degree: &[usize], adjacency: &[Vec<(VertexId<I>, EdgeId<I>)>]| {
        degree[v] == 1 && !adjacency[v].is_empty()
    };

    // Reversed so the lowest vertex pops first.
    let mut stack: Vec<usize> = (0..n)
        .rev()
        .filter(|&v| is_leaf(v, &degree, &adjacency))
        .collect();

    let mut remaining = candidates.clone();
    let mut removed = 0;

    while let Some(leaf) = stack.pop() {
        // Degrees only decrease, so a queued vertex may have become isolated.
        if !is_leaf(leaf, &degree, &adjacency) {
            continue;
        }
        let Some((neighbor, e)) = adjacency[leaf].pop() else {
            continue;
        };

        remaining.remove(&e);
        removed += 1;
        degree[leaf] -= 1;

        let ni = neighbor.index();
        degree[ni] -= 1;
        if let Some(pos) = adjacency[ni].iter().position(|&(_, edge)| edge == e) {
            adjacency[ni].swap_remove(pos);
        }
        if is_leaf(ni, &degree, &adjacency) {
            stack.push(ni);
        }
    }

    log::debug!(
        "trimmed {} of {} candidate edges, {} remain",
        removed,
        candidates.len(),
        remaining.len()
    );

    CutGraph::new(remaining, removed)
}
