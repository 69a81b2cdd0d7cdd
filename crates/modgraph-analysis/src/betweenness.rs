//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness measures how often a module lies on shortest paths between
//! other pairs of modules. High-betweenness modules are the structural
//! bottlenecks of the build — edits to them invalidate the widest swath of
//! downstream compilation.
//!
//! # Algorithm
//!
//! Brandes (2001), specialized to unweighted directed graphs:
//!
//! 1. For each source `s`, BFS computes distances, shortest-path counts
//!    `σ`, and predecessor lists.
//! 2. Dependencies `δ` accumulate in reverse discovery order (farthest
//!    nodes first): `δ[v] += (σ[v]/σ[w]) · (1 + δ[w])` for each
//!    predecessor `v` of `w`.
//! 3. `δ[w]` for `w ≠ s` sums into `w`'s centrality across all sources.
//!
//! Cycles need no special handling — BFS visits each node once — and
//! disconnected modules simply never accumulate contributions. Complexity
//! O(V·(V+E)).
//!
//! Scores are not normalized; callers wanting the normalized form divide
//! by `(n−1)·(n−2)`.

use std::collections::{HashMap, VecDeque};

use petgraph::{
    Direction,
    graph::NodeIndex,
    visit::{IntoNodeIdentifiers, NodeIndexable},
};
use tracing::instrument;

use modgraph_core::{DependencyMap, ModuleId};

use crate::indexed::IndexedGraph;

/// Compute betweenness centrality for every module in `map`.
///
/// A module not present as a key is treated as having no outgoing edges.
/// Every indexed module appears in the result, zero-scored when no
/// shortest path runs through it.
#[must_use]
#[instrument(skip(map), fields(modules = map.len()))]
pub fn betweenness_centrality(map: &DependencyMap) -> HashMap<ModuleId, f64> {
    let ig = IndexedGraph::from_map(map);
    let g = &ig.graph;
    let n = g.node_count();

    if n == 0 {
        return HashMap::new();
    }

    // Node-indexed centrality accumulator.
    let mut cb: Vec<f64> = vec![0.0; n];

    for s in g.node_identifiers() {
        let si = g.to_index(s);

        // Discovery order; popped farthest-first in the accumulation pass.
        let mut stack: Vec<NodeIndex> = Vec::with_capacity(n);

        // predecessors[w] = nodes immediately before w on shortest paths
        // from s.
        let mut predecessors: Vec<Vec<NodeIndex>> = vec![Vec::new(); n];

        // sigma[t] = number of shortest paths s → t.
        let mut sigma: Vec<f64> = vec![0.0; n];
        sigma[si] = 1.0;

        // dist[t] = BFS distance from s (-1 = unvisited).
        let mut dist: Vec<i64> = vec![-1; n];
        dist[si] = 0;

        let mut queue: VecDeque<NodeIndex> = VecDeque::new();
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            let vi = g.to_index(v);
            stack.push(v);

            for w in g.neighbors_directed(v, Direction::Outgoing) {
                let wi = g.to_index(w);

                if dist[wi] < 0 {
                    dist[wi] = dist[vi] + 1;
                    queue.push_back(w);
                }

                // New shortest-distance edge into w: fold in v's path count.
                if dist[wi] == dist[vi] + 1 {
                    sigma[wi] += sigma[vi];
                    predecessors[wi].push(v);
                }
            }
        }

        // Dependency accumulation, farthest nodes first.
        let mut delta: Vec<f64> = vec![0.0; n];

        while let Some(w) = stack.pop() {
            let wi = g.to_index(w);

            for &v in &predecessors[wi] {
                let vi = g.to_index(v);
                if sigma[wi] > 0.0 {
                    delta[vi] += (sigma[vi] / sigma[wi]) * (1.0 + delta[wi]);
                }
            }

            if wi != si {
                cb[wi] += delta[wi];
            }
        }
    }

    g.node_identifiers()
        .filter_map(|idx| {
            g.node_weight(idx)
                .map(|module| (module.clone(), cb[g.to_index(idx)]))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
