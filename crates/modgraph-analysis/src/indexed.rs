//! Dense indexed view of a dependency map.
//!
//! Analytics that want array-indexed bookkeeping (Brandes, Tarjan) build
//! this petgraph-backed view once and iterate node indices instead of
//! hashing module ids in their inner loops.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};

use modgraph_core::{DependencyMap, ModuleId};

/// Petgraph view over a [`DependencyMap`].
///
/// Nodes are inserted in sorted order so indices — and everything
/// downstream that iterates them — are stable across runs. Successors that
/// are not themselves keys (an unclosed map) still get a node; they simply
/// have no outgoing edges.
#[derive(Debug)]
pub(crate) struct IndexedGraph {
    pub graph: DiGraph<ModuleId, ()>,
}

impl IndexedGraph {
    pub fn from_map(map: &DependencyMap) -> Self {
        let mut all: Vec<&ModuleId> = map.keys().collect();
        for successors in map.values() {
            for successor in successors {
                if !map.contains_key(successor) {
                    all.push(successor);
                }
            }
        }
        all.sort_unstable();
        all.dedup();

        let mut graph = DiGraph::new();
        let mut index_of: HashMap<&ModuleId, NodeIndex> = HashMap::with_capacity(all.len());
        for &module in &all {
            let idx = graph.add_node(module.clone());
            index_of.insert(module, idx);
        }

        for &module in &all {
            let Some(successors) = map.get(module) else {
                continue;
            };
            let mut ordered: Vec<&ModuleId> = successors.iter().collect();
            ordered.sort_unstable();
            for to in ordered {
                graph.add_edge(index_of[module], index_of[to], ());
            }
        }

        Self { graph }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn mid(path: &str) -> ModuleId {
        ModuleId::new("main", path)
    }

    fn index_of(ig: &IndexedGraph, module: &ModuleId) -> NodeIndex {
        ig.graph
            .node_indices()
            .find(|&idx| ig.graph.node_weight(idx) == Some(module))
            .expect("module indexed")
    }

    #[test]
    fn indexes_every_key_and_edge() {
        let mut map = DependencyMap::new();
        map.insert(mid(":a"), HashSet::from([mid(":b")]));
        map.insert(mid(":b"), HashSet::new());

        let ig = IndexedGraph::from_map(&map);
        assert_eq!(ig.graph.node_count(), 2);
        assert_eq!(ig.graph.edge_count(), 1);

        let a = index_of(&ig, &mid(":a"));
        let b = index_of(&ig, &mid(":b"));
        assert!(ig.graph.contains_edge(a, b));
    }

    #[test]
    fn dangling_successor_still_gets_a_node() {
        let mut map = DependencyMap::new();
        map.insert(mid(":a"), HashSet::from([mid(":ghost")]));

        let ig = IndexedGraph::from_map(&map);
        assert_eq!(ig.graph.node_count(), 2);
        index_of(&ig, &mid(":ghost"));
    }

    #[test]
    fn node_numbering_follows_sorted_order() {
        let mut map = DependencyMap::new();
        map.insert(mid(":z"), HashSet::new());
        map.insert(mid(":a"), HashSet::new());
        map.insert(mid(":m"), HashSet::new());

        let ig = IndexedGraph::from_map(&map);
        let weights: Vec<&ModuleId> = ig
            .graph
            .node_indices()
            .filter_map(|idx| ig.graph.node_weight(idx))
            .collect();
        assert_eq!(weights, vec![&mid(":a"), &mid(":m"), &mid(":z")]);
    }
}
