//! Property tests for the analytics.
//!
//! Random edge sets (including cycles and self-loops) exercise the
//! invariants each analytic promises for arbitrary input; a separate
//! ordered-edge strategy produces DAGs for the depth recurrence.

use std::collections::{HashSet, VecDeque};

use proptest::prelude::*;

use modgraph_analysis::{
    betweenness_centrality, build_reverse_map, compute_depth_map, count_transitive_dependencies,
    count_transitive_dependents, detect_cycles,
};
use modgraph_core::{DependencyMap, ModuleId};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn mid(n: u8) -> ModuleId {
    ModuleId::new("main", format!(":m{n:02}"))
}

fn map_from(edges: &[(u8, u8)]) -> DependencyMap {
    let mut map = DependencyMap::new();
    for &(from, to) in edges {
        map.entry(mid(from)).or_default().insert(mid(to));
        map.entry(mid(to)).or_default();
    }
    map
}

/// Reference BFS used to check the reachability counters: everything
/// reachable from `module`, the module included only if a cycle returns
/// to it.
fn reachable_set(module: &ModuleId, adjacency: &DependencyMap) -> HashSet<ModuleId> {
    let mut visited: HashSet<ModuleId> = HashSet::new();
    let mut queue: VecDeque<ModuleId> = adjacency
        .get(module)
        .map(|direct| direct.iter().cloned().collect())
        .unwrap_or_default();

    while let Some(current) = queue.pop_front() {
        if visited.insert(current.clone()) {
            if let Some(successors) = adjacency.get(&current) {
                queue.extend(successors.iter().cloned());
            }
        }
    }
    visited
}

fn arb_edges() -> impl Strategy<Value = Vec<(u8, u8)>> {
    proptest::collection::vec((0u8..10, 0u8..10), 0..40)
}

/// Edges forced low → high: always a DAG.
fn arb_dag_edges() -> impl Strategy<Value = Vec<(u8, u8)>> {
    proptest::collection::vec((0u8..10, 0u8..10), 0..40).prop_map(|pairs| {
        pairs
            .into_iter()
            .filter(|(a, b)| a != b)
            .map(|(a, b)| (a.min(b), a.max(b)))
            .collect::<Vec<(u8, u8)>>()
    })
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn reverse_map_covers_every_forward_key(edges in arb_edges()) {
        let map = map_from(&edges);
        let reverse = build_reverse_map(&map);

        for key in map.keys() {
            prop_assert!(reverse.contains_key(key));
        }
    }

    #[test]
    fn reverse_map_has_one_reverse_edge_per_forward_edge(edges in arb_edges()) {
        let map = map_from(&edges);
        let reverse = build_reverse_map(&map);

        let forward_total: usize = map.values().map(HashSet::len).sum();
        let reverse_total: usize = reverse.values().map(HashSet::len).sum();
        prop_assert_eq!(forward_total, reverse_total);

        for (from, successors) in &map {
            for to in successors {
                prop_assert!(reverse[to].contains(from));
            }
        }
    }

    #[test]
    fn dependency_and_dependent_views_are_symmetric(edges in arb_edges()) {
        let map = map_from(&edges);
        let reverse = build_reverse_map(&map);

        for u in map.keys() {
            let down = reachable_set(u, &map);
            for v in &down {
                let up = reachable_set(v, &reverse);
                prop_assert!(
                    up.contains(u),
                    "{u} reaches {v} forward but not backward"
                );
            }
        }
    }

    #[test]
    fn counts_match_the_reference_bfs(edges in arb_edges()) {
        let map = map_from(&edges);
        let reverse = build_reverse_map(&map);

        for module in map.keys() {
            let mut down = reachable_set(module, &map);
            down.remove(module);
            prop_assert_eq!(count_transitive_dependencies(module, &map), down.len());

            let mut up = reachable_set(module, &reverse);
            up.remove(module);
            prop_assert_eq!(count_transitive_dependents(module, &reverse), up.len());
        }
    }

    #[test]
    fn dag_depth_satisfies_the_recurrence(edges in arb_dag_edges()) {
        let map = map_from(&edges);
        let depth = compute_depth_map(&map);

        for (module, successors) in &map {
            let expected = successors
                .iter()
                .map(|s| depth.get(s).copied().unwrap_or(0) + 1)
                .max()
                .unwrap_or(0);
            prop_assert_eq!(depth[module], expected, "depth({})", module);
        }
    }

    #[test]
    fn cycle_members_are_mutually_reachable(edges in arb_edges()) {
        let map = map_from(&edges);
        let cycles = detect_cycles(&map);

        for (module, info) in &cycles {
            prop_assert!(info.size >= 2);
            prop_assert_eq!(info.size, info.members.len());

            let down = reachable_set(module, &map);
            for member in &info.members {
                if member != module {
                    prop_assert!(
                        down.contains(member),
                        "{module} cannot reach fellow member {member}"
                    );
                }
            }
        }
    }

    #[test]
    fn betweenness_is_never_negative(edges in arb_edges()) {
        let map = map_from(&edges);
        for (module, score) in betweenness_centrality(&map) {
            prop_assert!(score >= 0.0, "{module} scored {score}");
        }
    }
}
