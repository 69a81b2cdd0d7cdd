//! Transitive reachability counting over forward and reverse adjacency.
//!
//! Two symmetric questions, each a plain BFS: how many modules does this
//! module transitively depend on (rebuild cost of its dependencies), and
//! how many modules transitively depend on it (blast radius of a change).
//! The reverse-adjacency map is built once per analysis pass and shared
//! across dependent counts.

use std::collections::{HashSet, VecDeque};

use tracing::instrument;

use modgraph_core::{DependencyMap, ModuleId};

/// Invert every edge of `map`.
///
/// Every key of the forward map appears as a key of the reverse map, as
/// does every successor, so lookups on either side never miss — modules
/// with no incoming edges map to the empty set.
#[must_use]
#[instrument(skip(map), fields(modules = map.len()))]
pub fn build_reverse_map(map: &DependencyMap) -> DependencyMap {
    let mut reverse = DependencyMap::with_capacity(map.len());

    for module in map.keys() {
        reverse.entry(module.clone()).or_default();
    }
    for (from, successors) in map {
        for to in successors {
            reverse.entry(to.clone()).or_default().insert(from.clone());
        }
    }

    reverse
}

/// Number of modules `module` transitively depends on, itself excluded.
///
/// A module absent from `map` has no outgoing edges and counts 0.
#[must_use]
pub fn count_transitive_dependencies(module: &ModuleId, map: &DependencyMap) -> usize {
    count_reachable(module, map)
}

/// Number of modules that transitively depend on `module`, itself
/// excluded. `reverse_map` comes from [`build_reverse_map`].
#[must_use]
pub fn count_transitive_dependents(module: &ModuleId, reverse_map: &DependencyMap) -> usize {
    count_reachable(module, reverse_map)
}

/// BFS from `module`'s direct neighbors. The module itself never counts,
/// even when a cycle leads back to it; re-expanding it could only surface
/// its direct neighbors, which seeded the frontier already.
fn count_reachable(module: &ModuleId, adjacency: &DependencyMap) -> usize {
    let Some(direct) = adjacency.get(module) else {
        return 0;
    };

    let mut visited: HashSet<&ModuleId> = HashSet::new();
    let mut queue: VecDeque<&ModuleId> = VecDeque::new();

    for next in direct {
        if next != module && visited.insert(next) {
            queue.push_back(next);
        }
    }

    while let Some(current) = queue.pop_front() {
        if let Some(successors) = adjacency.get(current) {
            for next in successors {
                if next != module && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }

    visited.len()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
