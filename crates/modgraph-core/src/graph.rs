//! Read-only query façade over a completed dependency map.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::builder::DependencyMap;
use crate::error::GraphError;
use crate::node::ModuleId;

/// Read-only queries over a completed [`DependencyMap`].
///
/// The façade never mutates the map; it only answers edge, adjacency, and
/// shortest-path questions. Queries for a module the map never contained
/// fail with [`GraphError::NotInGraph`] — that is a caller bug, not a
/// runtime condition.
#[derive(Debug)]
pub struct ModuleGraph {
    map: DependencyMap,
}

impl ModuleGraph {
    /// Wrap a completed dependency map.
    #[must_use]
    pub fn new(map: DependencyMap) -> Self {
        Self { map }
    }

    /// Borrow the underlying dependency map.
    #[must_use]
    pub fn map(&self) -> &DependencyMap {
        &self.map
    }

    /// Every direct edge as a `(from, to)` pair, sorted for stable output.
    #[must_use]
    pub fn edges(&self) -> Vec<(&ModuleId, &ModuleId)> {
        let mut edges: Vec<(&ModuleId, &ModuleId)> = self
            .map
            .iter()
            .flat_map(|(from, successors)| successors.iter().map(move |to| (from, to)))
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Direct successors of `module` (the modules it depends on).
    ///
    /// # Errors
    ///
    /// [`GraphError::NotInGraph`] when `module` was never part of this
    /// graph.
    pub fn successors_of(&self, module: &ModuleId) -> Result<&HashSet<ModuleId>, GraphError> {
        self.map
            .get(module)
            .ok_or_else(|| GraphError::NotInGraph(module.clone()))
    }

    /// Modules that have `module` as a direct successor (the modules that
    /// access it), found by scanning the edge set.
    ///
    /// # Errors
    ///
    /// [`GraphError::NotInGraph`] when `module` was never part of this
    /// graph.
    pub fn accessors_of(&self, module: &ModuleId) -> Result<HashSet<ModuleId>, GraphError> {
        if !self.map.contains_key(module) {
            return Err(GraphError::NotInGraph(module.clone()));
        }

        Ok(self
            .map
            .iter()
            .filter(|(_, successors)| successors.contains(module))
            .map(|(from, _)| from.clone())
            .collect())
    }

    /// Shortest path from `from` to `to` by edge count, both endpoints
    /// inclusive, or `None` when `to` is unreachable.
    ///
    /// Ties between equal-length paths are broken deterministically:
    /// successors are visited in sorted order, so the same map always
    /// yields the same path.
    ///
    /// # Errors
    ///
    /// [`GraphError::NotInGraph`] when either endpoint was never part of
    /// this graph.
    pub fn find_shortest_path(
        &self,
        from: &ModuleId,
        to: &ModuleId,
    ) -> Result<Option<Vec<ModuleId>>, GraphError> {
        for endpoint in [from, to] {
            if !self.map.contains_key(endpoint) {
                return Err(GraphError::NotInGraph(endpoint.clone()));
            }
        }

        if from == to {
            return Ok(Some(vec![from.clone()]));
        }

        let mut parent: HashMap<&ModuleId, &ModuleId> = HashMap::new();
        let mut visited: HashSet<&ModuleId> = HashSet::from([from]);
        let mut queue: VecDeque<&ModuleId> = VecDeque::from([from]);

        while let Some(current) = queue.pop_front() {
            let Some(successors) = self.map.get(current) else {
                continue;
            };

            let mut ordered: Vec<&ModuleId> = successors.iter().collect();
            ordered.sort_unstable();

            for next in ordered {
                if visited.insert(next) {
                    parent.insert(next, current);
                    if next == to {
                        return Ok(Some(reconstruct_path(from, to, &parent)));
                    }
                    queue.push_back(next);
                }
            }
        }

        Ok(None)
    }
}

/// Rebuild the path `from → … → to` by walking parent links back from `to`.
fn reconstruct_path(
    from: &ModuleId,
    to: &ModuleId,
    parent: &HashMap<&ModuleId, &ModuleId>,
) -> Vec<ModuleId> {
    let mut path = vec![to.clone()];
    let mut cursor = to;

    while cursor != from {
        match parent.get(cursor) {
            Some(&previous) => {
                cursor = previous;
                path.push(cursor.clone());
            }
            None => break,
        }
    }

    path.reverse();
    path
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
