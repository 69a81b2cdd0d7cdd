//! Summary statistics for a dependency map.
//!
//! Coarse shape numbers reported alongside the per-module analytics:
//! counts, density, degree extremes, and how much of the graph sits inside
//! cycles.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use modgraph_core::DependencyMap;

use crate::cycles::detect_cycles;
use crate::reachability::build_reverse_map;

/// Shape summary of one dependency map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    /// Number of modules in the graph.
    pub module_count: usize,
    /// Number of direct dependency edges.
    pub edge_count: usize,
    /// `edge_count / (n·(n−1))`; 0.0 below two modules.
    pub density: f64,
    /// Modules with no incoming edges (nothing depends on them).
    pub source_count: usize,
    /// Modules with no outgoing edges (they depend on nothing).
    pub sink_count: usize,
    /// Highest number of incoming edges on one module.
    pub max_in_degree: usize,
    /// Highest number of outgoing edges from one module.
    pub max_out_degree: usize,
    /// Modules listing themselves as a successor.
    pub self_loop_count: usize,
    /// Modules belonging to a dependency cycle of two or more members.
    pub cycle_member_count: usize,
}

impl GraphStats {
    /// Compute statistics for `map`.
    #[must_use]
    pub fn from_map(map: &DependencyMap) -> Self {
        let reverse = build_reverse_map(map);

        let module_count = reverse.len();
        let edge_count = map.values().map(HashSet::len).sum();

        let source_count = reverse.values().filter(|p| p.is_empty()).count();
        let sink_count = reverse
            .keys()
            .filter(|&module| map.get(module).is_none_or(HashSet::is_empty))
            .count();

        let max_in_degree = reverse.values().map(HashSet::len).max().unwrap_or(0);
        let max_out_degree = map.values().map(HashSet::len).max().unwrap_or(0);

        let self_loop_count = map
            .iter()
            .filter(|(module, successors)| successors.contains(*module))
            .count();

        let cycle_member_count = detect_cycles(map).len();

        Self {
            module_count,
            edge_count,
            density: compute_density(module_count, edge_count),
            source_count,
            sink_count,
            max_in_degree,
            max_out_degree,
            self_loop_count,
            cycle_member_count,
        }
    }

    /// Return `true` if the graph contains at least one dependency cycle.
    #[must_use]
    pub const fn has_cycles(&self) -> bool {
        self.cycle_member_count > 0
    }
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(module_count: usize, edge_count: usize) -> f64 {
    if module_count < 2 {
        return 0.0_f64;
    }
    let max_edges = (module_count * (module_count - 1)) as f64;
    edge_count as f64 / max_edges
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
