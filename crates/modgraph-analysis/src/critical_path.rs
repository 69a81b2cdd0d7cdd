//! Critical path and depth analysis.
//!
//! # Overview
//!
//! The depth of a module is the length of the longest path from it down to
//! any sink — the number of compilation steps that must run serially below
//! it. The critical path is the deepest such chain among modules the
//! caller considers interesting: the theoretical lower bound on build time
//! with infinite parallelism.
//!
//! # Algorithm
//!
//! Depth is propagated with Kahn's algorithm run in reverse. Sinks
//! (no outgoing edges) finalize at depth 0 and seed the queue; each
//! finalized module offers `depth + 1` to its predecessors, which keep the
//! running maximum and finalize once their last pending successor has
//! resolved. Modules whose pending counter never clears are trapped in a
//! cycle and fall back to depth 0 — propagation terminates on any input
//! instead of chasing the cycle forever.
//!
//! Root selection filters through a caller-supplied exclusion predicate so
//! applications, demos, and wiring aggregators do not masquerade as
//! interesting bottlenecks. The predicate only affects which walks start;
//! depth itself is computed uniformly for every module.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::instrument;

use modgraph_core::{DependencyMap, ModuleId};

use crate::reachability::build_reverse_map;

// ---------------------------------------------------------------------------
// DepthInfo
// ---------------------------------------------------------------------------

/// Depth and critical-path membership for one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthInfo {
    /// Length of the longest path from this module down to any sink.
    pub depth: usize,
    /// Whether the module lies on the longest dependency chain.
    pub on_critical_path: bool,
}

// ---------------------------------------------------------------------------
// Depth propagation
// ---------------------------------------------------------------------------

/// Longest-path depth for every module in `map`.
///
/// depth = 0 for modules with no successors; otherwise
/// `1 + max(depth of successor)`. Cycle-trapped modules default to 0.
#[must_use]
#[instrument(skip(map), fields(modules = map.len()))]
pub fn compute_depth_map(map: &DependencyMap) -> HashMap<ModuleId, usize> {
    let reverse = build_reverse_map(map);

    // Pending successor count per module; zero means depth is final.
    let mut pending: HashMap<&ModuleId, usize> = reverse
        .keys()
        .map(|module| (module, map.get(module).map_or(0, HashSet::len)))
        .collect();

    let mut queue: VecDeque<&ModuleId> = pending
        .iter()
        .filter_map(|(&module, &count)| (count == 0).then_some(module))
        .collect();

    // Best depth offered to a module so far by its finalized successors.
    let mut candidate: HashMap<&ModuleId, usize> = HashMap::new();
    let mut depth: HashMap<ModuleId, usize> = HashMap::with_capacity(reverse.len());

    while let Some(module) = queue.pop_front() {
        let d = candidate.get(module).copied().unwrap_or(0);
        depth.insert(module.clone(), d);

        if let Some(predecessors) = reverse.get(module) {
            for predecessor in predecessors {
                let offered = candidate.entry(predecessor).or_insert(0);
                *offered = (*offered).max(d + 1);

                if let Some(count) = pending.get_mut(predecessor) {
                    *count = count.saturating_sub(1);
                    if *count == 0 {
                        queue.push_back(predecessor);
                    }
                }
            }
        }
    }

    // Whatever never finalized sits in a cycle: depth 0.
    for module in reverse.keys() {
        depth.entry(module.clone()).or_insert(0);
    }

    depth
}

// ---------------------------------------------------------------------------
// Critical path
// ---------------------------------------------------------------------------

/// Depth and critical-path membership for every module.
///
/// `is_excluded` marks modules that must not anchor a critical-path walk
/// (applications, demos, wiring aggregators). Roots are every non-excluded
/// module at the maximum depth found among non-excluded modules; from each
/// root a greedy walk follows the deepest successor, and the union of all
/// walks is the critical set.
#[must_use]
pub fn analyze_critical_path<F>(map: &DependencyMap, is_excluded: F) -> HashMap<ModuleId, DepthInfo>
where
    F: Fn(&ModuleId) -> bool,
{
    let depth = compute_depth_map(map);
    let critical = critical_members(map, &depth, &is_excluded);

    depth
        .into_iter()
        .map(|(module, d)| {
            let on_critical_path = critical.contains(&module);
            (
                module,
                DepthInfo {
                    depth: d,
                    on_critical_path,
                },
            )
        })
        .collect()
}

/// The unavoidable serialized compilation chain below one target.
///
/// The walk starts not at `target` but at its deepest dependency: every
/// non-excluded direct successor is a candidate, and an excluded direct
/// successor (an aggregator) is looked through one hop to its own
/// successors. Returns the chain ordered deepest-first, empty when the
/// target is unknown or has no eligible dependencies.
#[must_use]
pub fn critical_path_for<F>(
    target: &ModuleId,
    map: &DependencyMap,
    is_excluded: F,
) -> Vec<ModuleId>
where
    F: Fn(&ModuleId) -> bool,
{
    let Some(direct) = map.get(target) else {
        return Vec::new();
    };

    let depth = compute_depth_map(map);

    let mut candidates: HashSet<&ModuleId> = HashSet::new();
    for successor in direct {
        if is_excluded(successor) {
            if let Some(beyond) = map.get(successor) {
                candidates.extend(beyond.iter());
            }
        } else {
            candidates.insert(successor);
        }
    }

    let Some(start) = candidates
        .into_iter()
        .filter(|&module| !is_excluded(module))
        .max_by(|a, b| compare_by_depth(a, b, &depth))
    else {
        return Vec::new();
    };

    let mut chain = Vec::new();
    let mut seen: HashSet<ModuleId> = HashSet::new();
    let mut current = start.clone();

    loop {
        if !seen.insert(current.clone()) {
            break;
        }
        chain.push(current.clone());
        match best_successor(&current, map, &depth) {
            Some(next) => current = next,
            None => break,
        }
    }

    chain
}

fn critical_members<F>(
    map: &DependencyMap,
    depth: &HashMap<ModuleId, usize>,
    is_excluded: &F,
) -> HashSet<ModuleId>
where
    F: Fn(&ModuleId) -> bool,
{
    let max_depth = depth
        .iter()
        .filter(|&(module, _)| !is_excluded(module))
        .map(|(_, &d)| d)
        .max();
    let Some(max_depth) = max_depth else {
        return HashSet::new();
    };

    let mut roots: Vec<&ModuleId> = depth
        .iter()
        .filter(|&(module, &d)| d == max_depth && !is_excluded(module))
        .map(|(module, _)| module)
        .collect();
    roots.sort_unstable();

    let mut critical: HashSet<ModuleId> = HashSet::new();
    for root in roots {
        walk_best_successors(root, map, depth, &mut critical);
    }
    critical
}

/// Greedy walk from `start` through deepest successors, recording visited
/// modules into `critical`. A module already recorded ends the walk — its
/// continuation was traced before, and revisits would otherwise loop.
fn walk_best_successors(
    start: &ModuleId,
    map: &DependencyMap,
    depth: &HashMap<ModuleId, usize>,
    critical: &mut HashSet<ModuleId>,
) {
    let mut current = start.clone();
    loop {
        if !critical.insert(current.clone()) {
            break;
        }
        match best_successor(&current, map, depth) {
            Some(next) => current = next,
            None => break,
        }
    }
}

/// The successor of `module` with the greatest depth; ties go to the
/// smallest module id so the walk is deterministic.
fn best_successor(
    module: &ModuleId,
    map: &DependencyMap,
    depth: &HashMap<ModuleId, usize>,
) -> Option<ModuleId> {
    map.get(module)?
        .iter()
        .max_by(|a, b| compare_by_depth(a, b, depth))
        .cloned()
}

/// Order first by depth, then inverted by id so `max_by` prefers the
/// smallest id among equal depths.
fn compare_by_depth(
    a: &ModuleId,
    b: &ModuleId,
    depth: &HashMap<ModuleId, usize>,
) -> std::cmp::Ordering {
    let da = depth.get(a).copied().unwrap_or(0);
    let db = depth.get(b).copied().unwrap_or(0);
    da.cmp(&db).then_with(|| b.cmp(a))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
