//! Lazy breadth-first construction of the dependency map.
//!
//! # Overview
//!
//! Starting from a seed set of modules, [`build_graph`] expands the graph
//! outward: each newly discovered module is handed to the
//! [`SuccessorResolver`] exactly once, and its successors join the work
//! queue. The result is a closed map — every module reachable from the
//! seeds appears as a key, leaves included.
//!
//! Construction is strictly sequential: a module's successor set must be
//! known before its successors can be discovered, and resolution may block
//! on collaborator I/O. The completed map is never mutated afterwards and
//! is safe to share read-only across concurrent analytics.

use std::collections::{HashMap, HashSet, VecDeque};

use anyhow::Result;
use tracing::{debug, instrument};

use crate::node::ModuleId;
use crate::resolver::SuccessorResolver;
use crate::rule::Rule;

/// Complete module → direct-successor mapping produced by [`build_graph`].
///
/// Closed under successor expansion: every module reachable from the seed
/// set appears as a key; leaves map to the empty set. Self-loops and
/// multi-module cycles are legal.
pub type DependencyMap = HashMap<ModuleId, HashSet<ModuleId>>;

/// Expand the dependency map reachable from `seeds`.
///
/// Maintains a `seen` set initialized with the seeds and a FIFO queue.
/// Dequeued modules are resolved once, recorded, and their unseen
/// successors enqueued (marked seen on enqueue, so a module that is its
/// own successor or a successor of several modules is still resolved
/// exactly once). Terminates on any input: `seen` only grows and the
/// module universe is finite. O(V + E) resolver calls and map operations.
///
/// # Errors
///
/// Propagates the first resolution failure. An unresolvable accessor
/// reference aborts the whole pass — it indicates a rule-data defect the
/// caller must fix, and is not retried.
#[instrument(skip(resolver, seeds, rules), fields(seed_count = seeds.len()))]
pub fn build_graph<R>(
    resolver: &R,
    seeds: &HashSet<ModuleId>,
    rules: &[Rule],
) -> Result<DependencyMap>
where
    R: SuccessorResolver + ?Sized,
{
    let mut seen: HashSet<ModuleId> = seeds.clone();
    let mut queue: VecDeque<ModuleId> = seeds.iter().cloned().collect();
    let mut map = DependencyMap::with_capacity(seeds.len());

    while let Some(module) = queue.pop_front() {
        let successors = resolver.resolve(&module, rules)?;
        for successor in &successors {
            if seen.insert(successor.clone()) {
                queue.push_back(successor.clone());
            }
        }
        map.insert(module, successors);
    }

    debug!(modules = map.len(), "dependency map complete");
    Ok(map)
}

/// All modules reachable from `seeds`, the seeds included: the union of the
/// seed set and every successor set of the built map.
///
/// # Errors
///
/// Same failure conditions as [`build_graph`].
pub fn flatten<R>(
    resolver: &R,
    seeds: &HashSet<ModuleId>,
    rules: &[Rule],
) -> Result<HashSet<ModuleId>>
where
    R: SuccessorResolver + ?Sized,
{
    let map = build_graph(resolver, seeds, rules)?;

    let mut all = seeds.clone();
    for successors in map.values() {
        all.extend(successors.iter().cloned());
    }
    Ok(all)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
