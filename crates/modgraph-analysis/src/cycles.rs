//! Dependency cycle detection via Tarjan's SCC algorithm.
//!
//! # Overview
//!
//! A strongly connected component of two or more modules is a dependency
//! cycle: every member transitively depends on every other, so they
//! compile (and break) as a unit. Detection reports one shared
//! [`CycleInfo`] per component, keyed by each member.
//!
//! # Stack safety
//!
//! Production dependency chains run deeper than the native call stack
//! allows, so the depth-first traversal keeps its own heap-allocated frame
//! stack instead of recursing: each frame holds the node, its fetched
//! successor list, and a cursor into the unexplored remainder. When a
//! frame pops, its low-link folds into the parent frame — the resume step
//! recursion would get for free. When a finished node's low-link equals
//! its discovery index, the node stack pops through it to emit one
//! component. O(V+E).

use std::collections::HashMap;

use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use modgraph_core::{DependencyMap, ModuleId};

use crate::indexed::IndexedGraph;

// ---------------------------------------------------------------------------
// CycleInfo
// ---------------------------------------------------------------------------

/// Cycle membership report for one strongly connected component.
///
/// Every member of a component carries an identical `CycleInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleInfo {
    /// Number of modules in the component.
    pub size: usize,
    /// All member modules, sorted.
    pub members: Vec<ModuleId>,
    /// Severity tier derived from `size` alone: ≥10 → 10, ≥5 → 7,
    /// ≥3 → 5, else 3.
    pub severity: u8,
}

const fn severity_for(size: usize) -> u8 {
    match size {
        s if s >= 10 => 10,
        s if s >= 5 => 7,
        s if s >= 3 => 5,
        _ => 3,
    }
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Find every dependency cycle in `map`.
///
/// Returns an entry per module belonging to a component of size ≥ 2;
/// acyclic graphs (and self-loops, which are single-member components)
/// yield an empty result.
#[must_use]
#[instrument(skip(map), fields(modules = map.len()))]
pub fn detect_cycles(map: &DependencyMap) -> HashMap<ModuleId, CycleInfo> {
    let ig = IndexedGraph::from_map(map);
    let g = &ig.graph;
    let n = g.node_count();

    if n == 0 {
        return HashMap::new();
    }

    let mut state = TarjanState::new(n);
    for v in g.node_indices() {
        if state.index[v.index()].is_none() {
            state.visit(g, v);
        }
    }

    let mut result = HashMap::new();
    for component in state.components {
        if component.len() < 2 {
            continue;
        }

        let mut members: Vec<ModuleId> = component
            .iter()
            .filter_map(|&idx| g.node_weight(idx).cloned())
            .collect();
        members.sort_unstable();

        let info = CycleInfo {
            size: members.len(),
            severity: severity_for(members.len()),
            members: members.clone(),
        };
        for member in members {
            result.insert(member, info.clone());
        }
    }

    result
}

// ---------------------------------------------------------------------------
// Explicit-stack Tarjan
// ---------------------------------------------------------------------------

/// One work-stack frame: the node, its fetched successor list, and the
/// cursor past the successors already explored.
struct Frame {
    v: NodeIndex,
    successors: Vec<NodeIndex>,
    cursor: usize,
}

struct TarjanState {
    /// Discovery index per node (`None` = unvisited).
    index: Vec<Option<usize>>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    node_stack: Vec<NodeIndex>,
    next_index: usize,
    components: Vec<Vec<NodeIndex>>,
}

impl TarjanState {
    fn new(n: usize) -> Self {
        Self {
            index: vec![None; n],
            lowlink: vec![0; n],
            on_stack: vec![false; n],
            node_stack: Vec::new(),
            next_index: 0,
            components: Vec::new(),
        }
    }

    /// Depth-first visit from `start` over a heap-allocated frame stack.
    fn visit(&mut self, g: &DiGraph<ModuleId, ()>, start: NodeIndex) {
        let mut frames: Vec<Frame> = vec![self.open_frame(g, start)];

        while let Some(frame) = frames.last_mut() {
            let v = frame.v;

            if let Some(&w) = frame.successors.get(frame.cursor) {
                frame.cursor += 1;

                if self.index[w.index()].is_none() {
                    let child = self.open_frame(g, w);
                    frames.push(child);
                } else if self.on_stack[w.index()] {
                    // Back edge into the current spine.
                    if let Some(w_index) = self.index[w.index()] {
                        let vi = v.index();
                        self.lowlink[vi] = self.lowlink[vi].min(w_index);
                    }
                }
            } else {
                // Frame finished: maybe emit a component, then fold the
                // low-link into the parent (the resume step).
                frames.pop();
                let vi = v.index();

                if self.index[vi] == Some(self.lowlink[vi]) {
                    let mut component = Vec::new();
                    while let Some(w) = self.node_stack.pop() {
                        self.on_stack[w.index()] = false;
                        component.push(w);
                        if w == v {
                            break;
                        }
                    }
                    self.components.push(component);
                }

                if let Some(parent) = frames.last() {
                    let pi = parent.v.index();
                    self.lowlink[pi] = self.lowlink[pi].min(self.lowlink[vi]);
                }
            }
        }
    }

    fn open_frame(&mut self, g: &DiGraph<ModuleId, ()>, v: NodeIndex) -> Frame {
        let vi = v.index();
        self.index[vi] = Some(self.next_index);
        self.lowlink[vi] = self.next_index;
        self.next_index += 1;
        self.node_stack.push(v);
        self.on_stack[vi] = true;

        let successors = g.neighbors_directed(v, Direction::Outgoing).collect();
        Frame {
            v,
            successors,
            cursor: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
