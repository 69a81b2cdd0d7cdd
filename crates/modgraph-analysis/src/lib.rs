#![forbid(unsafe_code)]
//! Build-health analytics over a completed dependency map.
//!
//! # Overview
//!
//! Each analytic consumes a read-only
//! [`DependencyMap`](modgraph_core::DependencyMap) independently and
//! answers a different question about module importance:
//!
//! - **Betweenness centrality** ([`betweenness`]): which modules are the
//!   structural bottlenecks shortest dependency chains funnel through?
//! - **Cycle detection** ([`cycles`]): which modules are locked together
//!   in dependency cycles, and how bad are they?
//! - **Critical path** ([`critical_path`]): what is the longest
//!   unavoidable compilation chain, and who is on it?
//! - **Reachability** ([`reachability`]): how many modules does one module
//!   pull in, and how many would it invalidate?
//! - **Summary stats** ([`stats`]): coarse shape numbers for reporting.
//!
//! The analytics share no mutable state — the map is immutable once
//! construction completes — so callers are expected to fan them out as
//! parallel tasks over their own worker pool and join the results. Within
//! one analytic, traversal is single-threaded and deterministic.
//!
//! # Conventions
//!
//! - **Errors**: the analytics are total functions over any map — cycles,
//!   self-loops, and disconnected modules are inputs, never errors.
//! - **Logging**: `tracing` macros (`#[instrument]` on entry points).

mod indexed;

pub mod betweenness;
pub mod critical_path;
pub mod cycles;
pub mod reachability;
pub mod stats;

pub use betweenness::betweenness_centrality;
pub use critical_path::{DepthInfo, analyze_critical_path, compute_depth_map, critical_path_for};
pub use cycles::{CycleInfo, detect_cycles};
pub use reachability::{
    build_reverse_map, count_transitive_dependencies, count_transitive_dependents,
};
pub use stats::GraphStats;
