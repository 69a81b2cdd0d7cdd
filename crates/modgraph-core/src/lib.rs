#![forbid(unsafe_code)]
//! Module dependency graph model and construction.
//!
//! # Overview
//!
//! This crate owns everything up to a completed dependency map:
//!
//! ```text
//! seed modules + rules
//!        ↓  builder::build_graph()   (lazy BFS, one resolver call per module)
//! DependencyMap (module → direct successors, closed under expansion)
//!        ↓  ModuleGraph::new()
//! read-only queries (edges, successors, accessors, shortest path)
//! ```
//!
//! Successor resolution is a collaborator behind the
//! [`SuccessorResolver`] trait — host environments read and parse build
//! scripts; [`StaticResolver`] is the in-memory reference implementation.
//! Analytics over the completed map live in the `modgraph-analysis` crate.
//!
//! # Conventions
//!
//! - **Errors**: `anyhow::Result` at fallible entry points; typed
//!   [`GraphError`] for the conditions callers branch on.
//! - **Logging**: `tracing` macros (`debug!`, `trace!`, `#[instrument]`).

pub mod builder;
pub mod error;
pub mod graph;
pub mod node;
pub mod resolver;
pub mod rule;

pub use builder::{DependencyMap, build_graph, flatten};
pub use error::GraphError;
pub use graph::ModuleGraph;
pub use node::ModuleId;
pub use resolver::{StaticResolver, SuccessorResolver};
pub use rule::Rule;
