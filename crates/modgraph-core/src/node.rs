//! Module identifiers for the dependency graph.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for one build module (one node in the dependency graph).
///
/// A module is addressed by its build root (the containing build in a
/// composite setup) plus its path within that root, e.g. root `main` and
/// path `:feature:checkout`. Two identifiers are equal iff both parts
/// match — structural equality, so the same logical module constructed
/// from different call sites hashes identically.
///
/// The derived `Ord` (root, then path) is the deterministic tie-break used
/// wherever an ordering has to be imposed on otherwise-unordered sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleId {
    root: String,
    path: String,
}

impl ModuleId {
    /// Create a module identifier from a build root and a module path.
    #[must_use]
    pub fn new(root: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            path: path.into(),
        }
    }

    /// The build root this module belongs to.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The module path within its build root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
