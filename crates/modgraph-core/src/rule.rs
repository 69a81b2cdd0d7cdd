//! Implicit-edge rules consumed during successor resolution.
//!
//! Declared dependencies cover most of the graph, but large builds add
//! edges implicitly: convention plugins that wire in a common module,
//! path-based layering rules, source patterns that imply a generated
//! module, and type-safe accessor references. Each mechanism is one
//! variant here.
//!
//! The set of variants is closed on purpose: a resolver branches
//! exhaustively over all of them, and anything it does not recognize is a
//! compile error rather than a silently ignored subclass.

use std::collections::{HashMap, HashSet};

use regex::Regex;

use crate::node::ModuleId;

/// One implicit-edge rule, applied by a resolver to each module it expands.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Adds `includes` as successors of any module whose build-script text
    /// matches `pattern`.
    ContentMatch {
        /// Pattern matched against the module's build-script text.
        pattern: Regex,
        /// Modules added as successors on a match.
        includes: HashSet<ModuleId>,
    },

    /// Adds `includes` as successors of any module whose own path matches
    /// `pattern`.
    PathMatch {
        /// Pattern matched against the module's path string.
        pattern: Regex,
        /// Modules added as successors on a match.
        includes: HashSet<ModuleId>,
    },

    /// Synthesizes one successor per `pattern` match in the module's
    /// build-script text by expanding the capture groups into `template`
    /// (`$1`, `${name}` — `regex` expansion syntax). The synthesized path
    /// lives under the matching module's build root.
    Capture {
        /// Pattern with capture groups, matched against build-script text.
        pattern: Regex,
        /// Path template the captures are substituted into.
        template: String,
    },

    /// Resolves symbolic `<root_accessor>.<dotted.name>` references found
    /// in build-script text to concrete modules. A reference with no table
    /// entry is a hard error ([`crate::GraphError::UnknownAccessor`]), not
    /// a dropped edge.
    AccessorTable {
        /// Leading identifier of accessor references, e.g. `projects`.
        root_accessor: String,
        /// Dotted symbolic name → concrete module.
        entries: HashMap<String, ModuleId>,
    },
}
