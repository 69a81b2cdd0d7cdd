//! Successor resolution boundary.
//!
//! The graph builder treats resolution as a black box behind
//! [`SuccessorResolver`]: given one module and the active rule set, produce
//! that module's direct successors. Implementations in host environments
//! read and parse build scripts; this crate ships [`StaticResolver`], which
//! works from pre-extracted declared edges and script text and is the
//! reference collaborator for the builder's tests.

use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use regex::Regex;
use tracing::trace;

use crate::error::GraphError;
use crate::node::ModuleId;
use crate::rule::Rule;

/// Resolves the direct successor set of one module.
///
/// Implementations must be deterministic for a fixed module, rule set, and
/// on-disk state. Resolution may perform blocking I/O. A symbolic accessor
/// reference that cannot be resolved must fail the whole call
/// ([`GraphError::UnknownAccessor`]) rather than silently dropping an edge.
pub trait SuccessorResolver {
    /// Resolve the direct successors of `module` under `rules`.
    ///
    /// # Errors
    ///
    /// Returns an error when resolution fails, including any accessor
    /// reference missing from every [`Rule::AccessorTable`].
    fn resolve(&self, module: &ModuleId, rules: &[Rule]) -> Result<HashSet<ModuleId>>;
}

// ---------------------------------------------------------------------------
// StaticResolver
// ---------------------------------------------------------------------------

/// In-memory resolver over pre-extracted module data.
///
/// Hosts that have already read each module's declared dependency edges and
/// build-script text hand them here; rule application then runs without
/// further I/O. Modules with no entry resolve to the empty set.
#[derive(Debug, Default)]
pub struct StaticResolver {
    declared: HashMap<ModuleId, HashSet<ModuleId>>,
    sources: HashMap<ModuleId, String>,
}

impl StaticResolver {
    /// Create an empty resolver.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record declared direct successors for `module`.
    pub fn declare(&mut self, module: ModuleId, successors: impl IntoIterator<Item = ModuleId>) {
        self.declared.entry(module).or_default().extend(successors);
    }

    /// Record the build-script text rules are applied against for `module`.
    pub fn set_source(&mut self, module: ModuleId, text: impl Into<String>) {
        self.sources.insert(module, text.into());
    }
}

impl SuccessorResolver for StaticResolver {
    fn resolve(&self, module: &ModuleId, rules: &[Rule]) -> Result<HashSet<ModuleId>> {
        let mut successors = self.declared.get(module).cloned().unwrap_or_default();
        let source = self
            .sources
            .get(module)
            .map_or("", String::as_str);

        for rule in rules {
            apply_rule(module, source, rule, &mut successors)?;
        }

        trace!(module = %module, count = successors.len(), "resolved successors");
        Ok(successors)
    }
}

// ---------------------------------------------------------------------------
// Rule application
// ---------------------------------------------------------------------------

fn apply_rule(
    module: &ModuleId,
    source: &str,
    rule: &Rule,
    out: &mut HashSet<ModuleId>,
) -> Result<()> {
    match rule {
        Rule::ContentMatch { pattern, includes } => {
            if pattern.is_match(source) {
                out.extend(includes.iter().cloned());
            }
        }
        Rule::PathMatch { pattern, includes } => {
            if pattern.is_match(module.path()) {
                out.extend(includes.iter().cloned());
            }
        }
        Rule::Capture { pattern, template } => {
            for caps in pattern.captures_iter(source) {
                let mut path = String::new();
                caps.expand(template, &mut path);
                out.insert(ModuleId::new(module.root(), path));
            }
        }
        Rule::AccessorTable {
            root_accessor,
            entries,
        } => {
            for reference in accessor_references(source, root_accessor)? {
                match entries.get(&reference) {
                    Some(target) => {
                        out.insert(target.clone());
                    }
                    None => {
                        return Err(GraphError::UnknownAccessor {
                            reference,
                            module: module.clone(),
                        }
                        .into());
                    }
                }
            }
        }
    }
    Ok(())
}

/// Collect the dotted symbolic names referenced through `root_accessor` in
/// `source`, in text order. Each reference is the longest dotted run after
/// the root accessor, e.g. `projects.core.ui` yields `core.ui`.
fn accessor_references(source: &str, root_accessor: &str) -> Result<Vec<String>> {
    let pattern = format!(
        r"\b{}\.([A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)*)",
        regex::escape(root_accessor)
    );
    let re = Regex::new(&pattern).context("accessor reference pattern")?;

    Ok(re
        .captures_iter(source)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;

    fn mid(path: &str) -> ModuleId {
        ModuleId::new("main", path)
    }

    #[test]
    fn unknown_module_resolves_to_empty_set() {
        let resolver = StaticResolver::new();
        let successors = resolver.resolve(&mid(":nowhere"), &[]).expect("resolve");
        assert!(successors.is_empty());
    }

    #[test]
    fn declared_edges_come_back() {
        let mut resolver = StaticResolver::new();
        resolver.declare(mid(":app"), [mid(":core"), mid(":ui")]);

        let successors = resolver.resolve(&mid(":app"), &[]).expect("resolve");
        assert_eq!(successors.len(), 2);
        assert!(successors.contains(&mid(":core")));
        assert!(successors.contains(&mid(":ui")));
    }

    #[test]
    fn content_match_adds_includes_on_match_only() {
        let mut resolver = StaticResolver::new();
        resolver.set_source(mid(":app"), "apply(plugin = \"instrumented\")");
        resolver.set_source(mid(":lib"), "plain module");

        let rule = Rule::ContentMatch {
            pattern: Regex::new(r"instrumented").expect("pattern"),
            includes: HashSet::from([mid(":telemetry")]),
        };
        let rules = [rule];

        let app = resolver.resolve(&mid(":app"), &rules).expect("resolve app");
        assert!(app.contains(&mid(":telemetry")));

        let lib = resolver.resolve(&mid(":lib"), &rules).expect("resolve lib");
        assert!(!lib.contains(&mid(":telemetry")));
    }

    #[test]
    fn path_match_keys_on_the_module_path() {
        let resolver = StaticResolver::new();
        let rule = Rule::PathMatch {
            pattern: Regex::new(r"^:feature:").expect("pattern"),
            includes: HashSet::from([mid(":design-system")]),
        };
        let rules = [rule];

        let feature = resolver
            .resolve(&mid(":feature:checkout"), &rules)
            .expect("resolve feature");
        assert!(feature.contains(&mid(":design-system")));

        let core = resolver.resolve(&mid(":core"), &rules).expect("resolve core");
        assert!(core.is_empty());
    }

    #[test]
    fn capture_rule_synthesizes_successors_under_the_module_root() {
        let mut resolver = StaticResolver::new();
        resolver.set_source(
            mid(":app"),
            "plugin(\"auth\")\nplugin(\"billing\")",
        );

        let rule = Rule::Capture {
            pattern: Regex::new(r#"plugin\("([a-z]+)"\)"#).expect("pattern"),
            template: ":plugins:$1".to_string(),
        };

        let successors = resolver.resolve(&mid(":app"), &[rule]).expect("resolve");
        assert!(successors.contains(&mid(":plugins:auth")));
        assert!(successors.contains(&mid(":plugins:billing")));
        assert_eq!(successors.len(), 2);
    }

    #[test]
    fn accessor_table_resolves_dotted_references() {
        let mut resolver = StaticResolver::new();
        resolver.set_source(mid(":app"), "implementation(projects.core.ui)");

        let rule = Rule::AccessorTable {
            root_accessor: "projects".to_string(),
            entries: HashMap::from([("core.ui".to_string(), mid(":core:ui"))]),
        };

        let successors = resolver.resolve(&mid(":app"), &[rule]).expect("resolve");
        assert_eq!(successors.len(), 1);
        assert!(successors.contains(&mid(":core:ui")));
    }

    #[test]
    fn unknown_accessor_reference_is_a_hard_error() {
        let mut resolver = StaticResolver::new();
        resolver.set_source(mid(":app"), "implementation(projects.missing.thing)");

        let rule = Rule::AccessorTable {
            root_accessor: "projects".to_string(),
            entries: HashMap::new(),
        };

        let err = resolver
            .resolve(&mid(":app"), &[rule])
            .expect_err("must fail");
        let graph_err = err.downcast_ref::<GraphError>().expect("typed error");
        match graph_err {
            GraphError::UnknownAccessor { reference, module } => {
                assert_eq!(reference, "missing.thing");
                assert_eq!(module, &mid(":app"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rules_stack_on_top_of_declared_edges() {
        let mut resolver = StaticResolver::new();
        resolver.declare(mid(":app"), [mid(":core")]);
        resolver.set_source(mid(":app"), "plugin(\"auth\")");

        let rule = Rule::Capture {
            pattern: Regex::new(r#"plugin\("([a-z]+)"\)"#).expect("pattern"),
            template: ":plugins:$1".to_string(),
        };

        let successors = resolver.resolve(&mid(":app"), &[rule]).expect("resolve");
        assert_eq!(successors.len(), 2);
        assert!(successors.contains(&mid(":core")));
        assert!(successors.contains(&mid(":plugins:auth")));
    }
}
