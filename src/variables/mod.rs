//! CSS custom-property store
//!
//! Tracks two kinds of variable definitions:
//! - **Global** definitions loaded from external stylesheets, shared by every scope
//! - **Local** definitions declared in a scope's own text
//!
//! Lookups through a scope see Local entries shadowing Global ones. The merged
//! view is cached per scope together with a content hash and dropped whenever
//! either backing set changes.
//!
//! ```text
//! update_local ──► declarations::scan ──► resolve (pass 1 + up to 3 passes)
//!                                              │
//! load_global ──► globals::expand_patterns ────┴──► VariableStore
//!                                                       │
//!                            var(--name) parser ◄── get(scope, name)
//!                            highlight merger   ◄── resolved_view(scope)
//! ```

mod declarations;
mod globals;
mod resolve;

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHasher};
use serde::Serialize;

pub use declarations::{scan_declarations, Declaration};
pub use globals::expand_patterns;
pub use resolve::{ResolveStats, MAX_EXTRA_PASSES};

/// Identifier of one independent text source (usually a buffer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ScopeId(pub u64);

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Variable name (without the leading `--`) → 6-digit lowercase hex color.
///
/// Ordered so that iteration, hashing and printing are independent of
/// insertion order.
pub type VariableSet = BTreeMap<String, String>;

/// Merged Global ∪ Local view of a scope
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedView {
    pub variables: VariableSet,
    /// Content hash of `variables`, equal for equal contents
    pub hash: u64,
}

impl ResolvedView {
    fn build(global: &VariableSet, local: &VariableSet) -> Self {
        let mut variables = global.clone();
        for (name, color) in local {
            variables.insert(name.clone(), color.clone());
        }
        let hash = content_hash(&variables);
        Self { variables, hash }
    }
}

fn content_hash(variables: &VariableSet) -> u64 {
    let mut hasher = FxHasher::default();
    variables.len().hash(&mut hasher);
    for (name, color) in variables {
        name.hash(&mut hasher);
        color.hash(&mut hasher);
    }
    hasher.finish()
}

/// Read access to resolved variables, as needed by `var()` parsing
pub trait VariableLookup {
    /// Resolve `name` for `scope`: Local first, then Global
    fn get(&self, scope: ScopeId, name: &str) -> Option<&str>;
}

/// Lookup that never resolves anything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoVariables;

impl VariableLookup for NoVariables {
    fn get(&self, _scope: ScopeId, _name: &str) -> Option<&str> {
        None
    }
}

/// Per-scope state: local definitions plus the cached merged view
#[derive(Debug, Default)]
struct ScopeVariables {
    definitions: VariableSet,
    view: Option<ResolvedView>,
}

/// Owner of all Global and per-scope Local variable definitions
#[derive(Debug, Default)]
pub struct VariableStore {
    global: VariableSet,
    scopes: FxHashMap<ScopeId, ScopeVariables>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any state exists for `scope`
    pub fn has_scope(&self, scope: ScopeId) -> bool {
        self.scopes.contains_key(&scope)
    }

    /// Merged Global ∪ Local view for `scope`, rebuilt if the cache was invalidated.
    ///
    /// Creates the scope's entry on first touch.
    pub fn resolved_view(&mut self, scope: ScopeId) -> &ResolvedView {
        let global = &self.global;
        let ScopeVariables { definitions, view } = self.scopes.entry(scope).or_default();
        view.get_or_insert_with(|| {
            tracing::trace!("Rebuilding resolved view for scope {}", scope);
            ResolvedView::build(global, definitions)
        })
    }

    /// Replace the entire Global set and invalidate every cached view
    pub fn replace_global(&mut self, definitions: VariableSet) {
        self.global = definitions;
        for scope in self.scopes.values_mut() {
            scope.view = None;
        }
    }

    /// Drop all state for `scope`. Idempotent.
    pub fn cleanup(&mut self, scope: ScopeId) {
        if self.scopes.remove(&scope).is_some() {
            tracing::debug!("Cleaned up variables for scope {}", scope);
        }
    }

    /// Define (or overwrite) a local variable, invalidating the scope's view
    pub fn define_local(&mut self, scope: ScopeId, name: &str, color: &str) {
        let entry = self.scopes.entry(scope).or_default();
        entry.definitions.insert(name.to_string(), color.to_string());
        entry.view = None;
    }
}

impl VariableLookup for VariableStore {
    fn get(&self, scope: ScopeId, name: &str) -> Option<&str> {
        self.scopes
            .get(&scope)
            .and_then(|s| s.definitions.get(name))
            .or_else(|| self.global.get(name))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: ScopeId = ScopeId(1);
    const B: ScopeId = ScopeId(2);

    fn set(pairs: &[(&str, &str)]) -> VariableSet {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_local_shadows_global() {
        let mut store = VariableStore::new();
        store.replace_global(set(&[("primary", "000000")]));
        store.define_local(A, "primary", "ff0000");

        assert_eq!(store.get(A, "primary"), Some("ff0000"));
        assert_eq!(store.get(B, "primary"), Some("000000"));
        assert_eq!(store.get(A, "missing"), None);
    }

    #[test]
    fn test_get_does_not_create_scope() {
        let store = VariableStore::new();
        assert_eq!(store.get(A, "primary"), None);
        assert!(!store.has_scope(A));
    }

    #[test]
    fn test_resolved_view_merges_and_caches() {
        let mut store = VariableStore::new();
        store.replace_global(set(&[("a", "111111"), ("b", "222222")]));
        store.define_local(A, "b", "333333");

        let view = store.resolved_view(A).clone();
        assert_eq!(view.variables, set(&[("a", "111111"), ("b", "333333")]));
        assert_eq!(store.resolved_view(A).hash, view.hash);
    }

    #[test]
    fn test_view_hash_ignores_insertion_order() {
        let mut first = VariableStore::new();
        first.define_local(A, "x", "010101");
        first.define_local(A, "y", "020202");

        let mut second = VariableStore::new();
        second.define_local(A, "y", "020202");
        second.define_local(A, "x", "010101");

        assert_eq!(
            first.resolved_view(A).hash,
            second.resolved_view(A).hash
        );
    }

    #[test]
    fn test_view_invalidated_by_local_and_global_changes() {
        let mut store = VariableStore::new();
        store.define_local(A, "x", "010101");
        let before = store.resolved_view(A).hash;

        store.define_local(A, "x", "ffffff");
        let after_local = store.resolved_view(A).hash;
        assert_ne!(before, after_local);

        store.replace_global(set(&[("g", "abcdef")]));
        let view = store.resolved_view(A);
        assert_ne!(view.hash, after_local);
        assert_eq!(view.variables.get("g").map(String::as_str), Some("abcdef"));
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        let mut store = VariableStore::new();
        store.define_local(A, "x", "010101");
        store.cleanup(A);
        store.cleanup(A);
        assert!(!store.has_scope(A));
        assert_eq!(store.get(A, "x"), None);
    }
}
