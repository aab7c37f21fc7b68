//! Local variable resolution
//!
//! Pass 1 parses every declaration value directly. Values that do not parse
//! (typically `var()` chains pointing at names declared later) are deferred,
//! then retried for a bounded number of extra passes. Each pass sees what the
//! previous ones defined, so an indirection chain resolves one link per pass.
//! Cycles are not detected; they simply run out of passes.

use super::declarations::scan_declarations;
use super::{ScopeId, VariableStore};
use crate::parser::{ColorParser, ParseContext};

/// Extra passes over deferred declarations after the direct scan
pub const MAX_EXTRA_PASSES: usize = 3;

/// A declaration whose value has not resolved to a color yet
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingEntry {
    name: String,
    value: String,
}

/// Outcome of one `update_local` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// Declarations resolved in the direct scan
    pub direct: usize,
    /// Declarations resolved in later passes
    pub deferred: usize,
    /// Declarations given up on for this cycle
    pub dropped: usize,
    /// Extra passes actually run
    pub passes: usize,
}

impl VariableStore {
    /// Re-read local definitions of `scope` from `lines`.
    ///
    /// `lines` holds the text of `[line_start, line_end)`; `line_end == None`
    /// means "through the end of the buffer". A full-buffer update
    /// (`line_start == 0`, `line_end == None`) first clears all local
    /// definitions. Partial updates only add or overwrite, so definitions
    /// removed outside the range linger until the next full update.
    pub fn update_local(
        &mut self,
        scope: ScopeId,
        line_start: usize,
        line_end: Option<usize>,
        lines: &[String],
        parser: &dyn ColorParser,
    ) -> ResolveStats {
        let entry = self.scopes.entry(scope).or_default();
        if line_start == 0 && line_end.is_none() {
            entry.definitions.clear();
        }
        entry.view = None;

        let mut stats = ResolveStats::default();
        let mut pending = Vec::new();

        for line in lines {
            for decl in scan_declarations(line) {
                match self.resolve_value(scope, decl.value, parser) {
                    Some(color) => {
                        self.define_local(scope, decl.name, &color);
                        stats.direct += 1;
                    }
                    None => pending.push(PendingEntry {
                        name: decl.name.to_string(),
                        value: decl.value.to_string(),
                    }),
                }
            }
        }

        if !pending.is_empty() && stats.direct > 0 {
            while stats.passes < MAX_EXTRA_PASSES {
                stats.passes += 1;
                let before = pending.len();
                let mut unresolved = Vec::with_capacity(before);
                for entry in pending {
                    match self.resolve_value(scope, &entry.value, parser) {
                        Some(color) => {
                            self.define_local(scope, &entry.name, &color);
                            stats.deferred += 1;
                        }
                        None => unresolved.push(entry),
                    }
                }
                pending = unresolved;
                if pending.is_empty() || pending.len() == before {
                    break;
                }
            }
        }

        stats.dropped = pending.len();
        if stats.dropped > 0 {
            tracing::debug!(
                "Scope {}: {} declaration(s) unresolved after {} extra pass(es): {:?}",
                scope,
                stats.dropped,
                stats.passes,
                pending.iter().map(|p| p.name.as_str()).collect::<Vec<_>>()
            );
        }
        tracing::trace!(
            "Scope {}: resolved {} direct, {} deferred (lines {}..{:?})",
            scope,
            stats.direct,
            stats.deferred,
            line_start,
            line_end
        );

        stats
    }

    fn resolve_value(
        &self,
        scope: ScopeId,
        value: &str,
        parser: &dyn ColorParser,
    ) -> Option<String> {
        let ctx = ParseContext::new(Some(scope), self);
        parser.parse(value, 0, &ctx).map(|m| m.color)
    }
}
