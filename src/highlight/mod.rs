//! Color highlight data structures
//!
//! A `HighlightTable` maps line numbers to the color spans found on them.
//! Spans are kept in the order they were produced and are never deduplicated:
//! a language-server range and a locally scanned match covering the same
//! columns both survive, and the sink decides render order.

mod merge;
mod utility;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::variables::ScopeId;

pub use merge::{
    merge_highlights, protocol_entries, protocol_window, scan_utility_classes, OVERSCAN_LINES,
};
pub use utility::{default_prefixes, UTILITY_PREFIXES};

/// A single colored span within a line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightEntry {
    /// 6-digit lowercase hex, no leading `#`
    pub color: String,
    /// Start byte offset within the line (inclusive)
    pub start_col: usize,
    /// End byte offset within the line (exclusive), never before `start_col`
    pub end_col: usize,
}

/// Color spans for one line, in production order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LineColors {
    pub entries: Vec<HighlightEntry>,
}

/// Line number (0-indexed) → color spans
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HighlightTable {
    pub lines: BTreeMap<usize, LineColors>,
}

impl HighlightTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a span to `line`
    pub fn push(&mut self, line: usize, entry: HighlightEntry) {
        self.lines.entry(line).or_default().entries.push(entry);
    }

    /// Spans for a line, or an empty slice if none
    pub fn line_entries(&self, line: usize) -> &[HighlightEntry] {
        self.lines
            .get(&line)
            .map(|lc| lc.entries.as_slice())
            .unwrap_or(&[])
    }

    /// Total number of spans across all lines
    pub fn entry_count(&self) -> usize {
        self.lines.values().map(|lc| lc.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Half-open line range `[start, end)`; `end == None` reaches the end of the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineWindow {
    pub start: usize,
    pub end: Option<usize>,
}

impl LineWindow {
    pub const WHOLE_BUFFER: LineWindow = LineWindow {
        start: 0,
        end: None,
    };

    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }
}

/// How the sink should paint colors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightMode {
    #[default]
    Background,
    Foreground,
    VirtualText,
}

/// Rendering options forwarded to the sink
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HighlightOptions {
    pub mode: HighlightMode,
}

/// Provenance of a highlight update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HighlightMetadata {
    /// Whether the table includes language-server color ranges
    pub protocol: bool,
    /// Hash of the resolved variables the table was built from
    pub variables_hash: u64,
}

/// Everything the sink needs to paint one scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightUpdate {
    pub scope: ScopeId,
    pub namespace: String,
    pub window: LineWindow,
    pub table: HighlightTable,
    pub options: HighlightOptions,
    pub metadata: HighlightMetadata,
}

/// Paints highlight updates
pub trait HighlightSink {
    fn apply(&mut self, update: &HighlightUpdate);
}
