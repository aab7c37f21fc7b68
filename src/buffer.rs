//! Buffer text access
//!
//! The update loop never owns buffer text; it asks a `TextSource` for the
//! lines of a range whenever it needs them. `BufferSet` is the rope-backed
//! implementation used by the CLI and the tests.

use ropey::Rope;
use rustc_hash::FxHashMap;

use crate::variables::ScopeId;

/// Provides the lines of a named buffer
pub trait TextSource {
    /// Lines `[start, end)` of `scope` without line terminators.
    ///
    /// `end == None` reads to the end of the buffer; an `end` past the last
    /// line is clamped. Returns `None` if the scope has no buffer.
    fn lines(&self, scope: ScopeId, start: usize, end: Option<usize>) -> Option<Vec<String>>;
}

/// Rope-backed buffers keyed by scope
#[derive(Debug, Default)]
pub struct BufferSet {
    buffers: FxHashMap<ScopeId, Rope>,
    next_id: u64,
}

impl BufferSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new buffer and return its scope
    pub fn open(&mut self, text: &str) -> ScopeId {
        self.next_id += 1;
        let scope = ScopeId(self.next_id);
        self.buffers.insert(scope, Rope::from_str(text));
        scope
    }

    /// Replace the whole text of a buffer
    pub fn set_text(&mut self, scope: ScopeId, text: &str) -> bool {
        match self.buffers.get_mut(&scope) {
            Some(rope) => {
                *rope = Rope::from_str(text);
                true
            }
            None => false,
        }
    }

    /// Replace the content of one line, keeping its terminator
    pub fn replace_line(&mut self, scope: ScopeId, line: usize, text: &str) -> bool {
        let Some(rope) = self.buffers.get_mut(&scope) else {
            return false;
        };
        if line >= rope.len_lines() {
            return false;
        }
        let start = rope.line_to_char(line);
        let content_len = line_content(rope.line(line).to_string().as_str()).chars().count();
        rope.remove(start..start + content_len);
        rope.insert(start, text);
        true
    }
}

fn line_content(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

impl TextSource for BufferSet {
    fn lines(&self, scope: ScopeId, start: usize, end: Option<usize>) -> Option<Vec<String>> {
        let rope = self.buffers.get(&scope)?;
        let total = rope.len_lines();
        let end = end.map_or(total, |e| e.min(total));
        if start >= end {
            return Some(Vec::new());
        }
        Some(
            (start..end)
                .map(|idx| line_content(&rope.line(idx).to_string()).to_string())
                .collect(),
        )
    }
}
