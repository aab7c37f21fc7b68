//! Pluggable color parsing
//!
//! A `ColorParser` looks at `text` starting at a byte `offset` and either
//! recognizes a color there or reports no match. The variable store and the
//! highlight merger only ever talk to this trait; which grammars are active is
//! decided by composing parsers into a `ParserChain`.
//!
//! Built-in parsers:
//! - `HexParser` - `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`
//! - `RgbParser` - `rgb()` / `rgba()`
//! - `VarRefParser` - `var(--name)` looked up in the variable store

mod hex;
mod rgb;
mod var_ref;

use crate::config::ParserToggles;
use crate::variables::{ScopeId, VariableLookup};

pub use hex::HexParser;
pub use rgb::RgbParser;
pub use var_ref::VarRefParser;

/// What a parser may consult besides the text itself
#[derive(Clone, Copy)]
pub struct ParseContext<'a> {
    /// Scope the text belongs to; `None` when parsing outside any buffer
    pub scope: Option<ScopeId>,
    pub variables: &'a dyn VariableLookup,
}

impl<'a> ParseContext<'a> {
    pub fn new(scope: Option<ScopeId>, variables: &'a dyn VariableLookup) -> Self {
        Self { scope, variables }
    }
}

/// A recognized color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMatch {
    /// Byte offset just past the matched text
    pub end: usize,
    /// 6-digit lowercase hex, no leading `#`
    pub color: String,
}

/// Color recognition capability
pub trait ColorParser {
    fn parse(&self, text: &str, offset: usize, ctx: &ParseContext<'_>) -> Option<ParseMatch>;
}

impl<F> ColorParser for F
where
    F: Fn(&str, usize, &ParseContext<'_>) -> Option<ParseMatch>,
{
    fn parse(&self, text: &str, offset: usize, ctx: &ParseContext<'_>) -> Option<ParseMatch> {
        self(text, offset, ctx)
    }
}

/// Ordered composition of parsers; the first one to match wins
#[derive(Default)]
pub struct ParserChain {
    parsers: Vec<Box<dyn ColorParser>>,
}

impl ParserChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parser to the chain
    pub fn with(mut self, parser: impl ColorParser + 'static) -> Self {
        self.parsers.push(Box::new(parser));
        self
    }

    /// Build the chain enabled by configuration
    pub fn from_toggles(toggles: &ParserToggles) -> Self {
        let mut chain = Self::new();
        if toggles.hex {
            chain = chain.with(HexParser);
        }
        if toggles.rgb {
            chain = chain.with(RgbParser);
        }
        if toggles.var {
            chain = chain.with(VarRefParser);
        }
        chain
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

impl ColorParser for ParserChain {
    fn parse(&self, text: &str, offset: usize, ctx: &ParseContext<'_>) -> Option<ParseMatch> {
        if offset >= text.len() {
            return None;
        }
        self.parsers
            .iter()
            .find_map(|parser| parser.parse(text, offset, ctx))
    }
}

impl std::fmt::Debug for ParserChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserChain")
            .field("parsers", &self.parsers.len())
            .finish()
    }
}

/// Tail of `text` starting at `offset`, or `None` if `offset` is out of range
/// or not on a character boundary
pub(crate) fn tail(text: &str, offset: usize) -> Option<&str> {
    text.get(offset..)
}
