//! `var(--name)` references
//!
//! Only the name is consumed. A fallback (`var(--name, red)`) is skipped over
//! but never evaluated: if `name` is unknown the whole reference is left
//! uncolored.

use std::sync::LazyLock;

use regex::Regex;

use super::{tail, ColorParser, ParseContext, ParseMatch};
use crate::color::bare_hex;

static VAR_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^var\(\s*--([A-Za-z0-9-]+)\s*(?:\)|,[^)]*\))").expect("var pattern is valid")
});

/// Parser resolving `var()` references through the variable store
#[derive(Debug, Default, Clone, Copy)]
pub struct VarRefParser;

impl ColorParser for VarRefParser {
    fn parse(&self, text: &str, offset: usize, ctx: &ParseContext<'_>) -> Option<ParseMatch> {
        let scope = ctx.scope?;
        let rest = tail(text, offset)?;
        let caps = VAR_REFERENCE.captures(rest)?;
        let name = caps.get(1)?.as_str();
        let color = ctx.variables.get(scope, name)?;
        Some(ParseMatch {
            end: offset + caps.get(0)?.end(),
            color: bare_hex(color).to_string(),
        })
    }
}
