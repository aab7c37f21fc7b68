//! `rgb()` / `rgba()` functional notation
//!
//! Accepts comma or space separated channels, each either a number in
//! `0..=255` or a percentage. An alpha component (after `,` or `/`) is
//! accepted and ignored.

use std::sync::LazyLock;

use regex::Regex;

use super::{tail, ColorParser, ParseContext, ParseMatch};
use crate::color::Color;

static RGB_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?i)rgba?\(\s*([\d.]+%?)(?:\s*,\s*|\s+)([\d.]+%?)(?:\s*,\s*|\s+)([\d.]+%?)\s*(?:[,/]\s*[\d.]+%?\s*)?\)",
    )
    .expect("rgb pattern is valid")
});

/// Parser for `rgb(r, g, b)` and `rgba(r, g, b, a)`
#[derive(Debug, Default, Clone, Copy)]
pub struct RgbParser;

fn channel(text: &str) -> Option<u8> {
    let value = match text.strip_suffix('%') {
        Some(pct) => pct.parse::<f32>().ok()? / 100.0 * 255.0,
        None => text.parse::<f32>().ok()?,
    };
    if !(0.0..=255.0).contains(&value) {
        return None;
    }
    Some(value.round() as u8)
}

impl ColorParser for RgbParser {
    fn parse(&self, text: &str, offset: usize, _ctx: &ParseContext<'_>) -> Option<ParseMatch> {
        let rest = tail(text, offset)?;
        let caps = RGB_FUNCTION.captures(rest)?;
        let r = channel(caps.get(1)?.as_str())?;
        let g = channel(caps.get(2)?.as_str())?;
        let b = channel(caps.get(3)?.as_str())?;
        Some(ParseMatch {
            end: offset + caps.get(0)?.end(),
            color: Color::rgb(r, g, b).to_hex(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variables::NoVariables;

    fn parse(text: &str) -> Option<ParseMatch> {
        RgbParser.parse(text, 0, &ParseContext::new(None, &NoVariables))
    }

    #[test]
    fn test_comma_separated() {
        let m = parse("rgb(255, 0, 128);").unwrap();
        assert_eq!(m.color, "ff0080");
        assert_eq!(m.end, 16);
    }

    #[test]
    fn test_space_separated_with_alpha() {
        assert_eq!(parse("rgb(0 255 0 / 50%)").unwrap().color, "00ff00");
        assert_eq!(parse("RGBA(0, 0, 255, 0.3)").unwrap().color, "0000ff");
    }

    #[test]
    fn test_percentages() {
        assert_eq!(parse("rgb(100%, 0%, 50%)").unwrap().color, "ff0080");
    }

    #[test]
    fn test_rejects_out_of_range_and_malformed() {
        assert_eq!(parse("rgb(256, 0, 0)"), None);
        assert_eq!(parse("rgb(1, 2)"), None);
        assert_eq!(parse("rgb(1, 2, 3"), None);
    }
}
