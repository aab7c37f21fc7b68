//! `#rgb` / `#rgba` / `#rrggbb` / `#rrggbbaa` literals

use super::{tail, ColorParser, ParseContext, ParseMatch};
use crate::color::Color;

/// Parser for hash-prefixed hex color literals
#[derive(Debug, Default, Clone, Copy)]
pub struct HexParser;

impl ColorParser for HexParser {
    fn parse(&self, text: &str, offset: usize, _ctx: &ParseContext<'_>) -> Option<ParseMatch> {
        let rest = tail(text, offset)?.strip_prefix('#')?;
        let digits = rest.bytes().take_while(u8::is_ascii_hexdigit).count();
        // A longer run of hex digits is something else (e.g. a hash or id)
        if !matches!(digits, 3 | 4 | 6 | 8) {
            return None;
        }
        if rest[digits..]
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            return None;
        }
        let color = Color::from_hex(&rest[..digits]).ok()?;
        Some(ParseMatch {
            end: offset + 1 + digits,
            color: color.to_hex(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variables::NoVariables;

    fn parse(text: &str, offset: usize) -> Option<ParseMatch> {
        HexParser.parse(text, offset, &ParseContext::new(None, &NoVariables))
    }

    #[test]
    fn test_long_and_short_forms() {
        assert_eq!(
            parse("#FF0000", 0),
            Some(ParseMatch {
                end: 7,
                color: "ff0000".into()
            })
        );
        assert_eq!(parse("#0f0;", 0).unwrap().color, "00ff00");
        assert_eq!(parse("#0f08", 0).unwrap().end, 5);
        assert_eq!(parse("#11223344", 0).unwrap().color, "112233");
    }

    #[test]
    fn test_offset_inside_text() {
        let m = parse("color: #abcdef;", 7).unwrap();
        assert_eq!(m.end, 14);
        assert_eq!(m.color, "abcdef");
    }

    #[test]
    fn test_rejects_bad_lengths_and_words() {
        assert_eq!(parse("#12345", 0), None);
        assert_eq!(parse("#1234567", 0), None);
        assert_eq!(parse("#abcz", 0), None);
        assert_eq!(parse("abc", 0), None);
        assert_eq!(parse("#", 0), None);
    }
}
