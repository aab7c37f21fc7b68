//! Custom-property declaration scanner
//!
//! Recognizes `--name: value;` and `--name: value}` within a single line.
//! The value is the shortest run up to the first `;` or `}`, trimmed.

use std::sync::LazyLock;

use regex::Regex;

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"--([A-Za-z0-9-]+)\s*:([^;}]*)[;}]").expect("declaration pattern is valid")
});

/// A `--name: value` declaration found in a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declaration<'a> {
    /// Name without the leading `--`
    pub name: &'a str,
    /// Trimmed value text, never empty
    pub value: &'a str,
}

/// Every declaration in `line`, left to right
pub fn scan_declarations(line: &str) -> impl Iterator<Item = Declaration<'_>> {
    DECLARATION.captures_iter(line).filter_map(|caps| {
        let name = caps.get(1)?.as_str();
        let value = caps.get(2)?.as_str().trim();
        if value.is_empty() {
            return None;
        }
        Some(Declaration { name, value })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(line: &str) -> Vec<(&str, &str)> {
        scan_declarations(line).map(|d| (d.name, d.value)).collect()
    }

    #[test]
    fn test_semicolon_and_brace_terminators() {
        assert_eq!(pairs("  --primary: #ff0000;"), vec![("primary", "#ff0000")]);
        assert_eq!(
            pairs(":root { --bg:#fff; --fg: #000 }"),
            vec![("bg", "#fff"), ("fg", "#000")]
        );
    }

    #[test]
    fn test_value_is_trimmed_and_shortest() {
        assert_eq!(
            pairs("--a:   var(--b)   ; --c: red;"),
            vec![("a", "var(--b)"), ("c", "red")]
        );
    }

    #[test]
    fn test_ignores_references_and_unterminated() {
        assert!(pairs("color: var(--primary);").is_empty());
        assert!(pairs("--dangling: #fff").is_empty());
        assert!(pairs("--empty: ;").is_empty());
    }
}
