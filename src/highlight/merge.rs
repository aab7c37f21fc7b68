//! Merging language-server color ranges with locally derived matches
//!
//! Two sources feed one `HighlightTable`:
//! 1. `textDocument/documentColor` results, converted to hex and recorded on
//!    their start line. Their UTF-16 columns are converted to byte offsets so
//!    both sources share one unit; a range running past its start line ends
//!    at the end of that line.
//! 2. Utility-class tokens (`bg-primary`, `text-accent`, ...) built from the
//!    scope's resolved variables and found by plain substring search.
//!
//! Substring search has no word boundaries, so `bg-red` also matches inside
//! `bg-red-500`.

use lsp_types::ColorInformation;

use super::{HighlightEntry, HighlightTable, LineWindow};
use crate::color::{bare_hex, Color};
use crate::variables::VariableSet;

/// Lines scanned past the last protocol range
pub const OVERSCAN_LINES: usize = 2;

/// Window covered by a protocol response: `[min start line, max end line + 2)`,
/// or the whole buffer when the response is empty
pub fn protocol_window(colors: &[ColorInformation]) -> LineWindow {
    let start = colors.iter().map(|c| c.range.start.line as usize).min();
    let end = colors.iter().map(|c| c.range.end.line as usize).max();
    match (start, end) {
        (Some(start), Some(end)) => LineWindow::new(start, end + OVERSCAN_LINES),
        _ => LineWindow::WHOLE_BUFFER,
    }
}

/// Byte offset of UTF-16 column `character` in `line`, clamped to the line end
fn utf16_to_byte(line: &str, character: u32) -> usize {
    let target = character as usize;
    let mut units = 0;
    for (idx, ch) in line.char_indices() {
        if units >= target {
            return idx;
        }
        units += ch.len_utf16();
    }
    line.len()
}

/// Record every protocol color on its start line.
///
/// `lines[0]` is buffer line `first_line`. Without the text of the start line
/// the reported columns are kept as they are.
pub fn protocol_entries(
    colors: &[ColorInformation],
    first_line: usize,
    lines: &[String],
    table: &mut HighlightTable,
) {
    for info in colors {
        let color = Color::from_protocol_channels(
            info.color.red,
            info.color.green,
            info.color.blue,
            info.color.alpha,
        );
        let start = info.range.start;
        let end = info.range.end;
        let multiline = end.line > start.line;
        let text = (start.line as usize)
            .checked_sub(first_line)
            .and_then(|idx| lines.get(idx));

        let (start_col, end_col) = match text {
            Some(text) => {
                let start_col = utf16_to_byte(text, start.character);
                let end_col = if multiline {
                    text.len()
                } else {
                    utf16_to_byte(text, end.character)
                };
                (start_col, end_col)
            }
            None => {
                tracing::debug!("No text for protocol color on line {}", start.line);
                let start_col = start.character as usize;
                let end_col = if multiline {
                    start_col
                } else {
                    end.character as usize
                };
                (start_col, end_col)
            }
        };

        table.push(
            start.line as usize,
            HighlightEntry {
                color: color.to_hex(),
                start_col,
                end_col: end_col.max(start_col),
            },
        );
    }
}

/// Names a variable can appear under in a utility class
fn utility_targets(name: &str) -> Vec<&str> {
    let bare = name.trim_start_matches('-');
    let mut targets = vec![bare];
    if let Some(short) = bare.strip_prefix("color-") {
        if !short.is_empty() {
            targets.push(short);
        }
    }
    targets
}

/// Append a span for every `prefix-name` occurrence in `lines`.
///
/// `lines[0]` is buffer line `first_line`.
pub fn scan_utility_classes(
    variables: &VariableSet,
    prefixes: &[String],
    first_line: usize,
    lines: &[String],
    table: &mut HighlightTable,
) {
    for (name, color) in variables {
        let color = bare_hex(color);
        for target in utility_targets(name) {
            if target.is_empty() {
                continue;
            }
            for prefix in prefixes {
                let token = format!("{}-{}", prefix, target);
                for (offset, line) in lines.iter().enumerate() {
                    for (col, matched) in line.match_indices(token.as_str()) {
                        table.push(
                            first_line + offset,
                            HighlightEntry {
                                color: color.to_string(),
                                start_col: col,
                                end_col: col + matched.len(),
                            },
                        );
                    }
                }
            }
        }
    }
}

/// Build the table for one response.
///
/// `lines` must hold the text of `window` (as returned by `protocol_window`).
pub fn merge_highlights(
    colors: &[ColorInformation],
    variables: &VariableSet,
    prefixes: &[String],
    window: LineWindow,
    lines: &[String],
) -> HighlightTable {
    let mut table = HighlightTable::new();
    protocol_entries(colors, window.start, lines, &mut table);
    scan_utility_classes(variables, prefixes, window.start, lines, &mut table);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use lsp_types::{Color as LspColor, Position, Range};

    fn info(line: u32, start: u32, end: u32, rgba: (f32, f32, f32, f32)) -> ColorInformation {
        ColorInformation {
            range: Range::new(Position::new(line, start), Position::new(line, end)),
            color: LspColor {
                red: rgba.0,
                green: rgba.1,
                blue: rgba.2,
                alpha: rgba.3,
            },
        }
    }

    fn vars(pairs: &[(&str, &str)]) -> VariableSet {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn prefixes(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_window_spans_min_to_max_plus_overscan() {
        let colors = vec![
            info(12, 0, 4, (1.0, 0.0, 0.0, 1.0)),
            info(4, 0, 4, (1.0, 0.0, 0.0, 1.0)),
        ];
        assert_eq!(protocol_window(&colors), LineWindow::new(4, 14));
        assert_eq!(protocol_window(&[]), LineWindow::WHOLE_BUFFER);
    }

    #[test]
    fn test_multiline_range_ends_at_end_of_start_line() {
        let mut colors = vec![info(2, 5, 12, (0.0, 0.0, 1.0, 1.0))];
        colors[0].range.end = Position::new(4, 1);
        let lines = vec![
            "a {".to_string(),
            "  color:".to_string(),
            "  b: rgb(0,".to_string(),
        ];
        let mut table = HighlightTable::new();
        protocol_entries(&colors, 0, &lines, &mut table);
        assert_eq!(
            table.line_entries(2),
            &[HighlightEntry {
                color: "0000ff".into(),
                start_col: 5,
                end_col: 11,
            }]
        );
        assert!(table.line_entries(4).is_empty());
    }

    #[test]
    fn test_multiline_range_without_text_is_never_inverted() {
        let mut colors = vec![info(7, 5, 12, (0.0, 0.0, 1.0, 1.0))];
        colors[0].range.end = Position::new(9, 1);
        let mut table = HighlightTable::new();
        protocol_entries(&colors, 0, &[], &mut table);
        let entry = &table.line_entries(7)[0];
        assert_eq!((entry.start_col, entry.end_col), (5, 5));
    }

    #[test]
    fn test_protocol_columns_converted_to_bytes() {
        // "é" is 2 bytes / 1 UTF-16 unit, "😀" is 4 bytes / 2 units
        let lines = vec![
            "/* é */ #00ff00".to_string(),
            "😀 #fff".to_string(),
        ];
        let colors = vec![
            info(0, 8, 15, (0.0, 1.0, 0.0, 1.0)),
            info(1, 3, 7, (1.0, 1.0, 1.0, 1.0)),
        ];
        let mut table = HighlightTable::new();
        protocol_entries(&colors, 0, &lines, &mut table);

        let first = &table.line_entries(0)[0];
        assert_eq!((first.start_col, first.end_col), (9, 16));
        assert_eq!(&lines[0][first.start_col..first.end_col], "#00ff00");

        let second = &table.line_entries(1)[0];
        assert_eq!((second.start_col, second.end_col), (5, 9));
        assert_eq!(&lines[1][second.start_col..second.end_col], "#fff");
    }

    #[test]
    fn test_protocol_and_utility_columns_agree_on_non_ascii_line() {
        let lines = vec!["<p title=\"café\" class=\"bg-brand\">".to_string()];
        let utility_start = lines[0].find("bg-brand").unwrap();
        let utf16_start = lines[0][..utility_start].encode_utf16().count() as u32;
        let colors = vec![info(0, utf16_start, utf16_start + 8, (1.0, 0.0, 0.0, 1.0))];
        let variables = vars(&[("brand", "ff0000")]);

        let table = merge_highlights(
            &colors,
            &variables,
            &prefixes(&["bg"]),
            protocol_window(&colors),
            &lines,
        );
        let entries = table.line_entries(0);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].start_col, entries[1].start_col);
        assert_eq!(entries[0].end_col, entries[1].end_col);
    }

    #[test]
    fn test_utility_class_matches_bare_and_color_prefixed_names() {
        let variables = vars(&[("color-primary", "#ff0000")]);
        let lines = vec![
            r#"<div class="bg-primary text-color-primary">"#.to_string(),
        ];
        let mut table = HighlightTable::new();
        scan_utility_classes(&variables, &prefixes(&["bg", "text"]), 10, &lines, &mut table);

        let entries = table.line_entries(10);
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.color == "ff0000"));
        assert!(entries
            .iter()
            .any(|e| e.start_col == 12 && e.end_col == 22));
        assert!(entries
            .iter()
            .any(|e| e.start_col == 23 && e.end_col == 41));
    }

    #[test]
    fn test_substring_matches_are_not_bounded() {
        let variables = vars(&[("red", "ff0000")]);
        let lines = vec!["bg-red-500 bg-red".to_string()];
        let mut table = HighlightTable::new();
        scan_utility_classes(&variables, &prefixes(&["bg"]), 0, &lines, &mut table);
        assert_eq!(table.line_entries(0).len(), 2);
    }

    #[test]
    fn test_merge_retains_overlapping_entries() {
        let colors = vec![info(0, 0, 10, (0.0, 1.0, 0.0, 1.0))];
        let variables = vars(&[("brand", "ff0000")]);
        let lines = vec!["bg-brand".to_string()];
        let window = protocol_window(&colors);
        let table = merge_highlights(&colors, &variables, &prefixes(&["bg"]), window, &lines);

        assert_eq!(
            table.line_entries(0),
            &[
                HighlightEntry {
                    color: "00ff00".into(),
                    start_col: 0,
                    end_col: 10,
                },
                HighlightEntry {
                    color: "ff0000".into(),
                    start_col: 0,
                    end_col: 8,
                },
            ]
        );
    }
}
