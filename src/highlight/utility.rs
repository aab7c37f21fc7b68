//! Utility-class prefixes that take a color name as their suffix
//!
//! `bg-primary`, `text-accent`, `border-t-muted` and so on. The merger builds
//! `prefix-name` tokens from these and each resolved variable name.

pub const UTILITY_PREFIXES: &[&str] = &[
    "bg",           // background-color
    "text",         // color
    "border",       // border-color
    "border-t",     // border-top-color
    "border-r",     // border-right-color
    "border-b",     // border-bottom-color
    "border-l",     // border-left-color
    "border-x",     // border-inline colors
    "border-y",     // border-block colors
    "outline",      // outline-color
    "ring",         // focus ring
    "ring-offset",  // focus ring offset
    "divide",       // divider border color
    "decoration",   // text-decoration-color
    "shadow",       // box-shadow color
    "accent",       // accent-color
    "caret",        // caret-color
    "fill",         // SVG fill
    "stroke",       // SVG stroke
    "placeholder",  // ::placeholder color
    "from",         // gradient start
    "via",          // gradient middle
    "to",           // gradient end
];

/// Owned copy of the built-in table
pub fn default_prefixes() -> Vec<String> {
    UTILITY_PREFIXES.iter().map(|p| p.to_string()).collect()
}
