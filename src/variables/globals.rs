//! Global definitions loaded from stylesheet files
//!
//! Patterns are glob-style paths (`styles/**/*.css`, `~/theme/vars.css`).
//! Patterns that match nothing and files that cannot be read are skipped.

use std::fs;
use std::path::{Component, Path, PathBuf};

use globset::GlobBuilder;
use walkdir::WalkDir;

use super::declarations::scan_declarations;
use super::{VariableSet, VariableStore};
use crate::parser::{ColorParser, ParseContext};
use crate::variables::NoVariables;

fn has_glob_meta(s: &str) -> bool {
    s.contains(['*', '?', '[', '{'])
}

fn expand_home(pattern: &str) -> String {
    match pattern.strip_prefix("~/") {
        Some(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest).to_string_lossy().into_owned(),
            None => pattern.to_string(),
        },
        None => pattern.to_string(),
    }
}

/// Leading path components that contain no glob syntax
fn literal_base(pattern: &str) -> PathBuf {
    let mut base = PathBuf::new();
    for component in Path::new(pattern).components() {
        if let Component::Normal(part) = component {
            if has_glob_meta(&part.to_string_lossy()) {
                break;
            }
        }
        base.push(component);
    }
    base
}

/// How deep below `base` a match can sit, or `None` when `**` (or a brace
/// group that may hide a separator) allows any depth
fn walk_depth(pattern: &str, base: &Path) -> Option<usize> {
    if pattern.contains("**") || pattern.contains('{') {
        return None;
    }
    let total = Path::new(pattern).components().count();
    Some(total.saturating_sub(base.components().count()))
}

/// Expand glob-style patterns to the files they match, sorted and deduplicated
pub fn expand_patterns(patterns: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for raw in patterns {
        let pattern = expand_home(raw);

        if !has_glob_meta(&pattern) {
            let path = PathBuf::from(&pattern);
            if path.is_file() {
                files.push(path);
            } else {
                tracing::debug!("Global file pattern {} matched nothing", raw);
            }
            continue;
        }

        let matcher = match GlobBuilder::new(&pattern).literal_separator(true).build() {
            Ok(glob) => glob.compile_matcher(),
            Err(e) => {
                tracing::warn!("Invalid global file pattern {}: {}", raw, e);
                continue;
            }
        };

        let base = literal_base(&pattern);
        let depth = walk_depth(&pattern, &base);
        let relative = base.as_os_str().is_empty();
        let root = if relative { PathBuf::from(".") } else { base };

        let mut walker = WalkDir::new(&root).follow_links(true);
        if let Some(depth) = depth {
            walker = walker.max_depth(depth);
        }

        let before = files.len();
        for entry in walker.into_iter().flatten() {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let candidate = if relative {
                path.strip_prefix(".").unwrap_or(path)
            } else {
                path
            };
            if matcher.is_match(candidate) {
                files.push(candidate.to_path_buf());
            }
        }
        if files.len() == before {
            tracing::debug!("Global file pattern {} matched nothing", raw);
        }
    }

    files.sort();
    files.dedup();
    files
}

impl VariableStore {
    /// Replace the Global set with the declarations found in files matching `patterns`.
    ///
    /// Values are parsed without scope context, so `var()` references inside
    /// global files do not resolve. An empty pattern list leaves Global untouched.
    /// Returns the number of global definitions after loading.
    pub fn load_global(&mut self, patterns: &[String], parser: &dyn ColorParser) -> usize {
        if patterns.is_empty() {
            return self.global.len();
        }

        let ctx = ParseContext::new(None, &NoVariables);
        let mut definitions = VariableSet::new();

        for path in expand_patterns(patterns) {
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    tracing::debug!("Skipping global file {}: {}", path.display(), e);
                    continue;
                }
            };
            for line in content.lines() {
                for decl in scan_declarations(line) {
                    if let Some(m) = parser.parse(decl.value, 0, &ctx) {
                        definitions.insert(decl.name.to_string(), m.color);
                    }
                }
            }
        }

        tracing::info!(
            "Loaded {} global variable(s) from {} pattern(s)",
            definitions.len(),
            patterns.len()
        );
        let count = definitions.len();
        self.replace_global(definitions);
        count
    }
}
