//! Benchmarks for variable resolution and highlight merging
//!
//! Run with: cargo bench --bench resolve

use lsp_types::{Color, ColorInformation, Position, Range};
use swatch::config::ParserToggles;
use swatch::highlight::{default_prefixes, merge_highlights, protocol_window};
use swatch::parser::ParserChain;
use swatch::variables::{ScopeId, VariableStore};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

const SCOPE: ScopeId = ScopeId(1);

/// Stylesheet with `count` direct colors followed by references to them
fn stylesheet(count: usize) -> Vec<String> {
    let mut lines = vec![":root {".to_string()];
    for i in 0..count {
        lines.push(format!("  --ref-{i}: var(--base-{i});"));
    }
    for i in 0..count {
        lines.push(format!("  --base-{i}: #{:06x};", i * 4099 % 0xffffff));
    }
    lines.push("}".to_string());
    lines
}

fn markup(lines: usize) -> Vec<String> {
    (0..lines)
        .map(|i| format!("<div class=\"bg-ref-{} text-base-{} p-4\">", i % 50, i % 30))
        .collect()
}

#[divan::bench(args = [10, 100, 1000])]
fn update_local_forward_refs(bencher: divan::Bencher, count: usize) {
    let lines = stylesheet(count);
    let parser = ParserChain::from_toggles(&ParserToggles::default());
    bencher.bench_local(|| {
        let mut store = VariableStore::new();
        store.update_local(SCOPE, 0, None, divan::black_box(&lines), &parser);
        store
    });
}

#[divan::bench(args = [100, 1000])]
fn merge_visible_window(bencher: divan::Bencher, line_count: usize) {
    let parser = ParserChain::from_toggles(&ParserToggles::default());
    let mut store = VariableStore::new();
    store.update_local(SCOPE, 0, None, &stylesheet(50), &parser);
    let variables = store.resolved_view(SCOPE).variables.clone();
    let prefixes = default_prefixes();
    let text = markup(line_count);

    let colors: Vec<ColorInformation> = (0..line_count as u32)
        .step_by(10)
        .map(|line| ColorInformation {
            range: Range::new(Position::new(line, 0), Position::new(line, 7)),
            color: Color {
                red: 0.5,
                green: 0.25,
                blue: 1.0,
                alpha: 1.0,
            },
        })
        .collect();
    let window = protocol_window(&colors);

    bencher.bench_local(|| {
        merge_highlights(
            divan::black_box(&colors),
            &variables,
            &prefixes,
            window,
            &text,
        )
    });
}
