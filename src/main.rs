mod cli;

use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use lsp_types::ColorInformation;

use swatch::buffer::BufferSet;
use swatch::config::SwatchConfig;
use swatch::highlight::HighlightUpdate;
use swatch::messages::ColorsMsg;
use swatch::model::ColorModel;
use swatch::runtime::{dispatch, run_until_idle, QueuedColorProvider, RecordingSink};

use crate::cli::CliArgs;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    swatch::tracing::init();

    let mut config = SwatchConfig::load();
    config.add_global_files(&args.globals);
    if args.save_config {
        config.save().map_err(anyhow::Error::msg)?;
    }
    config.protocol = args.colors.is_some();

    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let mut buffers = BufferSet::new();
    let scope = buffers.open(&text);

    let mut provider = QueuedColorProvider::new();
    if let Some(path) = &args.colors {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let colors: Vec<ColorInformation> = serde_json::from_str(&json)
            .with_context(|| format!("Invalid documentColor response in {}", path.display()))?;
        tracing::info!("Replaying {} protocol color(s)", colors.len());
        provider.set_colors(scope, colors);
    }

    let patterns = config.global_files.clone();
    let mut model = ColorModel::new(config);
    let mut sink = RecordingSink::default();

    dispatch(
        &mut model,
        ColorsMsg::ReloadGlobals { patterns },
        &buffers,
        &mut sink,
        &mut provider,
    );
    dispatch(
        &mut model,
        ColorsMsg::Attach { scope },
        &buffers,
        &mut sink,
        &mut provider,
    );
    run_until_idle(&mut model, &buffers, &mut sink, &mut provider);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.variables {
        for (name, color) in &model.store.resolved_view(scope).variables {
            writeln!(out, "--{}: #{}", name, color)?;
        }
        writeln!(out)?;
    }

    match sink.last_for(scope) {
        Some(update) if args.json => {
            serde_json::to_writer_pretty(&mut out, update)?;
            writeln!(out)?;
        }
        Some(update) => print_update(&mut out, update)?,
        None => writeln!(out, "no highlights")?,
    }

    Ok(())
}

fn print_update(out: &mut impl Write, update: &HighlightUpdate) -> io::Result<()> {
    for (line, colors) in &update.table.lines {
        for entry in &colors.entries {
            writeln!(
                out,
                "{}:{}-{} #{}",
                line + 1,
                entry.start_col,
                entry.end_col,
                entry.color
            )?;
        }
    }
    Ok(())
}
