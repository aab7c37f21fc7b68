//! Command-line argument parsing
//!
//! Supports:
//! - Choosing the stylesheet or markup file to scan
//! - Extra global variable files on top of the config
//! - Replaying a saved `textDocument/documentColor` response
//! - Persisting `--global` patterns into the user config

use clap::Parser;
use std::path::PathBuf;

/// Show the colors swatch would paint for a file
#[derive(Parser, Debug)]
#[command(name = "swatch", version, about = "Resolve CSS variable colors in a file")]
pub struct CliArgs {
    /// File to scan
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Glob pattern of stylesheets with global variables (repeatable)
    #[arg(short = 'g', long = "global", value_name = "PATTERN")]
    pub globals: Vec<String>,

    /// JSON file holding a documentColor response (array of ColorInformation)
    #[arg(short = 'c', long, value_name = "JSON")]
    pub colors: Option<PathBuf>,

    /// Print the resolved variables as well
    #[arg(long)]
    pub variables: bool,

    /// Print the highlight update as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the config, with any --global patterns added, back to the config file
    #[arg(long)]
    pub save_config: bool,
}
