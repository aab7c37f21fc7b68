//! Configuration persistence
//!
//! Stores preferences in `~/.config/swatch/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::highlight::{default_prefixes, HighlightMode};

/// Which built-in parsers make up the color parser chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserToggles {
    #[serde(default = "enabled")]
    pub hex: bool,
    #[serde(default = "enabled")]
    pub rgb: bool,
    /// `var(--name)` references
    #[serde(default = "enabled")]
    pub var: bool,
}

fn enabled() -> bool {
    true
}

impl Default for ParserToggles {
    fn default() -> Self {
        Self {
            hex: true,
            rgb: true,
            var: true,
        }
    }
}

/// Configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwatchConfig {
    /// Glob patterns of stylesheets providing global variables
    #[serde(default)]
    pub global_files: Vec<String>,

    /// Replaces the built-in utility-class prefix table when set
    #[serde(default)]
    pub utility_prefixes: Option<Vec<String>>,

    /// Highlight namespace handed to the sink
    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default)]
    pub mode: HighlightMode,

    #[serde(default)]
    pub parsers: ParserToggles,

    /// Request colors from the language server; local-only merging when off
    #[serde(default = "enabled")]
    pub protocol: bool,
}

fn default_namespace() -> String {
    "swatch".to_string()
}

impl Default for SwatchConfig {
    fn default() -> Self {
        Self {
            global_files: Vec::new(),
            utility_prefixes: None,
            namespace: default_namespace(),
            mode: HighlightMode::default(),
            parsers: ParserToggles::default(),
            protocol: true,
        }
    }
}

impl SwatchConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, or return defaults if missing or invalid
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific file, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Utility-class prefixes in effect
    pub fn prefixes(&self) -> Vec<String> {
        self.utility_prefixes
            .clone()
            .unwrap_or_else(default_prefixes)
    }

    /// Append global file patterns not already configured
    pub fn add_global_files(&mut self, patterns: &[String]) {
        for pattern in patterns {
            if !self.global_files.contains(pattern) {
                self.global_files.push(pattern.clone());
            }
        }
    }
}
