//! Swatch - CSS variable colors for editor buffers
//!
//! Keeps a live map from CSS custom-property names to resolved colors for
//! each buffer, and merges it with color ranges reported by a language
//! server into one table of color spans per line.

pub mod buffer;
pub mod color;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod highlight;
pub mod messages;
pub mod model;
pub mod parser;
pub mod runtime;
pub mod tracing;
pub mod update;
pub mod variables;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::SwatchConfig;
pub use highlight::{HighlightEntry, HighlightTable, HighlightUpdate};
pub use messages::ColorsMsg;
pub use model::ColorModel;
pub use parser::{ColorParser, ParserChain};
pub use variables::{ScopeId, VariableLookup, VariableStore};
