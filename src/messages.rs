//! Message types for the Elm-style update loop
//!
//! Editor events and language-server responses arrive as `ColorsMsg`s.

use lsp_types::ColorInformation;
use thiserror::Error;

use crate::variables::ScopeId;

/// Failure reported by the color-reporting protocol
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// The server answered with an error response
    #[error("server error {code}: {message}")]
    Server { code: i64, message: String },
    /// The request was cancelled before a result arrived
    #[error("request cancelled")]
    Cancelled,
    /// No server is attached to the buffer
    #[error("no language server attached")]
    Disconnected,
}

/// Highlighting messages
#[derive(Debug, Clone)]
pub enum ColorsMsg {
    /// Start tracking a scope (buffer opened); triggers a full parse
    Attach { scope: ScopeId },
    /// Text changed in `[line_start, line_end)`; `line_end == None` is "to end of buffer"
    BufferChanged {
        scope: ScopeId,
        line_start: usize,
        line_end: Option<usize>,
    },
    /// Asynchronous answer to a `Cmd::RequestColors`
    ColorsReceived {
        scope: ScopeId,
        request_id: u64,
        result: Result<Vec<ColorInformation>, ProtocolError>,
    },
    /// Re-merge from local data only (no protocol colors)
    Refresh { scope: ScopeId },
    /// View moved without text changes; repaint the cached table
    Scrolled { scope: ScopeId },
    /// Buffer closed or protocol detached; drop all scope state
    Detach { scope: ScopeId },
    /// Reload global variables and refresh every attached scope
    ReloadGlobals { patterns: Vec<String> },
}

impl ColorsMsg {
    /// Full-buffer change for `scope`
    pub fn buffer_changed(scope: ScopeId) -> Self {
        ColorsMsg::BufferChanged {
            scope,
            line_start: 0,
            line_end: None,
        }
    }
}
