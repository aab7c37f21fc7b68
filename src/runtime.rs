//! Command execution
//!
//! `update` only describes side effects; this module performs them against
//! the two external collaborators: the highlight sink and the color-reporting
//! protocol client. Protocol answers are fed back in later as messages.

use std::collections::VecDeque;

use lsp_types::ColorInformation;
use rustc_hash::FxHashMap;

use crate::buffer::TextSource;
use crate::commands::Cmd;
use crate::highlight::{HighlightSink, HighlightUpdate};
use crate::messages::{ColorsMsg, ProtocolError};
use crate::model::ColorModel;
use crate::update::update;
use crate::variables::ScopeId;

/// Client side of the color-reporting protocol.
///
/// `request_colors` must not answer synchronously; the response is delivered
/// later as `ColorsMsg::ColorsReceived` carrying the same `request_id`.
pub trait ColorProvider {
    fn request_colors(&mut self, scope: ScopeId, request_id: u64);
}

/// Perform a command
pub fn execute(cmd: Cmd, sink: &mut dyn HighlightSink, provider: &mut dyn ColorProvider) {
    match cmd {
        Cmd::RequestColors { scope, request_id } => {
            tracing::trace!("Requesting colors for scope {} (request {})", scope, request_id);
            provider.request_colors(scope, request_id);
        }
        Cmd::ApplyHighlights(update) => sink.apply(&update),
        Cmd::Batch(cmds) => {
            for cmd in cmds {
                execute(cmd, sink, provider);
            }
        }
    }
}

/// Run one message through `update` and execute the resulting command
pub fn dispatch(
    model: &mut ColorModel,
    msg: ColorsMsg,
    text: &dyn TextSource,
    sink: &mut dyn HighlightSink,
    provider: &mut dyn ColorProvider,
) {
    if let Some(cmd) = update(model, msg, text) {
        execute(cmd, sink, provider);
    }
}

/// Sink that keeps every update it receives
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub updates: Vec<HighlightUpdate>,
}

impl RecordingSink {
    /// Most recent update for `scope`
    pub fn last_for(&self, scope: ScopeId) -> Option<&HighlightUpdate> {
        self.updates.iter().rev().find(|u| u.scope == scope)
    }
}

impl HighlightSink for RecordingSink {
    fn apply(&mut self, update: &HighlightUpdate) {
        self.updates.push(update.clone());
    }
}

/// In-process provider answering from canned results.
///
/// Requests are queued and only answered when `drain` is called, which keeps
/// the request/response split of a real server.
#[derive(Debug, Default)]
pub struct QueuedColorProvider {
    results: FxHashMap<ScopeId, Result<Vec<ColorInformation>, ProtocolError>>,
    pending: VecDeque<(ScopeId, u64)>,
}

impl QueuedColorProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer future requests for `scope` with `colors`
    pub fn set_colors(&mut self, scope: ScopeId, colors: Vec<ColorInformation>) {
        self.results.insert(scope, Ok(colors));
    }

    /// Answer future requests for `scope` with an error
    pub fn set_error(&mut self, scope: ScopeId, error: ProtocolError) {
        self.results.insert(scope, Err(error));
    }

    /// Number of unanswered requests
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Answer every queued request, oldest first
    pub fn drain(&mut self) -> Vec<ColorsMsg> {
        self.pending
            .drain(..)
            .map(|(scope, request_id)| ColorsMsg::ColorsReceived {
                scope,
                request_id,
                result: self
                    .results
                    .get(&scope)
                    .cloned()
                    .unwrap_or_else(|| Ok(Vec::new())),
            })
            .collect()
    }
}

impl ColorProvider for QueuedColorProvider {
    fn request_colors(&mut self, scope: ScopeId, request_id: u64) {
        self.pending.push_back((scope, request_id));
    }
}

/// Dispatch queued protocol responses until none are left
pub fn run_until_idle(
    model: &mut ColorModel,
    text: &dyn TextSource,
    sink: &mut dyn HighlightSink,
    provider: &mut QueuedColorProvider,
) {
    loop {
        let responses = provider.drain();
        if responses.is_empty() {
            break;
        }
        for msg in responses {
            dispatch(model, msg, text, sink, provider);
        }
    }
}
