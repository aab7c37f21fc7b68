//! Update function for the Elm-style architecture
//!
//! ```text
//! Attach / BufferChanged ──► update_local ──► Cmd::RequestColors ──► (language server)
//!                                                                          │
//!            Cmd::ApplyHighlights ◄── merge ◄── ColorsReceived ◄──────────┘
//! ```
//!
//! All handlers run on one thread. A response for a scope that has been
//! detached, or that was superseded by a newer request, is dropped without
//! touching any state.
//!
//! Locals may resolve through globals (`--button: var(--brand)`), so a global
//! reload re-reads every attached buffer rather than just re-merging.

use lsp_types::ColorInformation;

use crate::buffer::TextSource;
use crate::commands::Cmd;
use crate::highlight::{merge_highlights, protocol_window, HighlightMetadata, HighlightUpdate};
use crate::messages::ColorsMsg;
use crate::model::{ColorModel, ScopeSession};
use crate::variables::ScopeId;

/// Main update function - dispatches to the handler for each message
pub fn update(model: &mut ColorModel, msg: ColorsMsg, text: &dyn TextSource) -> Option<Cmd> {
    match msg {
        ColorsMsg::Attach { scope } => {
            if model.is_attached(scope) {
                tracing::debug!("Scope {} already attached", scope);
            } else {
                tracing::debug!("Attaching scope {}", scope);
                model.sessions.insert(scope, ScopeSession::default());
            }
            update_buffer_changed(model, scope, 0, None, text)
        }

        ColorsMsg::BufferChanged {
            scope,
            line_start,
            line_end,
        } => update_buffer_changed(model, scope, line_start, line_end, text),

        ColorsMsg::ColorsReceived {
            scope,
            request_id,
            result,
        } => {
            let Some(session) = model.sessions.get(&scope) else {
                tracing::debug!(
                    "Discarding colors for detached scope {} (request {})",
                    scope,
                    request_id
                );
                return None;
            };

            if session.latest_request != Some(request_id) {
                tracing::debug!(
                    "Discarding stale colors for scope {}: request {} != latest {:?}",
                    scope,
                    request_id,
                    session.latest_request
                );
                return None;
            }

            match result {
                Ok(colors) => apply_merge(model, scope, &colors, true, text),
                Err(e) => {
                    tracing::warn!(
                        "Color request {} for scope {} failed: {}",
                        request_id,
                        scope,
                        e
                    );
                    None
                }
            }
        }

        ColorsMsg::Refresh { scope } => {
            if !model.is_attached(scope) {
                tracing::debug!("Ignoring refresh for detached scope {}", scope);
                return None;
            }
            apply_merge(model, scope, &[], false, text)
        }

        ColorsMsg::Scrolled { scope } => {
            let cached = model.cached_update(scope)?;
            tracing::trace!("Replaying cached highlights for scope {}", scope);
            Some(Cmd::ApplyHighlights(cached.clone()))
        }

        ColorsMsg::Detach { scope } => {
            if model.sessions.remove(&scope).is_some() {
                tracing::debug!("Detached scope {}", scope);
            }
            model.store.cleanup(scope);
            None
        }

        ColorsMsg::ReloadGlobals { patterns } => {
            model.store.load_global(&patterns, &model.parser);
            let cmds = model
                .attached_scopes()
                .into_iter()
                .filter_map(|scope| update_buffer_changed(model, scope, 0, None, text))
                .collect();
            Cmd::batch(cmds)
        }
    }
}

fn update_buffer_changed(
    model: &mut ColorModel,
    scope: ScopeId,
    line_start: usize,
    line_end: Option<usize>,
    text: &dyn TextSource,
) -> Option<Cmd> {
    if !model.is_attached(scope) {
        tracing::debug!("Ignoring change for detached scope {}", scope);
        return None;
    }

    let Some(lines) = text.lines(scope, line_start, line_end) else {
        tracing::warn!("No text available for scope {}", scope);
        return None;
    };

    let stats = model
        .store
        .update_local(scope, line_start, line_end, &lines, &model.parser);
    tracing::debug!(
        "Scope {}: {} local variable(s) resolved, {} dropped",
        scope,
        stats.direct + stats.deferred,
        stats.dropped
    );

    request_or_merge(model, scope, text)
}

/// Ask the server for colors, or merge locally when the protocol is disabled
fn request_or_merge(model: &mut ColorModel, scope: ScopeId, text: &dyn TextSource) -> Option<Cmd> {
    if model.config.protocol {
        let request_id = model.issue_request(scope)?;
        Some(Cmd::RequestColors { scope, request_id })
    } else {
        apply_merge(model, scope, &[], false, text)
    }
}

fn apply_merge(
    model: &mut ColorModel,
    scope: ScopeId,
    colors: &[ColorInformation],
    protocol: bool,
    text: &dyn TextSource,
) -> Option<Cmd> {
    let window = protocol_window(colors);
    let lines = text
        .lines(scope, window.start, window.end)
        .unwrap_or_default();

    let options = model.highlight_options();
    let view = model.store.resolved_view(scope);
    let table = merge_highlights(colors, &view.variables, &model.prefixes, window, &lines);
    let metadata = HighlightMetadata {
        protocol,
        variables_hash: view.hash,
    };

    tracing::debug!(
        "Scope {}: {} highlight(s) on {} line(s), window {}..{:?}",
        scope,
        table.entry_count(),
        table.lines.len(),
        window.start,
        window.end
    );

    let update = HighlightUpdate {
        scope,
        namespace: model.config.namespace.clone(),
        window,
        table,
        options,
        metadata,
    };

    let session = model.sessions.get_mut(&scope)?;
    session.cached = Some(update.clone());
    Some(Cmd::ApplyHighlights(update))
}
