//! Application state for color highlighting
//!
//! `ColorModel` owns the variable store, the parser chain and one
//! `ScopeSession` per attached buffer. It is only ever mutated by
//! [`crate::update::update`].

use rustc_hash::FxHashMap;

use crate::config::SwatchConfig;
use crate::highlight::{HighlightOptions, HighlightUpdate};
use crate::parser::ParserChain;
use crate::variables::{ScopeId, VariableStore};

/// Per-scope session state
#[derive(Debug, Clone, Default)]
pub struct ScopeSession {
    /// Most recent color request issued for this scope; older responses are discarded
    pub latest_request: Option<u64>,
    /// Last update handed to the sink, replayed on scroll-only refreshes
    pub cached: Option<HighlightUpdate>,
}

/// Highlighting state for all scopes
#[derive(Debug)]
pub struct ColorModel {
    pub store: VariableStore,
    pub sessions: FxHashMap<ScopeId, ScopeSession>,
    pub parser: ParserChain,
    pub prefixes: Vec<String>,
    pub config: SwatchConfig,
    next_request_id: u64,
}

impl ColorModel {
    pub fn new(config: SwatchConfig) -> Self {
        Self {
            store: VariableStore::new(),
            sessions: FxHashMap::default(),
            parser: ParserChain::from_toggles(&config.parsers),
            prefixes: config.prefixes(),
            config,
            next_request_id: 0,
        }
    }

    pub fn is_attached(&self, scope: ScopeId) -> bool {
        self.sessions.contains_key(&scope)
    }

    /// Attached scopes in ascending order
    pub fn attached_scopes(&self) -> Vec<ScopeId> {
        let mut scopes: Vec<_> = self.sessions.keys().copied().collect();
        scopes.sort();
        scopes
    }

    /// Allocate a request id and remember it as the latest for `scope`
    pub(crate) fn issue_request(&mut self, scope: ScopeId) -> Option<u64> {
        let session = self.sessions.get_mut(&scope)?;
        self.next_request_id += 1;
        session.latest_request = Some(self.next_request_id);
        Some(self.next_request_id)
    }

    pub(crate) fn highlight_options(&self) -> HighlightOptions {
        HighlightOptions {
            mode: self.config.mode,
        }
    }

    /// Last update painted for `scope`
    pub fn cached_update(&self, scope: ScopeId) -> Option<&HighlightUpdate> {
        self.sessions.get(&scope)?.cached.as_ref()
    }
}

impl Default for ColorModel {
    fn default() -> Self {
        Self::new(SwatchConfig::default())
    }
}
