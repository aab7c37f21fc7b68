//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use crate::highlight::HighlightUpdate;
use crate::variables::ScopeId;

/// Side effects requested by `update`
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Ask the language server for document colors; the answer comes back as
    /// `ColorsMsg::ColorsReceived` with the same `request_id`
    RequestColors { scope: ScopeId, request_id: u64 },
    /// Hand a table to the highlight sink
    ApplyHighlights(HighlightUpdate),
    /// Several commands, executed in order
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Combine commands, collapsing empty and single-element batches
    pub fn batch(cmds: Vec<Cmd>) -> Option<Cmd> {
        let mut cmds = cmds;
        match cmds.len() {
            0 => None,
            1 => cmds.pop(),
            _ => Some(Cmd::Batch(cmds)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(id: u64) -> Cmd {
        Cmd::RequestColors {
            scope: ScopeId(1),
            request_id: id,
        }
    }

    #[test]
    fn test_batch_collapses() {
        assert_eq!(Cmd::batch(vec![]), None);
        assert_eq!(Cmd::batch(vec![request(1)]), Some(request(1)));
        assert_eq!(
            Cmd::batch(vec![request(1), request(2)]),
            Some(Cmd::Batch(vec![request(1), request(2)]))
        );
    }
}
