//! Error types for determinization runs.

use crate::automaton::{StateId, SymbolId};

/// A source automaton could not be read, or returned inconsistent data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("state {0} does not exist in the source automaton")]
    UnknownState(StateId),
    #[error("symbol {0} is not part of the alphabet")]
    UnknownSymbol(SymbolId),
    #[error("malformed automaton: {0}")]
    Malformed(String),
}

/// Reasons a determinization run halts without a result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeterminizeError {
    #[error("source automaton access failed: {0}")]
    Access(#[from] AccessError),
    #[error("subset limit exceeded: more than {limit} state sets discovered")]
    ResourceExhausted { limit: usize },
}

pub type Result<T, E = DeterminizeError> = std::result::Result<T, E>;
