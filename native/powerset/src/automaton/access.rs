//! Capability interfaces between the subset construction and the automata it
//! reads from and writes to.

use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::SymbolId;
use crate::error::AccessError;

/// Read-only view of a source automaton.
pub trait AutomatonAccess {
    /// All state ids of the automaton.
    fn states(&self) -> Result<Vec<StateId>, AccessError>;

    /// The initial states.
    fn initial_states(&self) -> Result<StateSet, AccessError>;

    /// The letters transitions are labelled with, in a fixed order.
    fn alphabet(&self) -> Result<Vec<SymbolId>, AccessError>;

    /// States reached from `state` by reading `symbol`.
    fn successors(&self, state: StateId, symbol: SymbolId) -> Result<StateSet, AccessError>;

    fn is_final(&self, state: StateId) -> Result<bool, AccessError>;
}

/// Write surface of a target automaton.
pub trait AutomatonBuild {
    /// Declare a letter of the target alphabet, whether or not a transition
    /// ends up using it.
    fn add_symbol(&mut self, symbol: SymbolId);

    /// Add a state, optionally labelled, and return its id.
    fn add_state(&mut self, label: Option<String>) -> StateId;

    fn set_initial(&mut self, state: StateId);

    fn set_final(&mut self, state: StateId);

    /// Set the unique transition leaving `source` on `symbol`.
    fn set_transition(&mut self, source: StateId, symbol: SymbolId, destination: StateId);
}

impl<A: AutomatonAccess + ?Sized> AutomatonAccess for &A {
    fn states(&self) -> Result<Vec<StateId>, AccessError> {
        (**self).states()
    }

    fn initial_states(&self) -> Result<StateSet, AccessError> {
        (**self).initial_states()
    }

    fn alphabet(&self) -> Result<Vec<SymbolId>, AccessError> {
        (**self).alphabet()
    }

    fn successors(&self, state: StateId, symbol: SymbolId) -> Result<StateSet, AccessError> {
        (**self).successors(state, symbol)
    }

    fn is_final(&self, state: StateId) -> Result<bool, AccessError> {
        (**self).is_final(state)
    }
}
