//! Finite automata and their determinization.
//!
//! This module provides:
//! - Capability traits for reading a source automaton and building a target
//! - An epsilon-NFA source and a DFA target
//! - Subset construction, in one call or one step at a time

mod access;
mod determinizer;
mod dfa;
mod epsilon_nfa;
mod exploration;
mod frontier;
mod materialize;
mod registry;
mod state;
mod subset_construction;
mod symbol;

pub use access::{AutomatonAccess, AutomatonBuild};
pub use determinizer::{Determinizer, Phase, StartError};
pub use dfa::DFA;
pub use epsilon_nfa::EpsilonNFA;
pub use frontier::{Frontier, Pending};
pub use materialize::state_label;
pub use registry::{Canonical, StateSetRegistry, Subset};
pub use state::{StateId, StateSet};
pub use subset_construction::{determinize, determinize_into};
pub use symbol::{EPSILON, SymbolId, is_epsilon};
