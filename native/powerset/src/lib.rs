//! Subset construction for finite automata.
//!
//! [`determinize`] converts any source exposed through [`AutomatonAccess`]
//! into a language-equivalent [`DFA`]. [`Determinizer`] does the same work one
//! expansion at a time, so a caller can bound or interleave it.

pub mod automaton;
pub mod config;
pub mod error;

pub use automaton::{
    AutomatonAccess, AutomatonBuild, DFA, Determinizer, EpsilonNFA, StartError, determinize,
    determinize_into,
};
pub use config::DeterminizeConfig;
pub use error::{AccessError, DeterminizeError};
