//! Subset construction algorithm, run to completion in one call.

use crate::automaton::access::{AutomatonAccess, AutomatonBuild};
use crate::automaton::dfa::DFA;
use crate::automaton::exploration::Exploration;
use crate::config::DeterminizeConfig;
use crate::error::Result;

/// Convert `source` to a DFA using the powerset construction.
///
/// Every target state stands for the set of source states reachable by some
/// word; empty successor sets become a non-final sink, so the result is
/// complete over the source alphabet.
pub fn determinize<A>(source: &A, config: &DeterminizeConfig) -> Result<DFA>
where
    A: AutomatonAccess + ?Sized,
{
    determinize_into(source, config)
}

/// Like [`determinize`], but builds into any default-constructible target.
///
/// The target is private to the call until it succeeds, so a failure leaves
/// nothing behind.
pub fn determinize_into<A, B>(source: &A, config: &DeterminizeConfig) -> Result<B>
where
    A: AutomatonAccess + ?Sized,
    B: AutomatonBuild + Default,
{
    let mut exploration = Exploration::new(source, config)?;
    let mut target = B::default();

    tracing::debug!(
        letters = exploration.alphabet().len(),
        "starting subset construction"
    );
    if exploration.seed(&mut target)?.is_none() {
        return Ok(target);
    }

    let alphabet = exploration.alphabet().to_vec();
    while let Some(pending) = exploration.pop() {
        for &symbol in &alphabet {
            exploration.expand_letter(&pending, symbol, &mut target)?;
        }
    }

    exploration.finish(&mut target);
    Ok(target)
}
