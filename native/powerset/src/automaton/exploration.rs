//! Exploration state shared by the batch and incremental engines.
//!
//! Both engines drive the same [`Exploration`]: sets leave the frontier in
//! FIFO order and each set is expanded letter by letter in `alphabet()`
//! order, front to back. Keeping that policy in one place is what makes the
//! two engines number their target states identically.

use crate::automaton::access::{AutomatonAccess, AutomatonBuild};
use crate::automaton::frontier::{Frontier, Pending};
use crate::automaton::materialize::{mark_final_states, mark_initial, state_label};
use crate::automaton::registry::{Canonical, StateSetRegistry, Subset};
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::{SymbolId, check_alphabet};
use crate::config::DeterminizeConfig;
use crate::error::{AccessError, Result};

pub(crate) struct Exploration<'a, A: ?Sized> {
    source: &'a A,
    alphabet: Vec<SymbolId>,
    /// Every state id the source declared.
    known: StateSet,
    registry: StateSetRegistry,
    frontier: Frontier,
    label_states: bool,
    transitions: usize,
}

impl<'a, A: AutomatonAccess + ?Sized> Exploration<'a, A> {
    /// Read the source's states and alphabet and prepare an empty run.
    pub(crate) fn new(source: &'a A, config: &DeterminizeConfig) -> Result<Self> {
        let known: StateSet = source.states()?.into_iter().collect();
        let alphabet = source.alphabet()?;
        check_alphabet(&alphabet)?;

        Ok(Self {
            source,
            alphabet,
            known,
            registry: StateSetRegistry::new(config.max_subsets),
            frontier: Frontier::new(),
            label_states: config.label_states,
            transitions: 0,
        })
    }

    /// Declare the source alphabet on the target, then register the set of
    /// initial states and mark it initial.
    ///
    /// Returns `None` when the source has no initial state; the target then
    /// has the alphabet but no states.
    pub(crate) fn seed<B: AutomatonBuild + ?Sized>(
        &mut self,
        builder: &mut B,
    ) -> Result<Option<StateId>> {
        for &symbol in &self.alphabet {
            builder.add_symbol(symbol);
        }

        let initial = self.source.initial_states()?;
        if initial.is_empty() {
            tracing::debug!("source automaton has no initial state");
            return Ok(None);
        }
        self.check_known(&initial)?;

        let id = self.canonicalize(&initial, builder)?.id();
        mark_initial(builder, id);
        Ok(Some(id))
    }

    pub(crate) fn alphabet(&self) -> &[SymbolId] {
        &self.alphabet
    }

    pub(crate) fn pop(&mut self) -> Option<Pending> {
        self.frontier.pop()
    }

    pub(crate) fn has_pending(&self) -> bool {
        self.frontier.has_work()
    }

    pub(crate) fn num_subsets(&self) -> usize {
        self.registry.len()
    }

    pub(crate) fn num_transitions(&self) -> usize {
        self.transitions
    }

    /// Union of the `symbol`-successors of every state in `set`.
    pub(crate) fn successor_set(&self, set: &StateSet, symbol: SymbolId) -> Result<StateSet> {
        let mut next = StateSet::with_capacity(self.known.len());
        for state in set.iter() {
            next.union_with(&self.source.successors(state, symbol)?);
        }
        self.check_known(&next)?;
        Ok(next)
    }

    /// Expand a popped set on one letter: compute the successor set,
    /// canonicalize it, and emit the transition.
    pub(crate) fn expand_letter<B: AutomatonBuild + ?Sized>(
        &mut self,
        pending: &Pending,
        symbol: SymbolId,
        builder: &mut B,
    ) -> Result<StateId> {
        let next = self.successor_set(&pending.set, symbol)?;
        let destination = self.canonicalize(&next, builder)?.id();
        builder.set_transition(pending.id, symbol, destination);
        self.transitions += 1;
        Ok(destination)
    }

    /// Flag the final target states once nothing is left to explore.
    pub(crate) fn finish<B: AutomatonBuild + ?Sized>(&self, builder: &mut B) -> usize {
        let finals = mark_final_states(&self.registry, builder);
        tracing::debug!(
            states = self.registry.len(),
            transitions = self.transitions,
            finals,
            "subset construction finished"
        );
        finals
    }

    fn canonicalize<B: AutomatonBuild + ?Sized>(
        &mut self,
        set: &StateSet,
        builder: &mut B,
    ) -> Result<Canonical> {
        let source = self.source;
        let label_states = self.label_states;
        let canonical = self.registry.canonicalize(set, |set| {
            let accepting = contains_final(source, set)?;
            let label = label_states.then(|| state_label(set));
            let id = builder.add_state(label);
            Ok(Subset { id, accepting })
        })?;

        if let Canonical::Created(id) = canonical {
            tracing::trace!(id, subset = %set, "discovered state set");
            self.frontier.push(id, set.clone());
        }
        Ok(canonical)
    }

    fn check_known(&self, set: &StateSet) -> Result<()> {
        match set.first_outside(&self.known) {
            Some(state) => Err(AccessError::UnknownState(state).into()),
            None => Ok(()),
        }
    }
}

fn contains_final<A: AutomatonAccess + ?Sized>(source: &A, set: &StateSet) -> Result<bool> {
    for state in set.iter() {
        if source.is_final(state)? {
            return Ok(true);
        }
    }
    Ok(false)
}
