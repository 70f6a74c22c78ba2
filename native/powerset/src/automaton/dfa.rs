//! Deterministic Finite Automaton (DFA) implementation.

use crate::automaton::access::{AutomatonAccess, AutomatonBuild};
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::symbol::SymbolId;
use crate::error::AccessError;
use indexmap::IndexMap;
use std::collections::{BTreeSet, HashMap, VecDeque};

/// A Deterministic Finite Automaton.
///
/// Transitions live in a map keyed by `(source, symbol)`, so at most one
/// transition can leave a state on a given symbol.
#[derive(Debug, Clone, Default)]
pub struct DFA {
    /// Number of states
    num_states: StateId,
    /// Start state (None if empty)
    start_state: Option<StateId>,
    final_states: StateSet,
    /// Transitions: (source, symbol) -> destination, in insertion order
    transitions: IndexMap<(StateId, SymbolId), StateId>,
    /// All symbols used
    alphabet: BTreeSet<SymbolId>,
    /// Optional human-readable name per state
    labels: Vec<Option<String>>,
}

impl DFA {
    /// Create a new empty DFA.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new state and return its ID.
    pub fn add_state(&mut self) -> StateId {
        self.add_labeled_state(None)
    }

    pub fn add_labeled_state(&mut self, label: Option<String>) -> StateId {
        let id = self.num_states;
        self.num_states += 1;
        self.labels.push(label);
        id
    }

    pub fn set_start_state(&mut self, state: StateId) {
        self.start_state = Some(state);
    }

    pub fn add_final_state(&mut self, state: StateId) {
        self.final_states.insert(state);
    }

    /// Declare a letter even if no transition uses it.
    pub fn add_symbol(&mut self, symbol: SymbolId) {
        self.alphabet.insert(symbol);
    }

    /// Add a transition, replacing any previous one on the same symbol.
    pub fn add_transition(&mut self, source: StateId, symbol: SymbolId, destination: StateId) {
        self.alphabet.insert(symbol);
        self.transitions.insert((source, symbol), destination);
    }

    /// Get the transition from a state on a symbol.
    pub fn transition(&self, source: StateId, symbol: SymbolId) -> Option<StateId> {
        self.transitions.get(&(source, symbol)).copied()
    }

    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    pub fn num_transitions(&self) -> usize {
        self.transitions.len()
    }

    pub fn start_state(&self) -> Option<StateId> {
        self.start_state
    }

    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    pub fn label(&self, state: StateId) -> Option<&str> {
        self.labels.get(state as usize)?.as_deref()
    }

    /// Get the alphabet, sorted.
    pub fn symbols(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.alphabet.iter().copied()
    }

    /// Get all transitions in the order they were added.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, SymbolId, StateId)> + '_ {
        self.transitions
            .iter()
            .map(|(&(src, sym), &dst)| (src, sym, dst))
    }

    /// Follow `word` from the start state.
    pub fn accepts(&self, word: &[SymbolId]) -> bool {
        let Some(mut state) = self.start_state else {
            return false;
        };
        for &symbol in word {
            match self.transition(state, symbol) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.final_states.contains(state)
    }

    /// Always true: the transition map cannot hold two targets for one
    /// `(source, symbol)` pair. A multi-start DFA is impossible for the same
    /// reason.
    pub fn is_deterministic(&self) -> bool {
        true
    }

    /// Every state has a transition on every symbol of the alphabet.
    pub fn is_complete(&self) -> bool {
        (0..self.num_states).all(|state| {
            self.alphabet
                .iter()
                .all(|&symbol| self.transitions.contains_key(&(state, symbol)))
        })
    }

    /// Check if the DFA is empty (accepts no strings).
    pub fn is_empty(&self) -> bool {
        !self.reachable_states().intersects(&self.final_states)
    }

    /// Find all states reachable from the start state.
    pub fn reachable_states(&self) -> StateSet {
        let mut reachable = StateSet::with_capacity(self.num_states as usize);

        let Some(start) = self.start_state else {
            return reachable;
        };

        let mut queue = VecDeque::from([start]);
        while let Some(state) = queue.pop_front() {
            if reachable.contains(state) {
                continue;
            }
            reachable.insert(state);

            for &symbol in &self.alphabet {
                if let Some(next) = self.transition(state, symbol) {
                    if !reachable.contains(next) {
                        queue.push_back(next);
                    }
                }
            }
        }

        reachable
    }

    /// Check whether `other` is this automaton up to a renaming of states.
    ///
    /// Both automata are walked breadth-first from their start states in
    /// lockstep, building a bijection between the states met. Unreachable
    /// states take part only through the state count.
    pub fn is_isomorphic(&self, other: &DFA) -> bool {
        if self.num_states != other.num_states
            || self.transitions.len() != other.transitions.len()
            || self.final_states.len() != other.final_states.len()
            || self.alphabet != other.alphabet
        {
            return false;
        }

        let (left_start, right_start) = match (self.start_state, other.start_state) {
            (None, None) => return true,
            (Some(l), Some(r)) => (l, r),
            _ => return false,
        };

        let mut forward: HashMap<StateId, StateId> = HashMap::new();
        let mut backward: HashMap<StateId, StateId> = HashMap::new();
        let mut queue = VecDeque::from([(left_start, right_start)]);
        forward.insert(left_start, right_start);
        backward.insert(right_start, left_start);

        while let Some((left, right)) = queue.pop_front() {
            if self.final_states.contains(left) != other.final_states.contains(right) {
                return false;
            }
            for &symbol in &self.alphabet {
                match (self.transition(left, symbol), other.transition(right, symbol)) {
                    (None, None) => {}
                    (Some(l), Some(r)) => match (forward.get(&l), backward.get(&r)) {
                        (None, None) => {
                            forward.insert(l, r);
                            backward.insert(r, l);
                            queue.push_back((l, r));
                        }
                        (Some(&mapped), Some(_)) if mapped == r => {}
                        _ => return false,
                    },
                    _ => return false,
                }
            }
        }

        true
    }

    fn check_state(&self, state: StateId) -> Result<(), AccessError> {
        if state < self.num_states {
            Ok(())
        } else {
            Err(AccessError::UnknownState(state))
        }
    }
}

impl AutomatonBuild for DFA {
    fn add_symbol(&mut self, symbol: SymbolId) {
        self.alphabet.insert(symbol);
    }

    fn add_state(&mut self, label: Option<String>) -> StateId {
        self.add_labeled_state(label)
    }

    fn set_initial(&mut self, state: StateId) {
        self.set_start_state(state);
    }

    fn set_final(&mut self, state: StateId) {
        self.add_final_state(state);
    }

    fn set_transition(&mut self, source: StateId, symbol: SymbolId, destination: StateId) {
        self.add_transition(source, symbol, destination);
    }
}

impl AutomatonAccess for DFA {
    fn states(&self) -> Result<Vec<StateId>, AccessError> {
        Ok((0..self.num_states).collect())
    }

    fn initial_states(&self) -> Result<StateSet, AccessError> {
        Ok(self.start_state.into_iter().collect())
    }

    fn alphabet(&self) -> Result<Vec<SymbolId>, AccessError> {
        Ok(self.symbols().collect())
    }

    fn successors(&self, state: StateId, symbol: SymbolId) -> Result<StateSet, AccessError> {
        self.check_state(state)?;
        if !self.alphabet.contains(&symbol) {
            return Err(AccessError::UnknownSymbol(symbol));
        }
        Ok(self.transition(state, symbol).into_iter().collect())
    }

    fn is_final(&self, state: StateId) -> Result<bool, AccessError> {
        self.check_state(state)?;
        Ok(self.final_states.contains(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ends_in_a() -> DFA {
        let mut dfa = DFA::new();
        let s0 = dfa.add_state();
        let s1 = dfa.add_state();
        dfa.set_start_state(s0);
        dfa.add_final_state(s1);
        dfa.add_transition(s0, 0, s1);
        dfa.add_transition(s0, 1, s0);
        dfa.add_transition(s1, 0, s1);
        dfa.add_transition(s1, 1, s0);
        dfa
    }

    #[test]
    fn test_dfa_basic() {
        let mut dfa = DFA::new();
        let s0 = dfa.add_state();
        let s1 = dfa.add_state();
        let s2 = dfa.add_state();

        dfa.set_start_state(s0);
        dfa.add_final_state(s2);
        dfa.add_transition(s0, 0, s1);
        dfa.add_transition(s1, 1, s2);

        assert_eq!(dfa.num_states(), 3);
        assert_eq!(dfa.num_transitions(), 2);
        assert_eq!(dfa.start_state(), Some(0));
        assert!(!dfa.is_empty());
        assert!(!dfa.is_complete());
        assert!(dfa.accepts(&[0, 1]));
        assert!(!dfa.accepts(&[0]));
        assert!(!dfa.accepts(&[1]));
    }

    #[test]
    fn test_transition_is_replaced() {
        let mut dfa = DFA::new();
        let s0 = dfa.add_state();
        let s1 = dfa.add_state();
        dfa.add_transition(s0, 0, s0);
        dfa.add_transition(s0, 0, s1);

        assert_eq!(dfa.num_transitions(), 1);
        assert_eq!(dfa.transition(s0, 0), Some(s1));
        assert!(dfa.is_deterministic());
    }

    #[test]
    fn test_empty_dfa() {
        let dfa = DFA::new();
        assert!(dfa.is_empty());
        assert!(!dfa.accepts(&[]));

        let mut dfa2 = DFA::new();
        dfa2.add_state();
        dfa2.set_start_state(0);
        // No final states - should be empty
        assert!(dfa2.is_empty());
    }

    #[test]
    fn test_unreachable_final_state_is_empty() {
        let mut dfa = DFA::new();
        let s0 = dfa.add_state();
        let s1 = dfa.add_state();
        dfa.set_start_state(s0);
        dfa.add_final_state(s1);
        dfa.add_transition(s0, 0, s0);

        assert!(dfa.is_empty());
        assert_eq!(dfa.reachable_states().to_vec(), vec![s0]);
    }

    #[test]
    fn test_labels() {
        let mut dfa = DFA::new();
        let named = dfa.add_labeled_state(Some("{0, 1}".to_string()));
        let anonymous = dfa.add_state();

        assert_eq!(dfa.label(named), Some("{0, 1}"));
        assert_eq!(dfa.label(anonymous), None);
        assert_eq!(dfa.label(99), None);
    }

    #[test]
    fn test_isomorphic_under_renaming() {
        let dfa = ends_in_a();

        // Same machine with the states created in the opposite order.
        let mut renamed = DFA::new();
        let t1 = renamed.add_state();
        let t0 = renamed.add_state();
        renamed.set_start_state(t0);
        renamed.add_final_state(t1);
        renamed.add_transition(t1, 1, t0);
        renamed.add_transition(t1, 0, t1);
        renamed.add_transition(t0, 1, t0);
        renamed.add_transition(t0, 0, t1);

        assert!(dfa.is_complete());
        assert!(dfa.is_isomorphic(&renamed));
        assert!(renamed.is_isomorphic(&dfa));
    }

    #[test]
    fn test_not_isomorphic_when_finality_differs() {
        let dfa = ends_in_a();

        let mut flipped = DFA::new();
        let s0 = flipped.add_state();
        let s1 = flipped.add_state();
        flipped.set_start_state(s0);
        flipped.add_final_state(s0);
        flipped.add_transition(s0, 0, s1);
        flipped.add_transition(s0, 1, s0);
        flipped.add_transition(s1, 0, s1);
        flipped.add_transition(s1, 1, s0);

        assert!(!dfa.is_isomorphic(&flipped));
    }

    #[test]
    fn test_access_surface() {
        let dfa = ends_in_a();

        assert_eq!(dfa.states().unwrap(), vec![0, 1]);
        assert_eq!(dfa.initial_states().unwrap().to_vec(), vec![0]);
        assert_eq!(dfa.alphabet().unwrap(), vec![0, 1]);
        assert_eq!(dfa.successors(0, 0).unwrap().to_vec(), vec![1]);
        assert_eq!(dfa.successors(5, 0), Err(AccessError::UnknownState(5)));
        assert_eq!(dfa.successors(0, 7), Err(AccessError::UnknownSymbol(7)));
        assert!(dfa.is_final(1).unwrap());
    }
}
