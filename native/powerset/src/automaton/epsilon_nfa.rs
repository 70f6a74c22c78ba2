//! Epsilon Non-deterministic Finite Automaton (ε-NFA) implementation.
//!
//! This is the reference source automaton for the subset construction. Its
//! [`AutomatonAccess`] implementation hides ε-transitions: initial states and
//! successor sets are reported already closed under ε-moves, so the engine
//! only ever sees letters.

use crate::automaton::access::AutomatonAccess;
use crate::automaton::dfa::DFA;
use crate::automaton::state::{StateId, StateSet};
use crate::automaton::subset_construction::determinize;
use crate::automaton::symbol::{EPSILON, SymbolId, is_epsilon};
use crate::config::DeterminizeConfig;
use crate::error::{AccessError, DeterminizeError};
use std::collections::{BTreeSet, HashMap, VecDeque};

/// An Epsilon Non-deterministic Finite Automaton.
#[derive(Debug, Clone, Default)]
pub struct EpsilonNFA {
    /// Number of states (states are numbered 0..num_states)
    num_states: StateId,
    start_states: StateSet,
    final_states: StateSet,
    /// Transitions: (source, symbol) -> set of destination states.
    /// For epsilon transitions, symbol == EPSILON
    transitions: HashMap<(StateId, SymbolId), StateSet>,
    /// All symbols used (excluding epsilon), kept sorted
    alphabet: BTreeSet<SymbolId>,
    /// Cached epsilon closures for each state
    epsilon_closures: Option<Vec<StateSet>>,
}

impl EpsilonNFA {
    /// Create a new empty epsilon-NFA.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a state exists, expanding num_states if needed.
    fn ensure_state(&mut self, state: StateId) {
        if state >= self.num_states {
            self.num_states = state + 1;
            self.epsilon_closures = None;
        }
    }

    /// Add a fresh state with no transitions and return its id.
    pub fn add_state(&mut self) -> StateId {
        let id = self.num_states;
        self.ensure_state(id);
        id
    }

    /// Declare a letter even if no transition uses it.
    pub fn add_symbol(&mut self, symbol: SymbolId) {
        if !is_epsilon(symbol) {
            self.alphabet.insert(symbol);
        }
    }

    /// Add a transition from source to destination on the given symbol.
    pub fn add_transition(&mut self, source: StateId, symbol: SymbolId, destination: StateId) {
        self.ensure_state(source);
        self.ensure_state(destination);
        self.add_symbol(symbol);

        self.transitions
            .entry((source, symbol))
            .or_insert_with(|| StateSet::with_capacity(self.num_states as usize))
            .insert(destination);

        self.epsilon_closures = None;
    }

    /// Add an epsilon transition from source to destination.
    pub fn add_epsilon_transition(&mut self, source: StateId, destination: StateId) {
        self.add_transition(source, EPSILON, destination);
    }

    pub fn add_start_state(&mut self, state: StateId) {
        self.ensure_state(state);
        self.start_states.insert(state);
    }

    pub fn add_final_state(&mut self, state: StateId) {
        self.ensure_state(state);
        self.final_states.insert(state);
    }

    pub fn num_states(&self) -> StateId {
        self.num_states
    }

    pub fn start_states(&self) -> &StateSet {
        &self.start_states
    }

    pub fn final_states(&self) -> &StateSet {
        &self.final_states
    }

    /// Get the alphabet (all symbols except epsilon), sorted.
    pub fn symbols(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.alphabet.iter().copied()
    }

    /// Whether any epsilon transition is present.
    pub fn has_epsilon_transitions(&self) -> bool {
        self.transitions.keys().any(|&(_, symbol)| is_epsilon(symbol))
    }

    /// Compute the epsilon closure of a single state using DFS.
    fn epsilon_closure_single(&self, state: StateId) -> StateSet {
        self.close_over_epsilon(vec![state])
    }

    fn close_over_epsilon(&self, mut stack: Vec<StateId>) -> StateSet {
        let mut closure = StateSet::with_capacity(self.num_states as usize);

        while let Some(s) = stack.pop() {
            if closure.contains(s) {
                continue;
            }
            closure.insert(s);

            if let Some(destinations) = self.transitions.get(&(s, EPSILON)) {
                stack.extend(destinations.iter().filter(|&dest| !closure.contains(dest)));
            }
        }

        closure
    }

    /// Compute epsilon closures for all states (cached).
    pub fn compute_epsilon_closures(&mut self) {
        if self.epsilon_closures.is_some() {
            return;
        }

        let closures = (0..self.num_states)
            .map(|state| self.epsilon_closure_single(state))
            .collect();
        self.epsilon_closures = Some(closures);
    }

    /// Get the epsilon closure of a set of states.
    pub fn epsilon_closure(&self, states: &StateSet) -> StateSet {
        match &self.epsilon_closures {
            Some(cached) => {
                let mut closure = StateSet::with_capacity(self.num_states as usize);
                for state in states.iter() {
                    if let Some(single) = cached.get(state as usize) {
                        closure.union_with(single);
                    }
                }
                closure
            }
            None => self.close_over_epsilon(states.iter().collect()),
        }
    }

    /// Get the states reachable from a set of states on a given symbol,
    /// closed under epsilon moves. Epsilon itself reaches nothing here.
    pub fn move_on_symbol(&self, states: &StateSet, symbol: SymbolId) -> StateSet {
        let mut reached = StateSet::with_capacity(self.num_states as usize);
        if is_epsilon(symbol) {
            return reached;
        }

        for state in states.iter() {
            if let Some(destinations) = self.transitions.get(&(state, symbol)) {
                reached.union_with(destinations);
            }
        }

        self.epsilon_closure(&reached)
    }

    /// Run the automaton on `word` by tracking the set of live states.
    pub fn accepts(&self, word: &[SymbolId]) -> bool {
        let mut current = self.epsilon_closure(&self.start_states);
        for &symbol in word {
            if current.is_empty() {
                return false;
            }
            current = self.move_on_symbol(&current, symbol);
        }
        current.intersects(&self.final_states)
    }

    /// Check if the NFA accepts no string at all.
    /// Uses BFS from start states following all transitions.
    pub fn is_empty(&self) -> bool {
        let mut visited = StateSet::with_capacity(self.num_states as usize);
        let mut queue: VecDeque<StateId> = self.epsilon_closure(&self.start_states).iter().collect();

        while let Some(state) = queue.pop_front() {
            if visited.contains(state) {
                continue;
            }
            visited.insert(state);

            if self.final_states.contains(state) {
                return false;
            }

            for &symbol in &self.alphabet {
                if let Some(destinations) = self.transitions.get(&(state, symbol)) {
                    let closure = self.epsilon_closure(destinations);
                    queue.extend(closure.iter().filter(|&dest| !visited.contains(dest)));
                }
            }
        }

        true
    }

    /// Get all transitions as an iterator.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, SymbolId, StateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&(src, sym), dests)| dests.iter().map(move |dst| (src, sym, dst)))
    }

    /// Determinize with the default configuration.
    pub fn determinize(&self) -> Result<DFA, DeterminizeError> {
        determinize(self, &DeterminizeConfig::default())
    }

    fn check_state(&self, state: StateId) -> Result<(), AccessError> {
        if state < self.num_states {
            Ok(())
        } else {
            Err(AccessError::UnknownState(state))
        }
    }
}

impl AutomatonAccess for EpsilonNFA {
    fn states(&self) -> Result<Vec<StateId>, AccessError> {
        Ok((0..self.num_states).collect())
    }

    fn initial_states(&self) -> Result<StateSet, AccessError> {
        Ok(self.epsilon_closure(&self.start_states))
    }

    fn alphabet(&self) -> Result<Vec<SymbolId>, AccessError> {
        Ok(self.symbols().collect())
    }

    fn successors(&self, state: StateId, symbol: SymbolId) -> Result<StateSet, AccessError> {
        self.check_state(state)?;
        if !self.alphabet.contains(&symbol) {
            return Err(AccessError::UnknownSymbol(symbol));
        }
        let mut from = StateSet::with_capacity(self.num_states as usize);
        from.insert(state);
        Ok(self.move_on_symbol(&from, symbol))
    }

    fn is_final(&self, state: StateId) -> Result<bool, AccessError> {
        self.check_state(state)?;
        Ok(self.final_states.contains(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsilon_nfa_basic() {
        let mut nfa = EpsilonNFA::new();

        // Create a simple NFA: 0 -a-> 1 -ε-> 2 (final)
        nfa.add_transition(0, 0, 1); // symbol 0 = 'a'
        nfa.add_epsilon_transition(1, 2);
        nfa.add_start_state(0);
        nfa.add_final_state(2);

        assert_eq!(nfa.num_states(), 3);
        assert!(nfa.has_epsilon_transitions());
        assert!(!nfa.is_empty());
        assert_eq!(nfa.alphabet().unwrap(), vec![0]);
    }

    #[test]
    fn test_epsilon_closure() {
        let mut nfa = EpsilonNFA::new();

        // 0 -ε-> 1 -ε-> 2
        nfa.add_epsilon_transition(0, 1);
        nfa.add_epsilon_transition(1, 2);
        nfa.add_start_state(0);

        let start = StateSet::singleton(0, 3);
        let closure = nfa.epsilon_closure(&start);
        assert_eq!(closure.to_vec(), vec![0, 1, 2]);

        nfa.compute_epsilon_closures();
        assert_eq!(nfa.epsilon_closure(&start), closure);
    }

    #[test]
    fn test_epsilon_cycle_terminates() {
        let mut nfa = EpsilonNFA::new();
        nfa.add_epsilon_transition(0, 1);
        nfa.add_epsilon_transition(1, 0);

        let closure = nfa.epsilon_closure(&StateSet::singleton(1, 2));
        assert_eq!(closure.to_vec(), vec![0, 1]);
    }

    #[test]
    fn test_move_on_symbol() {
        let mut nfa = EpsilonNFA::new();

        // 0 -a-> 1, 0 -a-> 2, 1 -ε-> 3
        nfa.add_transition(0, 0, 1); // 'a' = 0
        nfa.add_transition(0, 0, 2);
        nfa.add_epsilon_transition(1, 3);

        let start = StateSet::singleton(0, 4);
        let reached = nfa.move_on_symbol(&start, 0);
        assert_eq!(reached.to_vec(), vec![1, 2, 3]);

        assert!(nfa.move_on_symbol(&start, EPSILON).is_empty());
    }

    #[test]
    fn test_empty_language() {
        let mut nfa = EpsilonNFA::new();
        nfa.add_start_state(0);
        nfa.add_final_state(1);
        // No transitions - no path from 0 to 1
        assert!(nfa.is_empty());

        nfa.add_transition(0, 0, 1);
        assert!(!nfa.is_empty());
    }

    #[test]
    fn test_accepts() {
        // Strings over {a, b} ending in a.
        let mut nfa = EpsilonNFA::new();
        nfa.add_transition(0, 0, 0);
        nfa.add_transition(0, 1, 0);
        nfa.add_transition(0, 0, 1);
        nfa.add_start_state(0);
        nfa.add_final_state(1);

        assert!(nfa.accepts(&[0]));
        assert!(nfa.accepts(&[1, 0]));
        assert!(!nfa.accepts(&[0, 1]));
        assert!(!nfa.accepts(&[]));
    }

    #[test]
    fn test_access_reports_closed_sets() {
        let mut nfa = EpsilonNFA::new();
        nfa.add_epsilon_transition(0, 1);
        nfa.add_transition(1, 0, 2);
        nfa.add_epsilon_transition(2, 3);
        nfa.add_start_state(0);
        nfa.add_final_state(3);

        assert_eq!(nfa.initial_states().unwrap().to_vec(), vec![0, 1]);
        assert_eq!(nfa.successors(1, 0).unwrap().to_vec(), vec![2, 3]);
        assert!(nfa.successors(0, 0).unwrap().is_empty());
        assert!(nfa.is_final(3).unwrap());
        assert!(!nfa.is_final(2).unwrap());
    }

    #[test]
    fn test_access_rejects_unknown_ids() {
        let mut nfa = EpsilonNFA::new();
        nfa.add_transition(0, 0, 1);

        assert_eq!(nfa.successors(7, 0), Err(AccessError::UnknownState(7)));
        assert_eq!(nfa.successors(0, 9), Err(AccessError::UnknownSymbol(9)));
        assert_eq!(nfa.is_final(2), Err(AccessError::UnknownState(2)));
    }

    #[test]
    fn test_declared_symbol_without_transitions() {
        let mut nfa = EpsilonNFA::new();
        let q = nfa.add_state();
        nfa.add_symbol(4);
        nfa.add_symbol(EPSILON);

        assert_eq!(q, 0);
        assert_eq!(nfa.alphabet().unwrap(), vec![4]);
        assert!(nfa.successors(q, 4).unwrap().is_empty());
    }
}
