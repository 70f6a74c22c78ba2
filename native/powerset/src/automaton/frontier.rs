//! FIFO worklist of state sets awaiting expansion.

use crate::automaton::state::{StateId, StateSet};
use std::collections::VecDeque;

/// A registered state set that has not been expanded yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pending {
    pub id: StateId,
    pub set: StateSet,
}

/// Sets leave in the order they were discovered, which makes the numbering of
/// target states breadth-first.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<Pending>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: StateId, set: StateSet) {
        self.queue.push_back(Pending { id, set });
    }

    pub fn pop(&mut self) -> Option<Pending> {
        self.queue.pop_front()
    }

    pub fn has_work(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
