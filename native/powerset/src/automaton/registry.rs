//! Canonical ids for sets of source states.

use crate::automaton::state::{StateId, StateSet};
use crate::error::{DeterminizeError, Result};
use indexmap::IndexMap;

/// Outcome of [`StateSetRegistry::canonicalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Canonical {
    /// The set was already known under this id.
    Existing(StateId),
    /// The set was seen for the first time and registered under this id.
    Created(StateId),
}

impl Canonical {
    pub fn id(self) -> StateId {
        match self {
            Canonical::Existing(id) | Canonical::Created(id) => id,
        }
    }

    pub fn is_new(self) -> bool {
        matches!(self, Canonical::Created(_))
    }
}

/// What the registry remembers about one state set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subset {
    /// Target state standing for the set.
    pub id: StateId,
    /// Whether the set holds at least one final source state.
    pub accepting: bool,
}

/// Maps each distinct [`StateSet`] to the one target state created for it.
///
/// Entries are never removed or rebound, and iteration follows registration
/// order, which is also target-state numbering order.
#[derive(Debug, Default)]
pub struct StateSetRegistry {
    subsets: IndexMap<StateSet, Subset>,
    limit: Option<usize>,
}

impl StateSetRegistry {
    /// Create a registry that refuses to hold more than `limit` sets.
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            subsets: IndexMap::new(),
            limit,
        }
    }

    pub fn len(&self) -> usize {
        self.subsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subsets.is_empty()
    }

    pub fn get(&self, set: &StateSet) -> Option<&Subset> {
        self.subsets.get(set)
    }

    /// Look `set` up, registering it through `create` on first sight.
    ///
    /// `create` runs at most once per distinct set and must return the target
    /// state it allocated. If it fails, nothing is registered.
    pub fn canonicalize<F>(&mut self, set: &StateSet, create: F) -> Result<Canonical>
    where
        F: FnOnce(&StateSet) -> Result<Subset>,
    {
        if let Some(subset) = self.subsets.get(set) {
            return Ok(Canonical::Existing(subset.id));
        }

        if let Some(limit) = self.limit {
            if self.subsets.len() >= limit {
                tracing::warn!(limit, "state set limit reached, halting subset construction");
                return Err(DeterminizeError::ResourceExhausted { limit });
            }
        }

        let subset = create(set)?;
        self.subsets.insert(set.clone(), subset);
        Ok(Canonical::Created(subset.id))
    }

    /// Registered sets with their subsets, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&StateSet, &Subset)> + '_ {
        self.subsets.iter()
    }
}
