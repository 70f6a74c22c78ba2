//! State types for automata.

use fixedbitset::FixedBitSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A state identifier represented as a u32.
pub type StateId = u32;

/// A set of states implemented using a fixed-size bit set for efficiency.
///
/// Equality and hashing only look at membership: two sets holding the same
/// states compare equal no matter how much capacity either one allocated or
/// in which order the states were inserted. This is what makes a `StateSet`
/// usable directly as a canonicalization key.
#[derive(Clone, Default)]
pub struct StateSet {
    bits: FixedBitSet,
}

impl StateSet {
    /// Create a new empty state set with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    /// Create a state set containing a single state.
    pub fn singleton(state: StateId, capacity: usize) -> Self {
        let mut set = Self::with_capacity(capacity);
        set.insert(state);
        set
    }

    /// Insert a state into the set.
    pub fn insert(&mut self, state: StateId) {
        let idx = state as usize;
        if idx >= self.bits.len() {
            self.bits.grow(idx + 1);
        }
        self.bits.insert(idx);
    }

    /// Check if the set contains a state.
    pub fn contains(&self, state: StateId) -> bool {
        let idx = state as usize;
        idx < self.bits.len() && self.bits.contains(idx)
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// Get the number of states in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterate over all states in the set, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bits.ones().map(|i| i as StateId)
    }

    /// Union this set with another, modifying self in place.
    pub fn union_with(&mut self, other: &StateSet) {
        if other.bits.len() > self.bits.len() {
            self.bits.grow(other.bits.len());
        }
        self.bits.union_with(&other.bits);
    }

    /// Check if this set intersects with another.
    pub fn intersects(&self, other: &StateSet) -> bool {
        self.bits.intersection(&other.bits).next().is_some()
    }

    /// Check whether every state of this set is also in `other`.
    pub fn is_subset(&self, other: &StateSet) -> bool {
        self.bits.is_subset(&other.bits)
    }

    /// First state of this set missing from `other`, if any.
    pub fn first_outside(&self, other: &StateSet) -> Option<StateId> {
        self.iter().find(|&state| !other.contains(state))
    }

    /// Sorted vector of the member states.
    pub fn to_vec(&self) -> Vec<StateId> {
        self.iter().collect()
    }

    /// Backing blocks with trailing empty blocks stripped.
    fn significant_blocks(&self) -> &[usize] {
        let blocks = self.bits.as_slice();
        let end = blocks
            .iter()
            .rposition(|&block| block != 0)
            .map_or(0, |last| last + 1);
        &blocks[..end]
    }
}

impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        self.significant_blocks() == other.significant_blocks()
    }
}

impl Eq for StateSet {}

impl Hash for StateSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant_blocks().hash(state);
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Renders as `{0, 1}`; the empty set is `{}`.
impl fmt::Display for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, state) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{state}")?;
        }
        f.write_str("}")
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut set = Self::default();
        for state in iter {
            set.insert(state);
        }
        set
    }
}

impl Extend<StateId> for StateSet {
    fn extend<I: IntoIterator<Item = StateId>>(&mut self, iter: I) {
        for state in iter {
            self.insert(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_state_set_basic() {
        let mut set = StateSet::with_capacity(10);
        assert!(set.is_empty());

        set.insert(3);
        set.insert(7);
        assert!(!set.is_empty());
        assert_eq!(set.len(), 2);
        assert!(set.contains(3));
        assert!(set.contains(7));
        assert!(!set.contains(5));
        assert!(!set.contains(500));
    }

    #[test]
    fn test_state_set_union() {
        let mut set1 = StateSet::with_capacity(10);
        set1.insert(1);
        set1.insert(3);

        let mut set2 = StateSet::with_capacity(10);
        set2.insert(2);
        set2.insert(3);

        set1.union_with(&set2);
        assert_eq!(set1.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_equality_ignores_capacity_and_order() {
        let small: StateSet = [4, 1].into_iter().collect();
        let mut large = StateSet::with_capacity(300);
        large.insert(1);
        large.insert(4);

        assert_eq!(small, large);

        let mut seen = HashSet::new();
        seen.insert(small);
        assert!(seen.contains(&large));
    }

    #[test]
    fn test_sets_differing_by_one_state_are_distinct() {
        let a: StateSet = [0, 1, 2].into_iter().collect();
        let b: StateSet = [0, 1].into_iter().collect();
        let c: StateSet = [0, 1, 130].into_iter().collect();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_empty_sets_are_equal() {
        assert_eq!(StateSet::with_capacity(0), StateSet::with_capacity(256));
    }

    #[test]
    fn test_subset_and_first_outside() {
        let known: StateSet = (0..4).collect();
        let inside: StateSet = [1, 3].into_iter().collect();
        let outside: StateSet = [2, 9].into_iter().collect();

        assert!(inside.is_subset(&known));
        assert!(!outside.is_subset(&known));
        assert_eq!(outside.first_outside(&known), Some(9));
        assert_eq!(inside.first_outside(&known), None);
    }

    #[test]
    fn test_display() {
        let set: StateSet = [1, 0].into_iter().collect();
        assert_eq!(set.to_string(), "{0, 1}");
        assert_eq!(StateSet::default().to_string(), "{}");
        assert_eq!(StateSet::singleton(5, 10).to_string(), "{5}");
    }
}
