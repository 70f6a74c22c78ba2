//! Initial/final designation and state labels for the target automaton.

use crate::automaton::access::AutomatonBuild;
use crate::automaton::registry::StateSetRegistry;
use crate::automaton::state::{StateId, StateSet};

/// Debug label for the target state of `set`, e.g. `{0, 1}`.
pub fn state_label(set: &StateSet) -> String {
    set.to_string()
}

pub fn mark_initial<B: AutomatonBuild + ?Sized>(builder: &mut B, state: StateId) {
    builder.set_initial(state);
}

/// Flag every registered set holding a final source state as final.
/// Returns how many target states were flagged.
pub fn mark_final_states<B: AutomatonBuild + ?Sized>(
    registry: &StateSetRegistry,
    builder: &mut B,
) -> usize {
    let mut flagged = 0;
    for (_, subset) in registry.iter().filter(|(_, subset)| subset.accepting) {
        builder.set_final(subset.id);
        flagged += 1;
    }
    flagged
}
