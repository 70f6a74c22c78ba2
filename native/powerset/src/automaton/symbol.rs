//! Letters of an alphabet.

use crate::error::AccessError;
use std::collections::HashSet;

/// A symbol identifier represented as a u32.
pub type SymbolId = u32;

/// Marks epsilon (empty) transitions. Never a letter of an alphabet.
pub const EPSILON: SymbolId = u32::MAX;

#[inline]
pub fn is_epsilon(symbol: SymbolId) -> bool {
    symbol == EPSILON
}

/// An alphabet lists each letter once and never lists epsilon.
pub fn check_alphabet(alphabet: &[SymbolId]) -> Result<(), AccessError> {
    let mut seen = HashSet::with_capacity(alphabet.len());
    for &symbol in alphabet {
        if is_epsilon(symbol) {
            return Err(AccessError::Malformed(
                "epsilon listed as a letter".to_string(),
            ));
        }
        if !seen.insert(symbol) {
            return Err(AccessError::Malformed(format!(
                "letter {symbol} listed twice"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsilon() {
        assert!(is_epsilon(EPSILON));
        assert!(!is_epsilon(0));
    }

    #[test]
    fn test_check_alphabet() {
        assert_eq!(check_alphabet(&[]), Ok(()));
        assert_eq!(check_alphabet(&[2, 0, 1]), Ok(()));
        assert!(matches!(
            check_alphabet(&[0, 1, 0]),
            Err(AccessError::Malformed(_))
        ));
        assert!(matches!(
            check_alphabet(&[0, EPSILON]),
            Err(AccessError::Malformed(_))
        ));
    }
}
