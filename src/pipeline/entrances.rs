//! The four entrances derived from the question letters.

use crate::constants::Constants;
use crate::error::EngineError;
use crate::types::{Entrances, Letter};

/// Compute the four entrances over the question letters.
///
/// Fails with `InvalidState` if the question has not been normalized into
/// letters yet (an empty sequence).
pub fn entrances(constants: &Constants, letters: &[Letter]) -> Result<Entrances, EngineError> {
    if letters.is_empty() {
        return Err(EngineError::InvalidState(
            "question must be normalized into letters before computing entrances".to_string(),
        ));
    }

    let values: Vec<u32> = letters.iter().map(|&l| constants.gross_value(l)).collect();

    let gross = values.iter().sum();
    let medium_gross = constants.digital_root(gross);
    let medium_sum = values.iter().map(|&v| constants.digital_root(v)).sum();
    let small = constants.digital_root(medium_sum);

    Ok(Entrances {
        gross,
        medium_gross,
        medium_sum,
        small,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entrances_rejects_empty_question() {
        let c = Constants::new();
        let err = entrances(&c, &[]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidState(_)));
    }

    #[test]
    fn test_entrances_known_values() {
        let c = Constants::new();
        // نور = 50 + 6 + 200 = 256
        let letters = c.text_to_letters("نور");
        let e = entrances(&c, &letters).unwrap();
        assert_eq!(e.gross, 256);
        assert_eq!(e.medium_gross, 4);
        // Digit roots: 5 + 6 + 2 = 13.
        assert_eq!(e.medium_sum, 13);
        assert_eq!(e.small, 4);
    }

    #[test]
    fn test_reduced_entrances_are_single_digits() {
        let c = Constants::new();
        let letters = c.text_to_letters("هل أنجح في هذا العام");
        let e = entrances(&c, &letters).unwrap();
        assert!((1..=9).contains(&e.medium_gross));
        assert!((1..=9).contains(&e.small));
    }
}
