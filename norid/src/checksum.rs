/// Weights for the check digit at position 9 of an identification number.
pub(crate) const K1_WEIGHTS: [u8; 9] = [3, 7, 6, 1, 8, 9, 4, 5, 2];

/// Weights for the last check digit of both identification numbers and bank account numbers.
pub(crate) const K2_WEIGHTS: [u8; 10] = [5, 4, 3, 2, 7, 6, 5, 4, 3, 2];

/// Returned by [`mod11`] when no check digit exists for the given digits.
pub(crate) const NO_CHECK_DIGIT: u8 = 10;

/// Weighted modulo-11 digest of `digits`.
///
/// Only the first `weights.len()` digits are consumed. The result is in `0..=10`, where
/// [`NO_CHECK_DIGIT`] means the digits can't be completed with a single check digit.
pub(crate) fn mod11(digits: &[u8], weights: &[u8]) -> u8 {
    debug_assert!(digits.len() >= weights.len());

    let sum: u32 = digits
        .iter()
        .zip(weights)
        .map(|(&digit, &weight)| u32::from(digit) * u32::from(weight))
        .sum();

    match sum % 11 {
        0 => 0,
        rest => (11 - rest) as u8,
    }
}

/// Like [`mod11`], but maps the sentinel to `None`.
pub(crate) fn check_digit(digits: &[u8], weights: &[u8]) -> Option<u8> {
    match mod11(digits, weights) {
        NO_CHECK_DIGIT => None,
        digit => Some(digit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mod11() {
        // 28089647063
        let digits = [2, 8, 0, 8, 9, 6, 4, 7, 0, 6, 3];
        assert_eq!(mod11(&digits, &K1_WEIGHTS), 6);
        assert_eq!(mod11(&digits, &K2_WEIGHTS), 3);

        assert_eq!(mod11(&[0; 10], &K2_WEIGHTS), 0);
    }

    #[test]
    fn test_sentinel() {
        let digits = [1, 0, 0, 0, 0, 0, 0, 0, 0, 9];
        assert_eq!(mod11(&digits, &K2_WEIGHTS), NO_CHECK_DIGIT);
        assert_eq!(check_digit(&digits, &K2_WEIGHTS), None);
    }

    #[test]
    fn test_extra_digits_ignored() {
        let digits = [1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 9, 9, 9];
        assert_eq!(check_digit(&digits, &K2_WEIGHTS), Some(3));
    }
}
