//! Fixed-width decimal fields in ASCII digit buffers.
//!
//! Fields are big-endian: the most significant digit comes first. A field is addressed by
//! its byte range within the buffer, e.g. `4..6` for a two-digit year at offset 4.
use std::ops::Range;

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DigitError {
    #[error("Character at offset {offset} is not a decimal digit.")]
    NotADigit { offset: usize },
    #[error("Field {start}..{end} is outside the buffer.")]
    OutOfBounds { start: usize, end: usize },
}

/// Converts an ASCII digit to its value.
fn digit(c: u8) -> Option<u8> {
    c.is_ascii_digit().then(|| c - b'0')
}

/// Converts a whole buffer of ASCII digits to digit values.
///
/// Fails on the first character that is not a digit.
pub(crate) fn values<const N: usize>(buffer: &[u8; N]) -> Result<[u8; N], DigitError> {
    let mut out = [0u8; N];
    for (offset, (slot, &c)) in out.iter_mut().zip(buffer).enumerate() {
        *slot = digit(c).ok_or(DigitError::NotADigit { offset })?;
    }
    Ok(out)
}

/// Reads the decimal field at `field`. At most four digits wide.
pub(crate) fn read(buffer: &[u8], field: Range<usize>) -> Result<u16, DigitError> {
    debug_assert!(field.len() <= 4);

    let start = field.start;
    let Some(digits) = buffer.get(field.clone()) else {
        return Err(DigitError::OutOfBounds {
            start,
            end: field.end,
        });
    };

    digits.iter().enumerate().try_fold(0u16, |acc, (i, &c)| {
        let value = digit(c).ok_or(DigitError::NotADigit { offset: start + i })?;
        Ok(acc * 10 + u16::from(value))
    })
}

/// Writes `value` zero-padded into `field`, which is usually a slice of a larger buffer.
///
/// `value` must fit in `field.len()` digits.
pub(crate) fn write(value: u16, field: &mut [u8]) {
    debug_assert!(u32::from(value) < 10u32.pow(field.len() as u32));

    let mut rest = value;
    for slot in field.iter_mut().rev() {
        *slot = b'0' + (rest % 10) as u8;
        rest /= 10;
    }
}
