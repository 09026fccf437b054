//! Norwegian bank account numbers
//!
//! These numbers take the form:
//! ```text
//! RRRR GG CCCCK
//! ```
//! where `RRRR` is the register number, `GG` the account group, `CCCC` the customer number
//! and `K` a check digit. Spaces and periods between the digits are ignored when parsing.
use std::{
    fmt::{Display, Formatter, Write},
    ops::Range,
    str::FromStr,
};

use thiserror::Error;

use crate::{
    checksum::{check_digit, K2_WEIGHTS},
    digits::{self, DigitError},
};

const LENGTH: usize = 11;

const REGISTER_NUMBER: Range<usize> = 0..4;
const ACCOUNT_GROUP: Range<usize> = 4..6;
const CUSTOMER_NUMBER: Range<usize> = 6..10;
const CHECK_DIGIT: usize = 10;

const SEPARATORS: [char; 2] = [' ', '.'];

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("Bank account number must have exactly 11 digits.")]
    InvalidLength,
    #[error("Check digit doesn't match the rest of the bank account number.")]
    InvalidChecksum,
    #[error("Bank account number may only contain digits, spaces and periods.")]
    InvalidCharacter,
}

impl From<DigitError> for ParseError {
    fn from(err: DigitError) -> Self {
        match err {
            DigitError::NotADigit { .. } => Self::InvalidCharacter,
            DigitError::OutOfBounds { .. } => Self::InvalidLength,
        }
    }
}

/// A Norwegian bank account number
///
/// Every `BankAccountNumber` has a valid check digit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BankAccountNumber {
    register_number: u16,
    account_group: u8,
    customer_number: u16,
    check_digit: u8,
}

impl BankAccountNumber {
    /// Parses and validates a bank account number.
    ///
    /// Surrounding whitespace and any spaces or periods between the digits are ignored.
    pub fn parse(value: &str) -> Result<Self, ParseError> {
        let value = value.trim();
        let significant = value.chars().filter(|c| !SEPARATORS.contains(c));

        if significant.clone().count() != LENGTH {
            return Err(ParseError::InvalidLength);
        }

        let mut buffer = [0u8; LENGTH];
        for (slot, c) in buffer.iter_mut().zip(significant) {
            if !c.is_ascii_digit() {
                return Err(ParseError::InvalidCharacter);
            }
            *slot = c as u8;
        }

        let values = digits::values(&buffer)?;
        let check_digit = check_digit(&values, &K2_WEIGHTS)
            .filter(|&k| k == values[CHECK_DIGIT])
            .ok_or(ParseError::InvalidChecksum)?;

        Ok(Self {
            register_number: digits::read(&buffer, REGISTER_NUMBER)?,
            account_group: digits::read(&buffer, ACCOUNT_GROUP)? as u8,
            customer_number: digits::read(&buffer, CUSTOMER_NUMBER)?,
            check_digit,
        })
    }

    pub fn is_valid(value: &str) -> bool {
        Self::parse(value).is_ok()
    }

    /// Identifies the bank and branch.
    pub fn register_number(&self) -> u16 {
        self.register_number
    }

    pub fn account_group(&self) -> u8 {
        self.account_group
    }

    pub fn customer_number(&self) -> u16 {
        self.customer_number
    }

    pub fn check_digit(&self) -> u8 {
        self.check_digit
    }

    /// The grouped form, e.g. `1234 56 78903`.
    pub fn format(&self) -> String {
        self.to_string()
    }
}

impl FromStr for BankAccountNumber {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for BankAccountNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut buffer = [b' '; LENGTH + 2];
        digits::write(self.register_number, &mut buffer[0..4]);
        digits::write(u16::from(self.account_group), &mut buffer[5..7]);
        digits::write(self.customer_number, &mut buffer[8..12]);
        buffer[12] = b'0' + self.check_digit;

        for c in buffer {
            f.write_char(char::from(c))?;
        }
        Ok(())
    }
}
