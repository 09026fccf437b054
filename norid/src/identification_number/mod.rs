//! Norwegian national identification numbers
//!
//! These numbers take the form:
//! ```text
//! DDMMYYIIIKK
//! ```
//! where `DDMMYY` is the date of birth, `III` the individual number and `KK` two check digits.
//! D-numbers add 40 to the day and H-numbers add 40 to the month.
use std::{
    cmp::Ordering,
    fmt::{Display, Formatter, Write},
    hash::{Hash, Hasher},
    ops::Range,
    str::FromStr,
};

use chrono::{Datelike, NaiveDate};
use rand::{
    distributions::{Distribution, Standard},
    Rng,
};
use thiserror::Error;

use crate::{
    calendar::days_in_month,
    checksum::{check_digit, K1_WEIGHTS, K2_WEIGHTS},
    digits::{self, DigitError},
};

mod generator;

pub use generator::{generate, BirthDate, GenerateError, Generator};

/// The earliest representable year of birth.
pub const MIN_YEAR: i32 = 1854;
/// The latest representable year of birth.
pub const MAX_YEAR: i32 = 2039;

const LENGTH: usize = 11;

const DAY: Range<usize> = 0..2;
const MONTH: Range<usize> = 2..4;
const YEAR: Range<usize> = 4..6;
const INDIVIDUAL_NUMBER: Range<usize> = 6..9;
const K1: usize = 9;
const K2: usize = 10;

/// Added to the day of a D-number and the month of an H-number.
const KIND_OFFSET: u16 = 40;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("Identification number must be exactly 11 characters.")]
    InvalidLength,
    #[error("Identification number may only contain digits.")]
    InvalidCharacter,
    #[error("Check digits don't match the rest of the identification number.")]
    InvalidChecksum,
    #[error("Year of birth doesn't match the individual number.")]
    InvalidYear,
    #[error("Month of birth is invalid.")]
    InvalidMonth,
    #[error("Day of birth is invalid for the month.")]
    InvalidDayOfMonth,
}

impl From<DigitError> for ParseError {
    fn from(err: DigitError) -> Self {
        match err {
            DigitError::NotADigit { .. } => Self::InvalidCharacter,
            DigitError::OutOfBounds { .. } => Self::InvalidLength,
        }
    }
}

/// Which offset, if any, was applied to the date of birth.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    /// A regular national identity number, assigned to persons born in Norway.
    FNumber,
    /// A temporary number for foreign residents. The day has 40 added.
    DNumber,
    /// An emergency number for persons without an F- or D-number. The month has 40 added.
    HNumber,
}

impl Kind {
    pub const ALL: [Kind; 3] = [Kind::FNumber, Kind::DNumber, Kind::HNumber];
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Kind::FNumber => "F-number",
            Kind::DNumber => "D-number",
            Kind::HNumber => "H-number",
        };
        write!(f, "{kind}")
    }
}

/// Encoded by the parity of the individual number.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    fn of(individual_number: u16) -> Self {
        if individual_number % 2 == 0 {
            Gender::Female
        } else {
            Gender::Male
        }
    }
}

impl Distribution<Gender> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Gender {
        if rng.gen() {
            Gender::Male
        } else {
            Gender::Female
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let gender = match self {
            Gender::Female => "female",
            Gender::Male => "male",
        };
        write!(f, "{gender}")
    }
}

#[derive(Debug, PartialEq, Eq)]
struct ChecksumMismatch {
    position: usize,
}

/// A Norwegian identification number
///
/// Every `IdentificationNumber` has valid check digits, a representable date of birth and an
/// individual number matching the century. Two numbers are equal when date of birth,
/// individual number and kind are equal; the check digits follow from those.
#[derive(Clone, Copy, Debug)]
pub struct IdentificationNumber {
    date_of_birth: NaiveDate,
    individual_number: u16,
    check_digits: [u8; 2],
    kind: Kind,
}

impl IdentificationNumber {
    fn new(
        date_of_birth: NaiveDate,
        individual_number: u16,
        check_digits: [u8; 2],
        kind: Kind,
    ) -> Self {
        Self {
            date_of_birth,
            individual_number,
            check_digits,
            kind,
        }
    }

    /// Parses and validates an 11-digit identification number.
    ///
    /// The second check digit is verified before the first.
    pub fn parse(value: &str) -> Result<Self, ParseError> {
        if value.chars().count() != LENGTH {
            return Err(ParseError::InvalidLength);
        }
        // Right number of characters but more bytes means something non-ASCII.
        let Ok(buffer) = <[u8; LENGTH]>::try_from(value.as_bytes()) else {
            return Err(ParseError::InvalidCharacter);
        };

        let values = digits::values(&buffer)?;
        let check_digits = verify_check_digits(&values).map_err(|mismatch| {
            log::debug!(
                "Check digit at position {} doesn't match {value}",
                mismatch.position
            );
            ParseError::InvalidChecksum
        })?;

        let individual_number = digits::read(&buffer, INDIVIDUAL_NUMBER)?;
        let year = digits::read(&buffer, YEAR)?;
        let month = digits::read(&buffer, MONTH)?;
        let day = digits::read(&buffer, DAY)?;

        let year = full_year(year, individual_number).ok_or(ParseError::InvalidYear)?;
        let (date_of_birth, kind) = decode_date_of_birth(year, month, day)?;

        Ok(Self::new(date_of_birth, individual_number, check_digits, kind))
    }

    /// Whether `value` is a valid identification number of any kind.
    pub fn is_valid(value: &str) -> bool {
        Self::parse(value).is_ok()
    }

    /// Whether `value` is a valid identification number of the given kind.
    pub fn is_valid_of_kind(value: &str, kind: Kind) -> bool {
        Self::parse(value).is_ok_and(|number| number.kind == kind)
    }

    /// Whether `value` is a valid identification number of one of the given kinds.
    pub fn is_valid_of_any_kind(value: &str, kinds: &[Kind]) -> bool {
        Self::parse(value).is_ok_and(|number| kinds.contains(&number.kind))
    }

    pub fn parse_gender(value: &str) -> Result<Gender, ParseError> {
        Self::parse(value).map(|number| number.gender())
    }

    pub fn parse_date_of_birth(value: &str) -> Result<NaiveDate, ParseError> {
        Self::parse(value).map(|number| number.date_of_birth)
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    /// Allocated sequentially within the date of birth.
    pub fn individual_number(&self) -> u16 {
        self.individual_number
    }

    pub fn check_digits(&self) -> (u8, u8) {
        (self.check_digits[0], self.check_digits[1])
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn gender(&self) -> Gender {
        Gender::of(self.individual_number)
    }

    /// The canonical 11-digit form.
    pub fn format(&self) -> String {
        self.to_string()
    }

    fn encode(&self) -> [u8; LENGTH] {
        let mut buffer = [b'0'; LENGTH];
        encode_date_of_birth(&mut buffer, self.date_of_birth, self.kind);
        digits::write(self.individual_number, &mut buffer[INDIVIDUAL_NUMBER]);
        buffer[K1] = b'0' + self.check_digits[0];
        buffer[K2] = b'0' + self.check_digits[1];
        buffer
    }
}

/// Writes the (offset) date of birth into the first six positions.
fn encode_date_of_birth(buffer: &mut [u8; LENGTH], date_of_birth: NaiveDate, kind: Kind) {
    let mut day = date_of_birth.day() as u16;
    let mut month = date_of_birth.month() as u16;
    match kind {
        Kind::FNumber => {}
        Kind::DNumber => day += KIND_OFFSET,
        Kind::HNumber => month += KIND_OFFSET,
    }
    let year = date_of_birth.year().rem_euclid(100) as u16;

    digits::write(day, &mut buffer[DAY]);
    digits::write(month, &mut buffer[MONTH]);
    digits::write(year, &mut buffer[YEAR]);
}

fn verify_check_digits(values: &[u8; LENGTH]) -> Result<[u8; 2], ChecksumMismatch> {
    let k2 = check_digit(values, &K2_WEIGHTS)
        .filter(|&k2| k2 == values[K2])
        .ok_or(ChecksumMismatch { position: K2 })?;
    let k1 = check_digit(values, &K1_WEIGHTS)
        .filter(|&k1| k1 == values[K1])
        .ok_or(ChecksumMismatch { position: K1 })?;
    Ok([k1, k2])
}

/// Infers the century from the individual number. First matching rule wins.
fn full_year(year: u16, individual_number: u16) -> Option<i32> {
    let year = i32::from(year);
    match individual_number {
        0..=499 => Some(1900 + year),
        500..=749 if year >= 54 => Some(1800 + year),
        _ if year <= 39 => Some(2000 + year),
        900..=999 => Some(1900 + year),
        _ => None,
    }
}

/// Removes the kind offset from day or month and validates the date.
///
/// The day offset is checked first, so a number with both offsets is a D-number with an
/// invalid month.
fn decode_date_of_birth(year: i32, month: u16, day: u16) -> Result<(NaiveDate, Kind), ParseError> {
    let (month, day, kind) = if day > KIND_OFFSET {
        (month, day - KIND_OFFSET, Kind::DNumber)
    } else if month > KIND_OFFSET {
        (month - KIND_OFFSET, day, Kind::HNumber)
    } else {
        (month, day, Kind::FNumber)
    };

    let month = u32::from(month);
    let day = u32::from(day);

    let max_day = days_in_month(year, month).ok_or(ParseError::InvalidMonth)?;
    if day < 1 || day > max_day {
        return Err(ParseError::InvalidDayOfMonth);
    }

    let date_of_birth =
        NaiveDate::from_ymd_opt(year, month, day).ok_or(ParseError::InvalidDayOfMonth)?;
    Ok((date_of_birth, kind))
}

impl FromStr for IdentificationNumber {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for IdentificationNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for c in self.encode() {
            f.write_char(char::from(c))?;
        }
        Ok(())
    }
}

impl PartialEq for IdentificationNumber {
    fn eq(&self, other: &Self) -> bool {
        self.date_of_birth == other.date_of_birth
            && self.individual_number == other.individual_number
            && self.kind == other.kind
    }
}

impl Eq for IdentificationNumber {}

impl Hash for IdentificationNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.date_of_birth.hash(state);
        self.individual_number.hash(state);
        self.kind.hash(state);
    }
}

impl PartialOrd for IdentificationNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IdentificationNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date_of_birth
            .cmp(&other.date_of_birth)
            .then(self.individual_number.cmp(&other.individual_number))
            .then(self.kind.cmp(&other.kind))
    }
}
