//! Random identification numbers with valid check digits
use std::ops::RangeInclusive;

use chrono::{Datelike, Duration, NaiveDate};
use rand::{rngs::ThreadRng, thread_rng, Rng};
use thiserror::Error;

use super::{
    encode_date_of_birth, Gender, IdentificationNumber, Kind, INDIVIDUAL_NUMBER, K1, LENGTH,
    MAX_YEAR, MIN_YEAR,
};
use crate::{
    checksum::{check_digit, K1_WEIGHTS, K2_WEIGHTS},
    digits,
};

/// Half of the widest individual number band.
const MAX_CANDIDATES: usize = 250;

const BANDS_1854_1899: &[RangeInclusive<u16>] = &[500..=749];
const BANDS_1900_1939: &[RangeInclusive<u16>] = &[0..=499];
const BANDS_1940_1999: &[RangeInclusive<u16>] = &[0..=499, 900..=999];
const BANDS_2000_2039: &[RangeInclusive<u16>] = &[500..=999];

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateError {
    #[error("Date of birth {date} is outside 1854-01-01..=2039-12-31.")]
    OutOfRange { date: NaiveDate },
    #[error("Date of birth range {from}..={to} is empty.")]
    EmptyRange { from: NaiveDate, to: NaiveDate },
}

/// Constrains the date of birth of a generated number.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BirthDate {
    On(NaiveDate),
    /// Uniformly distributed between the two dates, inclusive.
    Between(NaiveDate, NaiveDate),
}

/// Generates identification numbers using the random source `R`.
///
/// [`Generator::new`] draws from [`thread_rng`], which is local to the calling thread, so
/// separate threads never contend for it. Use [`Generator::with_rng`] with a seeded generator
/// for reproducible numbers.
pub struct Generator<R = ThreadRng> {
    rng: R,
}

impl Generator<ThreadRng> {
    pub fn new() -> Self {
        Self { rng: thread_rng() }
    }
}

impl Default for Generator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Generator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generates a valid identification number of the given kind.
    ///
    /// `gender` and `date_of_birth` can be `None` to pick them at random. A random date of
    /// birth is uniform over 1854-01-01..=2039-12-31.
    pub fn generate(
        &mut self,
        kind: Kind,
        gender: Option<Gender>,
        date_of_birth: Option<BirthDate>,
    ) -> Result<IdentificationNumber, GenerateError> {
        let gender = gender.unwrap_or_else(|| self.rng.gen());

        let (from, to) = match date_of_birth {
            None => (first_date_of_birth(), last_date_of_birth()),
            Some(BirthDate::On(date)) => (date, date),
            Some(BirthDate::Between(from, to)) => (from, to),
        };
        for date in [from, to] {
            if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
                return Err(GenerateError::OutOfRange { date });
            }
        }
        if from > to {
            return Err(GenerateError::EmptyRange { from, to });
        }

        let date_of_birth = self.random_date(from, to);
        Ok(self.generate_on(kind, gender, date_of_birth))
    }

    fn random_date(&mut self, from: NaiveDate, to: NaiveDate) -> NaiveDate {
        let days = (to - from).num_days();
        from + Duration::days(self.rng.gen_range(0..=days))
    }

    fn generate_on(
        &mut self,
        kind: Kind,
        gender: Gender,
        date_of_birth: NaiveDate,
    ) -> IdentificationNumber {
        let mut buffer = [b'0'; LENGTH];
        encode_date_of_birth(&mut buffer, date_of_birth, kind);

        for band in individual_number_bands(date_of_birth.year()) {
            for individual_number in IndividualNumbers::new(&mut self.rng, band.clone(), gender) {
                digits::write(individual_number, &mut buffer[INDIVIDUAL_NUMBER]);

                if let Some(check_digits) = complete_check_digits(&buffer) {
                    let number = IdentificationNumber::new(
                        date_of_birth,
                        individual_number,
                        check_digits,
                        kind,
                    );
                    log::debug!("Generated {kind} {number}");
                    return number;
                }
                log::trace!("No check digits exist for {individual_number} on {date_of_birth}, retrying...");
            }
        }

        panic!("Exhausted individual numbers for a {gender} {kind} born {date_of_birth}");
    }
}

/// Generates a valid identification number using the thread-local random source.
///
/// Any of the constraints can be `None` to pick a random value.
pub fn generate(
    kind: Kind,
    gender: Option<Gender>,
    date_of_birth: Option<BirthDate>,
) -> Result<IdentificationNumber, GenerateError> {
    Generator::new().generate(kind, gender, date_of_birth)
}

fn first_date_of_birth() -> NaiveDate {
    NaiveDate::from_ymd_opt(MIN_YEAR, 1, 1).expect("first date of birth is a valid date")
}

fn last_date_of_birth() -> NaiveDate {
    NaiveDate::from_ymd_opt(MAX_YEAR, 12, 31).expect("last date of birth is a valid date")
}

/// Individual numbers that parse back to `year`, in order of preference.
fn individual_number_bands(year: i32) -> &'static [RangeInclusive<u16>] {
    match year {
        1854..=1899 => BANDS_1854_1899,
        1900..=1939 => BANDS_1900_1939,
        1940..=1999 => BANDS_1940_1999,
        2000..=2039 => BANDS_2000_2039,
        _ => &[],
    }
}

/// Computes both check digits for the first nine positions of `buffer`.
fn complete_check_digits(buffer: &[u8; LENGTH]) -> Option<[u8; 2]> {
    // Every position holds an ASCII digit written by `digits::write` or the initial fill.
    let mut values = buffer.map(|c| c - b'0');

    let k1 = check_digit(&values, &K1_WEIGHTS)?;
    values[K1] = k1;
    let k2 = check_digit(&values, &K2_WEIGHTS)?;
    Some([k1, k2])
}

/// Walks the individual numbers of one gender within a band in random order.
///
/// Every candidate is yielded exactly once. This is a Fisher-Yates shuffle performed one
/// step per item, so stopping at the first acceptable number picks it uniformly.
struct IndividualNumbers<'a, R: ?Sized> {
    rng: &'a mut R,
    candidates: [u16; MAX_CANDIDATES],
    remaining: usize,
}

impl<'a, R: Rng + ?Sized> IndividualNumbers<'a, R> {
    fn new(rng: &'a mut R, band: RangeInclusive<u16>, gender: Gender) -> Self {
        debug_assert!(band.len() <= 2 * MAX_CANDIDATES);

        let mut candidates = [0; MAX_CANDIDATES];
        let mut remaining = 0;
        let matching = band.filter(|&number| Gender::of(number) == gender);
        for (slot, number) in candidates.iter_mut().zip(matching) {
            *slot = number;
            remaining += 1;
        }

        Self {
            rng,
            candidates,
            remaining,
        }
    }
}

impl<'a, R: Rng + ?Sized> Iterator for IndividualNumbers<'a, R> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.rng.gen_range(0..self.remaining);
        self.remaining -= 1;
        self.candidates.swap(index, self.remaining);
        Some(self.candidates[self.remaining])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::identification_number::full_year;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn seeded() -> Generator<StdRng> {
        Generator::with_rng(StdRng::seed_from_u64(123))
    }

    #[test]
    fn test_individual_numbers() {
        let mut rng = StdRng::seed_from_u64(123);

        for year in MIN_YEAR..=MAX_YEAR {
            for gender in [Gender::Female, Gender::Male] {
                for band in individual_number_bands(year) {
                    let walked: Vec<u16> =
                        IndividualNumbers::new(&mut rng, band.clone(), gender).collect();
                    let unique: HashSet<u16> = walked.iter().copied().collect();
                    assert_eq!(unique.len(), walked.len(), "duplicates in {year}");

                    let expected: HashSet<u16> = band
                        .clone()
                        .filter(|&number| Gender::of(number) == gender)
                        .collect();
                    assert_eq!(unique, expected, "{gender} {year}");
                }
            }
        }
    }

    #[test]
    fn test_bands_match_century() {
        for year in MIN_YEAR..=MAX_YEAR {
            let bands = individual_number_bands(year);
            assert!(!bands.is_empty(), "{year}");
            for band in bands {
                for number in band.clone() {
                    assert_eq!(
                        full_year((year % 100) as u16, number),
                        Some(year),
                        "{number} in {year}"
                    );
                }
            }
        }
        assert!(individual_number_bands(MIN_YEAR - 1).is_empty());
        assert!(individual_number_bands(MAX_YEAR + 1).is_empty());
    }

    #[test]
    fn test_round_trip() {
        let mut generator = seeded();
        for kind in Kind::ALL {
            for _ in 0..2000 {
                let number = generator.generate(kind, None, None).unwrap();
                let formatted = number.to_string();
                let parsed = IdentificationNumber::parse(&formatted).unwrap();

                assert_eq!(parsed, number);
                assert_eq!(parsed.check_digits(), number.check_digits());
                assert_eq!(parsed.kind(), kind);
                assert_eq!(parsed.to_string(), formatted);
            }
        }
    }

    #[test]
    fn test_gender_parity() {
        let mut generator = seeded();
        for _ in 0..10_000 {
            let female = generator
                .generate(Kind::FNumber, Some(Gender::Female), None)
                .unwrap();
            assert_eq!(female.individual_number() % 2, 0);

            let male = generator
                .generate(Kind::FNumber, Some(Gender::Male), None)
                .unwrap();
            assert_eq!(male.individual_number() % 2, 1);
        }
    }

    #[test]
    fn test_d_number() {
        let date_of_birth = date(2020, 1, 15);
        let number = seeded()
            .generate(Kind::DNumber, None, Some(BirthDate::On(date_of_birth)))
            .unwrap();

        let formatted = number.to_string();
        assert_eq!(&formatted[0..6], "550120");

        let parsed = IdentificationNumber::parse(&formatted).unwrap();
        assert_eq!(parsed.kind(), Kind::DNumber);
        assert_eq!(parsed.date_of_birth(), date_of_birth);
        assert!((500..=999).contains(&parsed.individual_number()));
    }

    #[test]
    fn test_h_number() {
        let number = seeded()
            .generate(Kind::HNumber, None, Some(BirthDate::On(date(1969, 12, 24))))
            .unwrap();
        assert_eq!(&number.to_string()[0..6], "245269");
    }

    #[test]
    fn test_date_range() {
        let mut generator = seeded();
        let from = date(1899, 12, 30);
        let to = date(1900, 1, 2);
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let number = generator
                .generate(Kind::FNumber, None, Some(BirthDate::Between(from, to)))
                .unwrap();
            assert!(number.date_of_birth() >= from && number.date_of_birth() <= to);
            seen.insert(number.date_of_birth());
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_uniform_over_valid_candidates() {
        let date_of_birth = date(1996, 8, 28);

        let mut buffer = [b'0'; LENGTH];
        encode_date_of_birth(&mut buffer, date_of_birth, Kind::FNumber);
        let valid: HashSet<u16> = (0..=499)
            .filter(|&number| number % 2 == 0)
            .filter(|&number| {
                digits::write(number, &mut buffer[INDIVIDUAL_NUMBER]);
                complete_check_digits(&buffer).is_some()
            })
            .collect();

        let mut generator = seeded();
        let mut seen = HashSet::new();
        for _ in 0..20_000 {
            let number = generator
                .generate(
                    Kind::FNumber,
                    Some(Gender::Female),
                    Some(BirthDate::On(date_of_birth)),
                )
                .unwrap();
            seen.insert(number.individual_number());
        }
        assert_eq!(seen, valid);
    }

    #[test]
    fn test_errors() {
        let mut generator = seeded();
        assert_eq!(
            generator.generate(Kind::FNumber, None, Some(BirthDate::On(date(1853, 12, 31)))),
            Err(GenerateError::OutOfRange {
                date: date(1853, 12, 31)
            })
        );
        assert_eq!(
            generator.generate(
                Kind::FNumber,
                None,
                Some(BirthDate::Between(date(2000, 1, 1), date(2040, 1, 1)))
            ),
            Err(GenerateError::OutOfRange {
                date: date(2040, 1, 1)
            })
        );
        assert_eq!(
            generator.generate(
                Kind::FNumber,
                None,
                Some(BirthDate::Between(date(2000, 1, 2), date(2000, 1, 1)))
            ),
            Err(GenerateError::EmptyRange {
                from: date(2000, 1, 2),
                to: date(2000, 1, 1)
            })
        );
    }

    #[test]
    fn test_generate() {
        let number = generate(Kind::FNumber, Some(Gender::Male), None).unwrap();
        assert_eq!(number.gender(), Gender::Male);
        assert!(IdentificationNumber::is_valid_of_kind(
            &number.to_string(),
            Kind::FNumber
        ));
    }
}
