//! # norid
//!
//! Parsing, formatting and generation of Norwegian identifiers: national identification numbers
//! (F-, D- and H-numbers) and bank account numbers.
//!
//! Both are 11-digit strings protected by weighted modulo-11 check digits. Parsing validates
//! the check digits and decodes the fields; generation produces random numbers with valid
//! check digits for a given kind, gender and date of birth.
//!
pub mod bank_account_number;
pub mod calendar;
mod checksum;
mod digits;
pub mod identification_number;

pub use bank_account_number::BankAccountNumber;
pub use identification_number::{Gender, IdentificationNumber, Kind};
