use std::fmt::Display;

use norid::{BankAccountNumber, IdentificationNumber};
use serde::Serialize;

/// Printable summary of an identification number.
#[derive(Serialize, Debug)]
pub struct IdentificationReport {
    pub number: String,
    pub kind: String,
    pub gender: String,
    pub date_of_birth: String,
    pub individual_number: u16,
}

impl From<&IdentificationNumber> for IdentificationReport {
    fn from(number: &IdentificationNumber) -> Self {
        Self {
            number: number.to_string(),
            kind: number.kind().to_string(),
            gender: number.gender().to_string(),
            date_of_birth: number.date_of_birth().format("%Y-%m-%d").to_string(),
            individual_number: number.individual_number(),
        }
    }
}

impl Display for IdentificationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "           Number: {}", self.number)?;
        writeln!(f, "             Kind: {}", self.kind)?;
        writeln!(f, "           Gender: {}", self.gender)?;
        writeln!(f, "    Date of birth: {}", self.date_of_birth)?;
        write!(f, "Individual number: {:03}", self.individual_number)
    }
}

/// Printable summary of a bank account number.
#[derive(Serialize, Debug)]
pub struct AccountReport {
    pub number: String,
    pub register_number: u16,
    pub account_group: u8,
    pub customer_number: u16,
    pub check_digit: u8,
}

impl From<&BankAccountNumber> for AccountReport {
    fn from(number: &BankAccountNumber) -> Self {
        Self {
            number: number.to_string(),
            register_number: number.register_number(),
            account_group: number.account_group(),
            customer_number: number.customer_number(),
            check_digit: number.check_digit(),
        }
    }
}

impl Display for AccountReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "         Number: {}", self.number)?;
        writeln!(f, "Register number: {:04}", self.register_number)?;
        writeln!(f, "  Account group: {:02}", self.account_group)?;
        writeln!(f, "Customer number: {:04}", self.customer_number)?;
        write!(f, "    Check digit: {}", self.check_digit)
    }
}
