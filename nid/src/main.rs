mod cli;
mod report;

use anyhow::{bail, Result};
use clap::Parser;
use norid::{
    identification_number::{BirthDate, Generator},
    BankAccountNumber, IdentificationNumber, Kind,
};
use serde::Serialize;

use crate::{
    cli::*,
    report::{AccountReport, IdentificationReport},
};

fn main() -> Result<()> {
    let args = Cli::parse();

    if args.verbose {
        simple_logger::init_with_level(log::Level::Info)?;
    } else {
        simple_logger::init_with_level(log::Level::Warn)?;
    }

    match &args.command {
        Commands::Generate(generate_args) => generate(generate_args, args.json),
        Commands::Validate(validate_args) => validate(validate_args, args.json),
        Commands::Account(account_args) => account(account_args, args.json),
    }
}

fn generate(args: &GenerateArgs, json: bool) -> Result<()> {
    let date_of_birth = match (args.date, args.from, args.to) {
        (Some(date), None, None) => Some(BirthDate::On(date)),
        (None, Some(from), Some(to)) => Some(BirthDate::Between(from, to)),
        (None, None, None) => None,
        (None, _, _) => bail!("Both --from and --to are required for a date range"),
        _ => bail!("--date can't be combined with --from or --to"),
    };

    let kind = Kind::from(args.kind);
    let gender = args.gender.map(Into::into);
    let mut generator = Generator::new();

    let mut reports = Vec::new();
    for _ in 0..args.count {
        let number = generator.generate(kind, gender, date_of_birth)?;
        log::info!("{:#?}", number);
        if json {
            reports.push(IdentificationReport::from(&number));
        } else {
            println!("{number}");
        }
    }

    if json {
        print_json(&reports)?;
    }
    Ok(())
}

fn validate(args: &ValidateArgs, json: bool) -> Result<()> {
    let number = IdentificationNumber::parse(args.number.trim())?;
    log::info!("{:#?}", number);

    let kinds: Vec<Kind> = args.kind.iter().copied().map(Kind::from).collect();
    if !kinds.is_empty() && !kinds.contains(&number.kind()) {
        bail!("{} is a valid {}, which was not accepted", number, number.kind());
    }

    let report = IdentificationReport::from(&number);
    if json {
        print_json(&report)?;
    } else {
        println!("{report}");
        println!("Identification number validated successfully!");
    }
    Ok(())
}

fn account(args: &AccountArgs, json: bool) -> Result<()> {
    let number = BankAccountNumber::parse(&args.number)?;
    log::info!("{:#?}", number);

    let report = AccountReport::from(&number);
    if json {
        print_json(&report)?;
    } else {
        println!("{report}");
        println!("Bank account number validated successfully!");
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
