use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use norid::{Gender, Kind};

#[derive(Parser, Debug)]
#[command(author, about, version, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Generate random identification numbers
    #[command(visible_alias = "g")]
    Generate(GenerateArgs),
    /// Validate an identification number
    #[command(visible_alias = "v")]
    Validate(ValidateArgs),
    /// Validate a bank account number
    #[command(visible_alias = "a")]
    Account(AccountArgs),
}

#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// Which kind of number to generate
    #[arg(short, long, value_enum, default_value = "f")]
    pub kind: KindArg,

    /// Gender of the person (random if omitted)
    #[arg(short, long, value_enum)]
    pub gender: Option<GenderArg>,

    /// Exact date of birth, as YYYY-MM-DD
    #[arg(short, long, value_parser = parse_date, conflicts_with_all = ["from", "to"])]
    pub date: Option<NaiveDate>,

    /// Earliest date of birth, as YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    pub from: Option<NaiveDate>,

    /// Latest date of birth, as YYYY-MM-DD
    #[arg(long, value_parser = parse_date)]
    pub to: Option<NaiveDate>,

    /// Number of identification numbers to generate
    #[arg(short = 'n', long = "number", default_value = "1")]
    pub count: u64,
}

#[derive(Args, Clone, Debug)]
pub struct ValidateArgs {
    /// Only accept these kinds (any kind if omitted)
    #[arg(short, long, value_enum)]
    pub kind: Vec<KindArg>,

    /// The identification number to validate
    pub number: String,
}

#[derive(Args, Clone, Debug)]
pub struct AccountArgs {
    /// The bank account number to validate, with or without spaces and periods
    pub number: String,
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum KindArg {
    F,
    D,
    H,
}

impl From<KindArg> for Kind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::F => Kind::FNumber,
            KindArg::D => Kind::DNumber,
            KindArg::H => Kind::HNumber,
        }
    }
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum GenderArg {
    Female,
    Male,
}

impl From<GenderArg> for Gender {
    fn from(gender: GenderArg) -> Self {
        match gender {
            GenderArg::Female => Gender::Female,
            GenderArg::Male => Gender::Male,
        }
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_args() {
        let cli = Cli::try_parse_from([
            "nid", "generate", "-k", "d", "-g", "male", "--from", "1990-01-01", "--to",
            "1999-12-31", "-n", "5",
        ])
        .unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.kind, KindArg::D);
        assert_eq!(args.gender, Some(GenderArg::Male));
        assert_eq!(args.from, NaiveDate::from_ymd_opt(1990, 1, 1));
        assert_eq!(args.to, NaiveDate::from_ymd_opt(1999, 12, 31));
        assert_eq!(args.count, 5);
        assert!(!cli.json);
    }

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from(["nid", "g"]).unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.kind, KindArg::F);
        assert_eq!(args.gender, None);
        assert_eq!(args.date, None);
        assert_eq!(args.count, 1);
    }

    #[test]
    fn test_date_conflicts() {
        assert!(Cli::try_parse_from([
            "nid",
            "generate",
            "--date",
            "2000-01-01",
            "--from",
            "1990-01-01"
        ])
        .is_err());
        assert!(Cli::try_parse_from(["nid", "generate", "--date", "2000-13-01"]).is_err());
    }

    #[test]
    fn test_validate_args() {
        let cli =
            Cli::try_parse_from(["nid", "--json", "v", "-k", "f", "-k", "h", "28089647063"])
                .unwrap();
        assert!(cli.json);
        let Commands::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        assert_eq!(args.kind, [KindArg::F, KindArg::H]);
        assert_eq!(args.number, "28089647063");
    }
}
