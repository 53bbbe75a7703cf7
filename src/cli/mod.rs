//! Command-line parsing for the rap-price calculator.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! lookup and calculation code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{Settings, TABLE_ENV};
use crate::domain::{ClarityGrade, ColorGrade, PriceUnit, QuoteInput};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "rap", version, about = "Diamond rap-price calculator")]
pub struct Cli {
    /// Alternate price table JSON (same layout as the bundled table).
    #[arg(long, global = true, env = TABLE_ENV, value_name = "JSON")]
    pub table: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings {
            table_path: self.table.clone(),
        }
    }
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compare a seller's price against the rap price and print the breakdown.
    Quote(QuoteArgs),
    /// List the price table ranges, or print the grid for one carat weight.
    Table(TableArgs),
    /// Launch the interactive calculator.
    Tui,
}

/// Options for a single quote.
#[derive(Debug, Parser, Clone)]
pub struct QuoteArgs {
    /// Carat weight (`1.20` or `1,20`).
    #[arg(short = 'c', long)]
    pub carat: String,

    /// Color grade (D..M).
    #[arg(long, value_enum, ignore_case = true, default_value_t = ColorGrade::D)]
    pub color: ColorGrade,

    /// Clarity grade (IF..I3).
    #[arg(long, value_enum, ignore_case = true, default_value_t = ClarityGrade::If)]
    pub clarity: ClarityGrade,

    /// Seller price, in `--unit`s.
    #[arg(short = 'p', long, default_value = "")]
    pub price: String,

    /// Multiplier for `--price`.
    #[arg(short = 'u', long, value_enum, default_value_t = PriceUnit::Lakh)]
    pub unit: PriceUnit,

    /// Print the evaluation as JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

impl QuoteArgs {
    pub fn input(&self) -> QuoteInput {
        QuoteInput {
            carat_text: self.carat.clone(),
            price_text: self.price.clone(),
            price_unit: self.unit,
            color: self.color,
            clarity: self.clarity,
        }
    }
}

/// Options for browsing the table.
#[derive(Debug, Parser, Clone)]
pub struct TableArgs {
    /// Print the grid for the range containing this carat weight.
    #[arg(short = 'c', long)]
    pub carat: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quote_with_case_insensitive_grades() {
        let cli = Cli::try_parse_from([
            "rap", "quote", "--carat", "1,2", "--color", "g", "--clarity", "vs2", "-p", "2.5",
        ])
        .unwrap();
        let Command::Quote(args) = cli.command else {
            panic!("expected quote");
        };
        assert_eq!(args.color, ColorGrade::G);
        assert_eq!(args.clarity, ClarityGrade::Vs2);
        assert_eq!(args.unit, PriceUnit::Lakh);

        let quote = args.input().snapshot();
        assert_eq!(quote.carat, Some(1.2));
        assert_eq!(quote.seller_price, Some(250_000.0));
    }

    #[test]
    fn quote_defaults() {
        let cli = Cli::try_parse_from(["rap", "quote", "-c", "0.5"]).unwrap();
        let Command::Quote(args) = cli.command else {
            panic!("expected quote");
        };
        assert_eq!(args.color, ColorGrade::D);
        assert_eq!(args.clarity, ClarityGrade::If);
        assert_eq!(args.price, "");
        assert!(!args.json);
    }

    #[test]
    fn rejects_unknown_grade() {
        assert!(Cli::try_parse_from(["rap", "quote", "-c", "1", "--color", "N"]).is_err());
        assert!(Cli::try_parse_from(["rap", "quote", "-c", "1", "--clarity", "FL"]).is_err());
    }

    #[test]
    fn global_table_flag() {
        let cli = Cli::try_parse_from(["rap", "table", "--table", "alt.json", "-c", "1.2"]).unwrap();
        assert_eq!(cli.settings().table_path, Some(PathBuf::from("alt.json")));
        let Command::Table(args) = cli.command else {
            panic!("expected table");
        };
        assert_eq!(args.carat.as_deref(), Some("1.2"));
    }

    #[test]
    fn thousand_unit() {
        let cli = Cli::try_parse_from(["rap", "quote", "-c", "1", "-p", "6", "-u", "thousand"]).unwrap();
        let Command::Quote(args) = cli.command else {
            panic!("expected quote");
        };
        assert_eq!(args.input().snapshot().seller_price, Some(6_000.0));
    }
}
