//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - resolves the price table
//! - dispatches to the quote report, table browser, or TUI

use clap::Parser;

use crate::cli::{Command, QuoteArgs, TableArgs};
use crate::config::Settings;
use crate::data::PriceTable;
use crate::domain::parse_carat;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `rap` binary.
pub fn run() -> Result<(), AppError> {
    crate::config::load_dotenv();

    // `rap` with no subcommand opens the calculator.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    let settings = cli.settings();

    match cli.command {
        Command::Quote(args) => {
            crate::logging::init("warn");
            handle_quote(&settings, &args)
        }
        Command::Table(args) => {
            crate::logging::init("warn");
            handle_table(&settings, &args)
        }
        // No subscriber: stderr output would tear the alternate screen.
        Command::Tui => crate::tui::run(&settings),
    }
}

fn handle_quote(settings: &Settings, args: &QuoteArgs) -> Result<(), AppError> {
    let table = settings.price_table()?;
    let quote = args.input().snapshot();
    let eval = pipeline::evaluate(&table, &quote);

    if args.json {
        let json = serde_json::to_string_pretty(&eval)
            .map_err(|e| AppError::runtime(format!("Failed to encode evaluation JSON: {e}")))?;
        println!("{json}");
    } else {
        print!("{}", crate::report::format_quote_report(&eval, &table));
    }
    Ok(())
}

fn handle_table(settings: &Settings, args: &TableArgs) -> Result<(), AppError> {
    let table = settings.price_table()?;
    match &args.carat {
        None => print!("{}", crate::report::format_range_list(&table)),
        Some(text) => print!("{}", range_grid_for(&table, text)?),
    }
    Ok(())
}

fn range_grid_for(table: &PriceTable, carat_text: &str) -> Result<String, AppError> {
    let carat = parse_carat(carat_text)
        .ok_or_else(|| AppError::input(format!("Invalid carat weight '{carat_text}'.")))?;
    let entry = crate::lookup::entry_for(table, carat).ok_or_else(|| {
        AppError::input(format!("Carat {carat:.2} is not covered by the price table."))
    })?;
    Ok(crate::report::format_range_grid(entry))
}

/// Rewrite argv so `rap` defaults to `rap tui`.
///
/// Rules:
/// - `rap`                      -> `rap tui`
/// - `rap --table alt.json`     -> `rap tui --table alt.json`
/// - `rap --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "quote" | "table" | "tui");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(args(&["rap"])), args(&["rap", "tui"]));
        assert_eq!(
            rewrite_args(args(&["rap", "--table", "x.json"])),
            args(&["rap", "tui", "--table", "x.json"])
        );
    }

    #[test]
    fn explicit_subcommands_and_help_untouched() {
        for v in [
            &["rap", "quote", "-c", "1"][..],
            &["rap", "table"][..],
            &["rap", "--help"][..],
            &["rap", "-V"][..],
        ] {
            assert_eq!(rewrite_args(args(v)), args(v));
        }
    }

    #[test]
    fn range_grid_for_covered_carat() {
        let table = PriceTable::bundled().unwrap();
        let grid = range_grid_for(table, "1,2").unwrap();
        assert!(grid.starts_with("1.00-1.49 (individual colors)\n"));
    }

    #[test]
    fn range_grid_for_rejects_bad_carats() {
        let table = PriceTable::bundled().unwrap();
        let err = range_grid_for(table, "7").unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("not covered"));
        assert!(range_grid_for(table, "abc").is_err());
    }
}
