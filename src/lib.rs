//! `rap-calc` library crate.
//!
//! The binary (`rap`) is a thin wrapper around this library so that:
//!
//! - lookup and comparison logic is testable without spawning processes
//! - the CLI report and the TUI share one evaluation pipeline
//!
//! ```
//! use rap_calc::app::pipeline::evaluate;
//! use rap_calc::data::PriceTable;
//! use rap_calc::domain::{ClarityGrade, ColorGrade, PriceUnit, QuoteInput};
//!
//! let table = PriceTable::bundled().unwrap();
//! let quote = QuoteInput {
//!     carat_text: "1.20".into(),
//!     price_text: "6.048".into(),
//!     price_unit: PriceUnit::Thousand,
//!     color: ColorGrade::G,
//!     clarity: ClarityGrade::Vs2,
//! }
//! .snapshot();
//!
//! let eval = evaluate(table, &quote);
//! assert!(eval.percentage_difference < -29.9);
//! ```

pub mod app;
pub mod calc;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod logging;
pub mod lookup;
pub mod report;
pub mod tui;
