//! Domain types used throughout the calculator.
//!
//! This module defines:
//!
//! - grade enums and their small-stone buckets (`ColorGrade`, `ClarityGroup`, ...)
//! - carat brackets (`CaratRange`)
//! - user input snapshots (`QuoteInput`, `Quote`)

pub mod quote;
pub mod types;

pub use quote::*;
pub use types::*;
