//! Reporting utilities: currency formatting and terminal output.
//!
//! We keep formatting code in one place so the lookup/calculation code stays
//! free of presentation concerns, and the CLI and TUI print identical values.

pub mod format;

pub use format::*;
