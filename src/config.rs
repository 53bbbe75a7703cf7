//! Runtime configuration.
//!
//! Settings come from CLI flags, which clap also binds to environment
//! variables; `.env` in the working directory is loaded first so it can supply
//! them.

use std::borrow::Cow;
use std::path::PathBuf;

use crate::data::PriceTable;
use crate::error::AppError;

/// Path of an alternate price table JSON.
pub const TABLE_ENV: &str = "RAP_TABLE";

/// `tracing` filter directives (e.g. `debug`, `rap_calc::lookup=debug`).
pub const LOG_ENV: &str = "RAP_LOG";

/// Load `.env` if present. Missing files are not an error.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Alternate price table; the bundled table is used when `None`.
    pub table_path: Option<PathBuf>,
}

impl Settings {
    /// Resolve the price table for this run.
    pub fn price_table(&self) -> Result<Cow<'static, PriceTable>, AppError> {
        match &self.table_path {
            Some(path) => PriceTable::from_path(path).map(Cow::Owned),
            None => PriceTable::bundled().map(Cow::Borrowed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_use_bundled_table() {
        let table = Settings::default().price_table().unwrap();
        assert!(matches!(table, Cow::Borrowed(_)));
        assert_eq!(table.ranges().len(), 18);
    }

    #[test]
    fn alternate_table_from_file() {
        let path = std::env::temp_dir().join(format!("rap_calc_table_{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{ "asOf": "2024-06-01", "currency": "USD",
                 "ranges": { "0.50-0.69": { "individualColors": { "H": { "SI1": 19 } } } } }"#,
        )
        .unwrap();

        let settings = Settings {
            table_path: Some(path.clone()),
        };
        let table = settings.price_table();
        std::fs::remove_file(&path).ok();

        let table = table.unwrap();
        assert!(matches!(table, Cow::Owned(_)));
        assert_eq!(table.ranges().len(), 1);
        assert_eq!(table.ranges()[0].range.to_string(), "0.50-0.69");
    }

    #[test]
    fn unreadable_table_is_input_error() {
        let settings = Settings {
            table_path: Some(PathBuf::from("/nonexistent/rap_table.json")),
        };
        assert_eq!(settings.price_table().unwrap_err().exit_code(), 2);
    }
}
