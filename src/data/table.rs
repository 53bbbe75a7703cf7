//! The reference price table.
//!
//! The table is a nested mapping `carat range -> sub-table -> clarity -> price`,
//! where each range's sub-table is one of two shapes:
//!
//! - `groupedColors`: small stones, keyed by color bucket and clarity bucket
//! - `individualColors`: keyed by individual color and clarity grade
//!
//! Prices are stored in hundreds of currency units per carat (so `185` means
//! 18,500 per carat). A bundled copy ships inside the binary; an alternate file
//! with the same layout can be loaded from disk.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{CaratRange, ClarityGrade, ClarityGroup, ColorGrade, ColorGroup};
use crate::error::AppError;

const BUNDLED_JSON: &str = include_str!("price_table.json");

static BUNDLED: OnceLock<Result<PriceTable, AppError>> = OnceLock::new();

/// Sub-table for a single carat range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RangeTable {
    GroupedColors(BTreeMap<ColorGroup, BTreeMap<ClarityGroup, f64>>),
    IndividualColors(BTreeMap<ColorGrade, BTreeMap<ClarityGrade, f64>>),
}

impl RangeTable {
    pub fn kind_label(&self) -> &'static str {
        match self {
            RangeTable::GroupedColors(_) => "grouped colors",
            RangeTable::IndividualColors(_) => "individual colors",
        }
    }

    pub fn is_grouped(&self) -> bool {
        matches!(self, RangeTable::GroupedColors(_))
    }

    /// Number of priced cells.
    pub fn cell_count(&self) -> usize {
        match self {
            RangeTable::GroupedColors(rows) => rows.values().map(BTreeMap::len).sum(),
            RangeTable::IndividualColors(rows) => rows.values().map(BTreeMap::len).sum(),
        }
    }

    fn prices(&self) -> Vec<f64> {
        match self {
            RangeTable::GroupedColors(rows) => rows.values().flat_map(|r| r.values().copied()).collect(),
            RangeTable::IndividualColors(rows) => {
                rows.values().flat_map(|r| r.values().copied()).collect()
            }
        }
    }
}

/// One carat bracket and its sub-table.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeEntry {
    pub range: CaratRange,
    pub table: RangeTable,
}

/// Immutable reference price table, ranges sorted by lower bound.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    as_of: NaiveDate,
    currency: String,
    ranges: Vec<RangeEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTable {
    as_of: NaiveDate,
    currency: String,
    ranges: BTreeMap<String, RangeTable>,
}

impl PriceTable {
    /// The table compiled into the binary, parsed on first use.
    pub fn bundled() -> Result<&'static PriceTable, AppError> {
        BUNDLED
            .get_or_init(|| Self::from_json_str(BUNDLED_JSON))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Load an alternate table file (same layout as the bundled one).
    pub fn from_path(path: &Path) -> Result<PriceTable, AppError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            AppError::input(format!("Failed to read price table '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
            .map_err(|e| AppError::input(format!("{} ({})", e.message(), path.display())))
    }

    pub fn from_json_str(text: &str) -> Result<PriceTable, AppError> {
        let raw: RawTable = serde_json::from_str(text)
            .map_err(|e| AppError::input(format!("Invalid price table JSON: {e}")))?;
        let table = Self::from_raw(raw)?;
        tracing::info!(
            ranges = table.ranges.len(),
            as_of = %table.as_of,
            currency = %table.currency,
            "loaded price table"
        );
        Ok(table)
    }

    fn from_raw(raw: RawTable) -> Result<PriceTable, AppError> {
        if raw.ranges.is_empty() {
            return Err(AppError::input("Price table has no carat ranges."));
        }

        let mut ranges = Vec::with_capacity(raw.ranges.len());
        for (key, table) in raw.ranges {
            let range: CaratRange = key.parse()?;
            if let Some(bad) = table.prices().into_iter().find(|p| !(p.is_finite() && *p > 0.0)) {
                return Err(AppError::input(format!(
                    "Price table range {key} has a non-positive price ({bad})."
                )));
            }
            ranges.push(RangeEntry { range, table });
        }

        ranges.sort_by(|a, b| a.range.min.total_cmp(&b.range.min));
        for pair in ranges.windows(2) {
            if pair[0].range.overlaps(&pair[1].range) {
                return Err(AppError::input(format!(
                    "Price table ranges {} and {} overlap.",
                    pair[0].range, pair[1].range
                )));
            }
        }

        Ok(PriceTable {
            as_of: raw.as_of,
            currency: raw.currency,
            ranges,
        })
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn ranges(&self) -> &[RangeEntry] {
        &self.ranges
    }

    /// Sub-table for an exact range key such as `"1.00-1.49"`.
    pub fn range_table(&self, key: &str) -> Option<&RangeTable> {
        let wanted: CaratRange = key.parse().ok()?;
        self.ranges
            .iter()
            .find(|e| e.range == wanted)
            .map(|e| &e.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(ranges: &str) -> String {
        format!(r#"{{ "asOf": "2025-01-01", "currency": "USD", "ranges": {{ {ranges} }} }}"#)
    }

    #[test]
    fn bundled_table_loads_sorted() {
        let table = PriceTable::bundled().unwrap();
        assert_eq!(table.currency(), "USD");
        assert_eq!(table.as_of(), NaiveDate::from_ymd_opt(2025, 10, 3).unwrap());
        assert_eq!(table.ranges().len(), 18);

        let first = &table.ranges()[0];
        assert_eq!(first.range.to_string(), "0.01-0.03");
        assert!(first.table.is_grouped());

        let last = table.ranges().last().unwrap();
        assert_eq!(last.range.to_string(), "10.00-10.99");
        assert!(!last.table.is_grouped());

        for pair in table.ranges().windows(2) {
            assert!(pair[0].range.max < pair[1].range.min);
        }
    }

    #[test]
    fn bundled_cell_counts() {
        let table = PriceTable::bundled().unwrap();
        for entry in table.ranges() {
            let expected = if entry.table.is_grouped() { 5 * 8 } else { 10 * 10 };
            assert_eq!(entry.table.cell_count(), expected, "range {}", entry.range);
        }
    }

    #[test]
    fn individual_tables_do_not_price_si3() {
        let table = PriceTable::bundled().unwrap();
        let Some(RangeTable::IndividualColors(rows)) = table.range_table("1.00-1.49") else {
            panic!("expected individual colors for 1.00-1.49");
        };
        assert_eq!(rows[&ColorGrade::G][&ClarityGrade::Vs2], 72.0);
        assert!(!rows[&ColorGrade::G].contains_key(&ClarityGrade::Si3));
    }

    #[test]
    fn range_table_lookup_by_key() {
        let table = PriceTable::bundled().unwrap();
        assert!(table.range_table("0.01-0.03").unwrap().is_grouped());
        assert!(table.range_table("0.01-0.04").is_none());
        assert!(table.range_table("garbage").is_none());
    }

    #[test]
    fn rejects_overlapping_ranges() {
        let json = minimal(
            r#""0.30-0.39": { "individualColors": { "D": { "IF": 40 } } },
               "0.35-0.49": { "individualColors": { "D": { "IF": 45 } } }"#,
        );
        let err = PriceTable::from_json_str(&json).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.message().contains("overlap"), "{err}");
    }

    #[test]
    fn rejects_non_positive_prices() {
        let json = minimal(r#""0.01-0.03": { "groupedColors": { "D-F": { "VS": 0 } } }"#);
        let err = PriceTable::from_json_str(&json).unwrap_err();
        assert!(err.message().contains("non-positive"), "{err}");
    }

    #[test]
    fn rejects_bad_range_keys_and_unknown_grades() {
        let bad_key = minimal(r#""0.30": { "individualColors": { "D": { "IF": 40 } } }"#);
        assert!(PriceTable::from_json_str(&bad_key).is_err());

        let bad_grade = minimal(r#""0.30-0.39": { "individualColors": { "Z": { "IF": 40 } } }"#);
        assert!(PriceTable::from_json_str(&bad_grade).is_err());

        let bad_shape = minimal(r#""0.30-0.39": { "mixedColors": {} }"#);
        assert!(PriceTable::from_json_str(&bad_shape).is_err());
    }

    #[test]
    fn rejects_empty_table() {
        let err = PriceTable::from_json_str(&minimal("")).unwrap_err();
        assert!(err.message().contains("no carat ranges"));
    }

    #[test]
    fn missing_file_is_input_error() {
        let err = PriceTable::from_path(Path::new("/nonexistent/price_table.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
