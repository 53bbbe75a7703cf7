//! Terminal formatting: currency amounts, the quote report, and table grids.
//!
//! Unavailable values always render as [`UNAVAILABLE`]; nothing here fails.

use crate::app::pipeline::Evaluation;
use crate::calc;
use crate::data::{PriceTable, RangeEntry, RangeTable};
use crate::domain::{ClarityGrade, ClarityGroup, ColorGrade, ColorGroup};

pub const RUPEE: &str = "₹";

/// Placeholder for values that cannot be computed.
pub const UNAVAILABLE: &str = "-";

/// Scale applied by [`compact_amount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountScale {
    /// Hundred-thousands (`L`).
    Lakh,
    /// Thousands (`K`).
    Thousand,
    Unscaled,
}

impl AmountScale {
    pub fn suffix(self) -> &'static str {
        match self {
            AmountScale::Lakh => "L",
            AmountScale::Thousand => "K",
            AmountScale::Unscaled => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompactAmount {
    pub digits: String,
    pub scale: AmountScale,
}

/// `≥ 100000` → lakhs to 2 decimals, `≥ 1000` → thousands to 1 decimal,
/// otherwise the value as-is.
pub fn compact_amount(value: f64) -> CompactAmount {
    if value >= 100_000.0 {
        CompactAmount {
            digits: format!("{:.2}", value / 100_000.0),
            scale: AmountScale::Lakh,
        }
    } else if value >= 1_000.0 {
        CompactAmount {
            digits: format!("{:.1}", value / 1_000.0),
            scale: AmountScale::Thousand,
        }
    } else {
        CompactAmount {
            digits: format!("{value}"),
            scale: AmountScale::Unscaled,
        }
    }
}

/// `₹1.50L`, `₹2.5K`, `₹500`; missing, zero, or non-finite amounts show `₹0`.
pub fn format_rupees(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 && v.is_finite() => {
            let c = compact_amount(v);
            format!("{RUPEE}{}{}", c.digits, c.scale.suffix())
        }
        _ => format!("{RUPEE}0"),
    }
}

/// Like [`format_rupees`], but a missing reference shows the dash.
pub fn format_reference(value: Option<f64>) -> String {
    match value {
        Some(_) => format_rupees(value),
        None => UNAVAILABLE.to_string(),
    }
}

/// `+12.34%` / `-30.00%`, or the dash without a reference.
pub fn format_percentage(eval: &Evaluation) -> String {
    if !eval.has_reference() {
        return UNAVAILABLE.to_string();
    }
    let pct = eval.percentage_difference;
    format!("{}{:.2}%", calc::sign(pct), pct.abs())
}

pub fn format_seller_rate(eval: &Evaluation) -> String {
    eval.seller_price_per_carat
        .map(|v| format!("${v:.2}"))
        .unwrap_or_else(|| UNAVAILABLE.to_string())
}

/// The one-line verdict shown above the breakdown.
pub fn format_statement(eval: &Evaluation) -> String {
    let rate = format_seller_rate(eval);
    if eval.has_reference() {
        format!(
            "Seller price per carat is {rate}. That's {} {} the rap.",
            format_percentage(eval),
            calc::direction(eval.percentage_difference),
        )
    } else {
        format!("Seller price per carat is {rate}. No rap price for this stone.")
    }
}

/// `(label, value)` rows for the price breakdown.
pub fn breakdown_rows(eval: &Evaluation) -> Vec<(String, String)> {
    let mut rows = vec![
        ("Seller price".to_string(), format_rupees(eval.quote.seller_price)),
        ("Rap price".to_string(), format_reference(eval.reference_total)),
    ];
    if eval.tiers.is_empty() {
        for (percent_off, _) in calc::DISCOUNT_TIERS {
            rows.push((format!("Rap -{percent_off}%"), UNAVAILABLE.to_string()));
        }
    } else {
        for tier in &eval.tiers {
            rows.push((format!("Rap {}", tier.label()), format_rupees(Some(tier.amount))));
        }
    }
    rows
}

/// Describe the stone and where it landed in the table.
pub fn format_stone(eval: &Evaluation) -> String {
    let q = &eval.quote;
    let carat = q
        .carat
        .map(|c| format!("{c:.2}ct"))
        .unwrap_or_else(|| format!("{UNAVAILABLE}ct"));
    let placement = match &eval.lookup {
        Some(hit) => format!(
            "range {} ({}, cell {}/{})",
            hit.range,
            if hit.grouped { "grouped colors" } else { "individual colors" },
            hit.color_key,
            hit.clarity_key,
        ),
        None => "unpriced".to_string(),
    };
    format!("{carat} {} {} | {placement}", q.color, q.clarity)
}

/// Full text report for `rap quote`.
pub fn format_quote_report(eval: &Evaluation, table: &PriceTable) -> String {
    let mut out = String::new();

    out.push_str("=== rap - diamond quote ===\n");
    out.push_str(&format!("Stone: {}\n", format_stone(eval)));
    out.push_str(&format!(
        "Table: {} per carat (x100), as of {}\n",
        table.currency(),
        table.as_of()
    ));
    out.push('\n');
    out.push_str(&format_statement(eval));
    if eval.has_reference() {
        out.push_str(&format!(" [{}]", eval.verdict.label()));
    }
    out.push_str("\n\n");

    for (label, value) in breakdown_rows(eval) {
        out.push_str(&format!("{:<14} {value}\n", format!("{label}:")));
    }

    out
}

/// Overview of all ranges for `rap table`.
pub fn format_range_list(table: &PriceTable) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Price table ({} per carat x100, as of {})\n",
        table.currency(),
        table.as_of()
    ));
    out.push_str(format!("{:<12} {:<18} {:>5}", "range", "kind", "cells").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<12} {:-<18} {:-<5}", "", "", "").trim_end());
    out.push('\n');
    for entry in table.ranges() {
        out.push_str(
            format!(
                "{:<12} {:<18} {:>5}",
                entry.range.to_string(),
                entry.table.kind_label(),
                entry.table.cell_count()
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

/// Color × clarity grid for one range; missing cells show the dash.
pub fn format_range_grid(entry: &RangeEntry) -> String {
    let (columns, rows): (Vec<&str>, Vec<(&str, Vec<Option<f64>>)>) = match &entry.table {
        RangeTable::GroupedColors(map) => (
            ClarityGroup::ALL.iter().map(|q| q.label()).collect(),
            ColorGroup::ALL
                .iter()
                .map(|c| {
                    let row = map.get(c);
                    let cells = ClarityGroup::ALL
                        .iter()
                        .map(|q| row.and_then(|r| r.get(q)).copied())
                        .collect();
                    (c.label(), cells)
                })
                .collect(),
        ),
        RangeTable::IndividualColors(map) => (
            ClarityGrade::ALL.iter().map(|q| q.code()).collect(),
            ColorGrade::ALL
                .iter()
                .map(|c| {
                    let row = map.get(c);
                    let cells = ClarityGrade::ALL
                        .iter()
                        .map(|q| row.and_then(|r| r.get(q)).copied())
                        .collect();
                    (c.code(), cells)
                })
                .collect(),
        ),
    };

    let mut out = String::new();
    out.push_str(&format!("{} ({})\n", entry.range, entry.table.kind_label()));

    let mut header = format!("{:<5}", "");
    for col in &columns {
        header.push_str(&format!(" {col:>7}"));
    }
    out.push_str(header.trim_end());
    out.push('\n');

    for (label, cells) in rows {
        let mut line = format!("{label:<5}");
        for cell in cells {
            line.push_str(&format!(" {:>7}", fmt_cell(cell)));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

fn fmt_cell(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{v:.0}"),
        Some(v) => format!("{v:.1}"),
        None => UNAVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::evaluate;
    use crate::domain::{PriceUnit, QuoteInput};

    fn eval(carat: &str, price: &str, clarity: ClarityGrade) -> Evaluation {
        let quote = QuoteInput {
            carat_text: carat.to_string(),
            price_text: price.to_string(),
            price_unit: PriceUnit::Thousand,
            color: ColorGrade::G,
            clarity,
        }
        .snapshot();
        evaluate(PriceTable::bundled().unwrap(), &quote)
    }

    #[test]
    fn compact_amount_scales() {
        assert_eq!(
            compact_amount(150_000.0),
            CompactAmount { digits: "1.50".to_string(), scale: AmountScale::Lakh }
        );
        assert_eq!(
            compact_amount(2_500.0),
            CompactAmount { digits: "2.5".to_string(), scale: AmountScale::Thousand }
        );
        assert_eq!(
            compact_amount(500.0),
            CompactAmount { digits: "500".to_string(), scale: AmountScale::Unscaled }
        );
    }

    #[test]
    fn format_rupees_variants() {
        assert_eq!(format_rupees(Some(150_000.0)), "₹1.50L");
        assert_eq!(format_rupees(Some(2_500.0)), "₹2.5K");
        assert_eq!(format_rupees(Some(500.0)), "₹500");
        assert_eq!(format_rupees(Some(999.5)), "₹999.5");
        assert_eq!(format_rupees(Some(100_000.0)), "₹1.00L");
        assert_eq!(format_rupees(Some(0.0)), "₹0");
        assert_eq!(format_rupees(None), "₹0");
        assert_eq!(format_rupees(Some(f64::NAN)), "₹0");
    }

    #[test]
    fn reference_dash_when_missing() {
        assert_eq!(format_reference(None), "-");
        assert_eq!(format_reference(Some(8_640.0)), "₹8.6K");
    }

    #[test]
    fn statement_with_reference() {
        let e = eval("1.2", "6.048", ClarityGrade::Vs2);
        assert_eq!(format_percentage(&e), "-30.00%");
        assert_eq!(
            format_statement(&e),
            "Seller price per carat is $56.95. That's -30.00% below the rap."
        );
    }

    #[test]
    fn statement_without_reference() {
        let e = eval("7", "50", ClarityGrade::Vs2);
        assert_eq!(format_percentage(&e), "-");
        assert!(format_statement(&e).ends_with("No rap price for this stone."));

        let empty = eval("", "", ClarityGrade::Vs2);
        assert_eq!(
            format_statement(&empty),
            "Seller price per carat is -. No rap price for this stone."
        );
    }

    #[test]
    fn breakdown_rows_dash_without_reference() {
        let rows = breakdown_rows(&eval("1.2", "", ClarityGrade::Si3));
        let values: Vec<&str> = rows.iter().map(|(_, v)| v.as_str()).collect();
        assert_eq!(values, ["₹0", "-", "-", "-", "-"]);
        assert_eq!(rows[4].0, "Rap -30%");
    }

    #[test]
    fn quote_report_layout() {
        let table = PriceTable::bundled().unwrap();
        let report = format_quote_report(&eval("1.2", "6.048", ClarityGrade::Vs2), table);
        assert!(report.starts_with("=== rap - diamond quote ===\n"));
        assert!(report.contains("Stone: 1.20ct G VS2 | range 1.00-1.49 (individual colors, cell G/VS2)\n"));
        assert!(report.contains("[discount]"));
        assert!(report.contains("Rap price:     ₹8.6K\n"));
        assert!(report.contains("Rap -30%:      ₹6.0K\n"));
    }

    #[test]
    fn range_list_lists_every_range() {
        let table = PriceTable::bundled().unwrap();
        let txt = format_range_list(table);
        assert_eq!(txt.lines().count(), 3 + table.ranges().len());
        assert!(txt.contains("0.01-0.03    grouped colors        40\n"));
        assert!(txt.contains("10.00-10.99  individual colors    100\n"));
    }

    #[test]
    fn range_grid_shows_missing_cells() {
        let table = PriceTable::bundled().unwrap();
        let entry = table
            .ranges()
            .iter()
            .find(|e| e.range.to_string() == "1.00-1.49")
            .unwrap();
        let txt = format_range_grid(entry);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines[0], "1.00-1.49 (individual colors)");
        assert!(lines[1].trim_start().starts_with("IF"));
        let g_row = lines.iter().find(|l| l.starts_with("G ")).unwrap();
        // SI3 column (8th) is unpriced.
        let cells: Vec<&str> = g_row.split_whitespace().collect();
        assert_eq!(cells[0], "G");
        assert_eq!(cells[5], "72");
        assert_eq!(cells[8], "-");
    }

    #[test]
    fn grouped_grid_uses_bucket_labels() {
        let table = PriceTable::bundled().unwrap();
        let txt = format_range_grid(&table.ranges()[0]);
        assert!(txt.contains("IF-VVS"));
        assert!(txt.lines().any(|l| l.starts_with("D-F") && l.contains("8.8")));
    }
}
