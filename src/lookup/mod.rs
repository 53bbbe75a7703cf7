//! Price lookup: carat bracket resolution and table cell retrieval.
//!
//! All functions are pure. A miss at any step (unpriced carat, missing cell)
//! yields `None`, or the `0.0` sentinel from [`price_per_carat`].

use serde::Serialize;

use crate::data::{PriceTable, RangeEntry, RangeTable};
use crate::domain::{CaratRange, ClarityGrade, ClarityGroup, ColorGrade, ColorGroup};

/// A successful table lookup and the keys that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceLookup {
    pub range: CaratRange,
    pub grouped: bool,
    /// Color row used (`"G"` or `"G-H"`).
    pub color_key: &'static str,
    /// Clarity column used (`"VS2"` or `"VS"`).
    pub clarity_key: &'static str,
    /// Hundreds of currency units per carat.
    pub price_per_carat: f64,
}

pub fn color_group(color: ColorGrade) -> ColorGroup {
    match color {
        ColorGrade::D | ColorGrade::E | ColorGrade::F => ColorGroup::DF,
        ColorGrade::G | ColorGrade::H => ColorGroup::GH,
        ColorGrade::I | ColorGrade::J => ColorGroup::IJ,
        ColorGrade::K | ColorGrade::L => ColorGroup::KL,
        ColorGrade::M => ColorGroup::MN,
    }
}

pub fn clarity_group(clarity: ClarityGrade) -> ClarityGroup {
    match clarity {
        ClarityGrade::If | ClarityGrade::Vvs1 | ClarityGrade::Vvs2 => ClarityGroup::IfVvs,
        ClarityGrade::Vs1 | ClarityGrade::Vs2 => ClarityGroup::Vs,
        ClarityGrade::Si1 => ClarityGroup::Si1,
        ClarityGrade::Si2 => ClarityGroup::Si2,
        ClarityGrade::Si3 => ClarityGroup::Si3,
        ClarityGrade::I1 => ClarityGroup::I1,
        ClarityGrade::I2 => ClarityGroup::I2,
        ClarityGrade::I3 => ClarityGroup::I3,
    }
}

/// Bucket for a raw color code; `None` if the code is not a known grade.
pub fn color_group_of(code: &str) -> Option<ColorGroup> {
    code.parse::<ColorGrade>().ok().map(color_group)
}

/// Bucket for a raw clarity code; `None` if the code is not a known grade.
pub fn clarity_group_of(code: &str) -> Option<ClarityGroup> {
    code.parse::<ClarityGrade>().ok().map(clarity_group)
}

/// The bracket containing `carat`, if any.
pub fn range_for(table: &PriceTable, carat: f64) -> Option<CaratRange> {
    entry_for(table, carat).map(|e| e.range)
}

pub(crate) fn entry_for(table: &PriceTable, carat: f64) -> Option<&RangeEntry> {
    if !(carat.is_finite() && carat > 0.0) {
        return None;
    }
    table.ranges().iter().find(|e| e.range.contains(carat))
}

/// Resolve the range and read the matching cell.
pub fn lookup_price(
    table: &PriceTable,
    carat: f64,
    color: ColorGrade,
    clarity: ClarityGrade,
) -> Option<PriceLookup> {
    let Some(entry) = entry_for(table, carat) else {
        tracing::debug!(carat, "carat outside priced ranges");
        return None;
    };

    let found = match &entry.table {
        RangeTable::GroupedColors(rows) => {
            let (cg, qg) = (color_group(color), clarity_group(clarity));
            rows.get(&cg)
                .and_then(|row| row.get(&qg))
                .map(|&p| (true, cg.label(), qg.label(), p))
        }
        RangeTable::IndividualColors(rows) => rows
            .get(&color)
            .and_then(|row| row.get(&clarity))
            .map(|&p| (false, color.code(), clarity.code(), p)),
    };

    let Some((grouped, color_key, clarity_key, price_per_carat)) = found else {
        tracing::debug!(range = %entry.range, %color, %clarity, "no price for cell");
        return None;
    };

    Some(PriceLookup {
        range: entry.range,
        grouped,
        color_key,
        clarity_key,
        price_per_carat,
    })
}

/// Price per carat (hundreds of currency units), or `0.0` when unavailable.
pub fn price_per_carat(table: &PriceTable, carat: f64, color: ColorGrade, clarity: ClarityGrade) -> f64 {
    lookup_price(table, carat, color, clarity)
        .map(|l| l.price_per_carat)
        .unwrap_or(0.0)
}
