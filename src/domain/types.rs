//! Shared domain types.
//!
//! Grades and groups are plain `Copy` enums so they can be:
//!
//! - used as keys of the bundled price table (serde map keys)
//! - accepted as CLI values (`clap::ValueEnum`)
//! - cycled through in the TUI (`next` / `prev`)

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Diamond color grade, best (`D`) to worst (`M`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[value(rename_all = "UPPER")]
pub enum ColorGrade {
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
}

impl ColorGrade {
    pub const ALL: [ColorGrade; 10] = [
        ColorGrade::D,
        ColorGrade::E,
        ColorGrade::F,
        ColorGrade::G,
        ColorGrade::H,
        ColorGrade::I,
        ColorGrade::J,
        ColorGrade::K,
        ColorGrade::L,
        ColorGrade::M,
    ];

    pub fn code(self) -> &'static str {
        match self {
            ColorGrade::D => "D",
            ColorGrade::E => "E",
            ColorGrade::F => "F",
            ColorGrade::G => "G",
            ColorGrade::H => "H",
            ColorGrade::I => "I",
            ColorGrade::J => "J",
            ColorGrade::K => "K",
            ColorGrade::L => "L",
            ColorGrade::M => "M",
        }
    }

    /// Next (worse) grade, saturating at `M`.
    pub fn next(self) -> Self {
        step(&Self::ALL, self, 1)
    }

    /// Previous (better) grade, saturating at `D`.
    pub fn prev(self) -> Self {
        step(&Self::ALL, self, -1)
    }
}

impl fmt::Display for ColorGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ColorGrade {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|g| g.code().eq_ignore_ascii_case(needle))
            .ok_or_else(|| AppError::input(format!("Unknown color grade '{needle}' (expected D..M).")))
    }
}

/// Diamond clarity grade, best (`IF`) to worst (`I3`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "UPPERCASE")]
#[value(rename_all = "UPPER")]
pub enum ClarityGrade {
    If,
    Vvs1,
    Vvs2,
    Vs1,
    Vs2,
    Si1,
    Si2,
    Si3,
    I1,
    I2,
    I3,
}

impl ClarityGrade {
    pub const ALL: [ClarityGrade; 11] = [
        ClarityGrade::If,
        ClarityGrade::Vvs1,
        ClarityGrade::Vvs2,
        ClarityGrade::Vs1,
        ClarityGrade::Vs2,
        ClarityGrade::Si1,
        ClarityGrade::Si2,
        ClarityGrade::Si3,
        ClarityGrade::I1,
        ClarityGrade::I2,
        ClarityGrade::I3,
    ];

    pub fn code(self) -> &'static str {
        match self {
            ClarityGrade::If => "IF",
            ClarityGrade::Vvs1 => "VVS1",
            ClarityGrade::Vvs2 => "VVS2",
            ClarityGrade::Vs1 => "VS1",
            ClarityGrade::Vs2 => "VS2",
            ClarityGrade::Si1 => "SI1",
            ClarityGrade::Si2 => "SI2",
            ClarityGrade::Si3 => "SI3",
            ClarityGrade::I1 => "I1",
            ClarityGrade::I2 => "I2",
            ClarityGrade::I3 => "I3",
        }
    }

    /// Next (worse) grade, saturating at `I3`.
    pub fn next(self) -> Self {
        step(&Self::ALL, self, 1)
    }

    /// Previous (better) grade, saturating at `IF`.
    pub fn prev(self) -> Self {
        step(&Self::ALL, self, -1)
    }
}

impl fmt::Display for ClarityGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ClarityGrade {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|g| g.code().eq_ignore_ascii_case(needle))
            .ok_or_else(|| {
                AppError::input(format!("Unknown clarity grade '{needle}' (expected IF..I3)."))
            })
    }
}

/// Color bucket used by the small-stone (grouped) tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ColorGroup {
    #[serde(rename = "D-F")]
    DF,
    #[serde(rename = "G-H")]
    GH,
    #[serde(rename = "I-J")]
    IJ,
    #[serde(rename = "K-L")]
    KL,
    #[serde(rename = "M-N")]
    MN,
}

impl ColorGroup {
    pub const ALL: [ColorGroup; 5] = [
        ColorGroup::DF,
        ColorGroup::GH,
        ColorGroup::IJ,
        ColorGroup::KL,
        ColorGroup::MN,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ColorGroup::DF => "D-F",
            ColorGroup::GH => "G-H",
            ColorGroup::IJ => "I-J",
            ColorGroup::KL => "K-L",
            ColorGroup::MN => "M-N",
        }
    }
}

impl fmt::Display for ColorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Clarity bucket used by the small-stone (grouped) tables.
///
/// `IF`/`VVS1`/`VVS2` and `VS1`/`VS2` collapse; the remaining grades map to
/// themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClarityGroup {
    #[serde(rename = "IF-VVS")]
    IfVvs,
    #[serde(rename = "VS")]
    Vs,
    #[serde(rename = "SI1")]
    Si1,
    #[serde(rename = "SI2")]
    Si2,
    #[serde(rename = "SI3")]
    Si3,
    #[serde(rename = "I1")]
    I1,
    #[serde(rename = "I2")]
    I2,
    #[serde(rename = "I3")]
    I3,
}

impl ClarityGroup {
    pub const ALL: [ClarityGroup; 8] = [
        ClarityGroup::IfVvs,
        ClarityGroup::Vs,
        ClarityGroup::Si1,
        ClarityGroup::Si2,
        ClarityGroup::Si3,
        ClarityGroup::I1,
        ClarityGroup::I2,
        ClarityGroup::I3,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ClarityGroup::IfVvs => "IF-VVS",
            ClarityGroup::Vs => "VS",
            ClarityGroup::Si1 => "SI1",
            ClarityGroup::Si2 => "SI2",
            ClarityGroup::Si3 => "SI3",
            ClarityGroup::I1 => "I1",
            ClarityGroup::I2 => "I2",
            ClarityGroup::I3 => "I3",
        }
    }
}

impl fmt::Display for ClarityGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Closed carat interval `[min, max]`, written `"0.01-0.03"`.
///
/// Serialized as its string form so it can key the price table directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CaratRange {
    pub min: f64,
    pub max: f64,
}

impl CaratRange {
    pub fn contains(&self, carat: f64) -> bool {
        carat >= self.min && carat <= self.max
    }

    pub fn overlaps(&self, other: &CaratRange) -> bool {
        self.min <= other.max && other.min <= self.max
    }
}

impl fmt::Display for CaratRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}-{:.2}", self.min, self.max)
    }
}

impl FromStr for CaratRange {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::input(format!("Invalid carat range '{s}' (expected e.g. 0.30-0.39)."));
        let (lo, hi) = s.trim().split_once('-').ok_or_else(invalid)?;
        let min = lo.trim().parse::<f64>().map_err(|_| invalid())?;
        let max = hi.trim().parse::<f64>().map_err(|_| invalid())?;
        if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
            return Err(invalid());
        }
        Ok(Self { min, max })
    }
}

impl From<CaratRange> for String {
    fn from(value: CaratRange) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for CaratRange {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Multiplier applied to the seller price typed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PriceUnit {
    /// × 100,000.
    #[default]
    Lakh,
    /// × 1,000.
    Thousand,
}

impl PriceUnit {
    pub fn multiplier(self) -> f64 {
        match self {
            PriceUnit::Lakh => 100_000.0,
            PriceUnit::Thousand => 1_000.0,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            PriceUnit::Lakh => "L",
            PriceUnit::Thousand => "K",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            PriceUnit::Lakh => PriceUnit::Thousand,
            PriceUnit::Thousand => PriceUnit::Lakh,
        }
    }
}

fn step<T: Copy + PartialEq>(all: &[T], cur: T, delta: isize) -> T {
    let idx = all.iter().position(|g| *g == cur).unwrap_or(0);
    let last = all.len().saturating_sub(1) as isize;
    let next = (idx as isize + delta).clamp(0, last) as usize;
    all[next]
}
