//! Quote input snapshots.
//!
//! The presentation layer owns a mutable [`QuoteInput`] (raw text as typed);
//! calculations only ever see the immutable [`Quote`] derived from it.

use serde::{Deserialize, Serialize};

use super::types::{ClarityGrade, ColorGrade, PriceUnit};

/// Raw user input, as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteInput {
    pub carat_text: String,
    pub price_text: String,
    pub price_unit: PriceUnit,
    pub color: ColorGrade,
    pub clarity: ClarityGrade,
}

impl Default for QuoteInput {
    fn default() -> Self {
        Self {
            carat_text: String::new(),
            price_text: String::new(),
            price_unit: PriceUnit::Lakh,
            color: ColorGrade::D,
            clarity: ClarityGrade::If,
        }
    }
}

impl QuoteInput {
    /// Normalize the raw text into a calculation snapshot.
    pub fn snapshot(&self) -> Quote {
        Quote {
            carat: parse_carat(&self.carat_text),
            seller_price: parse_price(&self.price_text, self.price_unit),
            color: self.color,
            clarity: self.clarity,
        }
    }
}

/// Immutable input to a single evaluation.
///
/// `None` means the field was empty or unusable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub carat: Option<f64>,
    /// Seller's asking price in whole currency units (unit multiplier applied).
    pub seller_price: Option<f64>,
    pub color: ColorGrade,
    pub clarity: ClarityGrade,
}

/// Parse a carat weight. Accepts `,` as the decimal separator.
///
/// Returns `None` for empty, non-numeric, non-finite, or non-positive input.
pub fn parse_carat(text: &str) -> Option<f64> {
    parse_decimal(text).filter(|v| *v > 0.0)
}

/// Parse a seller price and apply the unit multiplier.
///
/// Negative prices are rejected; `0` is kept (and treated as "no price" downstream).
pub fn parse_price(text: &str, unit: PriceUnit) -> Option<f64> {
    parse_decimal(text)
        .filter(|v| *v >= 0.0)
        .map(|v| v * unit.multiplier())
}

fn parse_decimal(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = trimmed.replace(',', ".");
    let v = normalized.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carat_accepts_comma_separator() {
        assert_eq!(parse_carat("1,20"), Some(1.2));
        assert_eq!(parse_carat(" 0.5 "), Some(0.5));
    }

    #[test]
    fn carat_rejects_unusable_input() {
        assert_eq!(parse_carat(""), None);
        assert_eq!(parse_carat("   "), None);
        assert_eq!(parse_carat("abc"), None);
        assert_eq!(parse_carat("0"), None);
        assert_eq!(parse_carat("-1"), None);
        assert_eq!(parse_carat("inf"), None);
        assert_eq!(parse_carat("NaN"), None);
        assert_eq!(parse_carat("1,2,3"), None);
    }

    #[test]
    fn price_applies_unit_multiplier() {
        assert_eq!(parse_price("2.5", PriceUnit::Lakh), Some(250_000.0));
        assert_eq!(parse_price("2,5", PriceUnit::Thousand), Some(2_500.0));
        assert_eq!(parse_price("0", PriceUnit::Lakh), Some(0.0));
        assert_eq!(parse_price("-3", PriceUnit::Lakh), None);
        assert_eq!(parse_price("", PriceUnit::Thousand), None);
    }

    #[test]
    fn snapshot_carries_grades_through() {
        let input = QuoteInput {
            carat_text: "1.2".to_string(),
            price_text: "3".to_string(),
            price_unit: PriceUnit::Lakh,
            color: ColorGrade::G,
            clarity: ClarityGrade::Vs2,
        };
        let quote = input.snapshot();
        assert_eq!(quote.carat, Some(1.2));
        assert_eq!(quote.seller_price, Some(300_000.0));
        assert_eq!(quote.color, ColorGrade::G);
        assert_eq!(quote.clarity, ClarityGrade::Vs2);
    }

    #[test]
    fn default_input_is_empty_d_if() {
        let quote = QuoteInput::default().snapshot();
        assert_eq!(quote.carat, None);
        assert_eq!(quote.seller_price, None);
        assert_eq!(quote.color, ColorGrade::D);
        assert_eq!(quote.clarity, ClarityGrade::If);
    }
}
