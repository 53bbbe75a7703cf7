//! Comparison arithmetic: reference totals, seller premium/discount, and
//! discounted reference tiers.
//!
//! Every function here is total. Divide-by-zero and missing inputs resolve to
//! `0` or `None`, never to `NaN`.

use serde::Serialize;

/// Table prices are stored in hundreds of currency units per carat.
pub const TABLE_PRICE_SCALE: f64 = 100.0;

/// Divisor applied to the seller's total (together with the carat weight) to
/// get the per-carat figure on the quote line.
pub const SELLER_RATE_DIVISOR: f64 = 88.5;

/// Reference discount tiers as (percent off, multiplier).
pub const DISCOUNT_TIERS: [(u8, f64); 3] = [(10, 0.9), (20, 0.8), (30, 0.7)];

/// Differences at or below this percentage count as a real discount.
pub const DISCOUNT_THRESHOLD_PCT: f64 = -20.0;

/// Where a seller's price sits relative to the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Above the reference.
    Premium,
    /// Between the reference and the discount threshold.
    Amber,
    /// At or below the discount threshold.
    Discount,
}

impl Verdict {
    pub fn classify(percentage: f64) -> Self {
        if percentage > 0.0 {
            Verdict::Premium
        } else if percentage > DISCOUNT_THRESHOLD_PCT {
            Verdict::Amber
        } else {
            Verdict::Discount
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Verdict::Premium => "premium",
            Verdict::Amber => "amber",
            Verdict::Discount => "discount",
        }
    }
}

/// One discounted reference price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiscountTier {
    pub percent_off: u8,
    pub amount: f64,
}

impl DiscountTier {
    pub fn label(&self) -> String {
        format!("-{}%", self.percent_off)
    }
}

/// Reference total for a stone: `price_per_carat × 100 × carat`.
pub fn reference_total(carat: f64, price_per_carat: f64) -> f64 {
    price_per_carat * TABLE_PRICE_SCALE * carat
}

/// `(seller − reference) / reference × 100`.
///
/// Defined as `0` when the seller price is missing or zero, or when the
/// reference is zero.
pub fn percentage_difference(seller_price: Option<f64>, reference: f64) -> f64 {
    let Some(seller) = seller_price.filter(|p| *p != 0.0 && p.is_finite()) else {
        return 0.0;
    };
    if reference == 0.0 || !reference.is_finite() {
        return 0.0;
    }
    (seller - reference) / reference * 100.0
}

/// `seller / (88.5 × carat)`; `None` without a usable price and carat.
pub fn seller_price_per_carat(seller_price: Option<f64>, carat: Option<f64>) -> Option<f64> {
    let seller = seller_price.filter(|p| *p != 0.0 && p.is_finite())?;
    let carat = carat.filter(|c| *c > 0.0 && c.is_finite())?;
    Some(seller / (SELLER_RATE_DIVISOR * carat))
}

/// The -10/-20/-30% reference prices, in that order.
pub fn discount_tiers(reference: f64) -> [DiscountTier; 3] {
    DISCOUNT_TIERS.map(|(percent_off, factor)| DiscountTier {
        percent_off,
        amount: reference * factor,
    })
}

/// `'-'` for negative differences, `'+'` otherwise.
pub fn sign(percentage: f64) -> char {
    if percentage < 0.0 { '-' } else { '+' }
}

pub fn direction(percentage: f64) -> &'static str {
    if percentage < 0.0 { "below" } else { "above" }
}
