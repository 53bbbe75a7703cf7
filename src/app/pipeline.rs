//! Shared quote evaluation used by both CLI and TUI front-ends.
//!
//! Quote snapshot -> range/cell lookup -> reference total -> comparison.
//!
//! The CLI and the TUI only differ in how they present the [`Evaluation`].

use serde::Serialize;

use crate::calc::{self, DiscountTier, Verdict};
use crate::data::PriceTable;
use crate::domain::Quote;
use crate::lookup::{self, PriceLookup};

/// Everything derived from a single quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub quote: Quote,
    /// Table hit, when the carat is priced and the cell exists.
    pub lookup: Option<PriceLookup>,
    /// Reference ("rap") total in whole currency units.
    pub reference_total: Option<f64>,
    pub seller_price_per_carat: Option<f64>,
    pub percentage_difference: f64,
    pub verdict: Verdict,
    /// Empty when there is no reference total.
    pub tiers: Vec<DiscountTier>,
}

impl Evaluation {
    pub fn has_reference(&self) -> bool {
        self.reference_total.is_some()
    }
}

/// Evaluate a quote against the table. Never fails.
pub fn evaluate(table: &PriceTable, quote: &Quote) -> Evaluation {
    let lookup = quote
        .carat
        .and_then(|carat| lookup::lookup_price(table, carat, quote.color, quote.clarity));

    let reference_total = match (&lookup, quote.carat) {
        (Some(hit), Some(carat)) => Some(calc::reference_total(carat, hit.price_per_carat)),
        _ => None,
    };

    let percentage_difference =
        calc::percentage_difference(quote.seller_price, reference_total.unwrap_or(0.0));
    let tiers = reference_total
        .map(|r| calc::discount_tiers(r).to_vec())
        .unwrap_or_default();

    let evaluation = Evaluation {
        quote: *quote,
        seller_price_per_carat: calc::seller_price_per_carat(quote.seller_price, quote.carat),
        lookup,
        reference_total,
        percentage_difference,
        verdict: Verdict::classify(percentage_difference),
        tiers,
    };

    tracing::debug!(
        carat = ?quote.carat,
        color = %quote.color,
        clarity = %quote.clarity,
        reference = ?evaluation.reference_total,
        pct = evaluation.percentage_difference,
        "evaluated quote"
    );

    evaluation
}
