//! Reference data: the bundled per-carat price table.

pub mod table;

pub use table::{PriceTable, RangeEntry, RangeTable};
