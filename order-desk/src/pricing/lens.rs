//! Lens Charge Aggregator
//!
//! Sums per-category lens prices into a regular and an insurance total.

use rust_decimal::Decimal;
use shared::LensSelections;

use super::money::{round2, to_decimal};

/// Lens totals for both paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LensTotals {
    pub regular: Decimal,
    pub insurance: Decimal,
}

/// Aggregate lens selections
///
/// The regular price of every selection counts. The insurance price only
/// counts when it is set: an unset insurance price contributes zero, it
/// does not fall back to the regular price. Negative prices pass through.
pub fn aggregate_lens_charges(selections: &LensSelections) -> LensTotals {
    let (regular, insurance) = selections.values().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(regular, insurance), sel| {
            let insurance_price = sel.insurance_price.map(to_decimal).unwrap_or_default();
            (
                regular + to_decimal(sel.regular_price),
                insurance + insurance_price,
            )
        },
    );

    LensTotals {
        regular: round2(regular),
        insurance: round2(insurance),
    }
}
