//! Warranty copay disclosure
//!
//! What the customer would pay to replace the frame or lenses under the
//! warranty. Shown on the order, never added to a payable total.

use rust_decimal::Decimal;
use shared::Warranty;

use super::money::round2;
use super::rates::PricingRates;

/// Replacement copays for a selected warranty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplacementCopays {
    pub frame: Decimal,
    pub lens: Decimal,
}

/// Compute the disclosure, or `None` when no warranty is selected
pub fn replacement_copays(
    warranty: &Warranty,
    frame_list_price: Decimal,
    lens_charges_regular: Decimal,
    rates: &PricingRates,
) -> Option<ReplacementCopays> {
    if !warranty.is_selected() {
        return None;
    }

    Some(ReplacementCopays {
        frame: round2(frame_list_price * rates.warranty_copay_rate),
        lens: round2(lens_charges_regular * rates.warranty_copay_rate),
    })
}
