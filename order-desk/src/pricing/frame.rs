//! Frame Pricing Resolver
//!
//! Final frame price = (list price - allowance) less a percentage discount
//! of that post-allowance amount. Results are not clamped at zero.

use rust_decimal::Decimal;
use shared::FrameInput;

use super::money::{percent_of, round2, to_decimal};

/// Resolved frame prices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePricing {
    /// List price actually used (zero for an own frame)
    pub list_price: Decimal,
    /// Price after allowance and discount (insurance-path frame price)
    pub final_price: Decimal,
    /// `list_price - final_price`
    pub you_saved: Decimal,
}

/// Resolve the frame section of a draft
pub fn resolve_frame(frame: &FrameInput) -> FramePricing {
    if frame.uses_own_frame {
        return FramePricing {
            list_price: Decimal::ZERO,
            final_price: Decimal::ZERO,
            you_saved: Decimal::ZERO,
        };
    }

    let list_price = to_decimal(frame.list_price);
    let allowance = to_decimal(frame.allowance);
    let discount_pct = to_decimal(frame.discount_percent);

    // Discount applies to the post-allowance amount, not the list price
    let after_allowance = list_price - allowance;
    let discount_amount = percent_of(after_allowance, discount_pct);
    let final_price = round2(after_allowance - discount_amount);

    FramePricing {
        list_price,
        final_price,
        you_saved: round2(list_price - final_price),
    }
}
