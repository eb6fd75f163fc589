//! Balance & other-charges resolver
//!
//! The percent adjustment is anchored to the final price of the path (not
//! to final price minus today's payment). Balances may go negative on
//! overpayment and are not clamped.

use rust_decimal::Decimal;
use shared::OrderDraft;

use super::money::{percent_of, round2, to_decimal};
use super::rates::PricingRates;

/// Balance figures of one path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathBalance {
    pub percent_adjustment: Decimal,
    pub total_balance: Decimal,
    pub balance_due: Decimal,
}

/// iWellness fee plus the two flat other charges
pub fn additional_charges(draft: &OrderDraft, rates: &PricingRates) -> Decimal {
    let iwellness = if draft.iwellness_selected {
        rates.iwellness_fee
    } else {
        Decimal::ZERO
    };
    round2(
        iwellness
            + to_decimal(draft.other_charge_1.price)
            + to_decimal(draft.other_charge_2.price),
    )
}

/// Resolve the balance of one path from its final price
pub fn resolve_balance(
    final_price: Decimal,
    percent: Decimal,
    additional: Decimal,
    payment_today: Decimal,
) -> PathBalance {
    let percent_adjustment = round2(percent_of(final_price, percent));
    let total_balance = round2(final_price - percent_adjustment + additional);
    let balance_due = round2(total_balance - payment_today);

    PathBalance {
        percent_adjustment,
        total_balance,
        balance_due,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::to_f64;
    use shared::OtherCharge;

    #[test]
    fn test_additional_charges() {
        let mut draft = OrderDraft::default();
        assert_eq!(additional_charges(&draft, &PricingRates::default()), Decimal::ZERO);

        draft.iwellness_selected = true;
        draft.other_charge_1 = OtherCharge::new("Rush", 25.0);
        draft.other_charge_2 = OtherCharge::new("Case", 7.5);
        let total = additional_charges(&draft, &PricingRates::default());
        assert_eq!(to_f64(total), 71.5);
    }

    #[test]
    fn test_percent_anchored_to_final_price() {
        // 10% of 413.33 = 41.333 -> 41.33, not 10% of (413.33 - 100)
        let b = resolve_balance(
            Decimal::new(41333, 2),
            Decimal::TEN,
            Decimal::ZERO,
            Decimal::new(100, 0),
        );
        assert_eq!(to_f64(b.percent_adjustment), 41.33);
        assert_eq!(to_f64(b.total_balance), 372.0);
        assert_eq!(to_f64(b.balance_due), 272.0);
    }

    #[test]
    fn test_additional_charges_not_discounted() {
        let b = resolve_balance(
            Decimal::new(100, 0),
            Decimal::new(50, 0),
            Decimal::new(39, 0),
            Decimal::ZERO,
        );
        assert_eq!(to_f64(b.percent_adjustment), 50.0);
        assert_eq!(to_f64(b.total_balance), 89.0);
    }

    #[test]
    fn test_overpayment_goes_negative() {
        let b = resolve_balance(
            Decimal::new(80, 0),
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::new(100, 0),
        );
        assert_eq!(to_f64(b.balance_due), -20.0);
    }
}
