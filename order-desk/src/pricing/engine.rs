//! Pricing Engine
//!
//! Entry point of the calculator. Wires frame, lens, path, warranty and
//! balance steps together and converts the result to the serialized
//! [`PriceBreakdown`].

use shared::{OrderDraft, PriceBreakdown, WarrantyDisclosure};

use super::balance::{additional_charges, resolve_balance};
use super::frame::resolve_frame;
use super::legacy::reconcile_regular_lens_total;
use super::lens::aggregate_lens_charges;
use super::money::{to_decimal, to_f64};
use super::path::{PathInput, SharedCharges, price_path};
use super::rates::PricingRates;
use super::warranty::replacement_copays;

/// Compute the breakdown with the default shop rates
pub fn compute_pricing(draft: &OrderDraft) -> PriceBreakdown {
    compute_pricing_with(draft, &PricingRates::default())
}

/// Compute the breakdown with explicit rates
///
/// Pure: identical drafts give bit-identical breakdowns.
pub fn compute_pricing_with(draft: &OrderDraft, rates: &PricingRates) -> PriceBreakdown {
    // Step 1: Frame
    let frame = resolve_frame(&draft.frame);

    // Step 2: Lenses (legacy fallback only touches the regular total)
    let lens = aggregate_lens_charges(&draft.lens_selections);
    let lens_regular = reconcile_regular_lens_total(lens.regular, &draft.legacy_lens_prices);
    let lens_insurance = lens.insurance;

    // Step 3: Both paths through the same pipeline
    let shared = SharedCharges {
        material_copay: to_decimal(draft.material_copay),
        other_charges_adjustment: to_decimal(draft.other_charges_adjustment),
        warranty_price: to_decimal(draft.warranty.price),
    };
    let regular = price_path(
        PathInput {
            frame_price: frame.list_price,
            lens_charges: lens_regular,
        },
        &shared,
        rates,
    );
    let insurance = price_path(
        PathInput {
            frame_price: frame.final_price,
            lens_charges: lens_insurance,
        },
        &shared,
        rates,
    );

    // Step 4: Warranty disclosure (informational)
    let disclosure = replacement_copays(&draft.warranty, frame.list_price, lens_regular, rates)
        .map(|c| WarrantyDisclosure {
            frame_replacement_copay: to_f64(c.frame),
            lens_replacement_copay: to_f64(c.lens),
        });

    // Step 5: Balances
    let additional = additional_charges(draft, rates);
    let percent = to_decimal(draft.other_percent_adjustment);
    let payment_today = to_decimal(draft.payment_today);
    let regular_balance = resolve_balance(regular.final_price, percent, additional, payment_today);
    let insurance_balance =
        resolve_balance(insurance.final_price, percent, additional, payment_today);

    tracing::debug!(
        final_price_regular = %regular.final_price,
        final_price_insurance = %insurance.final_price,
        balance_due_regular = %regular_balance.balance_due,
        balance_due_insurance = %insurance_balance.balance_due,
        "Order priced"
    );

    PriceBreakdown {
        final_frame_price: to_f64(frame.final_price),
        you_saved: to_f64(frame.you_saved),
        total_lens_charges_regular: to_f64(lens_regular),
        total_lens_charges_insurance: to_f64(lens_insurance),
        regular_price: to_f64(regular.base),
        insurance_regular_price: to_f64(insurance.base),
        after_copay_regular: to_f64(regular.after_copay),
        after_copay_insurance: to_f64(insurance.after_copay),
        sales_tax_regular: to_f64(regular.sales_tax),
        sales_tax_insurance: to_f64(insurance.sales_tax),
        you_pay_regular: to_f64(regular.you_pay),
        you_pay_insurance: to_f64(insurance.you_pay),
        final_price_regular: to_f64(regular.final_price),
        final_price_insurance: to_f64(insurance.final_price),
        additional_charges: to_f64(additional),
        percent_adjustment_regular: to_f64(regular_balance.percent_adjustment),
        percent_adjustment_insurance: to_f64(insurance_balance.percent_adjustment),
        total_balance_regular: to_f64(regular_balance.total_balance),
        total_balance_insurance: to_f64(insurance_balance.total_balance),
        balance_due_regular: to_f64(regular_balance.balance_due),
        balance_due_insurance: to_f64(insurance_balance.balance_due),
        warranty_disclosure: disclosure,
    }
}

/// Calculator bound to a set of rates
///
/// Holds no other state; cheap to copy into whichever service needs it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PricingEngine {
    rates: PricingRates,
}

impl PricingEngine {
    pub fn new(rates: PricingRates) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &PricingRates {
        &self.rates
    }

    pub fn price(&self, draft: &OrderDraft) -> PriceBreakdown {
        compute_pricing_with(draft, &self.rates)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{FrameInput, LensSelection, OtherCharge, Warranty};

    /// 200 list / 50 allowance / 10% discount frame, one lens at 150/100,
    /// $20 copay, $35 warranty, $100 paid today
    fn scenario_a() -> OrderDraft {
        let mut draft = OrderDraft {
            frame: FrameInput {
                list_price: 200.0,
                allowance: 50.0,
                discount_percent: 10.0,
                ..Default::default()
            },
            warranty: Warranty::new("1 Year", 35.0),
            material_copay: 20.0,
            payment_today: 100.0,
            ..Default::default()
        };
        draft.select_lens("lens_type", LensSelection::new("progressive", 150.0, Some(100.0)));
        draft
    }

    #[test]
    fn test_scenario_a_full_breakdown() {
        let b = compute_pricing(&scenario_a());

        assert_eq!(b.final_frame_price, 135.0);
        assert_eq!(b.you_saved, 65.0);
        assert_eq!(b.total_lens_charges_regular, 150.0);
        assert_eq!(b.total_lens_charges_insurance, 100.0);

        assert_eq!(b.regular_price, 350.0);
        assert_eq!(b.after_copay_regular, 370.0);
        assert_eq!(b.sales_tax_regular, 8.33);
        assert_eq!(b.you_pay_regular, 378.33);
        assert_eq!(b.final_price_regular, 413.33);

        assert_eq!(b.insurance_regular_price, 235.0);
        assert_eq!(b.after_copay_insurance, 255.0);
        assert_eq!(b.sales_tax_insurance, 5.74);
        assert_eq!(b.you_pay_insurance, 260.74);
        assert_eq!(b.final_price_insurance, 295.74);

        assert_eq!(b.percent_adjustment_regular, 0.0);
        assert_eq!(b.total_balance_regular, 413.33);
        assert_eq!(b.balance_due_regular, 313.33);
        assert_eq!(b.total_balance_insurance, 295.74);
        assert_eq!(b.balance_due_insurance, 195.74);
    }

    #[test]
    fn test_scenario_a_warranty_disclosure_is_informational() {
        let b = compute_pricing(&scenario_a());
        let d = b.warranty_disclosure.expect("warranty selected");
        assert_eq!(d.frame_replacement_copay, 30.0);
        assert_eq!(d.lens_replacement_copay, 22.5);
        // Not part of any payable figure
        assert_eq!(b.total_balance_regular, b.final_price_regular);
    }

    #[test]
    fn test_own_frame_ignores_list_price() {
        let mut draft = scenario_a();
        draft.frame.uses_own_frame = true;
        let b = compute_pricing(&draft);

        assert_eq!(b.final_frame_price, 0.0);
        assert_eq!(b.you_saved, 0.0);
        assert_eq!(b.regular_price, 150.0);
        assert_eq!(b.insurance_regular_price, 100.0);
        assert_eq!(b.warranty_disclosure.unwrap().frame_replacement_copay, 0.0);
    }

    #[test]
    fn test_no_warranty() {
        let mut draft = scenario_a();
        draft.warranty = Warranty::default();
        let b = compute_pricing(&draft);

        assert!(b.warranty_disclosure.is_none());
        assert_eq!(b.final_price_regular, b.you_pay_regular);
        assert_eq!(b.final_price_insurance, b.you_pay_insurance);
    }

    #[test]
    fn test_allowance_overflow_is_unclamped() {
        let draft = OrderDraft {
            frame: FrameInput {
                list_price: 50.0,
                allowance: 80.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let b = compute_pricing(&draft);
        assert_eq!(b.final_frame_price, -30.0);
        assert_eq!(b.insurance_regular_price, -30.0);
        assert_eq!(b.you_saved, 80.0);
    }

    #[test]
    fn test_other_charges_and_percent() {
        let mut draft = scenario_a();
        draft.other_percent_adjustment = 10.0;
        draft.iwellness_selected = true;
        draft.other_charge_1 = OtherCharge::new("Rush", 20.0);
        let b = compute_pricing(&draft);

        assert_eq!(b.additional_charges, 59.0);
        // 413.33 * 10% = 41.333 -> 41.33
        assert_eq!(b.percent_adjustment_regular, 41.33);
        assert_eq!(b.total_balance_regular, 431.0);
        assert_eq!(b.balance_due_regular, 331.0);
        // 295.74 * 10% = 29.574 -> 29.57
        assert_eq!(b.percent_adjustment_insurance, 29.57);
        assert_eq!(b.total_balance_insurance, 325.17);
        assert_eq!(b.balance_due_insurance, 225.17);
    }

    #[test]
    fn test_idempotent() {
        let draft = scenario_a();
        let a = compute_pricing(&draft);
        let b = compute_pricing(&draft);
        assert_eq!(a, b);
        for ((_, x), (_, y)) in a.amounts().iter().zip(b.amounts().iter()) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    #[test]
    fn test_unvalidated_non_finite_inputs_count_as_zero() {
        let mut draft = OrderDraft::default();
        draft.frame.list_price = 100.0;
        draft.material_copay = f64::INFINITY;
        draft.payment_today = f64::NAN;

        let b = compute_pricing(&draft);
        assert_eq!(b.after_copay_regular, 100.0);
        assert_eq!(b.final_price_regular, 102.25);
        assert_eq!(b.balance_due_regular, 102.25);
        // The validation boundary rejects the same draft
        assert!(crate::orders::validate_draft(&draft).is_err());
    }

    #[test]
    fn test_legacy_columns_raise_regular_lens_total_only() {
        let mut draft = scenario_a();
        draft
            .legacy_lens_prices
            .insert("lens_price".to_string(), 180.0);
        let b = compute_pricing(&draft);
        assert_eq!(b.total_lens_charges_regular, 180.0);
        assert_eq!(b.total_lens_charges_insurance, 100.0);
        assert_eq!(b.regular_price, 380.0);
    }

    #[test]
    fn test_engine_uses_its_rates() {
        let engine = PricingEngine::new(PricingRates {
            sales_tax_rate: rust_decimal::Decimal::ZERO,
            ..Default::default()
        });
        let b = engine.price(&scenario_a());
        assert_eq!(b.sales_tax_regular, 0.0);
        assert_eq!(b.final_price_regular, 405.0);
    }
}
