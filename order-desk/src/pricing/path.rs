//! Dual-path pricing pipeline
//!
//! The regular and insurance paths run through the same function with a
//! different [`PathInput`], so the two can never diverge in step order or
//! rounding.
//!
//! # Calculation Steps
//! 1. `base = frame_price + lens_charges`
//! 2. `after_copay = base + material_copay`
//! 3. `sales_tax = after_copay * sales_tax_rate`
//! 4. `you_pay = after_copay + sales_tax + other_charges_adjustment`
//! 5. `final_price = you_pay + warranty_price`
//!
//! Each step is rounded to 2 decimal places before the next consumes it.

use rust_decimal::Decimal;

use super::money::round2;
use super::rates::PricingRates;

/// Per-path starting prices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathInput {
    pub frame_price: Decimal,
    pub lens_charges: Decimal,
}

/// Charges added identically to both paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SharedCharges {
    pub material_copay: Decimal,
    /// Flat, may be negative
    pub other_charges_adjustment: Decimal,
    pub warranty_price: Decimal,
}

/// Intermediate and final prices of one path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathPricing {
    pub base: Decimal,
    pub after_copay: Decimal,
    pub sales_tax: Decimal,
    pub you_pay: Decimal,
    pub final_price: Decimal,
}

/// Run one path through the pipeline
pub fn price_path(input: PathInput, shared: &SharedCharges, rates: &PricingRates) -> PathPricing {
    let base = round2(input.frame_price + input.lens_charges);
    let after_copay = round2(base + shared.material_copay);
    // Tax is on the copay-inclusive amount
    let sales_tax = round2(after_copay * rates.sales_tax_rate);
    let you_pay = round2(after_copay + sales_tax + shared.other_charges_adjustment);
    let final_price = round2(you_pay + shared.warranty_price);

    PathPricing {
        base,
        after_copay,
        sales_tax,
        you_pay,
        final_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::{to_decimal, to_f64};

    fn input(frame: f64, lens: f64) -> PathInput {
        PathInput {
            frame_price: to_decimal(frame),
            lens_charges: to_decimal(lens),
        }
    }

    fn shared(copay: f64, adjustment: f64, warranty: f64) -> SharedCharges {
        SharedCharges {
            material_copay: to_decimal(copay),
            other_charges_adjustment: to_decimal(adjustment),
            warranty_price: to_decimal(warranty),
        }
    }

    #[test]
    fn test_regular_path_pipeline() {
        let p = price_path(input(200.0, 150.0), &shared(20.0, 0.0, 35.0), &PricingRates::default());
        assert_eq!(to_f64(p.base), 350.0);
        assert_eq!(to_f64(p.after_copay), 370.0);
        // 370 * 0.0225 = 8.325 -> 8.33
        assert_eq!(to_f64(p.sales_tax), 8.33);
        assert_eq!(to_f64(p.you_pay), 378.33);
        assert_eq!(to_f64(p.final_price), 413.33);
    }

    #[test]
    fn test_insurance_path_pipeline() {
        let p = price_path(input(135.0, 100.0), &shared(20.0, 0.0, 35.0), &PricingRates::default());
        assert_eq!(to_f64(p.base), 235.0);
        assert_eq!(to_f64(p.after_copay), 255.0);
        // 255 * 0.0225 = 5.7375 -> 5.74
        assert_eq!(to_f64(p.sales_tax), 5.74);
        assert_eq!(to_f64(p.you_pay), 260.74);
        assert_eq!(to_f64(p.final_price), 295.74);
    }

    #[test]
    fn test_adjustment_is_not_taxed() {
        let without = price_path(input(100.0, 0.0), &shared(0.0, 0.0, 0.0), &PricingRates::default());
        let with = price_path(input(100.0, 0.0), &shared(0.0, -10.0, 0.0), &PricingRates::default());
        assert_eq!(without.sales_tax, with.sales_tax);
        assert_eq!(to_f64(with.you_pay), to_f64(without.you_pay) - 10.0);
    }

    #[test]
    fn test_custom_tax_rate() {
        let rates = PricingRates {
            sales_tax_rate: Decimal::new(5, 2),
            ..Default::default()
        };
        let p = price_path(input(100.0, 0.0), &shared(0.0, 0.0, 0.0), &rates);
        assert_eq!(to_f64(p.sales_tax), 5.0);
        assert_eq!(to_f64(p.final_price), 105.0);
    }
}
