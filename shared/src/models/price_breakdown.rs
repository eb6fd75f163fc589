//! Price Breakdown Model
//!
//! Output of the pricing calculator. Every amount is already rounded to
//! 2 decimal places. The breakdown has no identity of its own: it is
//! recomputed from the draft on every call and only persisted as columns
//! of an [`OrderRecord`](super::OrderRecord).

use serde::{Deserialize, Serialize};

/// Replacement copays disclosed to the customer when a warranty is sold.
/// Informational only, never part of any payable total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WarrantyDisclosure {
    pub frame_replacement_copay: f64,
    pub lens_replacement_copay: f64,
}

/// Regular (self-pay) and insurance price paths plus balances
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceBreakdown {
    // Frame
    /// Frame price after allowance and discount
    pub final_frame_price: f64,
    /// Frame list price minus final frame price
    pub you_saved: f64,

    // Lenses
    pub total_lens_charges_regular: f64,
    pub total_lens_charges_insurance: f64,

    // Pre-tax subtotals
    pub regular_price: f64,
    pub insurance_regular_price: f64,
    pub after_copay_regular: f64,
    pub after_copay_insurance: f64,

    // Tax
    pub sales_tax_regular: f64,
    pub sales_tax_insurance: f64,

    // Post-tax, pre-warranty
    pub you_pay_regular: f64,
    pub you_pay_insurance: f64,

    // Post-warranty
    pub final_price_regular: f64,
    pub final_price_insurance: f64,

    // Other charges and balances
    pub additional_charges: f64,
    pub percent_adjustment_regular: f64,
    pub percent_adjustment_insurance: f64,
    pub total_balance_regular: f64,
    pub total_balance_insurance: f64,
    pub balance_due_regular: f64,
    pub balance_due_insurance: f64,

    /// Present only when a warranty plan is selected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warranty_disclosure: Option<WarrantyDisclosure>,
}

impl PriceBreakdown {
    /// Every monetary field, named, in declaration order
    pub fn amounts(&self) -> Vec<(&'static str, f64)> {
        let mut amounts = vec![
            ("final_frame_price", self.final_frame_price),
            ("you_saved", self.you_saved),
            ("total_lens_charges_regular", self.total_lens_charges_regular),
            ("total_lens_charges_insurance", self.total_lens_charges_insurance),
            ("regular_price", self.regular_price),
            ("insurance_regular_price", self.insurance_regular_price),
            ("after_copay_regular", self.after_copay_regular),
            ("after_copay_insurance", self.after_copay_insurance),
            ("sales_tax_regular", self.sales_tax_regular),
            ("sales_tax_insurance", self.sales_tax_insurance),
            ("you_pay_regular", self.you_pay_regular),
            ("you_pay_insurance", self.you_pay_insurance),
            ("final_price_regular", self.final_price_regular),
            ("final_price_insurance", self.final_price_insurance),
            ("additional_charges", self.additional_charges),
            ("percent_adjustment_regular", self.percent_adjustment_regular),
            ("percent_adjustment_insurance", self.percent_adjustment_insurance),
            ("total_balance_regular", self.total_balance_regular),
            ("total_balance_insurance", self.total_balance_insurance),
            ("balance_due_regular", self.balance_due_regular),
            ("balance_due_insurance", self.balance_due_insurance),
        ];
        if let Some(d) = &self.warranty_disclosure {
            amounts.push(("frame_replacement_copay", d.frame_replacement_copay));
            amounts.push(("lens_replacement_copay", d.lens_replacement_copay));
        }
        amounts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amounts_include_disclosure_only_when_present() {
        let mut breakdown = PriceBreakdown::default();
        assert_eq!(breakdown.amounts().len(), 21);

        breakdown.warranty_disclosure = Some(WarrantyDisclosure {
            frame_replacement_copay: 30.0,
            lens_replacement_copay: 22.5,
        });
        let amounts = breakdown.amounts();
        assert_eq!(amounts.len(), 23);
        assert_eq!(amounts[22], ("lens_replacement_copay", 22.5));
    }

    #[test]
    fn test_disclosure_skipped_in_json_when_absent() {
        let json = serde_json::to_value(PriceBreakdown::default()).unwrap();
        assert!(json.get("warranty_disclosure").is_none());
        assert_eq!(json["balance_due_regular"], 0.0);
    }
}
