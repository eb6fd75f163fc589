//! Print context types
//!
//! Full JSON snapshot of an order for the PDF template; the template picks
//! the fields it needs.

use serde::{Deserialize, Serialize};
use shared::util::format_date;
use shared::{AppResult, OrderRecord, Prescription, WarrantyDisclosure};

use crate::orders::decode_lens_selections;

/// One lens line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintLensLine {
    pub category: String,
    pub name: String,
    pub regular_price: f64,
    pub insurance_price: Option<f64>,
}

/// One column of the price table (regular or insurance)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintPathColumn {
    pub frame: f64,
    pub lenses: f64,
    pub subtotal: f64,
    pub after_copay: f64,
    pub sales_tax: f64,
    pub you_pay: f64,
    pub final_price: f64,
    pub percent_adjustment: f64,
    pub total_balance: f64,
    pub paid_today: f64,
    pub balance_due: f64,
}

/// Flat charge line (iWellness, other charges)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintChargeLine {
    pub name: String,
    pub price: f64,
}

/// Everything the order PDF shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintContext {
    pub order_id: String,
    pub order_number: u64,
    pub order_date: String,

    pub patient_name: String,
    pub patient_phone: Option<String>,
    pub doctor: Option<String>,
    pub employee: Option<String>,
    pub prescription: Option<Prescription>,
    pub notes: Option<String>,

    pub frame_description: String,
    pub uses_own_frame: bool,
    pub frame_list_price: f64,
    pub final_frame_price: f64,
    pub you_saved: f64,

    /// Sorted by category key
    pub lenses: Vec<PrintLensLine>,

    pub material_copay: f64,
    pub other_charges_adjustment: f64,
    pub warranty_type: Option<String>,
    pub warranty_price: f64,
    pub warranty_disclosure: Option<WarrantyDisclosure>,
    pub charges: Vec<PrintChargeLine>,
    pub other_percent_adjustment: f64,
    pub payment_today: f64,

    pub regular: PrintPathColumn,
    pub insurance: PrintPathColumn,
}

impl PrintContext {
    /// Build the context from a stored order
    pub fn from_record(record: &OrderRecord, iwellness_fee: f64) -> AppResult<Self> {
        let lenses = decode_lens_selections(&record.lens_selections)?
            .into_iter()
            .map(|(category, sel)| PrintLensLine {
                name: sel.display_name().to_string(),
                category,
                regular_price: sel.regular_price,
                insurance_price: sel.insurance_price,
            })
            .collect();

        let mut charges = Vec::new();
        if record.iwellness_selected {
            charges.push(PrintChargeLine {
                name: "iWellness".to_string(),
                price: iwellness_fee,
            });
        }
        for (kind, price) in [
            (&record.other_charge_1_type, record.other_charge_1_price),
            (&record.other_charge_2_type, record.other_charge_2_price),
        ] {
            if price != 0.0 || !kind.trim().is_empty() {
                charges.push(PrintChargeLine {
                    name: kind.clone(),
                    price,
                });
            }
        }

        let p = &record.pricing;
        let warranty_type = p.warranty_disclosure.map(|_| record.warranty_type.clone());

        Ok(Self {
            order_id: record.id.clone(),
            order_number: record.order_number,
            order_date: format_date(record.created_at),

            patient_name: record.patient_name.clone(),
            patient_phone: record.patient_phone.clone(),
            doctor: record.doctor.clone(),
            employee: record.employee.clone(),
            prescription: record.prescription.clone(),
            notes: record.notes.clone(),

            frame_description: frame_description(record),
            uses_own_frame: record.uses_own_frame,
            frame_list_price: if record.uses_own_frame {
                0.0
            } else {
                record.frame_list_price
            },
            final_frame_price: p.final_frame_price,
            you_saved: p.you_saved,

            lenses,

            material_copay: record.material_copay,
            other_charges_adjustment: record.other_charges_adjustment,
            warranty_type,
            warranty_price: record.warranty_price,
            warranty_disclosure: p.warranty_disclosure,
            charges,
            other_percent_adjustment: record.other_percent_adjustment,
            payment_today: record.payment_today,

            regular: PrintPathColumn {
                frame: if record.uses_own_frame {
                    0.0
                } else {
                    record.frame_list_price
                },
                lenses: p.total_lens_charges_regular,
                subtotal: p.regular_price,
                after_copay: p.after_copay_regular,
                sales_tax: p.sales_tax_regular,
                you_pay: p.you_pay_regular,
                final_price: p.final_price_regular,
                percent_adjustment: p.percent_adjustment_regular,
                total_balance: p.total_balance_regular,
                paid_today: record.payment_today,
                balance_due: p.balance_due_regular,
            },
            insurance: PrintPathColumn {
                frame: p.final_frame_price,
                lenses: p.total_lens_charges_insurance,
                subtotal: p.insurance_regular_price,
                after_copay: p.after_copay_insurance,
                sales_tax: p.sales_tax_insurance,
                you_pay: p.you_pay_insurance,
                final_price: p.final_price_insurance,
                percent_adjustment: p.percent_adjustment_insurance,
                total_balance: p.total_balance_insurance,
                paid_today: record.payment_today,
                balance_due: p.balance_due_insurance,
            },
        })
    }
}

fn frame_description(record: &OrderRecord) -> String {
    if record.uses_own_frame {
        return "Patient's own frame".to_string();
    }
    let parts: Vec<&str> = [&record.frame_brand, &record.frame_model, &record.frame_color]
        .into_iter()
        .filter_map(|p| p.as_deref())
        .filter(|p| !p.trim().is_empty())
        .collect();
    if parts.is_empty() {
        "Frame".to_string()
    } else {
        parts.join(" ")
    }
}
