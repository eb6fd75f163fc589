//! Order Record Model
//!
//! One persisted order: who it is for, every pricing input as its own
//! column, lens selections as JSON text and the computed breakdown
//! flattened alongside.

use super::order_draft::{LegacyLensPrices, NO_WARRANTY, OrderDraft};
use super::price_breakdown::PriceBreakdown;
use serde::{Deserialize, Serialize};

/// Patient identity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Patient {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Free text as typed (`MM/DD/YYYY` on the form)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
}

/// Prescription values for one eye
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EyeRx {
    pub sphere: Option<f64>,
    pub cylinder: Option<f64>,
    pub axis: Option<u16>,
    pub add: Option<f64>,
}

/// Spectacle prescription
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prescription {
    /// OD
    pub right: EyeRx,
    /// OS
    pub left: EyeRx,
    /// Pupillary distance in mm
    pub pd: Option<f64>,
}

/// Payload the order-entry screen submits on save
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderInput {
    pub patient: Patient,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prescription: Option<Prescription>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub draft: OrderDraft,
}

/// Persisted order row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: String,
    pub order_number: u64,
    pub created_at: i64,
    pub updated_at: i64,

    // Patient
    pub patient_name: String,
    #[serde(default)]
    pub patient_phone: Option<String>,
    #[serde(default)]
    pub patient_dob: Option<String>,
    #[serde(default)]
    pub doctor: Option<String>,
    #[serde(default)]
    pub employee: Option<String>,
    #[serde(default)]
    pub prescription: Option<Prescription>,
    #[serde(default)]
    pub notes: Option<String>,

    // Frame
    #[serde(default)]
    pub frame_brand: Option<String>,
    #[serde(default)]
    pub frame_model: Option<String>,
    #[serde(default)]
    pub frame_color: Option<String>,
    pub frame_list_price: f64,
    pub frame_allowance: f64,
    pub frame_discount_percent: f64,
    pub uses_own_frame: bool,

    // Lenses
    /// JSON-encoded `{ category: { value, price, insurance_price, label } }`
    pub lens_selections: String,
    /// Flat lens price columns from pre-mapping records
    #[serde(default, skip_serializing_if = "LegacyLensPrices::is_empty")]
    pub legacy_lens_prices: LegacyLensPrices,

    // Warranty and other charges
    #[serde(default = "default_warranty_type")]
    pub warranty_type: String,
    pub warranty_price: f64,
    pub material_copay: f64,
    pub other_charges_adjustment: f64,
    pub other_percent_adjustment: f64,
    pub iwellness_selected: bool,
    #[serde(default)]
    pub other_charge_1_type: String,
    pub other_charge_1_price: f64,
    #[serde(default)]
    pub other_charge_2_type: String,
    pub other_charge_2_price: f64,
    pub payment_today: f64,

    // Computed columns
    #[serde(flatten)]
    pub pricing: PriceBreakdown,
}

fn default_warranty_type() -> String {
    NO_WARRANTY.to_string()
}
