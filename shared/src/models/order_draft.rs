//! Order Draft Model
//!
//! The editable state of the order-entry form. A draft is built by the
//! caller per edit session and handed to the pricing calculator on every
//! change. Amounts are in currency units (dollars).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Warranty type value meaning "no warranty selected"
pub const NO_WARRANTY: &str = "None";

/// Lens selections keyed by category (lens type, material, coating, tint, ...)
///
/// Keys are unique per category; a missing key means the category is not
/// selected. Ordered map so iteration (and printing) is deterministic.
pub type LensSelections = BTreeMap<String, LensSelection>;

/// Flat per-column lens prices from records created before lens selections
/// were stored as a mapping. Keyed by the legacy column name.
pub type LegacyLensPrices = BTreeMap<String, f64>;

/// Frame section of the form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameInput {
    /// Retail list price of the frame
    pub list_price: f64,
    /// Flat insurance allowance subtracted from the list price
    pub allowance: f64,
    /// Percentage discount applied after the allowance (0-100)
    pub discount_percent: f64,
    /// Patient brings their own frame: all frame pricing is zeroed
    pub uses_own_frame: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// One selected option in a lens category
///
/// Field names match the persisted JSON form:
/// `{ "value", "price", "insurance_price", "label" }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LensSelection {
    /// Option value as picked from the dropdown
    pub value: String,
    /// Self-pay price
    #[serde(rename = "price", default)]
    pub regular_price: f64,
    /// Insurance price; `None` contributes nothing to the insurance total
    #[serde(default)]
    pub insurance_price: Option<f64>,
    /// Display label for receipts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl LensSelection {
    pub fn new(value: impl Into<String>, regular_price: f64, insurance_price: Option<f64>) -> Self {
        Self {
            value: value.into(),
            regular_price,
            insurance_price,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Label if set, otherwise the raw value
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.value)
    }
}

/// Warranty selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Warranty {
    #[serde(rename = "type")]
    pub kind: String,
    pub price: f64,
}

impl Default for Warranty {
    fn default() -> Self {
        Self {
            kind: NO_WARRANTY.to_string(),
            price: 0.0,
        }
    }
}

impl Warranty {
    pub fn new(kind: impl Into<String>, price: f64) -> Self {
        Self {
            kind: kind.into(),
            price,
        }
    }

    /// Whether an actual warranty plan is selected ("None" and blank are not)
    pub fn is_selected(&self) -> bool {
        let kind = self.kind.trim();
        !kind.is_empty() && !kind.eq_ignore_ascii_case(NO_WARRANTY)
    }
}

/// Additional flat-priced service (type is informational only)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtherCharge {
    #[serde(rename = "type")]
    pub kind: String,
    pub price: f64,
}

impl OtherCharge {
    pub fn new(kind: impl Into<String>, price: f64) -> Self {
        Self {
            kind: kind.into(),
            price,
        }
    }
}

/// Complete pricing input for one order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderDraft {
    pub frame: FrameInput,
    pub lens_selections: LensSelections,
    pub warranty: Warranty,
    /// Flat material copay, added to both paths before tax
    pub material_copay: f64,
    /// Flat adjustment shared by both paths (may be negative)
    pub other_charges_adjustment: f64,
    /// Percentage taken off the final price (0-100)
    pub other_percent_adjustment: f64,
    pub iwellness_selected: bool,
    pub other_charge_1: OtherCharge,
    pub other_charge_2: OtherCharge,
    /// Amount collected at order time
    pub payment_today: f64,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub legacy_lens_prices: LegacyLensPrices,
}

impl OrderDraft {
    /// Insert or replace the selection for a lens category
    pub fn select_lens(&mut self, category: impl Into<String>, selection: LensSelection) {
        self.lens_selections.insert(category.into(), selection);
    }

    /// Remove the selection for a lens category
    pub fn clear_lens(&mut self, category: &str) -> Option<LensSelection> {
        self.lens_selections.remove(category)
    }
}
