//! Data models
//!
//! - [`order_draft`]: what the order-entry form sends to the calculator
//! - [`price_breakdown`]: what the calculator produces
//! - [`order_record`]: the flattened row persisted per order

pub mod order_draft;
pub mod order_record;
pub mod price_breakdown;

pub use order_draft::{
    FrameInput, LegacyLensPrices, LensSelection, LensSelections, NO_WARRANTY, OrderDraft,
    OtherCharge, Warranty,
};
pub use order_record::{EyeRx, OrderInput, OrderRecord, Patient, Prescription};
pub use price_breakdown::{PriceBreakdown, WarrantyDisclosure};
