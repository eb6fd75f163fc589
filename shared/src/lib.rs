//! Shared types for the optical order desk
//!
//! Common types used by the desktop shell, the order desk engine and its
//! storage layer: order drafts, price breakdowns, persisted order records
//! and the unified error system.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{
    EyeRx, FrameInput, LegacyLensPrices, LensSelection, LensSelections, NO_WARRANTY, OrderDraft,
    OrderInput, OrderRecord, OtherCharge, Patient, Prescription, PriceBreakdown, Warranty,
    WarrantyDisclosure,
};
