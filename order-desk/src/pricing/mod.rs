//! Order Pricing Calculator
//!
//! Turns an [`OrderDraft`](shared::OrderDraft) into a
//! [`PriceBreakdown`](shared::PriceBreakdown) with two parallel paths:
//! - Regular: self-pay, starting from the frame list price
//! - Insurance: starting from the allowance/discount-adjusted frame price
//!   and the insurance lens prices
//!
//! Pure and stateless. Every step rounds to 2 decimal places (half-up) and
//! the next step consumes the rounded value.

mod balance;
mod engine;
mod frame;
mod legacy;
mod lens;
mod money;
mod path;
mod rates;
mod warranty;

pub use balance::{PathBalance, additional_charges, resolve_balance};
pub use engine::{PricingEngine, compute_pricing, compute_pricing_with};
pub use frame::{FramePricing, resolve_frame};
pub use legacy::{legacy_lens_total, reconcile_regular_lens_total};
pub use lens::{LensTotals, aggregate_lens_charges};
pub use money::{DECIMAL_PLACES, round2, to_decimal, to_f64};
pub use path::{PathInput, PathPricing, SharedCharges, price_path};
pub use rates::{IWELLNESS_FEE, PricingRates, SALES_TAX_RATE, WARRANTY_COPAY_RATE};
pub use warranty::{ReplacementCopays, replacement_copays};
