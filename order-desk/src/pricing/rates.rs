//! Pricing rates
//!
//! Business constants of the shop. Formulas read them through
//! [`PricingRates`] so configuration can override the defaults.

use rust_decimal::Decimal;
use shared::{AppError, AppResult};
use std::str::FromStr;

/// Sales tax: 2.25%
pub const SALES_TAX_RATE: Decimal = Decimal::from_parts(225, 0, 0, false, 4);

/// Warranty replacement copay: 15% of the original price
pub const WARRANTY_COPAY_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// iWellness exam fee: $39.00
pub const IWELLNESS_FEE: Decimal = Decimal::from_parts(3900, 0, 0, false, 2);

/// Rates applied by the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingRates {
    /// Fraction, not percent (0.0225 = 2.25%)
    pub sales_tax_rate: Decimal,
    /// Fraction, not percent (0.15 = 15%)
    pub warranty_copay_rate: Decimal,
    pub iwellness_fee: Decimal,
}

impl Default for PricingRates {
    fn default() -> Self {
        Self {
            sales_tax_rate: SALES_TAX_RATE,
            warranty_copay_rate: WARRANTY_COPAY_RATE,
            iwellness_fee: IWELLNESS_FEE,
        }
    }
}

impl PricingRates {
    /// Defaults overridden by `SALES_TAX_RATE`, `WARRANTY_COPAY_RATE` and
    /// `IWELLNESS_FEE`
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary lookup
    ///
    /// A set but unparseable or negative value is a
    /// [`ConfigError`](shared::ErrorCode::ConfigError).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let read = |key: &str, default: Decimal| -> AppResult<Decimal> {
            let Some(raw) = lookup(key) else {
                return Ok(default);
            };
            match Decimal::from_str(raw.trim()) {
                Ok(v) if !v.is_sign_negative() => Ok(v),
                _ => Err(AppError::config(
                    key,
                    format!("{key} must be a non-negative decimal, got {raw:?}"),
                )),
            }
        };

        Ok(Self {
            sales_tax_rate: read("SALES_TAX_RATE", SALES_TAX_RATE)?,
            warranty_copay_rate: read("WARRANTY_COPAY_RATE", WARRANTY_COPAY_RATE)?,
            iwellness_fee: read("IWELLNESS_FEE", IWELLNESS_FEE)?,
        })
    }
}
