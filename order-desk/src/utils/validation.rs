//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits are chosen based on:
//! - Order form field widths and the printed order summary
//! - Reasonable UX limits for names and notes

use shared::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Person names: patient, doctor, employee
pub const MAX_NAME_LEN: usize = 200;

/// Notes on the order
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, date of birth, option values, charge types
pub const MAX_SHORT_TEXT_LEN: usize = 100;

// ── Numeric limits ──────────────────────────────────────────────────

/// Maximum allowed amount for any single money field ($1,000,000)
pub const MAX_PRICE: f64 = 1_000_000.0;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty"))
            .with_detail("field", field));
    }
    validate_text(value, field, max_len)
}

/// Validate that a string is within the length limit (empty is allowed).
pub fn validate_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    match value {
        Some(v) => validate_text(v, field, max_len),
        None => Ok(()),
    }
}
