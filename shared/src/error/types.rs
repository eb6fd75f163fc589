//! Error types

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the primary error type of the order desk, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (offending field, order id, ...)
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Look up a detail entry as a string
    pub fn detail_str(&self, key: &str) -> Option<&str> {
        self.details.as_ref()?.get(key)?.as_str()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create an invalid amount error for a named field
    pub fn invalid_amount(field: &str, msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidAmount, msg).with_detail("field", field)
    }

    /// Create an order not found error
    pub fn order_not_found(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::with_message(ErrorCode::OrderNotFound, format!("Order {} not found", id))
            .with_detail("order_id", id)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create a configuration error for a named environment variable
    pub fn config(key: &str, msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ConfigError, msg).with_detail("key", key)
    }

    /// Create a file access error
    pub fn io(path: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::IoError, msg).with_detail("path", path.into())
    }
}

impl From<ErrorCode> for AppError {
    fn from(code: ErrorCode) -> Self {
        Self::new(code)
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_default_message() {
        let err = AppError::new(ErrorCode::OrderNotFound);
        assert_eq!(err.message, "Order not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_with_detail() {
        let err = AppError::invalid_amount("payment_today", "payment_today must be finite");
        assert_eq!(err.code, ErrorCode::InvalidAmount);
        assert_eq!(err.detail_str("field"), Some("payment_today"));
        assert_eq!(err.to_string(), "payment_today must be finite");
    }

    #[test]
    fn test_order_not_found_detail() {
        let err = AppError::order_not_found("abc");
        assert_eq!(err.code, ErrorCode::OrderNotFound);
        assert_eq!(err.detail_str("order_id"), Some("abc"));
    }

    #[test]
    fn test_serialize_skips_empty_details() {
        let err = AppError::database("disk full");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], 9002);
        assert!(json.get("details").is_none());
    }
}
