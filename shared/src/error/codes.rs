//! Unified error codes for the order desk
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Order errors
//! - 5xxx: Pricing / payment input errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and for the desktop frontend, which switches on the numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Input file is not valid JSON for the expected shape
    InvalidFormat = 6,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order already exists
    OrderAlreadyExists = 4002,
    /// Stored lens selections could not be decoded
    LensSelectionsCorrupted = 4003,
    /// Patient name missing
    PatientRequired = 4004,

    // ==================== 5xxx: Pricing ====================
    /// Monetary amount is invalid (NaN, infinite, negative, too large)
    InvalidAmount = 5001,
    /// Percentage is outside [0, 100]
    InvalidPercentage = 5002,
    /// Warranty type and price disagree
    InvalidWarranty = 5003,
    /// Lens selection entry is malformed
    InvalidLensSelection = 5004,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Environment override could not be parsed
    ConfigError = 9005,
    /// File could not be read or written
    IoError = 9006,
    /// Storage file is corrupted
    StorageCorrupted = 9403,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderAlreadyExists => "Order already exists",
            ErrorCode::LensSelectionsCorrupted => "Stored lens selections are corrupted",
            ErrorCode::PatientRequired => "Patient name is required",

            // Pricing
            ErrorCode::InvalidAmount => "Invalid amount",
            ErrorCode::InvalidPercentage => "Percentage must be between 0 and 100",
            ErrorCode::InvalidWarranty => "Warranty selection is inconsistent",
            ErrorCode::InvalidLensSelection => "Invalid lens selection",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::IoError => "File access failed",
            ErrorCode::StorageCorrupted => "Storage is corrupted",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 to [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(ErrorCode::ValidationFailed),
            6 => Ok(ErrorCode::InvalidFormat),
            8 => Ok(ErrorCode::ValueOutOfRange),

            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderAlreadyExists),
            4003 => Ok(ErrorCode::LensSelectionsCorrupted),
            4004 => Ok(ErrorCode::PatientRequired),

            5001 => Ok(ErrorCode::InvalidAmount),
            5002 => Ok(ErrorCode::InvalidPercentage),
            5003 => Ok(ErrorCode::InvalidWarranty),
            5004 => Ok(ErrorCode::InvalidLensSelection),

            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),
            9006 => Ok(ErrorCode::IoError),
            9403 => Ok(ErrorCode::StorageCorrupted),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
