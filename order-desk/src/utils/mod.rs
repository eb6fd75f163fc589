//! Helpers shared by the desk modules
//!
//! - [`json_file`]: CLI input files
//! - [`logger`]: tracing setup
//! - [`validation`]: text and amount limits

pub mod json_file;
pub mod logger;
pub mod validation;
