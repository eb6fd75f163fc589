//! Order persistence
//!
//! - [`validation`]: input boundary in front of the calculator
//! - [`record`]: draft/breakdown <-> flattened row mapping
//! - [`storage`]: redb tables
//! - [`service`]: validate + price + persist

pub mod record;
pub mod service;
pub mod storage;
pub mod validation;

pub use record::{decode_lens_selections, encode_lens_selections};
pub use service::OrderService;
pub use storage::{OrderStorage, StorageError, StorageResult};
pub use validation::{validate_draft, validate_order_input};
