//! Order desk for an optical shop
//!
//! Prices eyewear orders along two paths (regular self-pay and insurance),
//! validates order-entry input and keeps saved orders in a local redb file.
//!
//! # Module layout
//!
//! ```text
//! order-desk/src/
//! ├── core/          # Configuration
//! ├── pricing/       # Dual-path calculator
//! ├── orders/        # Validation, record mapping, storage, service
//! ├── printing/      # Order summary context and text renderer
//! └── utils/         # Logging, validation helpers
//! ```

pub mod core;
pub mod orders;
pub mod pricing;
pub mod printing;
pub mod utils;

// Re-export public types
pub use core::Config;
pub use orders::{OrderService, OrderStorage, StorageError};
pub use pricing::{PricingEngine, PricingRates, compute_pricing, compute_pricing_with};
pub use printing::{PrintContext, render_text};

pub use shared::{AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};
