use shared::AppResult;
use std::path::PathBuf;

use crate::pricing::PricingRates;

/// Desk configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./work_dir | Database and logs |
/// | LOG_LEVEL | info | tracing filter |
/// | LOG_JSON | true in production | JSON log lines |
/// | ENVIRONMENT | development | development / production |
/// | SALES_TAX_RATE | 0.0225 | Fraction |
/// | WARRANTY_COPAY_RATE | 0.15 | Fraction |
/// | IWELLNESS_FEE | 39.00 | Dollars |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/srv/optical SALES_TAX_RATE=0.0225 order-desk list
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Holds `orders.redb` and `logs/`
    pub work_dir: String,
    pub log_level: String,
    pub log_json: bool,
    /// development | production; production switches logs to JSON
    pub environment: String,
    pub rates: PricingRates,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults; a malformed rate override is
    /// an error.
    pub fn from_env() -> AppResult<Self> {
        let environment =
            std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let log_json = std::env::var("LOG_JSON")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| is_production(&environment));

        Ok(Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./work_dir".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json,
            environment,
            rates: PricingRates::from_env()?,
        })
    }

    /// Override the work directory
    ///
    /// Used by the `--work-dir` flag and tests.
    pub fn with_overrides(work_dir: impl Into<String>) -> AppResult<Self> {
        let mut config = Self::from_env()?;
        config.work_dir = work_dir.into();
        Ok(config)
    }

    /// `<work_dir>/orders.redb`
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("orders.redb")
    }

    /// `<work_dir>/logs`
    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }
}

fn is_production(environment: &str) -> bool {
    environment == "production"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_under_work_dir() {
        let config = Config::with_overrides("/tmp/shop").unwrap();
        assert_eq!(config.work_dir, "/tmp/shop");
        assert_eq!(config.db_path(), PathBuf::from("/tmp/shop/orders.redb"));
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/shop/logs"));
    }

    #[test]
    fn test_production_detection() {
        assert!(is_production("production"));
        assert!(!is_production("development"));
        assert!(!is_production("Production "));
    }
}
