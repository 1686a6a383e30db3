//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                        | Default                   |
//! |---------------------------------|---------------------------|
//! | `BOOKSTORE_ADDR`                | `0.0.0.0:8080`            |
//! | `BOOKSTORE_LOW_STOCK_THRESHOLD` | `5`                       |
//! | `BOOKSTORE_DISCOUNT_TIERS`      | `10:5,25:10,50:15,100:20` |

use std::env;
use std::net::SocketAddr;

use bookstore_core::DiscountSchedule;

const DEFAULT_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_LOW_STOCK_THRESHOLD: &str = "5";
const DEFAULT_DISCOUNT_TIERS: &str = "10:5,25:10,50:15,100:20";

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Listen address
    pub addr: SocketAddr,

    /// Entries with fewer available copies are reported as low stock
    pub low_stock_threshold: i64,

    /// Bulk discount tiers used for order quotes
    pub discount_schedule: DiscountSchedule,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let config = ApiConfig {
            addr: var("BOOKSTORE_ADDR", DEFAULT_ADDR)
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BOOKSTORE_ADDR".to_string()))?,

            low_stock_threshold: var("BOOKSTORE_LOW_STOCK_THRESHOLD", DEFAULT_LOW_STOCK_THRESHOLD)
                .parse()
                .map_err(|_| {
                    ConfigError::InvalidValue("BOOKSTORE_LOW_STOCK_THRESHOLD".to_string())
                })?,

            discount_schedule: var("BOOKSTORE_DISCOUNT_TIERS", DEFAULT_DISCOUNT_TIERS)
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BOOKSTORE_DISCOUNT_TIERS".to_string()))?,
        };

        if config.low_stock_threshold < 0 {
            return Err(ConfigError::InvalidValue(
                "BOOKSTORE_LOW_STOCK_THRESHOLD".to_string(),
            ));
        }

        Ok(config)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            low_stock_threshold: 5,
            discount_schedule: DiscountSchedule::standard(),
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
