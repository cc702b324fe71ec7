//! Environment-driven configuration.

use thiserror::Error;

/// Batch size used by the overview fan-out when the environment does not
/// override it.
pub const DEFAULT_OVERVIEW_BATCH: u32 = 50;

/// Configuration errors raised at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `VERDANT_OVERVIEW_BATCH` is present but not a positive integer.
    #[error("VERDANT_OVERVIEW_BATCH must be a positive integer, got {0:?}")]
    InvalidOverviewBatch(String),
}

/// Application configuration.
#[derive(Debug, Clone, Copy)]
pub struct AppConfig {
    /// Page size for the overview aggregation fan-out.
    pub overview_batch_size: u32,
}

impl AppConfig {
    /// Reads configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let overview_batch_size = match std::env::var("VERDANT_OVERVIEW_BATCH") {
            Err(_) => DEFAULT_OVERVIEW_BATCH,
            Ok(raw) => match raw.parse::<u32>() {
                Ok(batch) if batch >= 1 => batch,
                _ => return Err(ConfigError::InvalidOverviewBatch(raw)),
            },
        };
        Ok(Self {
            overview_batch_size,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            overview_batch_size: DEFAULT_OVERVIEW_BATCH,
        }
    }
}
