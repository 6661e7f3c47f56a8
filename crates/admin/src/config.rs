//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BAZAAR_PODIUM_SIZE` - Entries on the revenue, fulfillment, geography and
//!   order-size boards (default: 3)
//! - `BAZAAR_LEADERBOARD_SIZE` - Entries on the monthly seller and fulfillment
//!   boards (default: 10)
//! - `BAZAAR_LOCAL_BOARD_SIZE` - Entries on the viewer's fulfillment city and
//!   state boards (default: 5)
//! - `BAZAAR_MERCHANT_TOP_SIZE` - Entries on per-merchant top lists (default: 5)

use thiserror::Error;

const DEFAULT_PODIUM_SIZE: usize = 3;
const DEFAULT_LEADERBOARD_SIZE: usize = 10;
const DEFAULT_LOCAL_BOARD_SIZE: usize = 5;
const DEFAULT_MERCHANT_TOP_SIZE: usize = 5;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Board sizes for the merchants index and merchant pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Revenue, fulfillment-time, geography and order-size boards
    pub podium_size: usize,
    /// Current / previous month boards
    pub leaderboard_size: usize,
    /// Viewer-specific fulfillment boards
    pub local_board_size: usize,
    /// Per-merchant top items / regions
    pub merchant_top_size: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            podium_size: DEFAULT_PODIUM_SIZE,
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
            local_board_size: DEFAULT_LOCAL_BOARD_SIZE,
            merchant_top_size: DEFAULT_MERCHANT_TOP_SIZE,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a size is not a non-negative integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a size is not a non-negative integer.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            podium_size: get_size_or_default(&lookup, "BAZAAR_PODIUM_SIZE", DEFAULT_PODIUM_SIZE)?,
            leaderboard_size: get_size_or_default(
                &lookup,
                "BAZAAR_LEADERBOARD_SIZE",
                DEFAULT_LEADERBOARD_SIZE,
            )?,
            local_board_size: get_size_or_default(
                &lookup,
                "BAZAAR_LOCAL_BOARD_SIZE",
                DEFAULT_LOCAL_BOARD_SIZE,
            )?,
            merchant_top_size: get_size_or_default(
                &lookup,
                "BAZAAR_MERCHANT_TOP_SIZE",
                DEFAULT_MERCHANT_TOP_SIZE,
            )?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a board size, falling back to `default` when unset.
fn get_size_or_default<F>(lookup: &F, key: &str, default: usize) -> Result<usize, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
