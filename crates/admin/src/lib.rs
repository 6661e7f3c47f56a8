//! Bazaar Admin - merchant analytics and leaderboards.
//!
//! Computes the ranked boards shown on the merchants index and on each
//! merchant's dashboard. Everything reads through
//! [`bazaar_core::LedgerReader`]; nothing here writes.
//!
//! # Modules
//!
//! - [`analytics`] - The analytics engine and its result rows
//! - [`dashboard`] - Board collections for the merchants index and merchant page
//! - [`config`] - Board sizes from the environment
//! - [`error`] - Error types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analytics;
pub mod config;
pub mod dashboard;
pub mod error;

pub use analytics::{MerchantAnalytics, MerchantScope, MerchantStats};
pub use config::{ConfigError, DashboardConfig};
pub use dashboard::{MerchantReport, MerchantsDashboard, ViewerBoards};
pub use error::{AnalyticsError, Result};
