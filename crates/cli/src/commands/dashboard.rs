//! Merchants index leaderboards.
//!
//! # Usage
//!
//! ```bash
//! bazaar dashboard --ledger ledger.yaml [--viewer 12] [--admin] [--now 2026-10-16T12:00:00Z]
//! ```

use std::path::Path;

use bazaar_admin::{DashboardConfig, MerchantAnalytics, MerchantScope, MerchantsDashboard};
use bazaar_core::UserId;
use chrono::{DateTime, Utc};

use super::emit;
use crate::{OutputFormat, snapshot};

/// Options for the `dashboard` command.
#[derive(Debug, Clone, Copy)]
pub struct DashboardOptions {
    pub viewer: Option<i64>,
    pub admin: bool,
    pub now: DateTime<Utc>,
    pub format: OutputFormat,
}

/// Build and print the merchants index boards.
///
/// # Errors
///
/// Returns an error if configuration or the snapshot cannot be loaded.
pub fn show(ledger_path: &Path, options: &DashboardOptions) -> Result<(), Box<dyn std::error::Error>> {
    let config = DashboardConfig::from_env()?;
    let ledger = snapshot::load(ledger_path)?;

    let scope = if options.admin {
        MerchantScope::All
    } else {
        MerchantScope::ActiveOnly
    };
    let engine = MerchantAnalytics::new(&ledger, options.now).with_scope(scope);
    let dashboard = MerchantsDashboard::build(&engine, &config, options.viewer.map(UserId::new))?;

    emit(&dashboard, options.format)
}
