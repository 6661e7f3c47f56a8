//! Per-merchant stats.
//!
//! # Usage
//!
//! ```bash
//! bazaar merchant --ledger ledger.yaml --id 3
//! ```

use std::path::Path;

use bazaar_admin::{DashboardConfig, MerchantAnalytics, MerchantReport};
use bazaar_core::UserId;
use chrono::Utc;

use super::emit;
use crate::{OutputFormat, snapshot};

/// Print one merchant's stats.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded or `merchant_id` is
/// not a merchant.
pub fn show(
    ledger_path: &Path,
    merchant_id: i64,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = DashboardConfig::from_env()?;
    let ledger = snapshot::load(ledger_path)?;

    let engine = MerchantAnalytics::new(&ledger, Utc::now());
    let stats = engine.merchant_stats(UserId::new(merchant_id))?;
    let report = MerchantReport::build(&stats, &config)?;

    emit(&report, format)
}
