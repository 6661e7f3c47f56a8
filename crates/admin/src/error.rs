//! Unified error handling for analytics.

use bazaar_core::{LedgerError, UserId};
use thiserror::Error;

/// Errors raised while computing analytics.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Ledger read failed.
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Per-merchant stats were requested for a user who does not sell.
    #[error("User {0} is not a merchant")]
    NotAMerchant(UserId),
}

/// Result type alias for `AnalyticsError`.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnalyticsError::NotAMerchant(UserId::new(4));
        assert_eq!(err.to_string(), "User 4 is not a merchant");

        let err = AnalyticsError::from(LedgerError::UserNotFound(UserId::new(9)));
        assert_eq!(err.to_string(), "Ledger error: user 9 not found");
    }
}
