//! Storefront error types.

use bazaar_core::LedgerError;
use thiserror::Error;

/// Errors raised while pricing a cart.
#[derive(Debug, Error)]
pub enum CartError {
    /// A cart key is not a valid item id.
    #[error("invalid item key in cart: {0:?}")]
    InvalidItemKey(String),

    /// The ledger could not resolve a record (e.g. a deleted item).
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Stored cart contents could not be decoded.
    #[error("invalid cart contents: {0}")]
    Contents(#[from] serde_json::Error),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
