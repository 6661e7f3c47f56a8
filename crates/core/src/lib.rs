//! Bazaar Core - Shared types library.
//!
//! This crate provides common types used across all Bazaar components:
//! - `storefront` - Cart pricing and merchant discounts
//! - `admin` - Merchant analytics and leaderboards
//! - `cli` - Command-line access to both engines over a ledger snapshot
//!
//! # Architecture
//!
//! The core crate contains only types, traits and pure helpers - no I/O, no
//! database access. Persistence is reached through the [`LedgerReader`]
//! trait.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, statuses, read-model records and money helpers
//! - [`ledger`] - The ledger reader trait and an in-memory snapshot reader
//! - [`stats`] - Ranking, month windows and fulfillment durations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod ledger;
pub mod stats;
pub mod types;

pub use ledger::{InMemoryLedger, LedgerError, LedgerReader, LedgerSnapshot, SaleFilter, SaleLine};
pub use types::*;
