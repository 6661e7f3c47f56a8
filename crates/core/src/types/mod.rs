//! Core types for Bazaar.
//!
//! This module provides type-safe wrappers for common domain concepts and
//! the read models the ledger hands out.

pub mod id;
pub mod price;
pub mod record;
pub mod status;

pub use id::*;
pub use price::{Price, line_total};
pub use record::{Item, ItemDiscount, Order, OrderItem, User};
pub use status::*;
