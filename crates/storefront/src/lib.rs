//! Bazaar Storefront - cart pricing and merchant discounts.
//!
//! # Modules
//!
//! - [`cart`] - Cart contents, quantity bookkeeping and totals
//! - [`discounts`] - Discount eligibility and best-discount selection
//! - [`error`] - Error types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod discounts;
pub mod error;

pub use cart::{Cart, CartContents, CartLine};
pub use discounts::{AppliedDiscount, DiscountResolver, LinePrice, best_discount, is_eligible};
pub use error::{CartError, Result};
