//! Read models for persisted marketplace records.
//!
//! These mirror the rows the ledger exposes. The core never mutates them.

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{ItemDiscountId, ItemId, OrderId, OrderItemId, UserId};
use super::price::line_total;
use super::status::{OrderStatus, UserRole};

const fn enabled() -> bool {
    true
}

/// A marketplace account: shopper, merchant or admin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default = "enabled")]
    pub active: bool,
    pub name: String,
    pub city: String,
    pub state: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Returns true if the account sells items.
    #[must_use]
    pub const fn is_merchant(&self) -> bool {
        matches!(self.role, UserRole::Merchant)
    }
}

/// An item listed by a merchant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub merchant_id: UserId,
    pub name: String,
    pub price: Decimal,
    pub inventory: u32,
    #[serde(default = "enabled")]
    pub active: bool,
}

/// A merchant-wide "spend X, save Y" promotion.
///
/// New discounts are stored inactive until the merchant enables them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDiscount {
    pub id: ItemDiscountId,
    pub merchant_id: UserId,
    pub name: String,
    pub description: String,
    pub order_price_threshold: Decimal,
    pub discount_amount: Decimal,
    #[serde(default)]
    pub active: bool,
}

/// A shopper's order.
///
/// `updated_at` records the last status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    #[serde(default)]
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line of an order.
///
/// `price` is the unit price captured when the order was placed. `updated_at`
/// is stamped when the merchant marks the line fulfilled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub item_id: ItemId,
    pub quantity: u32,
    pub price: Decimal,
    #[serde(default)]
    pub fulfilled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderItem {
    /// Snapshot price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        line_total(self.price, self.quantity)
    }

    /// Time from order placement to the fulfillment mark.
    #[must_use]
    pub fn fulfillment_time(&self) -> TimeDelta {
        self.updated_at - self.created_at
    }
}
