//! Integration tests for Bazaar.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bazaar-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_pricing` - Cart totals and discount selection end to end
//! - `leaderboards` - Merchants index boards, month windows and tie-breaks
//! - `merchant_stats` - Per-merchant dashboard figures
//!
//! Every test builds its ledger with [`LedgerBuilder`], which hands out
//! sequential ids and stamps fulfillment at a fixed `now`.

use std::collections::BTreeMap;

use bazaar_core::{
    InMemoryLedger, Item, ItemDiscount, ItemDiscountId, ItemId, LedgerSnapshot, Order, OrderId,
    OrderItem, OrderItemId, OrderStatus, User, UserId, UserRole,
};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use rust_decimal::Decimal;

/// The instant every fixture treats as "now": 2026-10-16 12:00 UTC.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Fluent builder for ledger snapshots.
#[derive(Debug, Clone)]
pub struct LedgerBuilder {
    snapshot: LedgerSnapshot,
    now: DateTime<Utc>,
    prices: BTreeMap<ItemId, Decimal>,
    next_user: i64,
    next_item: i64,
    next_discount: i64,
    next_order: i64,
    next_order_item: i64,
}

impl Default for LedgerBuilder {
    fn default() -> Self {
        Self::new(fixed_now())
    }
}

impl LedgerBuilder {
    /// Start an empty ledger evaluated at `now`.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            snapshot: LedgerSnapshot::default(),
            now,
            prices: BTreeMap::new(),
            next_user: 1,
            next_item: 1,
            next_discount: 1,
            next_order: 1,
            next_order_item: 1,
        }
    }

    /// The fixture's "now".
    #[must_use]
    pub const fn now(&self) -> DateTime<Utc> {
        self.now
    }

    // =========================================================================
    // Users
    // =========================================================================

    fn user(&mut self, role: UserRole, name: &str, city: &str, state: &str) -> UserId {
        let id = UserId::new(self.next_user);
        self.next_user += 1;
        self.snapshot.users.push(User {
            id,
            role,
            active: true,
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            created_at: self.now - TimeDelta::days(90),
        });
        id
    }

    /// Add a shopper.
    pub fn shopper(&mut self, name: &str, city: &str, state: &str) -> UserId {
        self.user(UserRole::Default, name, city, state)
    }

    /// Add a merchant based in Denver, CO.
    pub fn merchant(&mut self, name: &str) -> UserId {
        self.user(UserRole::Merchant, name, "Denver", "CO")
    }

    /// Add a merchant based in the given city.
    pub fn merchant_in(&mut self, name: &str, city: &str, state: &str) -> UserId {
        self.user(UserRole::Merchant, name, city, state)
    }

    /// Add an admin.
    pub fn admin(&mut self, name: &str) -> UserId {
        self.user(UserRole::Admin, name, "Denver", "CO")
    }

    /// Mark a user inactive.
    pub fn deactivate(&mut self, user: UserId) {
        if let Some(u) = self.snapshot.users.iter_mut().find(|u| u.id == user) {
            u.active = false;
        }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Add an active item named `Item <id>`.
    pub fn item(&mut self, merchant: UserId, price: Decimal, inventory: u32) -> ItemId {
        let id = ItemId::new(self.next_item);
        self.next_item += 1;
        self.prices.insert(id, price);
        self.snapshot.items.push(Item {
            id,
            merchant_id: merchant,
            name: format!("Item {id}"),
            price,
            inventory,
            active: true,
        });
        id
    }

    /// Add an item that is no longer for sale.
    pub fn inactive_item(&mut self, merchant: UserId, price: Decimal, inventory: u32) -> ItemId {
        let id = self.item(merchant, price, inventory);
        if let Some(item) = self.snapshot.items.iter_mut().find(|i| i.id == id) {
            item.active = false;
        }
        id
    }

    /// Add a discount for `merchant`.
    pub fn discount(
        &mut self,
        merchant: UserId,
        threshold: Decimal,
        amount: Decimal,
        active: bool,
    ) -> ItemDiscountId {
        let id = ItemDiscountId::new(self.next_discount);
        self.next_discount += 1;
        self.snapshot.item_discounts.push(ItemDiscount {
            id,
            merchant_id: merchant,
            name: format!("Discount {id}"),
            description: format!("{amount} off orders of {threshold} or more"),
            order_price_threshold: threshold,
            discount_amount: amount,
            active,
        });
        id
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Add an order last updated at "now".
    pub fn order(&mut self, user: UserId, status: OrderStatus) -> OrderId {
        let at = self.now;
        self.order_updated_at(user, status, at)
    }

    /// Add an order whose last status change happened at `updated_at`.
    pub fn order_updated_at(
        &mut self,
        user: UserId,
        status: OrderStatus,
        updated_at: DateTime<Utc>,
    ) -> OrderId {
        let id = OrderId::new(self.next_order);
        self.next_order += 1;
        self.snapshot.orders.push(Order {
            id,
            user_id: user,
            status,
            created_at: updated_at,
            updated_at,
        });
        id
    }

    fn order_item(
        &mut self,
        order: OrderId,
        item: ItemId,
        quantity: u32,
        fulfilled: bool,
        time_to_fulfill: TimeDelta,
    ) -> OrderItemId {
        let id = OrderItemId::new(self.next_order_item);
        self.next_order_item += 1;
        let price = self.prices.get(&item).copied().unwrap_or_default();
        self.snapshot.order_items.push(OrderItem {
            id,
            order_id: order,
            item_id: item,
            quantity,
            price,
            fulfilled,
            created_at: self.now - time_to_fulfill,
            updated_at: self.now,
        });
        id
    }

    /// Add a line marked fulfilled `time_to_fulfill` after it was placed.
    pub fn fulfilled_line(
        &mut self,
        order: OrderId,
        item: ItemId,
        quantity: u32,
        time_to_fulfill: TimeDelta,
    ) -> OrderItemId {
        self.order_item(order, item, quantity, true, time_to_fulfill)
    }

    /// Add a line that has not been fulfilled.
    pub fn unfulfilled_line(&mut self, order: OrderId, item: ItemId, quantity: u32) -> OrderItemId {
        self.order_item(order, item, quantity, false, TimeDelta::zero())
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// The snapshot built so far.
    #[must_use]
    pub const fn snapshot(&self) -> &LedgerSnapshot {
        &self.snapshot
    }

    /// Index the snapshot into a ledger.
    #[must_use]
    pub fn build(self) -> InMemoryLedger {
        InMemoryLedger::new(self.snapshot)
    }
}
