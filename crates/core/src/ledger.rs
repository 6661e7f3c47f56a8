//! Read-only access to persisted marketplace records.
//!
//! The pricing and analytics engines only ever read through
//! [`LedgerReader`]. Persistence itself lives elsewhere; [`InMemoryLedger`]
//! serves a snapshot loaded from a file or built in tests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stats::TimeWindow;
use crate::types::{
    Item, ItemDiscount, ItemId, Order, OrderId, OrderItem, OrderStatus, User, UserId, UserRole,
};

/// Errors that can occur while reading the ledger.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// No item with this id exists.
    #[error("item {0} not found")]
    ItemNotFound(ItemId),

    /// No user with this id exists.
    #[error("user {0} not found")]
    UserNotFound(UserId),

    /// Records reference each other inconsistently.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Selects fulfilled order items for aggregation.
///
/// Every leaderboard starts from this stream; the only axes of variation are
/// which order statuses count, an optional `updated_at` window on the parent
/// order, and optional merchant / buyer scoping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleFilter {
    /// Parent order must be in one of these statuses.
    pub statuses: Vec<OrderStatus>,
    /// Parent order `updated_at` must fall inside this window.
    pub window: Option<TimeWindow>,
    /// Item must belong to this merchant.
    pub merchant_id: Option<UserId>,
    /// Order must have been placed by this user.
    pub buyer_id: Option<UserId>,
}

impl SaleFilter {
    /// Fulfilled items on orders in `statuses`.
    #[must_use]
    pub fn with_statuses(statuses: &[OrderStatus]) -> Self {
        Self {
            statuses: statuses.to_vec(),
            window: None,
            merchant_id: None,
            buyer_id: None,
        }
    }

    /// Fulfilled items on shipped orders: what counts as revenue.
    #[must_use]
    pub fn sold() -> Self {
        Self::with_statuses(OrderStatus::SOLD)
    }

    /// Fulfilled items on packaged or shipped orders.
    #[must_use]
    pub fn non_cancelled() -> Self {
        Self::with_statuses(OrderStatus::NON_CANCELLED_FULFILLMENT)
    }

    /// Restrict to orders last updated inside `window`.
    #[must_use]
    pub fn within(mut self, window: TimeWindow) -> Self {
        self.window = Some(window);
        self
    }

    /// Restrict to one merchant's items.
    #[must_use]
    pub fn for_merchant(mut self, merchant_id: UserId) -> Self {
        self.merchant_id = Some(merchant_id);
        self
    }

    /// Restrict to orders placed by one user.
    #[must_use]
    pub fn for_buyer(mut self, buyer_id: UserId) -> Self {
        self.buyer_id = Some(buyer_id);
        self
    }

    /// The shared predicate every reader applies.
    #[must_use]
    pub fn matches(&self, order_item: &OrderItem, order: &Order, item: &Item) -> bool {
        order_item.fulfilled
            && self.statuses.contains(&order.status)
            && self.window.is_none_or(|w| w.contains(order.updated_at))
            && self.merchant_id.is_none_or(|id| item.merchant_id == id)
            && self.buyer_id.is_none_or(|id| order.user_id == id)
    }
}

/// A fulfilled order item joined with its order, item and buyer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleLine {
    pub order_item: OrderItem,
    pub order: Order,
    pub item: Item,
    pub buyer: User,
}

/// Read capabilities the engines depend on.
///
/// Implementations return whatever snapshot they hold; callers take no
/// isolation stance beyond that.
pub trait LedgerReader {
    /// All discounts owned by a merchant, active or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be read.
    fn discounts_for_merchant(&self, merchant_id: UserId) -> Result<Vec<ItemDiscount>, LedgerError>;

    /// Look up an item.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::ItemNotFound`] for an unknown id.
    fn item_by_id(&self, id: ItemId) -> Result<Item, LedgerError>;

    /// Look up a user.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UserNotFound`] for an unknown id.
    fn user_by_id(&self, id: UserId) -> Result<User, LedgerError>;

    /// Every item a merchant lists, active or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be read.
    fn items_for_merchant(&self, merchant_id: UserId) -> Result<Vec<Item>, LedgerError>;

    /// Orders placed by a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be read.
    fn orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>, LedgerError>;

    /// Orders currently in one of `statuses`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be read.
    fn orders_with_status(&self, statuses: &[OrderStatus]) -> Result<Vec<Order>, LedgerError>;

    /// Users holding `role`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be read.
    fn users_by_role(&self, role: UserRole) -> Result<Vec<User>, LedgerError>;

    /// Fulfilled order items matching `filter`, joined with their context.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::DataCorruption`] if a row references a missing
    /// order, item or buyer.
    fn fulfilled_order_items(&self, filter: &SaleFilter) -> Result<Vec<SaleLine>, LedgerError>;
}

/// Serializable dump of every record the ledger serves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub item_discounts: Vec<ItemDiscount>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
}

/// A [`LedgerReader`] over an in-memory snapshot.
///
/// Results come back in id order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedger {
    users: BTreeMap<UserId, User>,
    items: BTreeMap<ItemId, Item>,
    orders: BTreeMap<OrderId, Order>,
    item_discounts: Vec<ItemDiscount>,
    order_items: Vec<OrderItem>,
}

impl InMemoryLedger {
    /// Index a snapshot.
    #[must_use]
    pub fn new(snapshot: LedgerSnapshot) -> Self {
        let mut item_discounts = snapshot.item_discounts;
        item_discounts.sort_by_key(|d| d.id);
        let mut order_items = snapshot.order_items;
        order_items.sort_by_key(|oi| oi.id);

        Self {
            users: snapshot.users.into_iter().map(|u| (u.id, u)).collect(),
            items: snapshot.items.into_iter().map(|i| (i.id, i)).collect(),
            orders: snapshot.orders.into_iter().map(|o| (o.id, o)).collect(),
            item_discounts,
            order_items,
        }
    }
}

impl From<LedgerSnapshot> for InMemoryLedger {
    fn from(snapshot: LedgerSnapshot) -> Self {
        Self::new(snapshot)
    }
}

impl LedgerReader for InMemoryLedger {
    fn discounts_for_merchant(&self, merchant_id: UserId) -> Result<Vec<ItemDiscount>, LedgerError> {
        Ok(self
            .item_discounts
            .iter()
            .filter(|d| d.merchant_id == merchant_id)
            .cloned()
            .collect())
    }

    fn item_by_id(&self, id: ItemId) -> Result<Item, LedgerError> {
        self.items.get(&id).cloned().ok_or(LedgerError::ItemNotFound(id))
    }

    fn user_by_id(&self, id: UserId) -> Result<User, LedgerError> {
        self.users.get(&id).cloned().ok_or(LedgerError::UserNotFound(id))
    }

    fn items_for_merchant(&self, merchant_id: UserId) -> Result<Vec<Item>, LedgerError> {
        Ok(self
            .items
            .values()
            .filter(|i| i.merchant_id == merchant_id)
            .cloned()
            .collect())
    }

    fn orders_for_user(&self, user_id: UserId) -> Result<Vec<Order>, LedgerError> {
        Ok(self
            .orders
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }

    fn orders_with_status(&self, statuses: &[OrderStatus]) -> Result<Vec<Order>, LedgerError> {
        Ok(self
            .orders
            .values()
            .filter(|o| statuses.contains(&o.status))
            .cloned()
            .collect())
    }

    fn users_by_role(&self, role: UserRole) -> Result<Vec<User>, LedgerError> {
        Ok(self
            .users
            .values()
            .filter(|u| u.role == role)
            .cloned()
            .collect())
    }

    fn fulfilled_order_items(&self, filter: &SaleFilter) -> Result<Vec<SaleLine>, LedgerError> {
        let mut lines = Vec::new();
        for order_item in self.order_items.iter().filter(|oi| oi.fulfilled) {
            let order = self.orders.get(&order_item.order_id).ok_or_else(|| {
                LedgerError::DataCorruption(format!(
                    "order item {} references missing order {}",
                    order_item.id, order_item.order_id
                ))
            })?;
            let item = self.items.get(&order_item.item_id).ok_or_else(|| {
                LedgerError::DataCorruption(format!(
                    "order item {} references missing item {}",
                    order_item.id, order_item.item_id
                ))
            })?;
            if !filter.matches(order_item, order, item) {
                continue;
            }
            let buyer = self.users.get(&order.user_id).ok_or_else(|| {
                LedgerError::DataCorruption(format!(
                    "order {} references missing user {}",
                    order.id, order.user_id
                ))
            })?;
            lines.push(SaleLine {
                order_item: order_item.clone(),
                order: order.clone(),
                item: item.clone(),
                buyer: buyer.clone(),
            });
        }
        Ok(lines)
    }
}
