//! Merchant analytics engine.
//!
//! Every board is the same pipeline over the ledger's fulfilled order items:
//! select with a [`SaleFilter`], group, aggregate, then rank with the shared
//! tie-break helpers from [`bazaar_core::stats`]. The filter is the only
//! place that decides which statuses and which month count.
//!
//! - [`marketplace`] - cross-merchant boards for the merchants index
//! - [`merchant`] - stats for one merchant's dashboard
//! - [`viewer`] - boards scoped to the viewing shopper's own orders
//! - [`rows`] - result rows and their display format

pub mod marketplace;
pub mod merchant;
pub mod rows;
pub mod viewer;

use std::collections::BTreeMap;

use bazaar_core::{LedgerReader, SaleFilter, SaleLine, User, UserId, UserRole};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::error::Result;

pub use merchant::MerchantStats;
pub use rows::{
    CustomerCount, CustomerSpend, ItemSales, MerchantCompletedOrders, MerchantFulfillment,
    MerchantRevenue, MerchantSales, OrderSize, Region, RegionFulfillment, RegionOrderCount,
    RegionQuantity,
};

/// Which merchants appear on merchant-grouped boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MerchantScope {
    /// Every merchant account, including deactivated ones (admin view).
    All,
    /// Active merchants only (public view).
    #[default]
    ActiveOnly,
}

impl MerchantScope {
    /// Returns true if `merchant` belongs on the board.
    #[must_use]
    pub const fn includes(self, merchant: &User) -> bool {
        match self {
            Self::All => true,
            Self::ActiveOnly => merchant.active,
        }
    }
}

/// Read-only analytics over a ledger, evaluated at a fixed `now`.
#[derive(Debug)]
pub struct MerchantAnalytics<'a, L: LedgerReader + ?Sized> {
    ledger: &'a L,
    now: DateTime<Utc>,
    scope: MerchantScope,
}

impl<'a, L: LedgerReader + ?Sized> MerchantAnalytics<'a, L> {
    /// Create an engine with the public merchant scope.
    #[must_use]
    pub fn new(ledger: &'a L, now: DateTime<Utc>) -> Self {
        Self {
            ledger,
            now,
            scope: MerchantScope::default(),
        }
    }

    /// Replace the merchant scope.
    #[must_use]
    pub fn with_scope(mut self, scope: MerchantScope) -> Self {
        self.scope = scope;
        self
    }

    /// The instant month windows are resolved against.
    #[must_use]
    pub const fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// The merchant scope in effect.
    #[must_use]
    pub const fn scope(&self) -> MerchantScope {
        self.scope
    }

    /// Fulfilled order items matching `filter`.
    fn sales(&self, filter: &SaleFilter) -> Result<Vec<SaleLine>> {
        let lines = self.ledger.fulfilled_order_items(filter)?;
        debug!(
            statuses = ?filter.statuses,
            windowed = filter.window.is_some(),
            lines = lines.len(),
            "Selected sale lines"
        );
        Ok(lines)
    }

    /// Merchants in scope, by id.
    fn merchants(&self) -> Result<BTreeMap<UserId, User>> {
        Ok(self
            .ledger
            .users_by_role(UserRole::Merchant)?
            .into_iter()
            .filter(|m| self.scope.includes(m))
            .map(|m| (m.id, m))
            .collect())
    }

    /// Aggregate `lines` per merchant and build one row per in-scope merchant.
    ///
    /// Lines from merchants outside the scope are dropped.
    fn per_merchant<A, R, F, B>(&self, lines: &[SaleLine], fold: F, build: B) -> Result<Vec<R>>
    where
        A: Default,
        F: Fn(&mut A, &SaleLine),
        B: Fn(&User, A) -> Option<R>,
    {
        let merchants = self.merchants()?;
        let grouped = aggregate(lines, |line| line.item.merchant_id, fold);
        Ok(grouped
            .into_iter()
            .filter_map(|(id, acc)| merchants.get(&id).and_then(|m| build(m, acc)))
            .collect())
    }
}

/// Group `lines` by `key`, folding each line into its group's accumulator.
fn aggregate<K, A, KF, F>(lines: &[SaleLine], key: KF, fold: F) -> BTreeMap<K, A>
where
    K: Ord,
    A: Default,
    KF: Fn(&SaleLine) -> K,
    F: Fn(&mut A, &SaleLine),
{
    let mut groups: BTreeMap<K, A> = BTreeMap::new();
    for line in lines {
        fold(groups.entry(key(line)).or_default(), line);
    }
    groups
}

/// Units on a sale line.
fn units(line: &SaleLine) -> u64 {
    u64::from(line.order_item.quantity)
}

/// Convert a collection length into a board count.
fn count(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod fixtures {
    //! Small ledgers shared by the analytics unit tests.

    use bazaar_core::{
        InMemoryLedger, Item, ItemId, LedgerSnapshot, Order, OrderId, OrderItem, OrderItemId,
        OrderStatus,
    };
    use chrono::{TimeDelta, TimeZone};
    use rust_decimal::Decimal;

    use super::*;

    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    /// Builds snapshots with sequential ids.
    #[derive(Default)]
    pub struct Snapshot {
        pub inner: LedgerSnapshot,
    }

    impl Snapshot {
        pub fn user(&mut self, id: i64, role: UserRole, name: &str, city: &str, state: &str) -> UserId {
            self.inner.users.push(User {
                id: UserId::new(id),
                role,
                active: true,
                name: name.to_string(),
                city: city.to_string(),
                state: state.to_string(),
                created_at: now() - TimeDelta::days(365),
            });
            UserId::new(id)
        }

        pub fn item(&mut self, id: i64, merchant: UserId, price: Decimal, inventory: u32) -> ItemId {
            self.inner.items.push(Item {
                id: ItemId::new(id),
                merchant_id: merchant,
                name: format!("Item {id:02}"),
                price,
                inventory,
                active: true,
            });
            ItemId::new(id)
        }

        pub fn order(&mut self, user: UserId, status: OrderStatus, updated_at: DateTime<Utc>) -> OrderId {
            let id = OrderId::new(i64::try_from(self.inner.orders.len()).unwrap() + 1);
            self.inner.orders.push(Order {
                id,
                user_id: user,
                status,
                created_at: updated_at,
                updated_at,
            });
            id
        }

        /// A fulfilled line placed `age` before it was marked fulfilled at `now()`.
        pub fn line(&mut self, order: OrderId, item: ItemId, quantity: u32, age: TimeDelta) -> OrderItemId {
            let price = self
                .inner
                .items
                .iter()
                .find(|i| i.id == item)
                .map(|i| i.price)
                .unwrap();
            let id = OrderItemId::new(i64::try_from(self.inner.order_items.len()).unwrap() + 1);
            self.inner.order_items.push(OrderItem {
                id,
                order_id: order,
                item_id: item,
                quantity,
                price,
                fulfilled: true,
                created_at: now() - age,
                updated_at: now(),
            });
            id
        }

        pub fn build(self) -> InMemoryLedger {
            InMemoryLedger::new(self.inner)
        }
    }
}
