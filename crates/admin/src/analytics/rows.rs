//! Leaderboard result rows.
//!
//! Each row renders as one line of a board (`"Merchant 07: $192.00"`).

use std::fmt;

use bazaar_core::stats::FulfillmentTime;
use bazaar_core::{ItemId, OrderId, Price, UserId};
use rust_decimal::Decimal;
use serde::Serialize;

/// `"1 order"` / `"3 orders"`.
fn plural(count: u64, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// A city and/or state grouping.
///
/// Ordered by state, then city, which is also the tie-break order on
/// geography boards.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Region {
    pub state: String,
    pub city: Option<String>,
}

impl Region {
    /// A whole state.
    #[must_use]
    pub fn state(state: &str) -> Self {
        Self {
            state: state.to_string(),
            city: None,
        }
    }

    /// A city within a state.
    #[must_use]
    pub fn city(city: &str, state: &str) -> Self {
        Self {
            state: state.to_string(),
            city: Some(city.to_string()),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.city {
            Some(city) => write!(f, "{city}, {}", self.state),
            None => f.write_str(&self.state),
        }
    }
}

// =============================================================================
// Merchant Boards
// =============================================================================

/// Revenue earned by one merchant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MerchantRevenue {
    pub merchant_id: UserId,
    pub name: String,
    pub revenue: Decimal,
}

impl fmt::Display for MerchantRevenue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, Price::usd(self.revenue))
    }
}

/// A merchant's mean fulfillment time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MerchantFulfillment {
    pub merchant_id: UserId,
    pub name: String,
    pub average: FulfillmentTime,
}

impl fmt::Display for MerchantFulfillment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.average)
    }
}

/// Units a merchant sold in a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MerchantSales {
    pub merchant_id: UserId,
    pub name: String,
    pub quantity_sold: u64,
}

impl fmt::Display for MerchantSales {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.quantity_sold)
    }
}

/// Distinct orders a merchant fulfilled in a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MerchantCompletedOrders {
    pub merchant_id: UserId,
    pub name: String,
    pub completed_orders: u64,
}

impl fmt::Display for MerchantCompletedOrders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, plural(self.completed_orders, "order"))
    }
}

// =============================================================================
// Geography and Order Boards
// =============================================================================

/// Shipped orders placed from a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionOrderCount {
    pub region: Region,
    pub order_count: u64,
}

impl fmt::Display for RegionOrderCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.region, plural(self.order_count, "order"))
    }
}

/// Units shipped to a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionQuantity {
    pub region: Region,
    pub quantity: u64,
}

impl fmt::Display for RegionQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.region, plural(self.quantity, "item"))
    }
}

/// Mean fulfillment time of merchants in a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionFulfillment {
    pub region: Region,
    pub average: FulfillmentTime,
}

impl fmt::Display for RegionFulfillment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.region, self.average)
    }
}

/// Fulfilled units on one shipped order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSize {
    pub order_id: OrderId,
    pub items_shipped: u64,
}

impl fmt::Display for OrderSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order {}: {}",
            self.order_id,
            plural(self.items_shipped, "item")
        )
    }
}

// =============================================================================
// Per-Merchant Boards
// =============================================================================

/// Units sold of one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemSales {
    pub item_id: ItemId,
    pub name: String,
    pub quantity: u64,
}

impl fmt::Display for ItemSales {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.quantity)
    }
}

/// What one customer spent with a merchant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerSpend {
    pub user_id: UserId,
    pub name: String,
    pub total: Decimal,
}

impl fmt::Display for CustomerSpend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, Price::usd(self.total))
    }
}

/// A customer's order or unit count with a merchant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerCount {
    pub user_id: UserId,
    pub name: String,
    pub count: u64,
}

impl fmt::Display for CustomerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.count)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_region_display_and_order() {
        assert_eq!(Region::state("IA").to_string(), "IA");
        assert_eq!(Region::city("Des Moines", "IA").to_string(), "Des Moines, IA");
        assert!(Region::city("Fairfield", "CO") < Region::city("Des Moines", "IA"));
    }

    #[test]
    fn test_order_count_pluralizes() {
        let one = RegionOrderCount {
            region: Region::state("OK"),
            order_count: 1,
        };
        let three = RegionOrderCount {
            region: Region::state("IA"),
            order_count: 3,
        };
        assert_eq!(one.to_string(), "OK: 1 order");
        assert_eq!(three.to_string(), "IA: 3 orders");
    }

    #[test]
    fn test_money_and_duration_rows() {
        let revenue = MerchantRevenue {
            merchant_id: UserId::new(7),
            name: "Merchant 07".to_string(),
            revenue: dec!(192),
        };
        assert_eq!(revenue.to_string(), "Merchant 07: $192.00");

        let fulfillment = MerchantFulfillment {
            merchant_id: UserId::new(7),
            name: "Merchant 07".to_string(),
            average: FulfillmentTime::new(TimeDelta::hours(2)),
        };
        assert_eq!(
            fulfillment.to_string(),
            "Merchant 07: 0 days 02 hours 00 minutes"
        );
    }

    #[test]
    fn test_order_size_display() {
        let row = OrderSize {
            order_id: OrderId::new(7),
            items_shipped: 16,
        };
        assert_eq!(row.to_string(), "Order 7: 16 items");
    }
}
