//! Integration tests for one merchant's dashboard stats.
//!
//! Run with: cargo test -p bazaar-integration-tests --test merchant_stats

#![allow(clippy::unwrap_used)]

use bazaar_admin::analytics::Region;
use bazaar_admin::{AnalyticsError, DashboardConfig, MerchantAnalytics, MerchantReport};
use bazaar_core::{InMemoryLedger, ItemId, OrderStatus, UserId};
use bazaar_integration_tests::{LedgerBuilder, fixed_now};
use chrono::TimeDelta;
use rust_decimal_macros::dec;

/// One merchant with five active items and one retired item.
///
/// Shipped and fulfilled:
/// - Casey (Anywhere, CO): three orders of items 4, 1 and 5; 6 units, $43.50
/// - Tatum (Tulsa, OK): two orders of items 2 and 3; 8 units, $36.00
/// - Iris (Anywhere, IA): one order of item 2; 10 units, $66.00
///
/// Pending, packaged, cancelled, unfulfilled and other-merchant lines are
/// mixed in and must not count.
struct Shop {
    ledger: InMemoryLedger,
    merchant: UserId,
    other_merchant: UserId,
    casey: UserId,
    iris: UserId,
    items: Vec<ItemId>,
}

fn shop() -> Shop {
    let mut b = LedgerBuilder::default();
    let merchant = b.merchant("Prairie Goods");
    let other_merchant = b.merchant("Elsewhere Co");
    let casey = b.shopper("Casey", "Anywhere", "CO");
    let tatum = b.shopper("Tatum", "Tulsa", "OK");
    let iris = b.shopper("Iris", "Anywhere", "IA");

    let i1 = b.item(merchant, dec!(5.00), 30);
    let i2 = b.item(merchant, dec!(6.60), 30);
    let i3 = b.item(merchant, dec!(2.40), 30);
    let i4 = b.item(merchant, dec!(10.00), 30);
    let i5 = b.item(merchant, dec!(3.50), 18);
    b.inactive_item(merchant, dec!(1.00), 100);
    let elsewhere = b.item(other_merchant, dec!(99.00), 5);

    for (item, quantity) in [(i4, 3), (i1, 2), (i5, 1)] {
        let order = b.order(casey, OrderStatus::Shipped);
        b.fulfilled_line(order, item, quantity, TimeDelta::days(1));
    }

    let order = b.order(tatum, OrderStatus::Shipped);
    b.fulfilled_line(order, i2, 4, TimeDelta::days(2));
    let order = b.order(tatum, OrderStatus::Shipped);
    b.fulfilled_line(order, i3, 4, TimeDelta::days(2));
    b.unfulfilled_line(order, i1, 9);

    let order = b.order(iris, OrderStatus::Shipped);
    b.fulfilled_line(order, i2, 10, TimeDelta::days(3));
    b.fulfilled_line(order, elsewhere, 5, TimeDelta::days(3));

    let pending = b.order(iris, OrderStatus::Pending);
    b.fulfilled_line(pending, i1, 20, TimeDelta::hours(1));
    let packaged = b.order(casey, OrderStatus::Packaged);
    b.fulfilled_line(packaged, i3, 20, TimeDelta::hours(1));
    let cancelled = b.order(tatum, OrderStatus::Cancelled);
    b.fulfilled_line(cancelled, i5, 20, TimeDelta::hours(1));

    Shop {
        ledger: b.build(),
        merchant,
        other_merchant,
        casey,
        iris,
        items: vec![i1, i2, i3, i4, i5],
    }
}

// =============================================================================
// Inventory and Sales
// =============================================================================

#[test]
fn test_top_items_and_totals() {
    let s = shop();
    let engine = MerchantAnalytics::new(&s.ledger, fixed_now());
    let stats = engine.merchant_stats(s.merchant).unwrap();

    let top = stats.top_items_sold_by_quantity(5).unwrap();
    let rows: Vec<(ItemId, u64)> = top.iter().map(|r| (r.item_id, r.quantity)).collect();
    assert_eq!(
        rows,
        vec![
            (s.items[1], 14),
            (s.items[2], 4),
            (s.items[3], 3),
            (s.items[0], 2),
            (s.items[4], 1),
        ]
    );

    assert_eq!(stats.total_items_sold().unwrap(), 24);
    assert_eq!(stats.active_items().unwrap().len(), 5);
    assert_eq!(stats.total_inventory_remaining().unwrap(), 138);

    let percent = stats.percent_of_items_sold().unwrap().unwrap();
    assert_eq!(percent.round_dp(2), dec!(17.39));
}

#[test]
fn test_sold_out_merchant_has_no_percent() {
    let mut b = LedgerBuilder::default();
    let merchant = b.merchant("Empty Shelves");
    let shopper = b.shopper("Pat", "Ames", "IA");
    let item = b.item(merchant, dec!(2), 0);
    let order = b.order(shopper, OrderStatus::Shipped);
    b.fulfilled_line(order, item, 4, TimeDelta::hours(2));
    let ledger = b.build();

    let engine = MerchantAnalytics::new(&ledger, fixed_now());
    let stats = engine.merchant_stats(merchant).unwrap();

    assert_eq!(stats.total_items_sold().unwrap(), 4);
    assert_eq!(stats.percent_of_items_sold().unwrap(), None);
}

// =============================================================================
// Geography
// =============================================================================

#[test]
fn test_states_and_cities_by_units_shipped() {
    let s = shop();
    let engine = MerchantAnalytics::new(&s.ledger, fixed_now());
    let stats = engine.merchant_stats(s.merchant).unwrap();

    let states = stats.top_states_by_items_shipped(3).unwrap();
    let rows: Vec<(Region, u64)> = states.iter().map(|r| (r.region.clone(), r.quantity)).collect();
    assert_eq!(
        rows,
        vec![
            (Region::state("IA"), 10),
            (Region::state("OK"), 8),
            (Region::state("CO"), 6),
        ]
    );

    let cities = stats.top_cities_by_items_shipped(3).unwrap();
    let rendered: Vec<String> = cities.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        ["Anywhere, IA: 10 items", "Tulsa, OK: 8 items", "Anywhere, CO: 6 items"]
    );
}

// =============================================================================
// Customers
// =============================================================================

#[test]
fn test_top_customers() {
    let s = shop();
    let engine = MerchantAnalytics::new(&s.ledger, fixed_now());
    let stats = engine.merchant_stats(s.merchant).unwrap();

    let spend = stats.top_users_by_money_spent(3).unwrap();
    let rendered: Vec<String> = spend.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, ["Iris: $66.00", "Casey: $43.50", "Tatum: $36.00"]);

    let by_orders = stats.top_user_by_order_count().unwrap().unwrap();
    assert_eq!(by_orders.user_id, s.casey);
    assert_eq!(by_orders.count, 3);

    let by_items = stats.top_user_by_item_count().unwrap().unwrap();
    assert_eq!(by_items.user_id, s.iris);
    assert_eq!(by_items.count, 10);
}

#[test]
fn test_other_merchant_sees_only_its_own_sales() {
    let s = shop();
    let engine = MerchantAnalytics::new(&s.ledger, fixed_now());
    let stats = engine.merchant_stats(s.other_merchant).unwrap();

    assert_eq!(stats.total_items_sold().unwrap(), 5);
    let spend = stats.top_users_by_money_spent(3).unwrap();
    assert_eq!(spend.len(), 1);
    assert_eq!(spend[0].user_id, s.iris);
    assert_eq!(spend[0].total, dec!(495.00));
}

#[test]
fn test_shopper_is_not_a_merchant() {
    let s = shop();
    let engine = MerchantAnalytics::new(&s.ledger, fixed_now());

    assert!(matches!(
        engine.merchant_stats(s.casey),
        Err(AnalyticsError::NotAMerchant(id)) if id == s.casey
    ));
}

// =============================================================================
// Report
// =============================================================================

#[test]
fn test_report_renders_every_section() {
    let s = shop();
    let engine = MerchantAnalytics::new(&s.ledger, fixed_now());
    let stats = engine.merchant_stats(s.merchant).unwrap();
    let config = DashboardConfig {
        merchant_top_size: 2,
        ..DashboardConfig::default()
    };

    let report = MerchantReport::build(&stats, &config).unwrap();
    assert_eq!(report.top_items.len(), 2);
    assert_eq!(report.top_customers_by_spend.len(), 3);

    let text = report.to_string();
    assert!(text.starts_with("Prairie Goods (merchant 1)\n"));
    assert!(text.contains("Items sold: 24\n"));
    assert!(text.contains("Inventory remaining: 138\n"));
    assert!(text.contains("Percent sold: 17.39%\n"));
    assert!(text.contains("Top items\n  Item 2: 14\n  Item 3: 4\n"));
    assert!(text.contains("Most orders: Casey: 3\n"));
    assert!(text.contains("Most items: Iris: 10\n"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["total_items_sold"], 24);
    assert_eq!(json["top_cities"][0]["region"]["city"], "Anywhere");
}
