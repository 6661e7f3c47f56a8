//! Board collections rendered by the merchants index and merchant pages.

use std::fmt;

use bazaar_core::{Item, LedgerReader, UserId};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, instrument};

use crate::analytics::{
    CustomerCount, CustomerSpend, ItemSales, MerchantAnalytics, MerchantCompletedOrders,
    MerchantFulfillment, MerchantRevenue, MerchantSales, MerchantStats, OrderSize,
    RegionFulfillment, RegionOrderCount, RegionQuantity,
};
use crate::config::DashboardConfig;
use crate::error::Result;

/// Write a titled board, one row per line.
fn write_board<T: fmt::Display>(f: &mut fmt::Formatter<'_>, title: &str, rows: &[T]) -> fmt::Result {
    writeln!(f, "{title}")?;
    if rows.is_empty() {
        writeln!(f, "  (none)")?;
    }
    for row in rows {
        writeln!(f, "  {row}")?;
    }
    Ok(())
}

// =============================================================================
// Merchants Index
// =============================================================================

/// Fulfillment boards for the signed-in shopper.
#[derive(Debug, Clone, Serialize)]
pub struct ViewerBoards {
    pub viewer_id: UserId,
    pub fastest_cities: Vec<RegionFulfillment>,
    pub fastest_states: Vec<RegionFulfillment>,
}

/// Every board on the merchants index.
#[derive(Debug, Clone, Serialize)]
pub struct MerchantsDashboard {
    pub top_merchants_by_revenue: Vec<MerchantRevenue>,
    pub top_merchants_by_fulfillment: Vec<MerchantFulfillment>,
    pub bottom_merchants_by_fulfillment: Vec<MerchantFulfillment>,
    pub top_states_by_order_count: Vec<RegionOrderCount>,
    pub top_cities_by_order_count: Vec<RegionOrderCount>,
    pub top_orders_by_items_shipped: Vec<OrderSize>,
    pub top_sellers_current: Vec<MerchantSales>,
    pub top_sellers_previous: Vec<MerchantSales>,
    pub top_fulfillment_current: Vec<MerchantCompletedOrders>,
    pub top_fulfillment_previous: Vec<MerchantCompletedOrders>,
    pub viewer: Option<ViewerBoards>,
}

impl MerchantsDashboard {
    /// Compute every board. Viewer boards are included when `viewer` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    #[instrument(skip(engine, config))]
    pub fn build<L: LedgerReader + ?Sized>(
        engine: &MerchantAnalytics<'_, L>,
        config: &DashboardConfig,
        viewer: Option<UserId>,
    ) -> Result<Self> {
        let podium = config.podium_size;
        let board = config.leaderboard_size;

        let viewer = viewer
            .map(|viewer_id| -> Result<ViewerBoards> {
                Ok(ViewerBoards {
                    viewer_id,
                    fastest_cities: engine.top_fulfillment_city(viewer_id, config.local_board_size)?,
                    fastest_states: engine
                        .top_fulfillment_state(viewer_id, config.local_board_size)?,
                })
            })
            .transpose()?;

        let dashboard = Self {
            top_merchants_by_revenue: engine.top_merchants_by_revenue(podium)?,
            top_merchants_by_fulfillment: engine.top_merchants_by_fulfillment_time(podium)?,
            bottom_merchants_by_fulfillment: engine.bottom_merchants_by_fulfillment_time(podium)?,
            top_states_by_order_count: engine.top_states_by_order_count(podium)?,
            top_cities_by_order_count: engine.top_cities_by_order_count(podium)?,
            top_orders_by_items_shipped: engine.top_orders_by_items_shipped(podium)?,
            top_sellers_current: engine.top_selling_merchants_current(board)?,
            top_sellers_previous: engine.top_selling_merchants_previous(board)?,
            top_fulfillment_current: engine.top_fulfilled_non_cancelled_orders_current(board)?,
            top_fulfillment_previous: engine.top_fulfilled_non_cancelled_orders_previous(board)?,
            viewer,
        };
        info!(
            scope = ?engine.scope(),
            sellers = dashboard.top_sellers_current.len(),
            "Built merchants dashboard"
        );
        Ok(dashboard)
    }
}

impl fmt::Display for MerchantsDashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_board(f, "Top merchants by revenue", &self.top_merchants_by_revenue)?;
        write_board(f, "Fastest fulfillment", &self.top_merchants_by_fulfillment)?;
        write_board(f, "Slowest fulfillment", &self.bottom_merchants_by_fulfillment)?;
        write_board(f, "Top states by orders", &self.top_states_by_order_count)?;
        write_board(f, "Top cities by orders", &self.top_cities_by_order_count)?;
        write_board(f, "Largest orders", &self.top_orders_by_items_shipped)?;
        write_board(f, "Top sellers this month", &self.top_sellers_current)?;
        write_board(f, "Top sellers last month", &self.top_sellers_previous)?;
        write_board(f, "Most orders fulfilled this month", &self.top_fulfillment_current)?;
        write_board(f, "Most orders fulfilled last month", &self.top_fulfillment_previous)?;
        if let Some(viewer) = &self.viewer {
            write_board(f, "Fastest cities for your orders", &viewer.fastest_cities)?;
            write_board(f, "Fastest states for your orders", &viewer.fastest_states)?;
        }
        Ok(())
    }
}

// =============================================================================
// Merchant Page
// =============================================================================

/// Everything on one merchant's stats page.
#[derive(Debug, Clone, Serialize)]
pub struct MerchantReport {
    pub merchant_id: UserId,
    pub name: String,
    pub active_items: Vec<Item>,
    pub top_items: Vec<ItemSales>,
    pub total_items_sold: u64,
    pub total_inventory_remaining: u64,
    pub percent_of_items_sold: Option<Decimal>,
    pub top_states: Vec<RegionQuantity>,
    pub top_cities: Vec<RegionQuantity>,
    pub top_customers_by_spend: Vec<CustomerSpend>,
    pub top_customer_by_orders: Option<CustomerCount>,
    pub top_customer_by_items: Option<CustomerCount>,
}

impl MerchantReport {
    /// Gather a merchant's stats.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    #[instrument(skip_all, fields(merchant_id = %stats.merchant().id))]
    pub fn build<L: LedgerReader + ?Sized>(
        stats: &MerchantStats<'_, L>,
        config: &DashboardConfig,
    ) -> Result<Self> {
        let top = config.merchant_top_size;
        let merchant = stats.merchant();
        Ok(Self {
            merchant_id: merchant.id,
            name: merchant.name.clone(),
            active_items: stats.active_items()?,
            top_items: stats.top_items_sold_by_quantity(top)?,
            total_items_sold: stats.total_items_sold()?,
            total_inventory_remaining: stats.total_inventory_remaining()?,
            percent_of_items_sold: stats.percent_of_items_sold()?,
            top_states: stats.top_states_by_items_shipped(top)?,
            top_cities: stats.top_cities_by_items_shipped(top)?,
            top_customers_by_spend: stats.top_users_by_money_spent(config.podium_size)?,
            top_customer_by_orders: stats.top_user_by_order_count()?,
            top_customer_by_items: stats.top_user_by_item_count()?,
        })
    }
}

impl fmt::Display for MerchantReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} (merchant {})", self.name, self.merchant_id)?;
        writeln!(f, "Active items: {}", self.active_items.len())?;
        writeln!(f, "Items sold: {}", self.total_items_sold)?;
        writeln!(f, "Inventory remaining: {}", self.total_inventory_remaining)?;
        match self.percent_of_items_sold {
            Some(percent) => writeln!(f, "Percent sold: {}%", percent.round_dp(2).normalize())?,
            None => writeln!(f, "Percent sold: n/a")?,
        }
        write_board(f, "Top items", &self.top_items)?;
        write_board(f, "Top states", &self.top_states)?;
        write_board(f, "Top cities", &self.top_cities)?;
        write_board(f, "Top customers by spend", &self.top_customers_by_spend)?;
        if let Some(customer) = &self.top_customer_by_orders {
            writeln!(f, "Most orders: {customer}")?;
        }
        if let Some(customer) = &self.top_customer_by_items {
            writeln!(f, "Most items: {customer}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bazaar_core::{OrderStatus, UserRole};
    use chrono::TimeDelta;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::analytics::fixtures::{Snapshot, now};

    fn ledger() -> bazaar_core::InMemoryLedger {
        let mut s = Snapshot::default();
        let ann = s.user(1, UserRole::Default, "Ann", "Tulsa", "OK");
        let shop = s.user(10, UserRole::Merchant, "Shop", "Ames", "IA");
        let mug = s.item(1, shop, dec!(8), 10);
        let order = s.order(ann, OrderStatus::Shipped, now());
        s.line(order, mug, 2, TimeDelta::hours(3));
        s.build()
    }

    #[test]
    fn test_dashboard_includes_viewer_boards_on_request() {
        let ledger = ledger();
        let engine = MerchantAnalytics::new(&ledger, now());
        let config = DashboardConfig::default();

        let anonymous = MerchantsDashboard::build(&engine, &config, None).unwrap();
        assert!(anonymous.viewer.is_none());
        assert_eq!(anonymous.top_merchants_by_revenue[0].to_string(), "Shop: $16.00");
        assert_eq!(anonymous.top_sellers_current[0].quantity_sold, 2);

        let signed_in = MerchantsDashboard::build(&engine, &config, Some(UserId::new(1))).unwrap();
        let viewer = signed_in.viewer.as_ref().unwrap();
        assert_eq!(viewer.fastest_states[0].to_string(), "IA: 0 days 03 hours 00 minutes");

        let text = signed_in.to_string();
        assert!(text.contains("Top sellers last month\n  (none)\n"));
        assert!(text.contains("Fastest cities for your orders\n  Ames, IA"));
    }

    #[test]
    fn test_dashboard_serializes() {
        let ledger = ledger();
        let engine = MerchantAnalytics::new(&ledger, now());
        let dashboard = MerchantsDashboard::build(&engine, &DashboardConfig::default(), None).unwrap();
        let json = serde_json::to_value(&dashboard).unwrap();
        assert_eq!(json["top_merchants_by_revenue"][0]["revenue"], "16");
        assert_eq!(json["top_merchants_by_fulfillment"][0]["average"], 10_800);
    }

    #[test]
    fn test_merchant_report() {
        let ledger = ledger();
        let engine = MerchantAnalytics::new(&ledger, now());
        let stats = engine.merchant_stats(UserId::new(10)).unwrap();
        let report = MerchantReport::build(&stats, &DashboardConfig::default()).unwrap();
        assert_eq!(report.total_items_sold, 2);
        assert_eq!(report.percent_of_items_sold, Some(dec!(20)));
        assert!(report.to_string().contains("Percent sold: 20%"));
        assert_eq!(report.top_customer_by_orders.unwrap().name, "Ann");
    }
}
