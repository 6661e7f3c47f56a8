//! Cross-merchant boards shown on the merchants index.

use std::collections::{BTreeMap, BTreeSet};

use bazaar_core::stats::{
    FulfillmentTime, MonthWindow, SortDirection, rank_by, rank_with_alpha_tiebreak,
    top_n_with_alpha_tiebreak,
};
use bazaar_core::{LedgerReader, OrderId, OrderStatus, SaleFilter, User, UserId};
use chrono::TimeDelta;
use rust_decimal::Decimal;
use tracing::instrument;

use super::rows::{
    MerchantCompletedOrders, MerchantFulfillment, MerchantRevenue, MerchantSales, OrderSize,
    Region, RegionOrderCount,
};
use super::{MerchantAnalytics, aggregate, count, units};
use crate::error::Result;

impl<L: LedgerReader + ?Sized> MerchantAnalytics<'_, L> {
    // =========================================================================
    // Revenue
    // =========================================================================

    fn revenue_rows(&self) -> Result<Vec<MerchantRevenue>> {
        let lines = self.sales(&SaleFilter::sold())?;
        self.per_merchant(
            &lines,
            |total: &mut Decimal, line| *total += line.order_item.line_total(),
            |merchant, revenue| {
                Some(MerchantRevenue {
                    merchant_id: merchant.id,
                    name: merchant.name.clone(),
                    revenue,
                })
            },
        )
    }

    /// Every merchant with shipped sales, highest revenue first.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    #[instrument(skip(self))]
    pub fn merchants_sorted_by_revenue(&self) -> Result<Vec<MerchantRevenue>> {
        self.top_merchants_by_revenue(usize::MAX)
    }

    /// The `n` highest-earning merchants.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    pub fn top_merchants_by_revenue(&self, n: usize) -> Result<Vec<MerchantRevenue>> {
        Ok(top_n_with_alpha_tiebreak(
            self.revenue_rows()?,
            n,
            |r| r.revenue,
            |r| r.name.as_str(),
        ))
    }

    /// The `n` lowest-earning merchants that have any shipped sales.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    pub fn bottom_merchants_by_revenue(&self, n: usize) -> Result<Vec<MerchantRevenue>> {
        Ok(rank_with_alpha_tiebreak(
            self.revenue_rows()?,
            n,
            SortDirection::Ascending,
            |r| r.revenue,
            |r| r.name.as_str(),
        ))
    }

    // =========================================================================
    // Fulfillment Time
    // =========================================================================

    fn fulfillment_rows(&self, n: usize, direction: SortDirection) -> Result<Vec<MerchantFulfillment>> {
        let lines = self.sales(&SaleFilter::non_cancelled())?;
        let rows = self.per_merchant(
            &lines,
            |durations: &mut Vec<TimeDelta>, line| durations.push(line.order_item.fulfillment_time()),
            |merchant, durations| {
                FulfillmentTime::mean(durations).map(|average| MerchantFulfillment {
                    merchant_id: merchant.id,
                    name: merchant.name.clone(),
                    average,
                })
            },
        )?;
        Ok(rank_with_alpha_tiebreak(
            rows,
            n,
            direction,
            |r| r.average,
            |r| r.name.as_str(),
        ))
    }

    /// Merchants by mean fulfillment time, fastest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    #[instrument(skip(self))]
    pub fn merchants_sorted_by_fulfillment_time(&self, n: usize) -> Result<Vec<MerchantFulfillment>> {
        self.fulfillment_rows(n, SortDirection::Ascending)
    }

    /// The `n` fastest-fulfilling merchants.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    pub fn top_merchants_by_fulfillment_time(&self, n: usize) -> Result<Vec<MerchantFulfillment>> {
        self.merchants_sorted_by_fulfillment_time(n)
    }

    /// The `n` slowest-fulfilling merchants, slowest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    #[instrument(skip(self))]
    pub fn bottom_merchants_by_fulfillment_time(&self, n: usize) -> Result<Vec<MerchantFulfillment>> {
        self.fulfillment_rows(n, SortDirection::Descending)
    }

    // =========================================================================
    // Geography and Orders
    // =========================================================================

    fn orders_by_region<F>(&self, n: usize, region_of: F) -> Result<Vec<RegionOrderCount>>
    where
        F: Fn(&User) -> Region,
    {
        let mut buyers: BTreeMap<UserId, User> = BTreeMap::new();
        let mut counts: BTreeMap<Region, u64> = BTreeMap::new();
        for order in self.ledger.orders_with_status(OrderStatus::SOLD)? {
            if !buyers.contains_key(&order.user_id) {
                let buyer = self.ledger.user_by_id(order.user_id)?;
                buyers.insert(order.user_id, buyer);
            }
            if let Some(buyer) = buyers.get(&order.user_id) {
                *counts.entry(region_of(buyer)).or_default() += 1;
            }
        }
        let rows: Vec<RegionOrderCount> = counts
            .into_iter()
            .map(|(region, order_count)| RegionOrderCount {
                region,
                order_count,
            })
            .collect();
        Ok(rank_by(
            rows,
            n,
            SortDirection::Descending,
            |r| r.order_count,
            |r| r.region.clone(),
        ))
    }

    /// States whose shoppers placed the most shipped orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    #[instrument(skip(self))]
    pub fn top_states_by_order_count(&self, n: usize) -> Result<Vec<RegionOrderCount>> {
        self.orders_by_region(n, |buyer| Region::state(&buyer.state))
    }

    /// Cities whose shoppers placed the most shipped orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    #[instrument(skip(self))]
    pub fn top_cities_by_order_count(&self, n: usize) -> Result<Vec<RegionOrderCount>> {
        self.orders_by_region(n, |buyer| Region::city(&buyer.city, &buyer.state))
    }

    /// Shipped orders with the most fulfilled units; ties go to the older order.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    #[instrument(skip(self))]
    pub fn top_orders_by_items_shipped(&self, n: usize) -> Result<Vec<OrderSize>> {
        let lines = self.sales(&SaleFilter::sold())?;
        let rows: Vec<OrderSize> = aggregate(
            &lines,
            |line| line.order.id,
            |total: &mut u64, line| *total += units(line),
        )
        .into_iter()
        .map(|(order_id, items_shipped)| OrderSize {
            order_id,
            items_shipped,
        })
        .collect();
        Ok(rank_by(
            rows,
            n,
            SortDirection::Descending,
            |r| r.items_shipped,
            |r| r.order_id,
        ))
    }

    // =========================================================================
    // Monthly Leaderboards
    // =========================================================================

    /// Merchants by units shipped in `window`.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    #[instrument(skip(self))]
    pub fn top_selling_merchants(&self, window: MonthWindow, n: usize) -> Result<Vec<MerchantSales>> {
        let filter = SaleFilter::sold().within(window.bounds(self.now()));
        let lines = self.sales(&filter)?;
        let rows = self.per_merchant(
            &lines,
            |total: &mut u64, line| *total += units(line),
            |merchant, quantity_sold| {
                Some(MerchantSales {
                    merchant_id: merchant.id,
                    name: merchant.name.clone(),
                    quantity_sold,
                })
            },
        )?;
        Ok(top_n_with_alpha_tiebreak(
            rows,
            n,
            |r| r.quantity_sold,
            |r| r.name.as_str(),
        ))
    }

    /// [`Self::top_selling_merchants`] for the current month.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    pub fn top_selling_merchants_current(&self, n: usize) -> Result<Vec<MerchantSales>> {
        self.top_selling_merchants(MonthWindow::Current, n)
    }

    /// [`Self::top_selling_merchants`] for the previous month.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    pub fn top_selling_merchants_previous(&self, n: usize) -> Result<Vec<MerchantSales>> {
        self.top_selling_merchants(MonthWindow::Previous, n)
    }

    /// Merchants by distinct packaged or shipped orders fulfilled in `window`.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    #[instrument(skip(self))]
    pub fn top_fulfilled_non_cancelled_orders(
        &self,
        window: MonthWindow,
        n: usize,
    ) -> Result<Vec<MerchantCompletedOrders>> {
        let filter = SaleFilter::non_cancelled().within(window.bounds(self.now()));
        let lines = self.sales(&filter)?;
        let rows = self.per_merchant(
            &lines,
            |orders: &mut BTreeSet<OrderId>, line| {
                orders.insert(line.order.id);
            },
            |merchant, orders| {
                Some(MerchantCompletedOrders {
                    merchant_id: merchant.id,
                    name: merchant.name.clone(),
                    completed_orders: count(orders.len()),
                })
            },
        )?;
        Ok(top_n_with_alpha_tiebreak(
            rows,
            n,
            |r| r.completed_orders,
            |r| r.name.as_str(),
        ))
    }

    /// [`Self::top_fulfilled_non_cancelled_orders`] for the current month.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    pub fn top_fulfilled_non_cancelled_orders_current(
        &self,
        n: usize,
    ) -> Result<Vec<MerchantCompletedOrders>> {
        self.top_fulfilled_non_cancelled_orders(MonthWindow::Current, n)
    }

    /// [`Self::top_fulfilled_non_cancelled_orders`] for the previous month.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    pub fn top_fulfilled_non_cancelled_orders_previous(
        &self,
        n: usize,
    ) -> Result<Vec<MerchantCompletedOrders>> {
        self.top_fulfilled_non_cancelled_orders(MonthWindow::Previous, n)
    }
}
