//! Stats for one merchant's dashboard.
//!
//! All figures count fulfilled items on shipped orders.

use std::collections::BTreeSet;

use bazaar_core::stats::{SortDirection, rank_by, top_n_with_alpha_tiebreak};
use bazaar_core::{Item, LedgerReader, OrderId, SaleFilter, SaleLine, User, UserId};
use rust_decimal::Decimal;
use tracing::instrument;

use super::rows::{CustomerCount, CustomerSpend, ItemSales, Region, RegionQuantity};
use super::{MerchantAnalytics, aggregate, count, units};
use crate::error::{AnalyticsError, Result};

impl<L: LedgerReader + ?Sized> MerchantAnalytics<'_, L> {
    /// Open the stats view for one merchant.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::NotAMerchant`] if the user does not sell, or
    /// a ledger error if the user does not exist.
    pub fn merchant_stats(&self, merchant_id: UserId) -> Result<MerchantStats<'_, L>> {
        let merchant = self.ledger.user_by_id(merchant_id)?;
        if !merchant.is_merchant() {
            return Err(AnalyticsError::NotAMerchant(merchant_id));
        }
        Ok(MerchantStats {
            ledger: self.ledger,
            merchant,
        })
    }
}

/// One merchant's sales figures.
#[derive(Debug)]
pub struct MerchantStats<'a, L: LedgerReader + ?Sized> {
    ledger: &'a L,
    merchant: User,
}

impl<L: LedgerReader + ?Sized> MerchantStats<'_, L> {
    /// The merchant these stats describe.
    #[must_use]
    pub const fn merchant(&self) -> &User {
        &self.merchant
    }

    fn sales(&self) -> Result<Vec<SaleLine>> {
        let filter = SaleFilter::sold().for_merchant(self.merchant.id);
        Ok(self.ledger.fulfilled_order_items(&filter)?)
    }

    /// Items currently listed for sale.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    pub fn active_items(&self) -> Result<Vec<Item>> {
        Ok(self
            .ledger
            .items_for_merchant(self.merchant.id)?
            .into_iter()
            .filter(|i| i.active)
            .collect())
    }

    /// Best-selling items by units shipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    #[instrument(skip(self), fields(merchant_id = %self.merchant.id))]
    pub fn top_items_sold_by_quantity(&self, n: usize) -> Result<Vec<ItemSales>> {
        let lines = self.sales()?;
        let rows: Vec<ItemSales> = aggregate(
            &lines,
            |line| line.item.id,
            |row: &mut Option<ItemSales>, line| {
                row.get_or_insert_with(|| ItemSales {
                    item_id: line.item.id,
                    name: line.item.name.clone(),
                    quantity: 0,
                })
                .quantity += units(line);
            },
        )
        .into_values()
        .flatten()
        .collect();
        Ok(top_n_with_alpha_tiebreak(
            rows,
            n,
            |r| r.quantity,
            |r| r.name.as_str(),
        ))
    }

    /// Units shipped across every item.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    pub fn total_items_sold(&self) -> Result<u64> {
        Ok(self.sales()?.iter().map(units).sum())
    }

    /// Inventory left across active items.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    pub fn total_inventory_remaining(&self) -> Result<u64> {
        Ok(self
            .active_items()?
            .iter()
            .map(|i| u64::from(i.inventory))
            .sum())
    }

    /// Units sold as a percentage of remaining inventory.
    ///
    /// `None` when nothing is left in stock.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    pub fn percent_of_items_sold(&self) -> Result<Option<Decimal>> {
        let remaining = self.total_inventory_remaining()?;
        if remaining == 0 {
            return Ok(None);
        }
        let sold = Decimal::from(self.total_items_sold()?);
        Ok(Some(sold / Decimal::from(remaining) * Decimal::ONE_HUNDRED))
    }

    fn units_by_region<F>(&self, n: usize, region_of: F) -> Result<Vec<RegionQuantity>>
    where
        F: Fn(&User) -> Region,
    {
        let lines = self.sales()?;
        let rows: Vec<RegionQuantity> = aggregate(
            &lines,
            |line| region_of(&line.buyer),
            |total: &mut u64, line| *total += units(line),
        )
        .into_iter()
        .map(|(region, quantity)| RegionQuantity { region, quantity })
        .collect();
        Ok(rank_by(
            rows,
            n,
            SortDirection::Descending,
            |r| r.quantity,
            |r| r.region.clone(),
        ))
    }

    /// States this merchant shipped the most units to.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    pub fn top_states_by_items_shipped(&self, n: usize) -> Result<Vec<RegionQuantity>> {
        self.units_by_region(n, |buyer| Region::state(&buyer.state))
    }

    /// Cities this merchant shipped the most units to.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    pub fn top_cities_by_items_shipped(&self, n: usize) -> Result<Vec<RegionQuantity>> {
        self.units_by_region(n, |buyer| Region::city(&buyer.city, &buyer.state))
    }

    // =========================================================================
    // Customers
    // =========================================================================

    /// Customers who spent the most with this merchant.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    pub fn top_users_by_money_spent(&self, n: usize) -> Result<Vec<CustomerSpend>> {
        let lines = self.sales()?;
        let rows: Vec<CustomerSpend> = aggregate(
            &lines,
            |line| line.buyer.id,
            |row: &mut Option<CustomerSpend>, line| {
                row.get_or_insert_with(|| CustomerSpend {
                    user_id: line.buyer.id,
                    name: line.buyer.name.clone(),
                    total: Decimal::ZERO,
                })
                .total += line.order_item.line_total();
            },
        )
        .into_values()
        .flatten()
        .collect();
        Ok(top_n_with_alpha_tiebreak(
            rows,
            n,
            |r| r.total,
            |r| r.name.as_str(),
        ))
    }

    /// Customers with the most distinct orders containing this merchant's items.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    pub fn top_users_by_order_count(&self, n: usize) -> Result<Vec<CustomerCount>> {
        let lines = self.sales()?;
        let rows: Vec<CustomerCount> = aggregate(
            &lines,
            |line| line.buyer.id,
            |acc: &mut Option<(String, BTreeSet<OrderId>)>, line| {
                acc.get_or_insert_with(|| (line.buyer.name.clone(), BTreeSet::new()))
                    .1
                    .insert(line.order.id);
            },
        )
        .into_iter()
        .filter_map(|(user_id, acc)| {
            acc.map(|(name, orders)| CustomerCount {
                user_id,
                name,
                count: count(orders.len()),
            })
        })
        .collect();
        Ok(top_n_with_alpha_tiebreak(
            rows,
            n,
            |r| r.count,
            |r| r.name.as_str(),
        ))
    }

    /// Customers who bought the most units from this merchant.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    pub fn top_users_by_item_count(&self, n: usize) -> Result<Vec<CustomerCount>> {
        let lines = self.sales()?;
        let rows: Vec<CustomerCount> = aggregate(
            &lines,
            |line| line.buyer.id,
            |row: &mut Option<CustomerCount>, line| {
                row.get_or_insert_with(|| CustomerCount {
                    user_id: line.buyer.id,
                    name: line.buyer.name.clone(),
                    count: 0,
                })
                .count += units(line);
            },
        )
        .into_values()
        .flatten()
        .collect();
        Ok(top_n_with_alpha_tiebreak(
            rows,
            n,
            |r| r.count,
            |r| r.name.as_str(),
        ))
    }

    /// The customer with the most orders, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    pub fn top_user_by_order_count(&self) -> Result<Option<CustomerCount>> {
        Ok(self.top_users_by_order_count(1)?.into_iter().next())
    }

    /// The customer who bought the most units, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    pub fn top_user_by_item_count(&self) -> Result<Option<CustomerCount>> {
        Ok(self.top_users_by_item_count(1)?.into_iter().next())
    }
}
