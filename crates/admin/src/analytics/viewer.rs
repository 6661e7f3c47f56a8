//! Boards built from the viewing shopper's own orders.

use std::collections::BTreeMap;

use bazaar_core::stats::{FulfillmentTime, SortDirection, rank_by};
use bazaar_core::{LedgerReader, SaleFilter, User, UserId};
use chrono::TimeDelta;
use tracing::instrument;

use super::MerchantAnalytics;
use super::rows::{Region, RegionFulfillment};
use crate::error::Result;

impl<L: LedgerReader + ?Sized> MerchantAnalytics<'_, L> {
    /// Mean fulfillment time of the shopper's packaged or shipped items,
    /// grouped by the selling merchant's region, fastest first.
    fn fulfillment_by_merchant_region<F>(
        &self,
        buyer_id: UserId,
        n: usize,
        region_of: F,
    ) -> Result<Vec<RegionFulfillment>>
    where
        F: Fn(&User) -> Region,
    {
        let lines = self.sales(&SaleFilter::non_cancelled().for_buyer(buyer_id))?;

        let mut merchants: BTreeMap<UserId, User> = BTreeMap::new();
        let mut durations: BTreeMap<Region, Vec<TimeDelta>> = BTreeMap::new();
        for line in &lines {
            let merchant_id = line.item.merchant_id;
            if !merchants.contains_key(&merchant_id) {
                let merchant = self.ledger.user_by_id(merchant_id)?;
                merchants.insert(merchant_id, merchant);
            }
            if let Some(merchant) = merchants.get(&merchant_id) {
                durations
                    .entry(region_of(merchant))
                    .or_default()
                    .push(line.order_item.fulfillment_time());
            }
        }

        let rows: Vec<RegionFulfillment> = durations
            .into_iter()
            .filter_map(|(region, times)| {
                FulfillmentTime::mean(times).map(|average| RegionFulfillment { region, average })
            })
            .collect();
        Ok(rank_by(
            rows,
            n,
            SortDirection::Ascending,
            |r| r.average,
            |r| r.region.clone(),
        ))
    }

    /// Merchant cities that fulfilled this shopper's orders fastest.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    #[instrument(skip(self))]
    pub fn top_fulfillment_city(&self, buyer_id: UserId, n: usize) -> Result<Vec<RegionFulfillment>> {
        self.fulfillment_by_merchant_region(buyer_id, n, |m| Region::city(&m.city, &m.state))
    }

    /// Merchant states that fulfilled this shopper's orders fastest.
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be read.
    #[instrument(skip(self))]
    pub fn top_fulfillment_state(&self, buyer_id: UserId, n: usize) -> Result<Vec<RegionFulfillment>> {
        self.fulfillment_by_merchant_region(buyer_id, n, |m| Region::state(&m.state))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bazaar_core::{OrderStatus, UserRole};
    use rust_decimal_macros::dec;

    use super::super::fixtures::{Snapshot, now};
    use super::*;

    #[test]
    fn test_groups_by_merchant_region() {
        let mut s = Snapshot::default();
        let ann = s.user(1, UserRole::Default, "Ann", "Tulsa", "OK");
        let other = s.user(2, UserRole::Default, "Bo", "Tulsa", "OK");
        let denver = s.user(10, UserRole::Merchant, "D", "Denver", "CO");
        let boulder = s.user(11, UserRole::Merchant, "B", "Boulder", "CO");
        let ames = s.user(12, UserRole::Merchant, "A", "Ames", "IA");
        let d_item = s.item(1, denver, dec!(1), 10);
        let b_item = s.item(2, boulder, dec!(1), 10);
        let a_item = s.item(3, ames, dec!(1), 10);

        let o1 = s.order(ann, OrderStatus::Shipped, now());
        s.line(o1, d_item, 1, TimeDelta::hours(10));
        s.line(o1, b_item, 1, TimeDelta::hours(2));
        let o2 = s.order(ann, OrderStatus::Packaged, now());
        s.line(o2, a_item, 1, TimeDelta::hours(4));
        let o3 = s.order(ann, OrderStatus::Cancelled, now());
        s.line(o3, a_item, 1, TimeDelta::minutes(1));
        let o4 = s.order(other, OrderStatus::Shipped, now());
        s.line(o4, d_item, 1, TimeDelta::minutes(1));
        let ledger = s.build();
        let engine = MerchantAnalytics::new(&ledger, now());

        let cities = engine.top_fulfillment_city(ann, 5).unwrap();
        let labels: Vec<String> = cities.iter().map(ToString::to_string).collect();
        assert_eq!(
            labels,
            vec![
                "Boulder, CO: 0 days 02 hours 00 minutes",
                "Ames, IA: 0 days 04 hours 00 minutes",
                "Denver, CO: 0 days 10 hours 00 minutes",
            ]
        );

        let states = engine.top_fulfillment_state(ann, 5).unwrap();
        let labels: Vec<String> = states.iter().map(ToString::to_string).collect();
        assert_eq!(
            labels,
            vec![
                "IA: 0 days 04 hours 00 minutes",
                "CO: 0 days 06 hours 00 minutes",
            ]
        );
    }

    #[test]
    fn test_shopper_without_orders() {
        let ledger = Snapshot::default().build();
        let engine = MerchantAnalytics::new(&ledger, now());
        assert!(engine.top_fulfillment_city(UserId::new(1), 5).unwrap().is_empty());
    }
}
