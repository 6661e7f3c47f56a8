//! Merchant discount resolution.
//!
//! A merchant's discounts apply per cart line: a discount is eligible while
//! it is active and the line's pre-discount price reaches its threshold.
//! Among eligible discounts the largest amount wins; equal amounts resolve
//! to the lowest discount id.
//!
//! Amounts are applied as-is. A discount larger than the line price drives
//! the line negative.

use bazaar_core::{Item, ItemDiscount, ItemDiscountId, LedgerError, LedgerReader, line_total};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

/// Returns true if `discount` applies to a line priced at `line_total`.
#[must_use]
pub fn is_eligible(discount: &ItemDiscount, line_total: Decimal) -> bool {
    discount.active && discount.order_price_threshold <= line_total
}

/// Pick the best eligible discount for a line.
#[must_use]
pub fn best_discount(discounts: &[ItemDiscount], line_total: Decimal) -> Option<&ItemDiscount> {
    discounts
        .iter()
        .filter(|d| is_eligible(d, line_total))
        .max_by(|a, b| {
            a.discount_amount
                .cmp(&b.discount_amount)
                .then_with(|| b.id.cmp(&a.id))
        })
}

/// The discount that was applied to a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedDiscount {
    pub id: ItemDiscountId,
    pub name: String,
    pub amount: Decimal,
}

impl From<&ItemDiscount> for AppliedDiscount {
    fn from(discount: &ItemDiscount) -> Self {
        Self {
            id: discount.id,
            name: discount.name.clone(),
            amount: discount.discount_amount,
        }
    }
}

/// Price breakdown for one cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinePrice {
    pub item: Item,
    pub quantity: u32,
    /// `price × quantity` before any discount.
    pub full_price: Decimal,
    pub discount: Option<AppliedDiscount>,
    pub subtotal: Decimal,
}

impl LinePrice {
    /// A line with no discount applied.
    #[must_use]
    pub fn undiscounted(item: &Item, quantity: u32) -> Self {
        let full_price = line_total(item.price, quantity);
        Self {
            item: item.clone(),
            quantity,
            full_price,
            discount: None,
            subtotal: full_price,
        }
    }

    /// Price a line against an already-fetched discount set.
    #[must_use]
    pub fn resolve(item: &Item, quantity: u32, discounts: &[ItemDiscount]) -> Self {
        let full_price = line_total(item.price, quantity);
        let discount = best_discount(discounts, full_price).map(AppliedDiscount::from);
        let subtotal = discount
            .as_ref()
            .map_or(full_price, |d| full_price - d.amount);

        Self {
            item: item.clone(),
            quantity,
            full_price,
            discount,
            subtotal,
        }
    }
}

/// Looks up a merchant's discounts and prices a line.
///
/// Stateless: every call re-reads the merchant's discounts from the ledger.
#[derive(Debug)]
pub struct DiscountResolver<'a, L: LedgerReader + ?Sized> {
    ledger: &'a L,
}

impl<'a, L: LedgerReader + ?Sized> DiscountResolver<'a, L> {
    /// Create a resolver over `ledger`.
    #[must_use]
    pub const fn new(ledger: &'a L) -> Self {
        Self { ledger }
    }

    /// Price `quantity` units of `item`.
    ///
    /// A merchant without any discounts is priced at `price × quantity`
    /// directly.
    ///
    /// # Errors
    ///
    /// Returns an error if the merchant's discounts cannot be read.
    pub fn price_line(&self, item: &Item, quantity: u32) -> Result<LinePrice, LedgerError> {
        let discounts = self.ledger.discounts_for_merchant(item.merchant_id)?;
        if discounts.is_empty() {
            debug!(item_id = %item.id, "Merchant has no discounts, using plain price");
            return Ok(LinePrice::undiscounted(item, quantity));
        }
        let line = LinePrice::resolve(item, quantity, &discounts);
        debug!(
            item_id = %item.id,
            merchant_id = %item.merchant_id,
            candidates = discounts.len(),
            applied = ?line.discount.as_ref().map(|d| d.id),
            subtotal = %line.subtotal,
            "Resolved line discount"
        );
        Ok(line)
    }
}
