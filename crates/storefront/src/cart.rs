//! Shopping cart pricing.
//!
//! A cart is rebuilt per request from the stored quantity map, mutated only
//! through [`Cart::add_item`] / [`Cart::remove_item`], and handed back as
//! [`CartContents`] for persistence.

use std::cell::OnceCell;
use std::collections::BTreeMap;

use bazaar_core::{Item, ItemId, LedgerReader};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::discounts::{DiscountResolver, LinePrice};
use crate::error::{CartError, Result};

// =============================================================================
// Stored Contents
// =============================================================================

/// The persisted shape of a cart: item id (as a string key) to quantity.
///
/// Entries are never zero; an item leaves the map when its count reaches 0.
/// Keys are always the canonical rendering of an [`ItemId`], so `"01"` and
/// `" 1"` are stored as `"1"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, u32>", into = "BTreeMap<String, u32>")]
pub struct CartContents(BTreeMap<String, u32>);

impl TryFrom<BTreeMap<String, u32>> for CartContents {
    type Error = CartError;

    /// Re-key every entry by its parsed item id, merging keys that name the
    /// same item.
    fn try_from(raw: BTreeMap<String, u32>) -> Result<Self> {
        let mut contents = Self::new();
        for (key, quantity) in raw {
            let id: ItemId = key.parse().map_err(|_| CartError::InvalidItemKey(key))?;
            contents.insert(id, quantity);
        }
        Ok(contents)
    }
}

impl From<CartContents> for BTreeMap<String, u32> {
    fn from(contents: CartContents) -> Self {
        contents.0
    }
}

impl CartContents {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Parse contents from a JSON object such as `{"1": 2}`.
    ///
    /// Zero quantities are dropped and keys naming the same item are merged.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Contents`] if the JSON is malformed and
    /// [`CartError::InvalidItemKey`] for a key that is not an item id.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, u32> = serde_json::from_str(json)?;
        Self::try_from(raw)
    }

    /// Serialize contents to a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Contents`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.0)?)
    }

    /// Stored quantity for a key, or 0.
    #[must_use]
    pub fn get(&self, key: &str) -> u32 {
        self.0.get(key).copied().unwrap_or(0)
    }

    /// Returns true if the cart holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(key, quantity)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(k, q)| (k.as_str(), *q))
    }

    /// Add `quantity` units under the item's canonical key, saturating at
    /// `u32::MAX`.
    fn insert(&mut self, item_id: ItemId, quantity: u32) {
        if quantity == 0 {
            return;
        }
        let entry = self.0.entry(item_id.to_string()).or_insert(0);
        *entry = entry.saturating_add(quantity);
    }
}

impl FromIterator<(ItemId, u32)> for CartContents {
    fn from_iter<I: IntoIterator<Item = (ItemId, u32)>>(iter: I) -> Self {
        let mut contents = Self::new();
        for (id, quantity) in iter {
            contents.insert(id, quantity);
        }
        contents
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A cart line resolved to its item record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub item: Item,
    pub quantity: u32,
}

/// A shopper's cart priced against a ledger.
///
/// Item resolution happens once per instance: the first call to
/// [`Cart::items`] caches the lines, and later calls reuse them.
#[derive(Debug)]
pub struct Cart<'a, L: LedgerReader + ?Sized> {
    contents: CartContents,
    ledger: &'a L,
    resolver: DiscountResolver<'a, L>,
    items: OnceCell<Vec<CartLine>>,
}

impl<'a, L: LedgerReader + ?Sized> Cart<'a, L> {
    /// Hydrate a cart from stored contents, or start empty.
    #[must_use]
    pub fn new(contents: Option<CartContents>, ledger: &'a L) -> Self {
        Self {
            contents: contents.unwrap_or_default(),
            ledger,
            resolver: DiscountResolver::new(ledger),
            items: OnceCell::new(),
        }
    }

    /// Current contents, for persistence.
    #[must_use]
    pub const fn contents(&self) -> &CartContents {
        &self.contents
    }

    /// Consume the cart and return its contents.
    #[must_use]
    pub fn into_contents(self) -> CartContents {
        self.contents
    }

    /// Add one unit of an item. A line already at `u32::MAX` stays there.
    pub fn add_item(&mut self, item_id: ItemId) {
        self.contents.insert(item_id, 1);
    }

    /// Remove one unit of an item. Removing an absent item does nothing.
    pub fn remove_item(&mut self, item_id: ItemId) {
        let key = item_id.to_string();
        if let Some(quantity) = self.contents.0.get_mut(&key) {
            *quantity = quantity.saturating_sub(1);
            if *quantity == 0 {
                self.contents.0.remove(&key);
            }
        }
    }

    /// Quantity held of an item, or 0.
    #[must_use]
    pub fn count_of(&self, item_id: ItemId) -> u32 {
        self.contents.get(&item_id.to_string())
    }

    /// Total units across every line.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.contents.0.values().copied().map(u64::from).sum()
    }

    /// Resolve every line to its item record.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidItemKey`] for a key that is not an item id
    /// and [`CartError::Ledger`] for an id the ledger does not know.
    pub fn items(&self) -> Result<&[CartLine]> {
        if let Some(lines) = self.items.get() {
            return Ok(lines);
        }
        let lines = self.load_items()?;
        Ok(self.items.get_or_init(|| lines).as_slice())
    }

    fn load_items(&self) -> Result<Vec<CartLine>> {
        self.contents
            .iter()
            .map(|(key, quantity)| {
                let id: ItemId = key
                    .parse()
                    .map_err(|_| CartError::InvalidItemKey(key.to_string()))?;
                let item = self.ledger.item_by_id(id)?;
                Ok(CartLine { item, quantity })
            })
            .collect()
    }

    /// Price of one line at its current quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Ledger`] if the merchant's discounts cannot be read.
    pub fn subtotal(&self, item: &Item) -> Result<Decimal> {
        Ok(self.resolver.price_line(item, self.count_of(item.id))?.subtotal)
    }

    /// Per-line breakdown for display.
    ///
    /// # Errors
    ///
    /// Propagates item resolution and discount lookup failures.
    pub fn line_prices(&self) -> Result<Vec<LinePrice>> {
        self.items()?
            .iter()
            .map(|line| {
                self.resolver
                    .price_line(&line.item, self.count_of(line.item.id))
                    .map_err(CartError::from)
            })
            .collect()
    }

    /// Sum of every line's subtotal.
    ///
    /// # Errors
    ///
    /// Propagates item resolution and discount lookup failures.
    #[instrument(skip(self), fields(lines = self.contents.0.len()))]
    pub fn total(&self) -> Result<Decimal> {
        let mut total = Decimal::ZERO;
        for line in self.items()? {
            total += self.subtotal(&line.item)?;
        }
        debug!(%total, "Cart total");
        Ok(total)
    }
}
