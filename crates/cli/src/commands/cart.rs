//! Cart pricing command.
//!
//! # Usage
//!
//! ```bash
//! bazaar cart total --ledger ledger.yaml --cart '{"1": 2}'
//! ```

use std::io::Write;
use std::path::Path;

use bazaar_core::Price;
use bazaar_storefront::{Cart, CartContents};
use tracing::info;

use crate::snapshot;

/// Price a cart and print one line per item plus the total.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded, the cart JSON is
/// invalid, or the cart references an unknown item.
pub fn total(ledger_path: &Path, cart_json: &str) -> Result<(), Box<dyn std::error::Error>> {
    let ledger = snapshot::load(ledger_path)?;
    let contents = CartContents::from_json(cart_json)?;
    let cart = Cart::new(Some(contents), &ledger);

    let lines = cart.line_prices()?;
    let total = cart.total()?;
    info!(
        lines = lines.len(),
        items = cart.total_item_count(),
        "Priced cart"
    );

    let mut out = std::io::stdout().lock();
    for line in &lines {
        write!(
            out,
            "{} x{} @ {}: {}",
            line.item.name,
            line.quantity,
            Price::usd(line.item.price),
            Price::usd(line.subtotal)
        )?;
        if let Some(discount) = &line.discount {
            write!(out, " ({} -{})", discount.name, Price::usd(discount.amount))?;
        }
        writeln!(out)?;
    }
    writeln!(out, "Total: {}", Price::usd(total))?;
    Ok(())
}
