//! Cart quantity map and derived totals.
//!
//! The cart is a mapping from product ID to a positive quantity. Entries
//! never hold a quantity of zero: reaching zero removes the key. Derived
//! values (item count, total amount) are recomputed from current state on
//! every call, never cached.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::product::Product;

/// Mapping from product ID to positive quantity.
///
/// Serializes as a plain JSON object (`{"p1": 2}`), matching the backend's
/// `cartItems` wire format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartItems(BTreeMap<ProductId, u32>);

impl CartItems {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Quantity stored for a product, or 0 if absent.
    #[must_use]
    pub fn quantity(&self, id: &ProductId) -> u32 {
        self.0.get(id).copied().unwrap_or(0)
    }

    /// Increment the quantity for a product by 1.
    pub fn add(&mut self, id: ProductId) {
        *self.0.entry(id).or_insert(0) += 1;
    }

    /// Set the quantity for a product.
    ///
    /// A quantity of 0 removes the entry; a key with quantity 0 must never
    /// persist in the map.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) {
        if quantity == 0 {
            self.0.remove(&id);
        } else {
            self.0.insert(id, quantity);
        }
    }

    /// Remove a product from the cart entirely.
    pub fn remove(&mut self, id: &ProductId) {
        self.0.remove(id);
    }

    /// Remove all items.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Total number of items: the sum of all stored quantities.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.0.values().map(|&qty| u64::from(qty)).sum()
    }

    /// Total amount: Σ(quantity × effective price), truncated to 2 decimal
    /// places.
    ///
    /// Items whose ID is absent from `products` contribute 0. The amount
    /// is always computed from the current catalog and cart, never cached.
    #[must_use]
    pub fn total_amount(&self, products: &[Product]) -> Decimal {
        let total: Decimal = self
            .0
            .iter()
            .filter_map(|(id, &qty)| {
                let product = products.iter().find(|p| &p.id == id)?;
                Some(product.effective_price() * Decimal::from(qty))
            })
            .sum();
        total.trunc_with_scale(2)
    }

    /// Iterate over `(product id, quantity)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, u32)> {
        self.0.iter().map(|(id, &qty)| (id, qty))
    }
}

impl FromIterator<(ProductId, u32)> for CartItems {
    /// Build a cart from entries, dropping any zero quantities so the
    /// no-zero-keys invariant holds for carts received from the backend.
    fn from_iter<I: IntoIterator<Item = (ProductId, u32)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .filter(|&(_, quantity)| quantity > 0)
                .collect(),
        )
    }
}
