//! The cart: an ordered collection of line items keyed by product ID.
//!
//! All transitions here are pure and synchronous. Persistence and change
//! notification live in the `go-marketplace-cart` crate.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::line_item::{LineItem, ProductPreview, price_in_range, total_price, total_quantity};

/// What a cart mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new line item was appended with quantity 1.
    Added,
    /// An existing line item's quantity went up by one.
    Incremented { quantity: u32 },
    /// An existing line item's quantity went down by one.
    Decremented { quantity: u32 },
    /// The line item had quantity 1 and was removed.
    Removed,
    /// No line item matched the ID.
    Unchanged,
}

/// A cart that violates one of its invariants.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartInvariantError {
    #[error("duplicate line item for product {0}")]
    DuplicateId(ProductId),
    #[error("line item for product {0} has quantity 0")]
    ZeroQuantity(ProductId),
    #[error("line item for product {0} has a negative price")]
    NegativePrice(ProductId),
    #[error("line item for product {0} has a price too large to total")]
    PriceTooLarge(ProductId),
}

/// Ordered line items, insertion order, at most one per product ID.
///
/// Serializes as a bare JSON array of line items; deserialization goes
/// through [`Cart::from_items`] so a decoded cart always upholds the
/// invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from already-existing line items, checking invariants.
    ///
    /// # Errors
    ///
    /// Returns `CartInvariantError` on duplicate IDs, zero quantities,
    /// negative prices or prices too large to total.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, CartInvariantError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(&item.id) {
                return Err(CartInvariantError::DuplicateId(item.id.clone()));
            }
            if item.quantity == 0 {
                return Err(CartInvariantError::ZeroQuantity(item.id.clone()));
            }
            if item.price.is_sign_negative() && !item.price.is_zero() {
                return Err(CartInvariantError::NegativePrice(item.id.clone()));
            }
            if !price_in_range(item.price) {
                return Err(CartInvariantError::PriceTooLarge(item.id.clone()));
            }
        }
        Ok(Self { items })
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Look up a line item by product ID.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        total_quantity(&self.items)
    }

    /// Sum of `price * quantity` over all line items.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        total_price(&self.items)
    }

    /// Add one unit of `preview`.
    ///
    /// Appends a new line item with quantity 1 if the product is not in the
    /// cart yet, otherwise increments the existing one. The stored title,
    /// image and price of an existing line item are kept as they are.
    pub fn add(&mut self, preview: ProductPreview) -> CartChange {
        match self.increment(&preview.id) {
            CartChange::Unchanged => {
                self.items.push(LineItem::from_preview(preview));
                CartChange::Added
            }
            change => change,
        }
    }

    /// Increase the quantity of `id` by one. No-op if absent.
    ///
    /// Saturates at `u32::MAX`.
    pub fn increment(&mut self, id: &ProductId) -> CartChange {
        self.items
            .iter_mut()
            .find(|item| &item.id == id)
            .map_or(CartChange::Unchanged, |item| {
                item.quantity = item.quantity.saturating_add(1);
                CartChange::Incremented {
                    quantity: item.quantity,
                }
            })
    }

    /// Decrease the quantity of `id` by one, removing it at zero. No-op if
    /// absent.
    pub fn decrement(&mut self, id: &ProductId) -> CartChange {
        let Some(pos) = self.items.iter().position(|item| &item.id == id) else {
            return CartChange::Unchanged;
        };
        let Some(item) = self.items.get_mut(pos) else {
            return CartChange::Unchanged;
        };
        if item.quantity <= 1 {
            self.items.remove(pos);
            CartChange::Removed
        } else {
            item.quantity -= 1;
            CartChange::Decremented {
                quantity: item.quantity,
            }
        }
    }

    /// Consume the cart and return its line items.
    #[must_use]
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = CartInvariantError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}
