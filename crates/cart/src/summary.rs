//! Floating cart summary.
//!
//! [`CartSummary`] is the derived data the floating cart widget shows: how
//! many units are in the cart and what they cost in total. [`CartSummaryView`]
//! keeps it in sync with a [`CartStore`](crate::store::CartStore) and offers
//! the single action of opening the full cart screen. Neither mutates the
//! cart.

use go_marketplace_core::{CurrencyCode, LineItem, Price};
use tokio::sync::watch;
use tracing::debug;

use crate::navigation::{Navigator, Route};
use crate::store::{CartSnapshot, CartStore};

/// Aggregate quantity and price of a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    /// Sum of all line item quantities.
    pub total_quantity: u64,
    /// Sum of `price * quantity` over all line items.
    pub total_price: Price,
}

impl CartSummary {
    /// Roll up `items`, pricing them in `currency`.
    #[must_use]
    pub fn from_items(items: &[LineItem], currency: CurrencyCode) -> Self {
        Self {
            total_quantity: go_marketplace_core::total_quantity(items),
            total_price: Price::new(go_marketplace_core::total_price(items), currency),
        }
    }

    /// Summary of an empty cart.
    #[must_use]
    pub const fn empty(currency: CurrencyCode) -> Self {
        Self {
            total_quantity: 0,
            total_price: Price::zero(currency),
        }
    }

    /// Button label, e.g. `3 items`.
    #[must_use]
    pub fn quantity_label(&self) -> String {
        match self.total_quantity {
            1 => "1 item".to_string(),
            n => format!("{n} items"),
        }
    }

    /// Total price formatted as currency.
    #[must_use]
    pub fn formatted_total(&self) -> String {
        self.total_price.display()
    }
}

/// Read-only cart widget bound to a store and a navigator.
#[derive(Debug)]
pub struct CartSummaryView<N> {
    snapshots: watch::Receiver<CartSnapshot>,
    currency: CurrencyCode,
    navigator: N,
}

impl<N: Navigator> CartSummaryView<N> {
    /// Subscribe to `store`'s snapshots.
    #[must_use]
    pub fn new(store: &CartStore, navigator: N) -> Self {
        Self {
            snapshots: store.subscribe(),
            currency: store.currency(),
            navigator,
        }
    }

    /// Summary of the latest snapshot.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        let snapshot = self.snapshots.borrow();
        CartSummary::from_items(snapshot.items(), self.currency)
    }

    /// Wait for the cart to change, then return the new summary.
    ///
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<CartSummary> {
        self.snapshots.changed().await.ok()?;
        let snapshot = self.snapshots.borrow_and_update();
        Some(CartSummary::from_items(snapshot.items(), self.currency))
    }

    /// Open the full cart screen.
    pub fn open_cart(&self) {
        debug!(route = %Route::Cart, "Opening cart");
        self.navigator.navigate(Route::Cart);
    }
}
