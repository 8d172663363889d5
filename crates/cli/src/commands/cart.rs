//! Cart commands.
//!
//! Every mutating command flushes the write queue before printing, so a
//! non-zero exit means the cart on disk did not take the change.

use go_marketplace_cart::navigation::{Navigator, Route};
use go_marketplace_cart::state::AppState;
use go_marketplace_cart::store::CartStore;
use go_marketplace_core::{CartChange, Price, ProductId, ProductPreview};
use rust_decimal::Decimal;

use super::CommandError;

/// Prints the full cart when asked to open the cart screen.
pub struct TerminalNavigator {
    cart: CartStore,
}

impl TerminalNavigator {
    #[must_use]
    pub const fn new(cart: CartStore) -> Self {
        Self { cart }
    }
}

impl Navigator for TerminalNavigator {
    #[allow(clippy::print_stdout)]
    fn navigate(&self, route: Route) {
        match route {
            Route::Cart => {
                let snapshot = self.cart.snapshot();
                let currency = self.cart.currency();
                if snapshot.is_empty() {
                    println!("Your cart is empty");
                    return;
                }
                for item in snapshot.items() {
                    println!(
                        "{:<12} {:<30} {:>4} x {:>12} = {:>12}",
                        item.id,
                        item.title,
                        item.quantity,
                        Price::new(item.price, currency),
                        Price::new(item.subtotal(), currency),
                    );
                }
            }
        }
    }
}

/// Add one unit of a product described on the command line.
///
/// # Errors
///
/// Returns `CommandError` on an invalid ID or price, or if the write fails.
pub async fn add(
    state: &AppState,
    id: &str,
    title: &str,
    image_url: &str,
    price: Decimal,
) -> Result<(), CommandError> {
    let preview = ProductPreview::new(ProductId::parse(id)?, title, image_url, price)?;
    let change = state.cart()?.add_to_cart(preview);
    finish(state, id, change).await
}

/// Add one unit of a catalogue product.
///
/// # Errors
///
/// Returns `CommandError::ProductNotFound` if the catalogue has no such
/// product, or another `CommandError` if the request or write fails.
pub async fn add_product(state: &AppState, id: &str) -> Result<(), CommandError> {
    let id = ProductId::parse(id)?;
    let preview = state
        .api()
        .fetch_products()
        .await?
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| CommandError::ProductNotFound(id.to_string()))?;
    let change = state.cart()?.add_to_cart(preview);
    finish(state, id.as_str(), change).await
}

/// Increase a line item's quantity.
///
/// # Errors
///
/// Returns `CommandError` on an invalid ID or if the write fails.
pub async fn increment(state: &AppState, id: &str) -> Result<(), CommandError> {
    let change = state.cart()?.increment(&ProductId::parse(id)?);
    finish(state, id, change).await
}

/// Decrease a line item's quantity.
///
/// # Errors
///
/// Returns `CommandError` on an invalid ID or if the write fails.
pub async fn decrement(state: &AppState, id: &str) -> Result<(), CommandError> {
    let change = state.cart()?.decrement(&ProductId::parse(id)?);
    finish(state, id, change).await
}

/// Print the floating cart summary.
///
/// # Errors
///
/// Returns `CommandError` if the state has no cart.
#[allow(clippy::print_stdout)]
pub fn show(state: &AppState) -> Result<(), CommandError> {
    let view = state.summary_view(TerminalNavigator::new(state.cart()?.clone()))?;
    let summary = view.summary();
    println!("{}  {}", summary.quantity_label(), summary.formatted_total());
    Ok(())
}

/// Print the full cart screen.
///
/// # Errors
///
/// Returns `CommandError` if the state has no cart.
pub fn open(state: &AppState) -> Result<(), CommandError> {
    let view = state.summary_view(TerminalNavigator::new(state.cart()?.clone()))?;
    view.open_cart();
    Ok(())
}

#[allow(clippy::print_stdout)]
async fn finish(state: &AppState, id: &str, change: CartChange) -> Result<(), CommandError> {
    state.cart()?.flush().await?;
    match change {
        CartChange::Added => println!("Added {id}"),
        CartChange::Incremented { quantity } | CartChange::Decremented { quantity } => {
            println!("{id}: quantity {quantity}");
        }
        CartChange::Removed => println!("Removed {id}"),
        CartChange::Unchanged => println!("{id} is not in the cart"),
    }
    show(state)
}
