//! Catalogue commands.

use go_marketplace_cart::state::AppState;
use go_marketplace_core::Price;

use super::CommandError;

/// List products from the catalogue backend.
///
/// # Errors
///
/// Returns `CommandError` if the request fails.
#[allow(clippy::print_stdout)]
pub async fn list(state: &AppState) -> Result<(), CommandError> {
    let currency = state.config().currency;
    let products = state.api().fetch_products().await?;
    if products.is_empty() {
        println!("No products");
    }
    for product in products {
        println!(
            "{:<12} {:<30} {:>12}",
            product.id,
            product.title,
            Price::new(product.price, currency)
        );
    }
    Ok(())
}
