//! CLI command implementations.

pub mod cart;
pub mod catalogue;

use go_marketplace_cart::config::CartConfig;
use go_marketplace_cart::state::AppState;
use go_marketplace_cart::CartError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The cart library failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// No product with this ID in the catalogue.
    #[error("Product not found in catalogue: {0}")]
    ProductNotFound(String),
}

impl From<go_marketplace_cart::state::StateError> for CommandError {
    fn from(e: go_marketplace_cart::state::StateError) -> Self {
        Self::Cart(e.into())
    }
}

impl From<go_marketplace_cart::api::ApiError> for CommandError {
    fn from(e: go_marketplace_cart::api::ApiError) -> Self {
        Self::Cart(e.into())
    }
}

impl From<go_marketplace_core::IdError> for CommandError {
    fn from(e: go_marketplace_core::IdError) -> Self {
        Self::Cart(e.into())
    }
}

impl From<go_marketplace_core::PreviewError> for CommandError {
    fn from(e: go_marketplace_core::PreviewError) -> Self {
        Self::Cart(e.into())
    }
}

/// Load configuration and bring up a hydrated cart.
///
/// # Errors
///
/// Returns `CommandError::Cart` if configuration is invalid or the HTTP
/// client cannot be built.
pub async fn load_state() -> Result<AppState, CommandError> {
    let config = CartConfig::from_env().map_err(CartError::from)?;
    Ok(AppState::bootstrap(config).await?)
}
