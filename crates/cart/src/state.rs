//! Application state shared across the host's screens.
//!
//! [`AppState`] is the composition root: it owns the configuration, the
//! catalogue client and the cart store, and hands out handles to them.
//! Consumers ask it for the cart explicitly; asking before a cart was
//! provided is a typed error rather than a panic.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::api::ApiClient;
use crate::config::CartConfig;
use crate::error::Result;
use crate::navigation::Navigator;
use crate::storage::{FileStore, KeyValueStore};
use crate::store::{CartStore, HydrateOutcome};
use crate::summary::CartSummaryView;

/// Errors from looking up state that was never provided.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("cart requested before a CartStore was provided")]
    CartNotProvided,
}

/// Application state, cheaply cloneable via `Arc`.
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Debug)]
struct AppStateInner {
    config: CartConfig,
    api: ApiClient,
    cart: Option<CartStore>,
}

impl AppState {
    /// Create state with no cart attached yet.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Api` if the HTTP client cannot be built.
    pub fn new(config: CartConfig) -> Result<Self> {
        let api = ApiClient::new(&config.api)?;
        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                cart: None,
            }),
        })
    }

    /// Return a copy of this state with `cart` attached.
    #[must_use]
    pub fn with_cart(self, cart: CartStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config: self.inner.config.clone(),
                api: self.inner.api.clone(),
                cart: Some(cart),
            }),
        }
    }

    /// Build the full state from configuration: a file-backed cart store
    /// under `config.data_dir`, hydrated before this returns.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Api` if the HTTP client cannot be built. Hydration
    /// problems are not errors; the cart just starts empty.
    pub async fn bootstrap(config: CartConfig) -> Result<Self> {
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.data_dir));
        let cart = CartStore::new(storage, config.storage_key.clone(), config.currency);
        let outcome = cart.hydrate().await;
        if let HydrateOutcome::Restored { items } = outcome {
            info!(items, data_dir = %config.data_dir.display(), "Cart restored");
        }
        Ok(Self::new(config)?.with_cart(cart))
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &CartConfig {
        &self.inner.config
    }

    /// Get a reference to the catalogue client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Get the cart store.
    ///
    /// # Errors
    ///
    /// Returns `StateError::CartNotProvided` if no cart was attached.
    pub fn cart(&self) -> std::result::Result<&CartStore, StateError> {
        self.inner.cart.as_ref().ok_or(StateError::CartNotProvided)
    }

    /// A summary view over the cart, navigating through `navigator`.
    ///
    /// # Errors
    ///
    /// Returns `StateError::CartNotProvided` if no cart was attached.
    pub fn summary_view<N: Navigator>(
        &self,
        navigator: N,
    ) -> std::result::Result<CartSummaryView<N>, StateError> {
        Ok(CartSummaryView::new(self.cart()?, navigator))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use go_marketplace_core::{ProductId, ProductPreview};
    use rust_decimal::Decimal;

    use super::*;
    use crate::navigation::Route;
    use crate::storage::MemoryStore;

    struct NoopNavigator;

    impl Navigator for NoopNavigator {
        fn navigate(&self, _route: Route) {}
    }

    fn config(data_dir: &std::path::Path) -> CartConfig {
        let mut config = CartConfig::from_lookup(|_| None).unwrap();
        config.data_dir = data_dir.to_path_buf();
        config
    }

    #[test]
    fn test_cart_missing_is_typed_error() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(config(dir.path())).unwrap();
        assert_eq!(state.cart().unwrap_err(), StateError::CartNotProvided);
        assert!(matches!(
            state.summary_view(NoopNavigator),
            Err(StateError::CartNotProvided)
        ));
    }

    #[tokio::test]
    async fn test_with_cart_exposes_store() {
        let dir = tempfile::tempdir().unwrap();
        let cart = CartStore::new(
            Arc::new(MemoryStore::new()),
            "cart",
            go_marketplace_core::CurrencyCode::USD,
        );
        let state = AppState::new(config(dir.path())).unwrap().with_cart(cart);

        let preview =
            ProductPreview::new(ProductId::parse("A").unwrap(), "A", "", Decimal::ONE).unwrap();
        state.cart().unwrap().add_to_cart(preview);

        let view = state.summary_view(NoopNavigator).unwrap();
        assert_eq!(view.summary().total_quantity, 1);
    }

    #[tokio::test]
    async fn test_bootstrap_restores_previous_session() {
        let dir = tempfile::tempdir().unwrap();

        let first = AppState::bootstrap(config(dir.path())).await.unwrap();
        let preview =
            ProductPreview::new(ProductId::parse("A").unwrap(), "A", "", Decimal::TEN).unwrap();
        first.cart().unwrap().add_to_cart(preview);
        first.cart().unwrap().flush().await.unwrap();

        let second = AppState::bootstrap(config(dir.path())).await.unwrap();
        assert_eq!(second.cart().unwrap().snapshot().total_quantity(), 1);
    }
}
