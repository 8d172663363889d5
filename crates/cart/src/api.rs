//! HTTP client for the catalogue backend.
//!
//! The cart itself never talks to the network. This client exists so hosts
//! can list products (and turn them into cart additions) against the same
//! configured base URL.

use go_marketplace_core::{PreviewError, ProductPreview};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::ApiConfig;

/// Errors from the catalogue backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed or returned an error status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A request path could not be joined onto the base URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The backend returned a product that cannot go in a cart.
    #[error("Invalid product from backend: {0}")]
    InvalidProduct(#[from] PreviewError),
}

/// `reqwest` client bound to the catalogue base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `path` against the base URL.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Url` if the result is not a valid URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    /// `GET /products`: the catalogue as cart-ready previews.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` on transport, status or decode failures and
    /// `ApiError::InvalidProduct` if a product has a negative or oversized
    /// price.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn fetch_products(&self) -> Result<Vec<ProductPreview>, ApiError> {
        let url = self.endpoint("products")?;
        let products: Vec<ProductPreview> = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(count = products.len(), "Fetched products");
        products
            .into_iter()
            .map(|p| ProductPreview::new(p.id, p.title, p.image_url, p.price))
            .collect::<Result<_, _>>()
            .map_err(ApiError::from)
    }
}
