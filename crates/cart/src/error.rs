//! Unified error handling for the cart library.
//!
//! Each layer has its own error enum; [`CartError`] aggregates them so callers
//! that drive several layers (the CLI, the composition root) can use `?`
//! throughout.

use go_marketplace_core::{IdError, PreviewError};
use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::state::StateError;

/// Library-level error type.
#[derive(Debug, Error)]
pub enum CartError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The catalogue API failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// A collaborator was requested before it was provided.
    #[error("State error: {0}")]
    State(#[from] StateError),

    /// A product preview was rejected.
    #[error("Invalid product: {0}")]
    Preview(#[from] PreviewError),

    /// A product ID was rejected.
    #[error("Invalid product id: {0}")]
    Id(#[from] IdError),

    /// The most recent cart write failed; memory and storage differ.
    #[error("Cart not persisted: {0}")]
    Persist(String),

    /// The background writer is gone, so queued writes cannot be confirmed.
    #[error("Cart writer stopped")]
    WriterStopped,
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CartError::Persist("disk full".to_string());
        assert_eq!(err.to_string(), "Cart not persisted: disk full");

        let err = CartError::from(StateError::CartNotProvided);
        assert_eq!(
            err.to_string(),
            "State error: cart requested before a CartStore was provided"
        );
    }
}
