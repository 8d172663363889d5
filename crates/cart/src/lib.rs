//! Go Marketplace Cart library.
//!
//! Owns the shopping cart for a storefront session:
//!
//! - [`store::CartStore`] - the single source of truth for cart contents,
//!   mirrored to a [`storage::KeyValueStore`] after every mutation through an
//!   ordered write queue
//! - [`summary::CartSummaryView`] - read-only quantity and price rollups with
//!   one navigation action
//! - [`state::AppState`] - composition root handing out the above
//! - [`api::ApiClient`] - HTTP client bound to the catalogue backend

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod navigation;
mod persist;
pub mod state;
pub mod storage;
pub mod store;
pub mod summary;

pub use error::{CartError, Result};
pub use persist::PersistStatus;
