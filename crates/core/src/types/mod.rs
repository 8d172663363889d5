//! Core types for Go Marketplace.
//!
//! This module provides type-safe wrappers for the cart domain.

pub mod cart;
pub mod id;
pub mod line_item;
pub mod price;

pub use cart::{Cart, CartChange, CartInvariantError};
pub use id::*;
pub use line_item::{
    LineItem, PreviewError, ProductPreview, price_in_range, total_price, total_quantity,
};
pub use price::{CurrencyCode, Price};
