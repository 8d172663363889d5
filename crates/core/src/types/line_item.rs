//! Product previews and cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Errors that can occur when building a [`ProductPreview`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PreviewError {
    /// Unit prices cannot be negative.
    #[error("price cannot be negative (got {0})")]
    NegativePrice(Decimal),
    /// Unit prices must stay representable at any quantity.
    #[error("price is too large (got {0})")]
    PriceTooLarge(Decimal),
}

/// Whether `price * quantity` is representable for every `u32` quantity.
#[must_use]
pub fn price_in_range(price: Decimal) -> bool {
    price.checked_mul(Decimal::from(u32::MAX)).is_some()
}

/// Sum of all quantities.
#[must_use]
pub fn total_quantity(items: &[LineItem]) -> u64 {
    items
        .iter()
        .fold(0_u64, |total, item| total.saturating_add(u64::from(item.quantity)))
}

/// Sum of `price * quantity` over `items`, saturating at `Decimal::MAX`.
#[must_use]
pub fn total_price(items: &[LineItem]) -> Decimal {
    items.iter().fold(Decimal::ZERO, |total, item| {
        total.checked_add(item.subtotal()).unwrap_or(Decimal::MAX)
    })
}

/// A product as shown in the catalogue, before it is in the cart.
///
/// Carries everything a [`LineItem`] needs except the quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPreview {
    pub id: ProductId,
    pub title: String,
    pub image_url: String,
    pub price: Decimal,
}

impl ProductPreview {
    /// Create a preview, validating the unit price.
    ///
    /// # Errors
    ///
    /// Returns `PreviewError::NegativePrice` if `price` is below zero and
    /// `PreviewError::PriceTooLarge` if `price * u32::MAX` would overflow.
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: Decimal,
    ) -> Result<Self, PreviewError> {
        if price.is_sign_negative() && !price.is_zero() {
            return Err(PreviewError::NegativePrice(price));
        }
        if !price_in_range(price) {
            return Err(PreviewError::PriceTooLarge(price));
        }
        Ok(Self {
            id,
            title: title.into(),
            image_url: image_url.into(),
            price,
        })
    }
}

/// One distinct product in the cart and how many of it.
///
/// `title`, `image_url` and `price` are fixed when the item is first added;
/// only `quantity` changes afterwards, and it never drops below 1 while the
/// item is in a cart.
///
/// Serialized with `price` as a JSON number so the persisted blob stays a
/// plain array of `{id, title, image_url, price, quantity}` objects. Both
/// numbers and decimal strings are accepted when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub title: String,
    pub image_url: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
    pub quantity: u32,
}

impl LineItem {
    /// A fresh line item for `preview` with quantity 1.
    #[must_use]
    pub fn from_preview(preview: ProductPreview) -> Self {
        Self {
            id: preview.id,
            title: preview.title,
            image_url: preview.image_url,
            price: preview.price,
            quantity: 1,
        }
    }

    /// `price * quantity`, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price
            .checked_mul(Decimal::from(self.quantity))
            .unwrap_or(Decimal::MAX)
    }
}
