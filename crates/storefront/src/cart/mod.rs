//! Client-side shopping cart.
//!
//! A cart is a short list of [`CartItem`] lines. A line is identified by the
//! product id together with the selected size; adding the same product in the
//! same size again merges into the existing line.
//!
//! After checkout the backend reports purchased lines by
//! [`purchase_key`] (`"{sku}-{size}"`), which is matched against the cart to
//! drop exactly what was bought.

mod store;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vinsara_core::Price;

pub use store::CartStore;

/// One cart line.
///
/// Serialized with the field names the storefront has always written to
/// client storage, with `price` as a JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier (the product slug).
    pub id: String,
    pub title: String,
    /// Unit price in rupees.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
    /// Image URL.
    pub image: String,
    pub size: String,
    pub quantity: u32,
    pub sku: String,
}

impl CartItem {
    /// Whether this line has the given identity.
    #[must_use]
    pub fn matches(&self, id: &str, size: &str) -> bool {
        self.id == id && self.size == size
    }

    /// Key the backend uses to report this line as purchased.
    #[must_use]
    pub fn purchase_key(&self) -> String {
        purchase_key(&self.sku, &self.size)
    }

    /// Unit price x quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    /// Unit price as a displayable [`Price`].
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::inr(self.price)
    }
}

/// Composite purchase key, `"{sku}-{size}"`.
#[must_use]
pub fn purchase_key(sku: &str, size: &str) -> String {
    format!("{sku}-{size}")
}
