//! Cart drawer display data.

use crate::cart::{CartItem, CartStore};
use crate::storage::ClientStorage;

use super::Route;

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub title: String,
    pub size: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: String,
}

impl CartItemView {
    /// Product page the line links to.
    #[must_use]
    pub fn route(&self) -> Route {
        Route::Product(self.id.clone())
    }
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.clone(),
            title: item.title.clone(),
            size: item.size.clone(),
            quantity: item.quantity,
            price: item.unit_price().display(),
            line_price: vinsara_core::Price::inr(item.line_total()).display(),
            image: item.image.clone(),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: "₹0.00".to_string(),
            item_count: 0,
        }
    }
}

impl<S: ClientStorage> From<&CartStore<S>> for CartView {
    fn from(cart: &CartStore<S>) -> Self {
        if cart.is_empty() {
            return Self::empty();
        }
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            subtotal: cart.total_price().display(),
            item_count: cart.cart_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_cart_view_from_store() {
        let mut cart = CartStore::load(MemoryStorage::new());
        assert_eq!(CartView::from(&cart), CartView::empty());

        cart.add_to_cart(CartItem {
            id: "silk-kurta".to_string(),
            title: "Silk Kurta".to_string(),
            price: Decimal::new(129_950, 2),
            image: "kurta.jpg".to_string(),
            size: "M".to_string(),
            quantity: 2,
            sku: "KUR-001".to_string(),
        });

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 2);
        assert_eq!(view.subtotal, "₹2,599.00");
        assert_eq!(view.items[0].price, "₹1,299.50");
        assert_eq!(view.items[0].line_price, "₹2,599.00");
        assert_eq!(view.items[0].route().path(), "/product/silk-kurta");
    }
}
