//! Wire types for the backend API.
//!
//! These mirror the backend's JSON records. Monetary fields arrive as decimal
//! strings and decode into [`Decimal`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vinsara_core::{AddressId, CategoryId, OrderId, OrderItemId, OrderStatus, PaymentStatus, ProductId};

// =============================================================================
// Catalog Types
// =============================================================================

/// Product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// Purchasable size of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub size: String,
    #[serde(default)]
    pub sku: Option<String>,
}

/// Catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub slug: String,
    pub title: String,
    pub price: Decimal,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    #[serde(default)]
    pub is_new: bool,
}

/// Product listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ProductQuery {
    /// Only products flagged as new arrivals.
    #[must_use]
    pub fn new_arrivals() -> Self {
        Self {
            is_new: Some(true),
            ..Self::default()
        }
    }
}

/// Home page video configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoConfig {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub youtube_url: Option<String>,
    #[serde(default)]
    pub video_file: Option<String>,
}

// =============================================================================
// Account Types
// =============================================================================

/// Signed-in user's profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
}

impl UserProfile {
    /// Staff and superusers manage every order.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.is_staff || self.is_superuser
    }
}

/// Line of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub product_id: ProductId,
    #[serde(default)]
    pub product_slug: Option<String>,
    pub product_name: String,
    pub variant_label: String,
    pub price: Decimal,
    pub quantity: u32,
}

/// Placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub total_amount: Decimal,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    pub created_at: String,
    pub shipping_address: String,
    pub phone: String,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Address saved on the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedAddress {
    pub id: AddressId,
    pub label: String,
    pub address: String,
    #[serde(default)]
    pub apartment: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub phone: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Payload for creating a saved address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAddress {
    pub label: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub apartment: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub phone: String,
    pub is_default: bool,
}

impl Default for NewAddress {
    fn default() -> Self {
        Self {
            label: "Home".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            address: String::new(),
            apartment: String::new(),
            city: String::new(),
            state: "Telangana".to_string(),
            zip_code: String::new(),
            country: "India".to_string(),
            phone: String::new(),
            is_default: false,
        }
    }
}

// =============================================================================
// List Envelopes
// =============================================================================

/// A list endpoint response.
///
/// Endpoints answer either with a bare array or with a paginated envelope;
/// an envelope without `results` is treated as empty.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Bare(Vec<T>),
    Paginated {
        #[serde(default = "Vec::new")]
        results: Vec<T>,
    },
}

impl<T> ListResponse<T> {
    /// Flatten into the contained records.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Paginated { results: items } => items,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_decodes_backend_record() {
        let raw = r#"{
            "id": 101,
            "total_amount": "2599.00",
            "payment_status": "Paid",
            "order_status": "Shipped",
            "created_at": "2025-03-05T10:15:00Z",
            "shipping_address": "12 MG Road, Hyderabad",
            "phone": "9876543210",
            "items": [{
                "id": 1, "product_id": 7, "product_name": "Silk Kurta",
                "variant_label": "M", "price": "1299.50", "quantity": 2
            }]
        }"#;
        let order: Order = serde_json::from_str(raw).unwrap();

        assert_eq!(order.id, OrderId::new(101));
        assert!(order.payment_status.is_paid());
        assert_eq!(order.order_status, OrderStatus::Shipped);
        assert_eq!(order.total_amount, Decimal::new(259_900, 2));
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].product_slug, None);
    }

    #[test]
    fn test_list_response_accepts_both_shapes() {
        let bare: ListResponse<Category> =
            serde_json::from_str(r#"[{"id":1,"name":"Kurtas","slug":"kurtas"}]"#).unwrap();
        assert_eq!(bare.into_vec().len(), 1);

        let paged: ListResponse<Category> = serde_json::from_str(
            r#"{"count":1,"results":[{"id":2,"name":"Sarees","slug":"sarees"}]}"#,
        )
        .unwrap();
        assert_eq!(paged.into_vec()[0].slug, "sarees");

        let empty: ListResponse<Category> = serde_json::from_str(r#"{"detail":"ok"}"#).unwrap();
        assert!(empty.into_vec().is_empty());
    }

    #[test]
    fn test_new_address_defaults() {
        let address = NewAddress::default();
        assert_eq!(address.label, "Home");
        assert_eq!(address.state, "Telangana");
        assert_eq!(address.country, "India");
        assert!(!address.is_default);
        assert!(address.address.is_empty());
    }

    #[test]
    fn test_product_query_serializes_only_set_filters() {
        let query = ProductQuery::new_arrivals();
        assert_eq!(
            serde_json::to_string(&query).unwrap(),
            r#"{"is_new":true}"#
        );
    }

    #[test]
    fn test_profile_admin_flags() {
        let staff = UserProfile {
            is_staff: true,
            ..UserProfile::default()
        };
        assert!(staff.is_admin());
        assert!(!UserProfile::default().is_admin());
    }
}
