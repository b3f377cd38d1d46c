//! Integration tests for Vinsara.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vinsara-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart store over file-backed storage
//! - `account_orders` - Order history, roles and status updates
//! - `account_addresses` - Saved address management
//! - `catalog` - Home page sections
//!
//! The views are driven against [`FakeStoreApi`], an in-memory backend that
//! records every call and can be told to fail individual operations.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;
use vinsara_core::{AddressId, CategoryId, OrderId, OrderItemId, OrderStatus, PaymentStatus, ProductId};
use vinsara_storefront::api::{
    ApiError, Category, NewAddress, Order, OrderItem, Product, ProductQuery, ProductVariant,
    SavedAddress, StoreApi, UserProfile, VideoConfig, decode_list,
};

/// Backend operation, used to inject failures and inspect calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Categories,
    Products,
    VideoConfig,
    Profile,
    UserOrders,
    UpdateOrderStatus,
    SavedAddresses,
    SaveAddress,
    DeleteAddress,
    SetDefaultAddress,
}

/// Failure to return from an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    Unauthorized,
    Status(u16),
    Rejected(Vec<String>),
}

impl Failure {
    fn to_error(&self) -> ApiError {
        match self {
            Self::Unauthorized => ApiError::Unauthorized,
            Self::Status(status) => ApiError::Status {
                status: *status,
                message: "Internal Server Error".to_string(),
            },
            Self::Rejected(messages) => ApiError::Rejected(messages.clone()),
        }
    }
}

#[derive(Debug, Default)]
struct FakeState {
    categories: Vec<Category>,
    products: Vec<Product>,
    video: VideoConfig,
    profile: UserProfile,
    orders: Vec<Order>,
    addresses: Vec<SavedAddress>,
    next_address_id: i32,
    failures: HashMap<Op, Failure>,
    calls: Vec<Op>,
    product_queries: Vec<ProductQuery>,
}

/// In-memory backend.
///
/// Mirrors the backend rules the storefront relies on: at most three saved
/// addresses and a single default address.
#[derive(Debug, Default)]
pub struct FakeStoreApi {
    state: Mutex<FakeState>,
}

/// Saved address cap enforced by the fake backend.
pub const BACKEND_ADDRESS_CAP: usize = 3;

impl FakeStoreApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a call and return the injected failure, if any.
    fn enter(&self, op: Op) -> Result<MutexGuard<'_, FakeState>, ApiError> {
        let mut state = self.state();
        state.calls.push(op);
        if let Some(failure) = state.failures.get(&op).cloned() {
            return Err(failure.to_error());
        }
        Ok(state)
    }

    #[must_use]
    pub fn with_categories(self, categories: Vec<Category>) -> Self {
        self.state().categories = categories;
        self
    }

    #[must_use]
    pub fn with_products(self, products: Vec<Product>) -> Self {
        self.state().products = products;
        self
    }

    #[must_use]
    pub fn with_video(self, video: VideoConfig) -> Self {
        self.state().video = video;
        self
    }

    #[must_use]
    pub fn with_profile(self, profile: UserProfile) -> Self {
        self.state().profile = profile;
        self
    }

    #[must_use]
    pub fn with_orders(self, orders: Vec<Order>) -> Self {
        self.state().orders = orders;
        self
    }

    /// Load orders from a backend response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not an order list.
    pub fn with_orders_json(self, body: &str) -> Result<Self, ApiError> {
        let orders = decode_list(body)?;
        Ok(self.with_orders(orders))
    }

    #[must_use]
    pub fn with_addresses(self, addresses: Vec<SavedAddress>) -> Self {
        {
            let mut state = self.state();
            state.next_address_id = addresses
                .iter()
                .map(|a| a.id.as_i32())
                .max()
                .unwrap_or(0);
            state.addresses = addresses;
        }
        self
    }

    /// Make `op` fail until cleared.
    pub fn fail(&self, op: Op, failure: Failure) {
        self.state().failures.insert(op, failure);
    }

    pub fn clear_failures(&self) {
        self.state().failures.clear();
    }

    /// Every call made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<Op> {
        self.state().calls.clone()
    }

    /// Number of calls made to `op`.
    #[must_use]
    pub fn call_count(&self, op: Op) -> usize {
        self.state().calls.iter().filter(|c| **c == op).count()
    }

    /// Queries passed to the product listing.
    #[must_use]
    pub fn product_queries(&self) -> Vec<ProductQuery> {
        self.state().product_queries.clone()
    }

    /// Current backend copy of the orders.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        self.state().orders.clone()
    }

    /// Current backend copy of the saved addresses.
    #[must_use]
    pub fn addresses(&self) -> Vec<SavedAddress> {
        self.state().addresses.clone()
    }
}

impl StoreApi for FakeStoreApi {
    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        Ok(self.enter(Op::Categories)?.categories.clone())
    }

    async fn products(&self, query: &ProductQuery) -> Result<Vec<Product>, ApiError> {
        let mut state = self.enter(Op::Products)?;
        state.product_queries.push(query.clone());
        Ok(state
            .products
            .iter()
            .filter(|p| query.is_new.is_none_or(|is_new| p.is_new == is_new))
            .cloned()
            .collect())
    }

    async fn video_config(&self) -> Result<VideoConfig, ApiError> {
        Ok(self.enter(Op::VideoConfig)?.video.clone())
    }

    async fn profile(&self) -> Result<UserProfile, ApiError> {
        Ok(self.enter(Op::Profile)?.profile.clone())
    }

    async fn user_orders(&self) -> Result<Vec<Order>, ApiError> {
        Ok(self.enter(Op::UserOrders)?.orders.clone())
    }

    async fn update_order_status(
        &self,
        order_id: OrderId,
        status: &OrderStatus,
    ) -> Result<(), ApiError> {
        let mut state = self.enter(Op::UpdateOrderStatus)?;
        let order = state
            .orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| ApiError::Status {
                status: 404,
                message: "Not found.".to_string(),
            })?;
        order.order_status = status.clone();
        Ok(())
    }

    async fn saved_addresses(&self) -> Result<Vec<SavedAddress>, ApiError> {
        Ok(self.enter(Op::SavedAddresses)?.addresses.clone())
    }

    async fn save_address(&self, address: &NewAddress) -> Result<SavedAddress, ApiError> {
        let mut state = self.enter(Op::SaveAddress)?;
        if state.addresses.len() >= BACKEND_ADDRESS_CAP {
            return Err(ApiError::Rejected(vec![
                "You can save up to 3 addresses only.".to_string(),
            ]));
        }

        state.next_address_id += 1;
        let is_default = address.is_default || state.addresses.is_empty();
        if is_default {
            for existing in &mut state.addresses {
                existing.is_default = false;
            }
        }
        let saved = SavedAddress {
            id: AddressId::new(state.next_address_id),
            label: address.label.clone(),
            address: address.address.clone(),
            apartment: Some(address.apartment.clone()).filter(|a| !a.is_empty()),
            city: address.city.clone(),
            state: address.state.clone(),
            zip_code: address.zip_code.clone(),
            country: address.country.clone(),
            phone: address.phone.clone(),
            is_default,
            first_name: Some(address.first_name.clone()).filter(|n| !n.is_empty()),
            last_name: Some(address.last_name.clone()).filter(|n| !n.is_empty()),
        };
        state.addresses.push(saved.clone());
        Ok(saved)
    }

    async fn delete_address(&self, id: AddressId) -> Result<(), ApiError> {
        let mut state = self.enter(Op::DeleteAddress)?;
        state.addresses.retain(|a| a.id != id);
        Ok(())
    }

    async fn set_default_address(&self, id: AddressId) -> Result<(), ApiError> {
        let mut state = self.enter(Op::SetDefaultAddress)?;
        for address in &mut state.addresses {
            address.is_default = address.id == id;
        }
        Ok(())
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// Category fixture.
#[must_use]
pub fn category(id: i32, name: &str) -> Category {
    Category {
        id: CategoryId::new(id),
        name: name.to_string(),
        slug: name.to_lowercase().replace(' ', "-"),
        image: Some(format!("https://cdn.example.in/categories/{id}.jpg")),
    }
}

/// Product fixture priced in whole rupees.
#[must_use]
pub fn product(id: i32, title: &str, rupees: i64, is_new: bool) -> Product {
    let slug = title.to_lowercase().replace(' ', "-");
    Product {
        id: ProductId::new(id),
        slug: slug.clone(),
        title: title.to_string(),
        price: Decimal::new(rupees, 0),
        images: vec![format!("https://cdn.example.in/products/{slug}-1.jpg")],
        variants: ["S", "M", "L"]
            .into_iter()
            .map(|size| ProductVariant {
                size: size.to_string(),
                sku: Some(format!("VS-{id}-{size}")),
            })
            .collect(),
        is_new,
    }
}

/// Order fixture with `items` lines.
#[must_use]
pub fn order(id: i32, payment_status: PaymentStatus, items: i32) -> Order {
    Order {
        id: OrderId::new(id),
        total_amount: Decimal::new(1_499 * i64::from(items), 0),
        payment_status,
        order_status: OrderStatus::Processing,
        created_at: "2025-03-05T10:15:00Z".to_string(),
        shipping_address: "12 MG Road, Hyderabad, Telangana 500001".to_string(),
        phone: "9876543210".to_string(),
        items: (1..=items)
            .map(|n| OrderItem {
                id: OrderItemId::new(id * 100 + n),
                product_id: ProductId::new(n),
                product_slug: None,
                product_name: format!("Handloom Kurta {n}"),
                variant_label: "M".to_string(),
                price: Decimal::new(1_499, 0),
                quantity: 1,
            })
            .collect(),
    }
}

/// Saved address fixture.
#[must_use]
pub fn saved_address(id: i32, is_default: bool) -> SavedAddress {
    SavedAddress {
        id: AddressId::new(id),
        label: "Home".to_string(),
        address: format!("{id} Banjara Hills Road"),
        apartment: None,
        city: "Hyderabad".to_string(),
        state: "Telangana".to_string(),
        zip_code: "500034".to_string(),
        country: "India".to_string(),
        phone: "9876543210".to_string(),
        is_default,
        first_name: Some("Asha".to_string()),
        last_name: Some("Rao".to_string()),
    }
}

/// A form with every required field filled.
#[must_use]
pub fn filled_address_form() -> NewAddress {
    NewAddress {
        first_name: "Asha".to_string(),
        last_name: "Rao".to_string(),
        address: "8-2-293 Road No. 3".to_string(),
        city: "Hyderabad".to_string(),
        zip_code: "500034".to_string(),
        phone: "9876543210".to_string(),
        ..NewAddress::default()
    }
}
