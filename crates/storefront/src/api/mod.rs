//! Backend API boundary.
//!
//! # Architecture
//!
//! - The backend is the source of truth; the storefront keeps no copies
//!   beyond what a view is currently showing
//! - [`StoreApi`] is the only way views reach it, so the transport (HTTP
//!   client, auth headers, retries) lives with the host
//! - [`decode_list`] and [`ApiError::from_response`] interpret raw responses
//!   the same way for every transport
//!
//! # Endpoints
//!
//! See [`Endpoint`] for the paths each operation maps onto.

pub mod types;

use std::future::Future;

use thiserror::Error;
use vinsara_core::{AddressId, OrderId, OrderStatus};

pub use types::*;

/// Errors returned by backend calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Auth token missing or expired (HTTP 401).
    #[error("Unauthorized")]
    Unauthorized,

    /// Backend rejected the payload with validation messages.
    #[error("Rejected: {}", .0.join("; "))]
    Rejected(Vec<String>),

    /// Any other non-success response.
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// Request never produced a response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body did not match the expected shape.
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Interpret a non-success response.
    ///
    /// 401 maps to [`ApiError::Unauthorized`]. A 400 whose body is a JSON
    /// array of strings (or an object of string arrays) maps to
    /// [`ApiError::Rejected`]. Everything else is [`ApiError::Status`].
    #[must_use]
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 401 {
            return Self::Unauthorized;
        }
        if status == 400 {
            let messages = validation_messages(body);
            if !messages.is_empty() {
                return Self::Rejected(messages);
            }
        }
        Self::Status {
            status,
            message: body.trim().to_string(),
        }
    }

    /// Whether the failure is an auth failure, which the auth layer reports
    /// on its own.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// First backend validation message, if any.
    #[must_use]
    pub fn first_rejection(&self) -> Option<&str> {
        match self {
            Self::Rejected(messages) => messages.first().map(String::as_str),
            _ => None,
        }
    }
}

fn validation_messages(body: &str) -> Vec<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return Vec::new();
    };
    let strings = |v: &serde_json::Value| -> Vec<String> {
        match v {
            serde_json::Value::String(s) => vec![s.clone()],
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|item| item.as_str().map(String::from))
                .collect(),
            _ => Vec::new(),
        }
    };
    match &value {
        serde_json::Value::Object(fields) => fields.values().flat_map(strings).collect(),
        other => strings(other),
    }
}

/// Decode a list endpoint body, accepting a bare array or a `results` envelope.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] if the body is neither shape.
pub fn decode_list<T>(body: &str) -> Result<Vec<T>, ApiError>
where
    T: serde::de::DeserializeOwned,
{
    let response: ListResponse<T> = serde_json::from_str(body)?;
    Ok(response.into_vec())
}

/// Backend endpoints, relative to the configured API base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Categories,
    Products,
    VideoConfig,
    Profile,
    Orders,
    OrderStatusUpdate(OrderId),
    Addresses,
    Address(AddressId),
    DefaultAddress(AddressId),
}

impl Endpoint {
    /// Path relative to the API base URL.
    #[must_use]
    pub fn path(self) -> String {
        match self {
            Self::Categories => "store/categories/".to_string(),
            Self::Products => "store/products/".to_string(),
            Self::VideoConfig => "content/video/".to_string(),
            Self::Profile => "auth/profile/".to_string(),
            Self::Orders => "orders/".to_string(),
            Self::OrderStatusUpdate(id) => format!("orders/{id}/status/"),
            Self::Addresses => "auth/addresses/".to_string(),
            Self::Address(id) => format!("auth/addresses/{id}/"),
            Self::DefaultAddress(id) => format!("auth/addresses/{id}/set_default/"),
        }
    }
}

/// Operations the storefront needs from the backend.
///
/// Futures are `Send` so hosts may drive them on a multi-threaded runtime.
pub trait StoreApi {
    /// All product categories.
    fn categories(&self) -> impl Future<Output = Result<Vec<Category>, ApiError>> + Send;

    /// Products matching `query`.
    fn products(
        &self,
        query: &ProductQuery,
    ) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;

    /// Home page video configuration.
    fn video_config(&self) -> impl Future<Output = Result<VideoConfig, ApiError>> + Send;

    /// Profile of the signed-in user.
    fn profile(&self) -> impl Future<Output = Result<UserProfile, ApiError>> + Send;

    /// Orders visible to the signed-in user.
    fn user_orders(&self) -> impl Future<Output = Result<Vec<Order>, ApiError>> + Send;

    /// Change an order's fulfillment status (staff only).
    fn update_order_status(
        &self,
        order_id: OrderId,
        status: &OrderStatus,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Saved addresses of the signed-in user.
    fn saved_addresses(&self) -> impl Future<Output = Result<Vec<SavedAddress>, ApiError>> + Send;

    /// Create a saved address.
    fn save_address(
        &self,
        address: &NewAddress,
    ) -> impl Future<Output = Result<SavedAddress, ApiError>> + Send;

    /// Delete a saved address.
    fn delete_address(&self, id: AddressId) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Mark a saved address as the default.
    fn set_default_address(
        &self,
        id: AddressId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_unauthorized() {
        let err = ApiError::from_response(401, r#"{"detail":"expired"}"#);
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_from_response_validation_array() {
        let err = ApiError::from_response(400, r#"["You can save up to 3 addresses only."]"#);
        assert_eq!(
            err.first_rejection(),
            Some("You can save up to 3 addresses only.")
        );
    }

    #[test]
    fn test_from_response_validation_object() {
        let err = ApiError::from_response(400, r#"{"zip_code":["Enter a valid PIN code."]}"#);
        assert_eq!(err.first_rejection(), Some("Enter a valid PIN code."));
    }

    #[test]
    fn test_from_response_other_status() {
        let err = ApiError::from_response(500, "Server Error\n");
        assert!(matches!(
            err,
            ApiError::Status { status: 500, ref message } if message == "Server Error"
        ));
        assert_eq!(err.first_rejection(), None);

        // 400 without messages stays a plain status error
        let err = ApiError::from_response(400, "bad");
        assert!(matches!(err, ApiError::Status { status: 400, .. }));
    }

    #[test]
    fn test_decode_list_shapes() {
        let bare: Vec<Category> =
            decode_list(r#"[{"id":1,"name":"Kurtas","slug":"kurtas"}]"#).unwrap();
        assert_eq!(bare.len(), 1);

        let envelope: Vec<Category> = decode_list(r#"{"results":[]}"#).unwrap();
        assert!(envelope.is_empty());

        assert!(matches!(
            decode_list::<Category>("not json"),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::Categories.path(), "store/categories/");
        assert_eq!(
            Endpoint::OrderStatusUpdate(OrderId::new(9)).path(),
            "orders/9/status/"
        );
        assert_eq!(
            Endpoint::DefaultAddress(AddressId::new(4)).path(),
            "auth/addresses/4/set_default/"
        );
    }
}
