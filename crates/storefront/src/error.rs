//! Unified error handling.
//!
//! Provides a unified `AppError` type for storefront operations. Views catch
//! these locally, log them, and turn them into notifications; nothing here is
//! fatal.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Client storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Input rejected before reaching the backend.
    #[error("Validation error: {0}")]
    Validation(String),

    /// No signed-in user.
    #[error("Unauthorized")]
    Unauthorized,
}

impl AppError {
    /// Text safe to show the user, or `None` when the generic fallback of the
    /// calling view should be used instead.
    ///
    /// Internal details (I/O, decode, transport errors) are never exposed.
    #[must_use]
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Self::Validation(msg) => Some(msg.as_str()),
            Self::Api(err) => err.first_rejection(),
            Self::Unauthorized => Some("Please log in to continue."),
            Self::Storage(_) | Self::Config(_) => None,
        }
    }

    /// Whether the auth layer already reports this failure.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        match self {
            Self::Unauthorized => true,
            Self::Api(err) => err.is_unauthorized(),
            _ => false,
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
