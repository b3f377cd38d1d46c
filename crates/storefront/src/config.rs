//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_API_BASE_URL` - Base URL of the backend API (http or https)
//!
//! ## Optional
//! - `STOREFRONT_STORAGE_DIR` - Directory for file-backed client storage (default: .vinsara)
//! - `STOREFRONT_ORDERS_PER_PAGE` - Order history page size (default: 20)
//! - `STOREFRONT_MAX_SAVED_ADDRESSES` - Saved address cap (default: 3)
//! - `STOREFRONT_LOG_FORMAT` - `text` or `json` (default: text)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::account::addresses::MAX_SAVED_ADDRESSES;
use crate::account::pagination::ORDERS_PER_PAGE;
use crate::telemetry::LogFormat;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Backend API base URL
    pub api_base_url: Url,
    /// Directory holding file-backed client storage
    pub storage_dir: PathBuf,
    /// Orders shown per order history page
    pub orders_per_page: usize,
    /// Maximum number of saved addresses per account
    pub max_saved_addresses: usize,
    /// Log output format
    pub log_format: LogFormat,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = parse_api_url(&get_required(&lookup, "STOREFRONT_API_BASE_URL")?)?;
        let storage_dir = PathBuf::from(get_or_default(&lookup, "STOREFRONT_STORAGE_DIR", ".vinsara"));
        let orders_per_page = parse_positive(
            &lookup,
            "STOREFRONT_ORDERS_PER_PAGE",
            ORDERS_PER_PAGE,
        )?;
        let max_saved_addresses = parse_positive(
            &lookup,
            "STOREFRONT_MAX_SAVED_ADDRESSES",
            MAX_SAVED_ADDRESSES,
        )?;
        let log_format = get_or_default(&lookup, "STOREFRONT_LOG_FORMAT", "text")
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::InvalidEnvVar("STOREFRONT_LOG_FORMAT".to_string(), e))?;

        Ok(Self {
            api_base_url,
            storage_dir,
            orders_per_page,
            max_saved_addresses,
            log_format,
        })
    }

    /// Resolve an API path against the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` cannot be joined onto the base URL.
    pub fn api_url(&self, path: &str) -> Result<Url, url::ParseError> {
        self.api_base_url.join(path.trim_start_matches('/'))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn get_required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

fn get_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}

fn parse_positive<F>(lookup: &F, key: &str, default: usize) -> Result<usize, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be at least 1".to_string(),
        )),
        Ok(value) => Ok(value),
        Err(e) => Err(ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
    }
}

/// Parse the API base URL, normalising it to end with a slash so that
/// relative endpoint paths join underneath it.
fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| {
        ConfigError::InvalidEnvVar("STOREFRONT_API_BASE_URL".to_string(), reason)
    };

    let mut url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[(
            "STOREFRONT_API_BASE_URL",
            "https://api.example.in/api",
        )]))
        .unwrap();

        assert_eq!(config.api_base_url.as_str(), "https://api.example.in/api/");
        assert_eq!(config.storage_dir, PathBuf::from(".vinsara"));
        assert_eq!(config.orders_per_page, 20);
        assert_eq!(config.max_saved_addresses, 3);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_missing_api_url() {
        let err = StorefrontConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(key) if key == "STOREFRONT_API_BASE_URL"));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let err = StorefrontConfig::from_lookup(lookup_from(&[(
            "STOREFRONT_API_BASE_URL",
            "ftp://files.example.in",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let err = StorefrontConfig::from_lookup(lookup_from(&[
            ("STOREFRONT_API_BASE_URL", "http://localhost:8000"),
            ("STOREFRONT_ORDERS_PER_PAGE", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "STOREFRONT_ORDERS_PER_PAGE"));
    }

    #[test]
    fn test_overrides_and_json_logs() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[
            ("STOREFRONT_API_BASE_URL", "http://localhost:8000"),
            ("STOREFRONT_STORAGE_DIR", "/tmp/vinsara"),
            ("STOREFRONT_ORDERS_PER_PAGE", "10"),
            ("STOREFRONT_LOG_FORMAT", "json"),
        ]))
        .unwrap();

        assert_eq!(config.storage_dir, PathBuf::from("/tmp/vinsara"));
        assert_eq!(config.orders_per_page, 10);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_api_url_joins_under_base() {
        let config = StorefrontConfig::from_lookup(lookup_from(&[(
            "STOREFRONT_API_BASE_URL",
            "https://api.example.in/api",
        )]))
        .unwrap();

        assert_eq!(
            config.api_url("/store/categories/").unwrap().as_str(),
            "https://api.example.in/api/store/categories/"
        );
    }
}
