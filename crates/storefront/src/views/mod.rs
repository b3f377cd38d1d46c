//! View state for the storefront pages.
//!
//! Each view fetches what it needs from the [`StoreApi`](crate::api::StoreApi)
//! when mounted and keeps only display state. Failed fetches are logged and
//! treated as empty results.

pub mod cart;
pub mod catalog;
pub mod menu;
pub mod video;

/// Fetch lifecycle of a view's data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState<T> {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Request in flight.
    Loading,
    /// Request finished (failures settle on an empty value).
    Loaded(T),
}

impl<T> LoadState<T> {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The loaded value, if the fetch has finished.
    #[must_use]
    pub const fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// Navigation a view asks the host to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    AllProducts,
    Collection(String),
    Product(String),
}

impl Route {
    /// URL path of the route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::AllProducts => "/all-products".to_string(),
            Self::Collection(slug) => format!("/collections/{slug}"),
            Self::Product(slug) => format!("/product/{slug}"),
        }
    }
}
