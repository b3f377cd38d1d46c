//! Category section and new arrivals on the home page.

use tracing::instrument;
use vinsara_core::Price;

use super::{LoadState, Route};
use crate::api::{Category, Product, ProductQuery, StoreApi};

/// Number of products shown in the new arrivals grid.
pub const NEW_ARRIVALS_LIMIT: usize = 5;

/// What the category section renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionDisplay<'a, T> {
    /// Show a spinner.
    Spinner,
    /// Render nothing.
    Hidden,
    /// Render the grid.
    Grid(&'a [T]),
}

/// Home page category grid.
#[derive(Debug, Default)]
pub struct CategorySection {
    state: LoadState<Vec<Category>>,
}

impl CategorySection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch categories. Failure settles on an empty list.
    #[instrument(skip_all)]
    pub async fn load<A: StoreApi>(&mut self, api: &A) {
        self.state = LoadState::Loading;
        let categories = api.categories().await.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to fetch categories");
            Vec::new()
        });
        self.state = LoadState::Loaded(categories);
    }

    /// Spinner while loading, nothing when empty, otherwise the grid.
    #[must_use]
    pub fn display(&self) -> SectionDisplay<'_, Category> {
        match &self.state {
            LoadState::Idle | LoadState::Loading => SectionDisplay::Spinner,
            LoadState::Loaded(categories) if categories.is_empty() => SectionDisplay::Hidden,
            LoadState::Loaded(categories) => SectionDisplay::Grid(categories),
        }
    }
}

/// Product tile data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub slug: String,
    pub title: String,
    pub image: Option<String>,
    pub price: Price,
    pub sizes: Vec<String>,
}

impl ProductCard {
    /// Product page the tile links to.
    #[must_use]
    pub fn route(&self) -> Route {
        Route::Product(self.slug.clone())
    }
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            slug: product.slug.clone(),
            title: product.title.clone(),
            image: product.images.first().cloned(),
            price: Price::inr(product.price),
            sizes: product.variants.iter().map(|v| v.size.clone()).collect(),
        }
    }
}

/// Home page new arrivals grid.
#[derive(Debug, Default)]
pub struct NewArrivals {
    cards: Vec<ProductCard>,
}

impl NewArrivals {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch products flagged new and keep the first [`NEW_ARRIVALS_LIMIT`].
    #[instrument(skip_all)]
    pub async fn load<A: StoreApi>(&mut self, api: &A) {
        match api.products(&ProductQuery::new_arrivals()).await {
            Ok(products) => {
                self.cards = products
                    .iter()
                    .take(NEW_ARRIVALS_LIMIT)
                    .map(ProductCard::from)
                    .collect();
            }
            Err(e) => tracing::error!(error = %e, "New arrivals failed"),
        }
    }

    #[must_use]
    pub fn cards(&self) -> &[ProductCard] {
        &self.cards
    }
}
