//! Header navigation menu and promo banner.

use tracing::instrument;

use super::Route;
use crate::api::{Category, StoreApi};

/// Title of the section filled from backend categories.
pub const CLOTHING_SECTION: &str = "CLOTHING";
/// Title of the static product section, expanded initially.
pub const PRODUCTS_SECTION: &str = "PRODUCTS";

/// Promo messages cycled in the header banner.
pub const PROMO_MESSAGES: [&str; 5] = [
    "10% OFF YOUR FIRST PURCHASE! CODE: VINSARANEW",
    "MADE WITH LOVE AND PURE FABRICS",
    "FREE SHIPPING ON ORDERS OVER $100",
    "HANDCRAFTED TRADITIONAL ARTISTRY",
    "NEW COLLECTION JUST ARRIVED",
];

/// Link in a menu section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub name: String,
    pub route: Route,
}

/// Accordion section of the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSection {
    pub title: String,
    pub items: Vec<MenuItem>,
}

/// Side menu with one expandable section at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationMenu {
    sections: Vec<MenuSection>,
    expanded: Option<String>,
}

impl Default for NavigationMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationMenu {
    /// Static menu; the clothing section is empty until categories load.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sections: vec![
                MenuSection {
                    title: PRODUCTS_SECTION.to_string(),
                    items: vec![
                        MenuItem {
                            name: "New Arrivals".to_string(),
                            route: Route::Home,
                        },
                        MenuItem {
                            name: "All Products".to_string(),
                            route: Route::AllProducts,
                        },
                    ],
                },
                MenuSection {
                    title: CLOTHING_SECTION.to_string(),
                    items: Vec::new(),
                },
            ],
            expanded: Some(PRODUCTS_SECTION.to_string()),
        }
    }

    #[must_use]
    pub fn sections(&self) -> &[MenuSection] {
        &self.sections
    }

    /// Title of the open section.
    #[must_use]
    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    /// Open `title`, or close it if it is already open.
    pub fn toggle(&mut self, title: &str) {
        if self.expanded.as_deref() == Some(title) {
            self.expanded = None;
        } else {
            self.expanded = Some(title.to_string());
        }
    }

    /// Replace the clothing section's links with one per category.
    pub fn apply_categories(&mut self, categories: &[Category]) {
        let items: Vec<MenuItem> = categories
            .iter()
            .map(|category| MenuItem {
                name: category.name.clone(),
                route: Route::Collection(category.slug.clone()),
            })
            .collect();

        if let Some(section) = self
            .sections
            .iter_mut()
            .find(|section| section.title == CLOTHING_SECTION)
        {
            section.items = items;
        }
    }

    /// Fetch categories and fill the clothing section. On failure the menu
    /// keeps its static sections.
    #[instrument(skip_all)]
    pub async fn load<A: StoreApi>(&mut self, api: &A) {
        match api.categories().await {
            Ok(categories) => self.apply_categories(&categories),
            Err(e) => tracing::error!(error = %e, "Menu load failed"),
        }
    }
}

/// Header banner cycling through [`PROMO_MESSAGES`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromoBanner {
    index: usize,
}

impl PromoBanner {
    /// Message currently shown.
    #[must_use]
    pub fn current(&self) -> &'static str {
        PROMO_MESSAGES
            .get(self.index % PROMO_MESSAGES.len())
            .copied()
            .unwrap_or_default()
    }

    /// Advance to the next message, wrapping around.
    pub const fn tick(&mut self) {
        self.index = (self.index + 1) % PROMO_MESSAGES.len();
    }
}

#[cfg(test)]
mod tests {
    use vinsara_core::CategoryId;

    use super::*;

    fn category(id: i32, name: &str, slug: &str) -> Category {
        Category {
            id: CategoryId::new(id),
            name: name.to_string(),
            slug: slug.to_string(),
            image: None,
        }
    }

    #[test]
    fn test_initial_menu() {
        let menu = NavigationMenu::new();
        assert_eq!(menu.sections().len(), 2);
        assert_eq!(menu.expanded(), Some(PRODUCTS_SECTION));
        assert!(menu.sections()[1].items.is_empty());
    }

    #[test]
    fn test_apply_categories_fills_clothing() {
        let mut menu = NavigationMenu::new();
        menu.apply_categories(&[category(1, "Kurtas", "kurtas"), category(2, "Sarees", "sarees")]);

        let clothing = &menu.sections()[1];
        assert_eq!(clothing.title, CLOTHING_SECTION);
        assert_eq!(clothing.items.len(), 2);
        assert_eq!(clothing.items[1].route.path(), "/collections/sarees");
        // Static section untouched
        assert_eq!(menu.sections()[0].items.len(), 2);
    }

    #[test]
    fn test_toggle_accordion() {
        let mut menu = NavigationMenu::new();
        menu.toggle(PRODUCTS_SECTION);
        assert_eq!(menu.expanded(), None);
        menu.toggle(CLOTHING_SECTION);
        assert_eq!(menu.expanded(), Some(CLOTHING_SECTION));
        menu.toggle(PRODUCTS_SECTION);
        assert_eq!(menu.expanded(), Some(PRODUCTS_SECTION));
    }

    #[test]
    fn test_promo_banner_wraps() {
        let mut banner = PromoBanner::default();
        assert_eq!(banner.current(), PROMO_MESSAGES[0]);
        for _ in 0..PROMO_MESSAGES.len() {
            banner.tick();
        }
        assert_eq!(banner.current(), PROMO_MESSAGES[0]);
        banner.tick();
        assert_eq!(banner.current(), PROMO_MESSAGES[1]);
    }
}
