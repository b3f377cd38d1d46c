//! Order history tab.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use tracing::instrument;
use vinsara_core::{OrderId, OrderStatus, Price};

use super::pagination::{ORDERS_PER_PAGE, Paginator};
use crate::api::{Order, OrderItem, StoreApi};
use crate::notify::Notifier;
use crate::views::Route;

/// Items shown on a collapsed order card.
pub const COLLAPSED_ITEMS: usize = 2;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex"));
static SLUG_STRIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]+").expect("Invalid regex"));

/// Slug for linking an order line back to its product page.
///
/// Falls back to a slug derived from the product name when the backend did
/// not record one.
#[must_use]
pub fn product_slug(item: &OrderItem) -> String {
    if let Some(slug) = item.product_slug.as_deref().filter(|s| !s.is_empty()) {
        return slug.to_string();
    }
    let lowered = item.product_name.to_lowercase();
    let dashed = WHITESPACE_RE.replace_all(&lowered, "-");
    SLUG_STRIP_RE.replace_all(&dashed, "").into_owned()
}

/// Product page for an order line.
#[must_use]
pub fn product_route(item: &OrderItem) -> Route {
    Route::Product(product_slug(item))
}

/// Format an order timestamp as `5 Mar 2025`, or return it unchanged when it
/// cannot be parsed.
#[must_use]
pub fn format_date(raw: &str) -> String {
    const FORMAT: &str = "%-d %b %Y";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(FORMAT).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(FORMAT).to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format(FORMAT).to_string();
    }
    raw.to_string()
}

/// Color family of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Green,
    Blue,
    Amber,
    Red,
    Gray,
}

/// Presentation of an order status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub tone: BadgeTone,
    pub label: String,
}

impl From<&OrderStatus> for StatusBadge {
    fn from(status: &OrderStatus) -> Self {
        let tone = match status {
            OrderStatus::Delivered => BadgeTone::Green,
            OrderStatus::Shipped => BadgeTone::Blue,
            OrderStatus::Processing => BadgeTone::Amber,
            OrderStatus::Cancelled => BadgeTone::Red,
            OrderStatus::Other(_) => BadgeTone::Gray,
        };
        Self {
            tone,
            label: status.as_str().to_string(),
        }
    }
}

/// Order list with role filtering, pagination and card expansion.
#[derive(Debug)]
pub struct OrderHistory {
    orders: Vec<Order>,
    is_admin: bool,
    paginator: Paginator,
    expanded: Option<OrderId>,
    loading: bool,
}

impl Default for OrderHistory {
    fn default() -> Self {
        Self::new(ORDERS_PER_PAGE)
    }
}

impl OrderHistory {
    #[must_use]
    pub fn new(per_page: usize) -> Self {
        Self {
            orders: Vec::new(),
            is_admin: false,
            paginator: Paginator::new(0, per_page),
            expanded: None,
            loading: false,
        }
    }

    /// Admins see every order; everyone else only paid ones.
    pub fn set_admin(&mut self, is_admin: bool) {
        self.is_admin = is_admin;
        self.paginator.reset(self.visible_count());
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.is_admin
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Fetch the orders and go back to page 1.
    ///
    /// A failed fetch leaves the list empty.
    #[instrument(skip_all)]
    pub async fn load<A: StoreApi, N: Notifier>(&mut self, api: &A, notifier: &N) {
        self.loading = true;
        self.orders = match api.user_orders().await {
            Ok(orders) => {
                tracing::debug!(count = orders.len(), "Orders fetched");
                orders
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch orders");
                if !e.is_unauthorized() {
                    notifier.error("Could not load orders");
                }
                Vec::new()
            }
        };
        self.expanded = None;
        self.paginator.reset(self.visible_count());
        self.loading = false;
    }

    /// Every fetched order, before role filtering.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Orders the viewer is allowed to see.
    pub fn visible(&self) -> impl Iterator<Item = &Order> {
        let is_admin = self.is_admin;
        self.orders
            .iter()
            .filter(move |order| is_admin || order.payment_status.is_paid())
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible().count()
    }

    /// Orders on the current page.
    #[must_use]
    pub fn current_page(&self) -> Vec<&Order> {
        let range = self.paginator.range();
        self.visible()
            .skip(range.start)
            .take(range.len())
            .collect()
    }

    #[must_use]
    pub const fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// Jump to a page; out-of-range requests clamp.
    pub fn go_to_page(&mut self, page: i64) {
        self.paginator.go_to(page);
    }

    pub fn next_page(&mut self) {
        self.paginator.next();
    }

    pub fn previous_page(&mut self) {
        self.paginator.previous();
    }

    /// Expand `id`, collapsing any other card; collapse it if already open.
    pub fn toggle_expanded(&mut self, id: OrderId) {
        self.expanded = if self.expanded == Some(id) {
            None
        } else {
            Some(id)
        };
    }

    #[must_use]
    pub fn is_expanded(&self, id: OrderId) -> bool {
        self.expanded == Some(id)
    }

    /// Lines to render on the card for `order`.
    #[must_use]
    pub fn shown_items<'a>(&self, order: &'a Order) -> &'a [OrderItem] {
        if self.is_expanded(order.id) {
            &order.items
        } else {
            order.items.get(..COLLAPSED_ITEMS).unwrap_or(&order.items)
        }
    }

    /// Replace the local status of `id` after the backend accepted it.
    pub fn apply_status(&mut self, id: OrderId, status: OrderStatus) -> bool {
        match self.orders.iter_mut().find(|order| order.id == id) {
            Some(order) => {
                order.order_status = status;
                true
            }
            None => false,
        }
    }
}

/// Order total as shown on the card.
#[must_use]
pub const fn order_total(order: &Order) -> Price {
    Price::inr(order.total_amount)
}
