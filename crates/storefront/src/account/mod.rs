//! Account page: order history, saved addresses and logout.
//!
//! The page requires a stored auth token. On mount it checks the viewer's
//! role (staff and superusers are admins) and fetches the active tab.

pub mod addresses;
pub mod orders;
pub mod pagination;

use tracing::instrument;
use vinsara_core::{OrderId, OrderStatus};

use crate::api::{StoreApi, UserProfile};
use crate::cart::CartStore;
use crate::config::StorefrontConfig;
use crate::notify::Notifier;
use crate::session::Session;
use crate::storage::ClientStorage;
use crate::views::Route;

pub use addresses::AddressBook;
pub use orders::OrderHistory;
pub use pagination::{PageLink, Paginator};

/// Account page tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccountTab {
    #[default]
    Orders,
    Addresses,
}

/// Account page state.
#[derive(Debug, Default)]
pub struct AccountView {
    tab: AccountTab,
    profile: Option<UserProfile>,
    orders: OrderHistory,
    addresses: AddressBook,
}

impl AccountView {
    /// View using the configured page size and address cap.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        Self {
            tab: AccountTab::default(),
            profile: None,
            orders: OrderHistory::new(config.orders_per_page),
            addresses: AddressBook::new(config.max_saved_addresses),
        }
    }

    #[must_use]
    pub const fn tab(&self) -> AccountTab {
        self.tab
    }

    #[must_use]
    pub const fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.orders.is_admin()
    }

    #[must_use]
    pub const fn orders(&self) -> &OrderHistory {
        &self.orders
    }

    pub fn orders_mut(&mut self) -> &mut OrderHistory {
        &mut self.orders
    }

    #[must_use]
    pub const fn addresses(&self) -> &AddressBook {
        &self.addresses
    }

    pub fn addresses_mut(&mut self) -> &mut AddressBook {
        &mut self.addresses
    }

    /// Enter the page.
    ///
    /// Returns [`Route::Login`] without fetching anything when no auth token
    /// is stored.
    #[instrument(skip_all)]
    pub async fn mount<A, S, N>(
        &mut self,
        api: &A,
        session: &Session<S>,
        notifier: &N,
    ) -> Option<Route>
    where
        A: StoreApi,
        S: ClientStorage,
        N: Notifier,
    {
        if !session.is_authenticated() {
            tracing::info!("No auth token, redirecting to login");
            return Some(Route::Login);
        }

        match api.profile().await {
            Ok(profile) => {
                self.orders.set_admin(profile.is_admin());
                self.profile = Some(profile);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch profile");
                self.orders.set_admin(false);
            }
        }

        self.load_tab(api, notifier).await;
        None
    }

    /// Switch tabs and fetch the new tab's data.
    pub async fn switch_tab<A: StoreApi, N: Notifier>(
        &mut self,
        tab: AccountTab,
        api: &A,
        notifier: &N,
    ) {
        self.tab = tab;
        self.load_tab(api, notifier).await;
    }

    async fn load_tab<A: StoreApi, N: Notifier>(&mut self, api: &A, notifier: &N) {
        match self.tab {
            AccountTab::Orders => self.orders.load(api, notifier).await,
            AccountTab::Addresses => self.addresses.load(api, notifier).await,
        }
    }

    /// Change an order's status (admins only).
    #[instrument(skip(self, api, notifier))]
    pub async fn update_order_status<A: StoreApi, N: Notifier>(
        &mut self,
        api: &A,
        notifier: &N,
        order_id: OrderId,
        status: OrderStatus,
    ) {
        if !self.is_admin() {
            tracing::warn!("Status change attempted without admin role");
            return;
        }

        match api.update_order_status(order_id, &status).await {
            Ok(()) => {
                self.orders.apply_status(order_id, status);
                notifier.success("Order status updated");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to update order status");
                if !e.is_unauthorized() {
                    notifier.error("Failed to update status");
                }
            }
        }
    }

    /// Sign out: clear the cart and auth token, then go to the login page.
    pub fn logout<C, S, N>(
        &mut self,
        cart: &mut CartStore<C>,
        session: &Session<S>,
        notifier: &N,
    ) -> Route
    where
        C: ClientStorage,
        S: ClientStorage,
        N: Notifier,
    {
        cart.clear_cart();
        if let Err(e) = session.sign_out() {
            tracing::warn!(error = %e, "Failed to clear session storage");
        }
        *self = Self {
            tab: AccountTab::default(),
            profile: None,
            orders: OrderHistory::new(self.orders.paginator().per_page()),
            addresses: AddressBook::new(self.addresses.max_addresses()),
        };
        notifier.success("Logged out successfully");
        Route::Login
    }
}
