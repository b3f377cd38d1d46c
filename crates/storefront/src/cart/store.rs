//! Cart state container.

use std::collections::HashSet;

use rust_decimal::Decimal;
use vinsara_core::Price;

use super::CartItem;
use crate::storage::{ClientStorage, StorageError, keys};

/// Shopping cart state, persisted to client storage after every mutation.
///
/// The store owns the line list and a storage handle. Mutations are
/// synchronous; each one rewrites the stored record (or removes it once the
/// cart is empty). A failed write is logged and kept for
/// [`take_persist_error`](Self::take_persist_error); the in-memory state stays
/// authoritative, so the cart keeps working when storage is unavailable.
///
/// Invariants:
/// - at most one line per `(id, size)`
/// - every line has `quantity >= 1`
/// - a store that could not read its record never writes over it
#[derive(Debug)]
pub struct CartStore<S> {
    items: Vec<CartItem>,
    storage: S,
    detached: bool,
    persist_error: Option<StorageError>,
}

impl<S: ClientStorage> CartStore<S> {
    /// Create a store hydrated from `storage`.
    ///
    /// A missing record yields an empty cart, as does a corrupt one (logged).
    /// If the storage cannot be read at all the cart also starts empty, but
    /// it is detached: mutations stay in memory and the stored record is left
    /// untouched.
    pub fn load(storage: S) -> Self {
        match read_items(&storage) {
            Ok(items) => Self::hydrated(storage, items),
            Err(e) => {
                tracing::warn!(error = %e, "Cart storage unreadable, keeping cart in memory only");
                Self {
                    items: Vec::new(),
                    storage,
                    detached: true,
                    persist_error: None,
                }
            }
        }
    }

    /// Create a store hydrated from `storage`, failing if it cannot be read.
    ///
    /// A corrupt record still yields an empty cart.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the record cannot be read.
    pub fn try_load(storage: S) -> Result<Self, StorageError> {
        let items = read_items(&storage)?;
        Ok(Self::hydrated(storage, items))
    }

    fn hydrated(storage: S, items: Vec<CartItem>) -> Self {
        let items = normalize(items);
        tracing::debug!(lines = items.len(), "Cart hydrated");
        Self {
            items,
            storage,
            detached: false,
            persist_error: None,
        }
    }

    /// Whether mutations are written back to storage.
    #[must_use]
    pub const fn is_persistent(&self) -> bool {
        !self.detached
    }

    /// Take the error of the latest failed write since the previous call.
    pub const fn take_persist_error(&mut self) -> Option<StorageError> {
        self.persist_error.take()
    }

    /// Current lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find the line for `(id, size)`.
    #[must_use]
    pub fn find(&self, id: &str, size: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.matches(id, size))
    }

    /// Add a line, merging into an existing `(id, size)` line by summing
    /// quantities. Items with a zero quantity are ignored.
    pub fn add_to_cart(&mut self, item: CartItem) {
        if item.quantity == 0 {
            tracing::debug!(id = %item.id, size = %item.size, "Ignoring zero-quantity add");
            return;
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|line| line.matches(&item.id, &item.size))
        {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else {
            self.items.push(item);
        }
        self.persist();
    }

    /// Remove the `(id, size)` line. No-op if absent.
    pub fn remove_from_cart(&mut self, id: &str, size: &str) {
        let before = self.items.len();
        self.items.retain(|item| !item.matches(id, size));
        if self.items.len() != before {
            self.persist();
        }
    }

    /// Set the quantity of the `(id, size)` line; `quantity <= 0` removes it.
    pub fn update_quantity(&mut self, id: &str, size: &str, quantity: i64) {
        let Ok(quantity) = u32::try_from(quantity) else {
            if quantity <= 0 {
                self.remove_from_cart(id, size);
            } else {
                tracing::warn!(id, size, quantity, "Quantity out of range, ignoring");
            }
            return;
        };
        if quantity == 0 {
            self.remove_from_cart(id, size);
            return;
        }

        if let Some(line) = self.items.iter_mut().find(|item| item.matches(id, size)) {
            line.quantity = quantity;
            self.persist();
        }
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Remove lines whose `"{sku}-{size}"` key is in `keys`.
    ///
    /// Used after checkout to drop exactly the purchased lines while leaving
    /// anything added in the meantime.
    pub fn remove_purchased_items<K: AsRef<str>>(&mut self, keys: &[K]) {
        let purchased: HashSet<&str> = keys.iter().map(AsRef::as_ref).collect();
        let before = self.items.len();
        self.items
            .retain(|item| !purchased.contains(item.purchase_key().as_str()));

        let removed = before - self.items.len();
        if removed > 0 {
            tracing::info!(removed, "Removed purchased lines from cart");
            self.persist();
        }
    }

    /// Purchase keys of the current lines, for the checkout hand-off.
    #[must_use]
    pub fn checkout_keys(&self) -> Vec<String> {
        self.items.iter().map(CartItem::purchase_key).collect()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn cart_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of price x quantity over all lines.
    #[must_use]
    pub fn cart_total(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Cart total as a displayable [`Price`].
    #[must_use]
    pub fn total_price(&self) -> Price {
        Price::inr(self.cart_total())
    }

    /// Storage handle the cart persists into.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self) {
        if self.detached {
            tracing::debug!("Cart detached from storage, not persisting");
            return;
        }
        if let Err(e) = write_items(&self.storage, &self.items) {
            tracing::warn!(error = %e, "Failed to persist cart");
            self.persist_error = Some(e);
        }
    }
}

/// Read the stored lines. Only a failure to read the storage is an error;
/// a record that does not parse is discarded.
fn read_items<S: ClientStorage>(storage: &S) -> Result<Vec<CartItem>, StorageError> {
    let Some(raw) = storage.get_item(keys::CART)? else {
        return Ok(Vec::new());
    };
    match serde_json::from_str(&raw) {
        Ok(items) => Ok(items),
        Err(e) => {
            tracing::warn!(error = %e, "Discarding corrupt stored cart");
            Ok(Vec::new())
        }
    }
}

fn write_items<S: ClientStorage>(storage: &S, items: &[CartItem]) -> Result<(), StorageError> {
    if items.is_empty() {
        storage.remove_item(keys::CART)
    } else {
        let raw = serde_json::to_string(items)?;
        storage.set_item(keys::CART, &raw)
    }
}

/// Re-establish the line invariants on data read back from storage.
fn normalize(stored: Vec<CartItem>) -> Vec<CartItem> {
    let mut items: Vec<CartItem> = Vec::with_capacity(stored.len());
    for item in stored {
        if item.quantity == 0 {
            continue;
        }
        match items
            .iter_mut()
            .find(|line| line.matches(&item.id, &item.size))
        {
            Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
            None => items.push(item),
        }
    }
    items
}
