//! Saved addresses tab.

use tracing::instrument;
use vinsara_core::AddressId;

use crate::api::{NewAddress, SavedAddress, StoreApi};
use crate::error::{AppError, Result};
use crate::notify::Notifier;

/// Default cap on saved addresses per account.
pub const MAX_SAVED_ADDRESSES: usize = 3;

const REQUIRED_FIELDS_MESSAGE: &str = "Please fill required fields.";

/// Saved address list and the add-address form.
#[derive(Debug)]
pub struct AddressBook {
    addresses: Vec<SavedAddress>,
    form: NewAddress,
    form_open: bool,
    submitting: bool,
    max_addresses: usize,
}

impl Default for AddressBook {
    fn default() -> Self {
        Self::new(MAX_SAVED_ADDRESSES)
    }
}

impl AddressBook {
    #[must_use]
    pub fn new(max_addresses: usize) -> Self {
        Self {
            addresses: Vec::new(),
            form: NewAddress::default(),
            form_open: false,
            submitting: false,
            max_addresses,
        }
    }

    #[must_use]
    pub fn addresses(&self) -> &[SavedAddress] {
        &self.addresses
    }

    #[must_use]
    pub const fn max_addresses(&self) -> usize {
        self.max_addresses
    }

    /// Whether the add button is offered.
    #[must_use]
    pub fn can_add(&self) -> bool {
        self.addresses.len() < self.max_addresses
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    #[must_use]
    pub const fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub fn open_form(&mut self) {
        self.form_open = true;
    }

    pub fn close_form(&mut self) {
        self.form_open = false;
    }

    #[must_use]
    pub const fn form(&self) -> &NewAddress {
        &self.form
    }

    /// Form fields being edited.
    pub fn form_mut(&mut self) -> &mut NewAddress {
        &mut self.form
    }

    /// Fetch the saved addresses. A failed fetch leaves the list empty.
    #[instrument(skip_all)]
    pub async fn load<A: StoreApi, N: Notifier>(&mut self, api: &A, notifier: &N) {
        self.addresses = match api.saved_addresses().await {
            Ok(addresses) => addresses,
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch addresses");
                if !e.is_unauthorized() {
                    notifier.error("Could not load saved addresses");
                }
                Vec::new()
            }
        };
    }

    /// Check the form locally before anything is sent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the cap is reached or a required
    /// field is blank.
    pub fn validate(&self) -> Result<()> {
        if !self.can_add() {
            return Err(AppError::Validation(format!(
                "You can save up to {} addresses only.",
                self.max_addresses
            )));
        }
        let form = &self.form;
        let required = [&form.address, &form.city, &form.zip_code, &form.phone];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(AppError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()));
        }
        Ok(())
    }

    /// Submit the form. On success the form is closed and reset and the list
    /// refetched. Returns whether the address was saved.
    #[instrument(skip_all)]
    pub async fn save<A: StoreApi, N: Notifier>(&mut self, api: &A, notifier: &N) -> bool {
        if let Err(e) = self.validate() {
            tracing::debug!(error = %e, "Address form rejected");
            if let Some(message) = e.user_message() {
                notifier.error(message);
            }
            return false;
        }

        self.submitting = true;
        let result = api.save_address(&self.form).await.map_err(AppError::from);
        self.submitting = false;

        match result {
            Ok(saved) => {
                tracing::info!(address_id = %saved.id, "Address saved");
                notifier.success("Address saved");
                self.form_open = false;
                self.form = NewAddress::default();
                self.load(api, notifier).await;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to save address");
                if !e.is_unauthorized() {
                    notifier.error(e.user_message().unwrap_or("Failed to save address"));
                }
                false
            }
        }
    }

    /// Delete an address and refetch.
    #[instrument(skip(self, api, notifier))]
    pub async fn delete<A: StoreApi, N: Notifier>(&mut self, api: &A, notifier: &N, id: AddressId) {
        match api.delete_address(id).await {
            Ok(()) => {
                notifier.success("Address deleted");
                self.load(api, notifier).await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to delete address");
                if !e.is_unauthorized() {
                    notifier.error("Failed to delete address");
                }
            }
        }
    }

    /// Mark an address as the default and refetch.
    #[instrument(skip(self, api, notifier))]
    pub async fn set_default<A: StoreApi, N: Notifier>(
        &mut self,
        api: &A,
        notifier: &N,
        id: AddressId,
    ) {
        match api.set_default_address(id).await {
            Ok(()) => {
                notifier.success("Default address updated");
                self.load(api, notifier).await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to set default address");
                if !e.is_unauthorized() {
                    notifier.error("Failed to set default");
                }
            }
        }
    }
}
