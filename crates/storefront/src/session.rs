//! Signed-in session stored in client storage.
//!
//! The backend issues the auth token at login; this module only keeps it,
//! reports whether one is present, and forgets it on logout. The token is
//! held as a [`SecretString`] so it never shows up in `Debug` output or logs.

use secrecy::SecretString;

use crate::storage::{ClientStorage, StorageError, keys};

/// Access to the stored auth token.
#[derive(Debug)]
pub struct Session<S> {
    storage: S,
}

impl<S: ClientStorage> Session<S> {
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Stored auth token, if any. Blank values count as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    pub fn auth_token(&self) -> Result<Option<SecretString>, StorageError> {
        Ok(self
            .storage
            .get_item(keys::USER_TOKEN)?
            .filter(|token| !token.trim().is_empty())
            .map(SecretString::from))
    }

    /// Whether a token is stored. Storage failures count as signed out.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        match self.auth_token() {
            Ok(token) => token.is_some(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read auth token");
                false
            }
        }
    }

    /// Keep a token issued by the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be written.
    pub fn store_token(&self, token: &SecretString) -> Result<(), StorageError> {
        use secrecy::ExposeSecret;
        self.storage.set_item(keys::USER_TOKEN, token.expose_secret())
    }

    /// Forget the auth token and the stored cart.
    ///
    /// # Errors
    ///
    /// Returns the first storage failure; both keys are attempted regardless.
    pub fn sign_out(&self) -> Result<(), StorageError> {
        let token = self.storage.remove_item(keys::USER_TOKEN);
        let cart = self.storage.remove_item(keys::CART);
        tracing::info!("Signed out");
        token.and(cart)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_token_lifecycle() {
        let storage = MemoryStorage::new();
        let session = Session::new(&storage);
        assert!(!session.is_authenticated());

        session
            .store_token(&SecretString::from("tok_4f9a81c2"))
            .unwrap();
        assert!(session.is_authenticated());

        let debug = format!("{:?}", session.auth_token().unwrap());
        assert!(!debug.contains("tok_4f9a81c2"));
    }

    #[test]
    fn test_blank_token_is_signed_out() {
        let storage = MemoryStorage::new();
        storage.set_item(keys::USER_TOKEN, "  ").unwrap();
        assert!(!Session::new(&storage).is_authenticated());
    }

    #[test]
    fn test_sign_out_clears_token_and_cart() {
        let storage = MemoryStorage::new();
        storage.set_item(keys::USER_TOKEN, "tok").unwrap();
        storage.set_item(keys::CART, "[]").unwrap();

        Session::new(&storage).sign_out().unwrap();

        assert!(!storage.contains_key(keys::USER_TOKEN));
        assert!(!storage.contains_key(keys::CART));
    }
}
