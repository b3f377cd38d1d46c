//! Session commands.

use vinsara_storefront::session::Session;
use vinsara_storefront::storage::FileStorage;

use crate::CliError;

/// Remove the stored auth token and cart.
///
/// # Errors
///
/// Returns an error if either key cannot be removed.
pub fn logout(storage: &FileStorage) -> Result<(), CliError> {
    Session::new(storage).sign_out()?;
    tracing::info!("Logged out successfully");
    Ok(())
}
