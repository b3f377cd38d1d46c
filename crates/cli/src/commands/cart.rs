//! Cart commands.
//!
//! Each command hydrates the cart from storage, applies one mutation, and
//! fails if the store could not write the result back.

use vinsara_storefront::cart::{CartItem, CartStore};
use vinsara_storefront::storage::{ClientStorage, FileStorage};

use crate::CliError;

/// Print every line with the item count and total.
///
/// # Errors
///
/// Returns an error if the stored cart cannot be read.
pub fn list(storage: FileStorage) -> Result<(), CliError> {
    let cart = CartStore::try_load(storage)?;

    #[allow(clippy::print_stdout)]
    {
        print!("{}", render(&cart));
    }
    Ok(())
}

/// Add a line.
///
/// # Errors
///
/// Returns an error if the cart cannot be read or written.
pub fn add(storage: FileStorage, item: CartItem) -> Result<(), CliError> {
    let mut cart = CartStore::try_load(storage)?;
    tracing::info!(id = %item.id, size = %item.size, quantity = item.quantity, "Adding to cart");
    cart.add_to_cart(item);
    saved(&mut cart)
}

/// Set the quantity of an existing line.
///
/// # Errors
///
/// Returns [`CliError::LineNotFound`] if the cart has no such line, or an
/// error if the cart cannot be read or written.
pub fn update(storage: FileStorage, id: &str, size: &str, quantity: i64) -> Result<(), CliError> {
    let mut cart = CartStore::try_load(storage)?;
    require_line(&cart, id, size)?;
    cart.update_quantity(id, size, quantity);
    saved(&mut cart)
}

/// Remove an existing line.
///
/// # Errors
///
/// Returns [`CliError::LineNotFound`] if the cart has no such line, or an
/// error if the cart cannot be read or written.
pub fn remove(storage: FileStorage, id: &str, size: &str) -> Result<(), CliError> {
    let mut cart = CartStore::try_load(storage)?;
    require_line(&cart, id, size)?;
    cart.remove_from_cart(id, size);
    saved(&mut cart)
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be read or written.
pub fn clear(storage: FileStorage) -> Result<(), CliError> {
    let mut cart = CartStore::try_load(storage)?;
    cart.clear_cart();
    saved(&mut cart)
}

/// Drop lines whose purchase key is listed.
///
/// # Errors
///
/// Returns an error if the cart cannot be read or written.
pub fn purchased(storage: FileStorage, keys: &[String]) -> Result<(), CliError> {
    let mut cart = CartStore::try_load(storage)?;
    cart.remove_purchased_items(keys);
    saved(&mut cart)
}

fn require_line<S: ClientStorage>(cart: &CartStore<S>, id: &str, size: &str) -> Result<(), CliError> {
    if cart.find(id, size).is_none() {
        return Err(CliError::LineNotFound {
            id: id.to_string(),
            size: size.to_string(),
        });
    }
    Ok(())
}

/// Fail on a write the store could not complete, otherwise log the new state.
fn saved<S: ClientStorage>(cart: &mut CartStore<S>) -> Result<(), CliError> {
    if let Some(e) = cart.take_persist_error() {
        return Err(e.into());
    }
    tracing::info!(
        items = cart.cart_count(),
        total = %cart.total_price().display(),
        "Cart updated"
    );
    Ok(())
}

/// Plain-text listing of the cart.
fn render<S: ClientStorage>(cart: &CartStore<S>) -> String {
    if cart.is_empty() {
        return "Cart is empty\n".to_string();
    }

    let mut out = String::new();
    for item in cart.items() {
        out.push_str(&format!(
            "{:<24} {:<6} {:>3} x {:>12}  [{}]\n",
            item.title,
            item.size,
            item.quantity,
            item.unit_price().display(),
            item.purchase_key()
        ));
    }
    out.push_str(&format!(
        "{} items, total {}\n",
        cart.cart_count(),
        cart.total_price().display()
    ));
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn kurta(quantity: u32) -> CartItem {
        CartItem {
            id: "silk-kurta".to_string(),
            title: "Silk Kurta".to_string(),
            price: Decimal::new(129_950, 2),
            image: String::new(),
            size: "M".to_string(),
            quantity,
            sku: "KUR-001".to_string(),
        }
    }

    #[test]
    fn test_commands_share_storage_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = || FileStorage::new(tmp.path());

        add(storage(), kurta(1)).unwrap();
        add(storage(), kurta(2)).unwrap();
        let cart = CartStore::load(storage());
        assert_eq!(cart.cart_count(), 3);

        update(storage(), "silk-kurta", "M", 5).unwrap();
        assert_eq!(CartStore::load(storage()).cart_count(), 5);

        purchased(storage(), &["KUR-001-M".to_string()]).unwrap();
        assert!(CartStore::load(storage()).is_empty());
    }

    #[test]
    fn test_update_missing_line_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let err = update(FileStorage::new(tmp.path()), "saree", "Free", 2).unwrap_err();
        assert!(matches!(err, CliError::LineNotFound { .. }));

        let err = remove(FileStorage::new(tmp.path()), "saree", "Free").unwrap_err();
        assert_eq!(err.to_string(), "No cart line for saree in size Free");
    }

    #[test]
    fn test_render_listing() {
        let tmp = tempfile::tempdir().unwrap();
        let mut cart = CartStore::load(FileStorage::new(tmp.path()));
        assert_eq!(render(&cart), "Cart is empty\n");

        cart.add_to_cart(kurta(2));
        let listing = render(&cart);
        assert!(listing.contains("Silk Kurta"));
        assert!(listing.contains("[KUR-001-M]"));
        assert!(listing.ends_with("2 items, total ₹2,599.00\n"));
    }

    #[test]
    fn test_unreadable_storage_fails_without_writing() {
        let tmp = tempfile::tempdir().unwrap();
        let not_a_dir = tmp.path().join("cart-store");
        std::fs::write(&not_a_dir, "plain file").unwrap();

        let err = add(FileStorage::new(&not_a_dir), kurta(1)).unwrap_err();
        assert!(matches!(err, CliError::Storage(_)));
        assert!(list(FileStorage::new(&not_a_dir)).is_err());
        assert_eq!(std::fs::read_to_string(&not_a_dir).unwrap(), "plain file");
    }

    #[test]
    fn test_failed_write_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        // The temporary file used for the write is taken by a directory
        std::fs::create_dir(tmp.path().join(".cart.tmp")).unwrap();

        let err = add(FileStorage::new(tmp.path()), kurta(1)).unwrap_err();
        assert!(matches!(err, CliError::Storage(_)));
        assert!(CartStore::load(FileStorage::new(tmp.path())).is_empty());
    }
}
