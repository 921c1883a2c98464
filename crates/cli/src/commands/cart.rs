//! Cart management commands.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! gm-cli show
//!
//! # Add a product
//! gm-cli add -i p-1 -t "Olive Hat" --image-url https://img.example/hat.jpg -p 10.99
//! ```
//!
//! # Environment Variables
//!
//! - `GOMARKETPLACE_DATA_DIR` - Directory holding the cart database
//!   (default: platform data directory)

use rust_decimal::Decimal;
use thiserror::Error;

use go_marketplace_cart::{CartConfig, CartError, CartProvider, CartStore, ConfigError};
use go_marketplace_core::{Cart, Product, ProductId};

/// Errors that can occur during cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// Configuration could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Cart operation failed.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Price argument is not a valid decimal.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),
}

/// Show the cart contents and totals.
///
/// # Errors
///
/// Returns an error if configuration or storage fails.
pub async fn show() -> Result<(), CartCommandError> {
    let store = open_store().await?;
    print_cart(&store.cart().await);
    Ok(())
}

/// Add a product to the cart; an existing line is incremented.
///
/// # Errors
///
/// Returns `CartCommandError::InvalidPrice` if `price` does not parse as a
/// decimal, or an error if configuration or storage fails.
pub async fn add(
    id: &str,
    title: &str,
    image_url: &str,
    price: &str,
) -> Result<(), CartCommandError> {
    let price: Decimal = price
        .parse()
        .map_err(|_| CartCommandError::InvalidPrice(price.to_owned()))?;

    let store = open_store().await?;
    let cart = store
        .add_to_cart(Product::new(id, title, image_url, price))
        .await?;

    tracing::info!(product_id = id, "added to cart");
    print_cart(&cart);
    Ok(())
}

/// Increase the quantity of a cart line by 1.
///
/// # Errors
///
/// Returns an error if the id has no line in the cart, or if configuration
/// or storage fails.
pub async fn increment(id: &str) -> Result<(), CartCommandError> {
    let store = open_store().await?;
    let cart = store.increment(&ProductId::new(id)).await?;

    print_cart(&cart);
    Ok(())
}

/// Decrease the quantity of a cart line by 1; a line at 0 is removed.
///
/// # Errors
///
/// Returns an error if the id has no line in the cart, or if configuration
/// or storage fails.
pub async fn decrement(id: &str) -> Result<(), CartCommandError> {
    let store = open_store().await?;
    let cart = store.decrement(&ProductId::new(id)).await?;

    print_cart(&cart);
    Ok(())
}

/// Empty the cart and remove the persisted snapshot.
///
/// # Errors
///
/// Returns an error if configuration or storage fails.
pub async fn clear() -> Result<(), CartCommandError> {
    let store = open_store().await?;
    store.clear().await?;

    tracing::info!("cart cleared");
    Ok(())
}

/// Open the on-device store and load the persisted cart.
async fn open_store() -> Result<CartStore, CartCommandError> {
    let config = CartConfig::from_env()?;
    let provider = CartProvider::open(&config).await?;
    Ok(provider.store())
}

/// Print the cart, one line per item, followed by totals.
#[allow(clippy::print_stdout)]
fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("cart is empty");
        return;
    }
    for line in cart.lines() {
        println!(
            "{:<20} x{:<4} @ {:>10}  {}",
            line.id.as_str(),
            line.quantity,
            line.price,
            line.title
        );
    }
    println!(
        "{} item(s), subtotal {}",
        cart.total_quantity(),
        cart.subtotal()
    );
}
