//! Cart commands.
//!
//! Every mutation ends with the cart as the server reconciled it, so the
//! summary printed afterwards is the server's cart, not a local guess.
//!
//! # Usage
//!
//! ```bash
//! eg-cli cart show
//! eg-cli cart add <product-id> --quantity 2
//! eg-cli cart set <line-id> --quantity 3
//! eg-cli cart remove <line-id>
//! eg-cli cart clear
//! ```

use clap::Subcommand;
use thiserror::Error;

use easy_gadget_client::{ApiError, Client};
use easy_gadget_core::{CartLineId, ProductId};

#[derive(Subcommand)]
pub enum CartAction {
    /// Fetch and display the cart
    Show,
    /// Add a product to the cart
    Add {
        /// Product ID
        product_id: String,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity of a cart line (0 removes it)
    Set {
        /// Cart line ID (see `cart show`)
        line_id: String,

        /// New quantity
        #[arg(short, long)]
        quantity: u32,
    },
    /// Remove a cart line
    Remove {
        /// Cart line ID (see `cart show`)
        line_id: String,
    },
    /// Empty the cart
    Clear,
}

/// Errors that can occur during cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// The backend rejected the request.
    #[error(transparent)]
    Api(#[from] ApiError),
}

pub async fn run(client: &Client, action: CartAction) -> Result<(), CartCommandError> {
    let cart = client.cart();

    match action {
        CartAction::Show => {
            cart.refresh().await?;
        }
        CartAction::Add {
            product_id,
            quantity,
        } => {
            cart.refresh().await?;
            cart.add_to_cart(&ProductId::new(product_id), quantity).await?;
            tracing::info!("Added to cart");
        }
        CartAction::Set { line_id, quantity } => {
            // Mutations address lines from the latest server snapshot
            cart.refresh().await?;
            cart.update_quantity(&CartLineId::new(line_id), quantity).await?;
            tracing::info!("Updated");
        }
        CartAction::Remove { line_id } => {
            cart.refresh().await?;
            cart.remove_from_cart(&CartLineId::new(line_id)).await?;
            tracing::info!("Removed");
        }
        CartAction::Clear => {
            cart.clear().await?;
            tracing::info!("Cart cleared");
        }
    }

    let items = cart.items();
    if items.is_empty() {
        tracing::info!("Cart is empty");
    } else {
        for item in &items {
            tracing::info!(
                "  [{}] {} x{} @ {} = {}",
                item.line_id,
                item.name,
                item.quantity,
                item.price,
                item.line_total()
            );
        }
        tracing::info!(
            "Total: {} ({} items)",
            cart.total_price(),
            cart.total_items()
        );
    }
    Ok(())
}
