//! Order commands.
//!
//! # Usage
//!
//! ```bash
//! eg-cli orders list
//! eg-cli orders show <order-id>
//! eg-cli orders all --status pending     # admin
//! eg-cli orders set-status <order-id> shipped  # admin
//! ```

use clap::Subcommand;
use thiserror::Error;

use easy_gadget_client::types::Order;
use easy_gadget_client::{ApiError, Client};
use easy_gadget_core::{OrderId, OrderStatus, StatusParseError};

#[derive(Subcommand)]
pub enum OrderAction {
    /// List the current user's orders
    List,
    /// Show one order in full
    Show {
        /// Order ID
        id: String,
    },
    /// List every order, optionally filtered by status (admin)
    All {
        /// Lifecycle status (pending, processing, shipped, delivered, cancelled)
        #[arg(short, long)]
        status: Option<String>,
    },
    /// Move an order to a new status (admin)
    SetStatus {
        /// Order ID
        id: String,

        /// New status
        status: String,
    },
    /// Verify a checkout payment reference
    VerifyPayment {
        /// Payment provider reference
        reference: String,
    },
}

/// Errors that can occur during order commands.
#[derive(Debug, Error)]
pub enum OrderCommandError {
    /// The status argument is not a known lifecycle status.
    #[error("Invalid status: {0}")]
    InvalidStatus(#[from] StatusParseError),

    /// The backend rejected the request.
    #[error(transparent)]
    Api(#[from] ApiError),
}

fn print_order(order: &Order) {
    let date = order
        .date
        .map_or_else(|| "-".to_owned(), |date| date.format("%Y-%m-%d").to_string());
    tracing::info!(
        "  {}  {}  {}  {} ({})",
        order.id,
        date,
        order.status,
        order.total,
        order.customer_email
    );
}

pub async fn run(client: &Client, action: OrderAction) -> Result<(), OrderCommandError> {
    match action {
        OrderAction::List => {
            let orders = client.orders().my_orders().await?;
            if orders.is_empty() {
                tracing::info!("No orders");
            }
            for order in &orders {
                print_order(order);
            }
        }
        OrderAction::Show { id } => {
            let order = client.orders().get(&OrderId::new(id)).await?;
            print_order(&order);
            for line in &order.products {
                tracing::info!("    {} x{} @ {}", line.name, line.quantity, line.price);
            }
            if let Some(address) = &order.shipping_address {
                tracing::info!(
                    "    Ship to: {}, {}, {}, {}",
                    address.street,
                    address.city,
                    address.state,
                    address.country
                );
            }
        }
        OrderAction::All { status } => {
            let status = status.map(|s| s.parse::<OrderStatus>()).transpose()?;
            let orders = client.orders().list(status).await?;
            for order in &orders {
                print_order(order);
            }
        }
        OrderAction::SetStatus { id, status } => {
            let status: OrderStatus = status.parse()?;
            let order = client
                .orders()
                .update_status(&OrderId::new(id), status)
                .await?;
            tracing::info!("Order {} is now {}", order.id, order.status);
        }
        OrderAction::VerifyPayment { reference } => {
            let verification = client.orders().verify_payment(&reference).await?;
            if verification.success {
                match verification.order_id {
                    Some(order_id) => tracing::info!("Payment verified, order {order_id}"),
                    None => tracing::info!("Payment verified"),
                }
            } else {
                tracing::warn!("Payment not verified");
            }
        }
    }
    Ok(())
}
