//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! eg-cli products list --search headphones --brand Sony --page 1
//! eg-cli products show <product-id>
//! ```

use clap::Subcommand;
use rust_decimal::Decimal;
use thiserror::Error;

use easy_gadget_client::types::ProductFilters;
use easy_gadget_client::{ApiError, Client};
use easy_gadget_core::{Price, ProductId};

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List products, optionally filtered
    List {
        /// Free-text search
        #[arg(short, long)]
        search: Option<String>,

        /// Category name
        #[arg(short, long)]
        category: Option<String>,

        /// Brand name
        #[arg(short, long)]
        brand: Option<String>,

        /// Minimum price
        #[arg(long)]
        min_price: Option<Decimal>,

        /// Maximum price
        #[arg(long)]
        max_price: Option<Decimal>,

        /// Page number (1-based)
        #[arg(short, long)]
        page: Option<u32>,

        /// Page size
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Show one product in full
    Show {
        /// Product ID
        id: String,
    },
}

/// Errors that can occur during catalog commands.
#[derive(Debug, Error)]
pub enum CatalogCommandError {
    /// The backend rejected the request.
    #[error(transparent)]
    Api(#[from] ApiError),
}

pub async fn run(client: &Client, action: CatalogAction) -> Result<(), CatalogCommandError> {
    match action {
        CatalogAction::List {
            search,
            category,
            brand,
            min_price,
            max_price,
            page,
            limit,
        } => {
            let filters = ProductFilters {
                search,
                category,
                brand,
                min_price: min_price.map(Price::new),
                max_price: max_price.map(Price::new),
                page,
                limit,
            };
            let result = client.products().list(&filters).await?;
            tracing::info!(
                "Page {}/{} ({} products total)",
                result.page,
                result.total_pages,
                result.total
            );
            for product in &result.products {
                let stock = if product.in_stock { "in stock" } else { "out of stock" };
                tracing::info!(
                    "  {}  {}  {} - {} ({stock})",
                    product.id,
                    product.name,
                    product.brand,
                    product.price
                );
            }
        }
        CatalogAction::Show { id } => {
            let product = client.products().get(&ProductId::new(id)).await?;
            tracing::info!("{} - {}", product.name, product.brand);
            tracing::info!("  Price: {}", product.price);
            if let Some(original) = product.original_price {
                tracing::info!("  Was: {original}");
            }
            tracing::info!("  Category: {}", product.category);
            tracing::info!("  Stock: {}", product.stock);
            tracing::info!("  Rating: {} ({} reviews)", product.rating, product.reviews);
            if !product.description.is_empty() {
                tracing::info!("  {}", product.description);
            }
            for feature in &product.features {
                tracing::info!("  - {feature}");
            }
        }
    }
    Ok(())
}
