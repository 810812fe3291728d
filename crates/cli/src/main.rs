//! EasyGadget CLI - storefront from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Log in (token is persisted; later commands reuse it)
//! eg-cli auth login -e jane@example.com -p hunter2
//!
//! # Browse the catalog
//! eg-cli products list --search headphones --page 1
//!
//! # Work the cart
//! eg-cli cart add <product-id> --quantity 2
//! eg-cli cart show
//! eg-cli cart clear
//!
//! # Orders and notifications
//! eg-cli orders list
//! eg-cli notifications list --unread-only
//! ```
//!
//! # Environment Variables
//!
//! - `EASYGADGET_API_URL` - Backend base URL (defaults to production)
//! - `EASYGADGET_SESSION_FILE` - Where the session token is persisted
//! - `EASYGADGET_TIMEOUT_SECS` - Per-request timeout

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use easy_gadget_client::Client;

mod commands;

#[derive(Parser)]
#[command(name = "eg-cli")]
#[command(author, version, about = "EasyGadget storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in, log out, register, inspect the session
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: commands::catalog::CatalogAction,
    },
    /// Inspect and mutate the cart
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// List and inspect orders
    Orders {
        #[command(subcommand)]
        action: commands::orders::OrderAction,
    },
    /// Read notifications
    Notifications {
        #[command(subcommand)]
        action: commands::notifications::NotificationAction,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::from_env()?;

    match cli.command {
        Commands::Auth { action } => commands::auth::run(&client, action).await?,
        Commands::Products { action } => commands::catalog::run(&client, action).await?,
        Commands::Cart { action } => commands::cart::run(&client, action).await?,
        Commands::Orders { action } => commands::orders::run(&client, action).await?,
        Commands::Notifications { action } => commands::notifications::run(&client, action).await?,
    }
    Ok(())
}
