//! EasyGadget client SDK.
//!
//! Typed access to the EasyGadget storefront REST backend: products, cart,
//! orders, notifications, settings, uploads, and authentication.
//!
//! # Architecture
//!
//! - The backend is the source of truth - NO local business logic, direct
//!   API calls over `reqwest`
//! - One conversion boundary ([`api::conversions`]) maps every backend
//!   response shape to a single canonical domain type
//! - The cart is mirrored, never owned: every mutation is followed by a full
//!   refetch of the server cart ([`cart::CartStore`])
//! - The session (bearer token + cached user) persists to a JSON file, the
//!   client-side analog of the browser's local storage ([`session::SessionStore`])
//! - Catalog reads are cached in-memory via `moka` (5 minute TTL)
//!
//! # Example
//!
//! ```rust,ignore
//! use easy_gadget_client::{Client, ClientConfig};
//! use easy_gadget_core::Email;
//!
//! let config = ClientConfig::from_env()?;
//! let client = Client::new(config)?;
//!
//! // Log in; the token and user are persisted to the session file
//! let email: Email = "jane@example.com".parse()?;
//! client.auth().login(&email, "hunter2").await?;
//!
//! // Browse the catalog
//! let page = client.products().list(&Default::default()).await?;
//!
//! // Mutate the cart; local state converges to the server cart after
//! // every call
//! client.cart().add_to_cart(&page.products[0].id, 1).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod client;
pub mod config;
pub mod services;
pub mod session;
pub mod types;

pub use api::ApiError;
pub use cart::CartStore;
pub use client::Client;
pub use config::{ClientConfig, ConfigError};
pub use session::SessionStore;
