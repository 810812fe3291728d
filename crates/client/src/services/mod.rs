//! Per-resource service wrappers over the API client.
//!
//! Each service is a thin typed facade over a group of endpoints. Services
//! own no business logic: they shape requests, hand responses to the
//! conversion boundary, and propagate errors untouched.

mod admin;
mod auth;
mod cart;
mod notifications;
mod orders;
mod products;
mod settings;
mod uploads;

pub use admin::AdminService;
pub use auth::AuthService;
pub use cart::CartService;
pub use notifications::NotificationService;
pub use orders::OrderService;
pub use products::{ProductInput, ProductService};
pub use settings::SettingsService;
pub use uploads::{MAX_UPLOAD_BYTES, MAX_UPLOAD_FILES, UploadService};
