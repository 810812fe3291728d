//! Raw backend response shapes.
//!
//! The backend stores entities in MongoDB and leaks its `_id` convention,
//! nests the product document inside cart lines, and has historically sent
//! `category` as either a bare name or a populated `{name}` document. These
//! types model that contract exactly as observed; [`super::conversions`]
//! flattens them into [`crate::types`] and nothing else in the crate sees
//! them.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use easy_gadget_core::{NotificationKind, OrderStatus, Price, UserRole};

// =============================================================================
// Auth
// =============================================================================

/// Response to login / OTP verification: a bearer token plus the user.
///
/// Canonical contract: the user is a nested object. The flattened variant
/// seen earlier in the backend's history is not supported.
#[derive(Debug, Deserialize)]
pub struct WireAuthResponse {
    pub token: String,
    pub user: WireUser,
}

/// A user document.
#[derive(Debug, Deserialize)]
pub struct WireUser {
    #[serde(alias = "_id")]
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// Generic `{message}` acknowledgment returned by most mutations.
#[derive(Debug, Deserialize)]
pub struct WireMessage {
    pub message: String,
}

// =============================================================================
// Products
// =============================================================================

/// `category` arrives either as a bare name or as a populated category
/// document; only the name survives normalization.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WireCategory {
    Name(String),
    Document {
        #[serde(default)]
        name: Option<String>,
    },
}

/// A product document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireProduct {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub original_price: Option<Price>,
    #[serde(default)]
    pub category: Option<WireCategory>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: u32,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One page of the catalog listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireProductPage {
    pub products: Vec<WireProduct>,
    pub total: u32,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

// =============================================================================
// Cart
// =============================================================================

/// The cart document. Server-computed totals are ignored; the client
/// recomputes them from the lines.
#[derive(Debug, Deserialize)]
pub struct WireCart {
    #[serde(default)]
    pub items: Vec<WireCartLine>,
}

/// A cart line with its populated product document.
#[derive(Debug, Deserialize)]
pub struct WireCartLine {
    #[serde(rename = "_id")]
    pub id: String,
    pub quantity: u32,
    pub product: WireCartProduct,
}

/// The subset of the product document populated into cart lines.
#[derive(Debug, Deserialize)]
pub struct WireCartProduct {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub brand: Option<String>,
}

// =============================================================================
// Orders
// =============================================================================

/// A product line on an order document.
#[derive(Debug, Deserialize)]
pub struct WireOrderLine {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price: Option<Price>,
    pub quantity: u32,
    #[serde(default)]
    pub image: Option<String>,
}

/// An order document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireOrder {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub total: Option<Price>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub shipping_address: Option<crate::types::ShippingAddress>,
    #[serde(default)]
    pub products: Vec<WireOrderLine>,
}

// =============================================================================
// Notifications
// =============================================================================

/// A notification document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireNotification {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// One page of notifications.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireNotificationPage {
    pub notifications: Vec<WireNotification>,
    pub total: u32,
    pub unread_count: u32,
    pub page: u32,
    pub limit: u32,
}

// =============================================================================
// Uploads
// =============================================================================

/// Response to a single-file upload.
#[derive(Debug, Deserialize)]
pub struct WireUpload {
    pub url: String,
}

/// Response to a multi-file upload.
#[derive(Debug, Deserialize)]
pub struct WireMultiUpload {
    pub urls: Vec<String>,
}
