//! Domain types for the EasyGadget backend.
//!
//! These types provide a clean, canonical API separate from the raw wire
//! shapes in [`crate::api::wire`]. Every backend response is normalized into
//! these types exactly once, at the conversion boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use easy_gadget_core::{
    NotificationId, NotificationKind, OrderId, OrderStatus, Price, ProductId, UserId, UserRole,
};

// =============================================================================
// User Types
// =============================================================================

/// An authenticated user, as cached from the last successful auth response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User ID.
    pub id: UserId,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role; admin gating derives solely from this.
    pub role: UserRole,
    /// Phone number, if provided.
    pub phone: Option<String>,
    /// Street address, if provided.
    pub address: Option<String>,
}

impl User {
    /// Whether this user has admin permissions.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Registration payload.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Phone number, if provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

// =============================================================================
// Product Types
// =============================================================================

/// A product in the catalog.
///
/// `category` is always the category name, `image` is always set (falling
/// back to the first gallery image), and `in_stock` is derived from `stock`;
/// the raw backend shapes never leak past the conversion boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Brand name.
    pub brand: String,
    /// Current price.
    pub price: Price,
    /// Pre-discount price, if the product is on sale.
    pub original_price: Option<Price>,
    /// Category name.
    pub category: String,
    /// Plain text description.
    pub description: String,
    /// Primary image URL.
    pub image: String,
    /// Gallery image URLs.
    pub images: Vec<String>,
    /// Average review rating.
    pub rating: f64,
    /// Number of reviews.
    pub reviews: u32,
    /// Whether any units are in stock (`stock > 0`).
    pub in_stock: bool,
    /// Units in stock.
    pub stock: u32,
    /// Whether the product is flagged as new.
    pub is_new: bool,
    /// Feature bullet points.
    pub features: Vec<String>,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Catalog query filters. All fields optional; `Default` is "everything".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilters {
    /// Free-text search.
    pub search: Option<String>,
    /// Category name.
    pub category: Option<String>,
    /// Brand name.
    pub brand: Option<String>,
    /// Minimum price.
    pub min_price: Option<Price>,
    /// Maximum price.
    pub max_price: Option<Price>,
    /// Page number (1-based).
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
}

impl ProductFilters {
    /// Whether any filter is set (filtered queries bypass the catalog cache).
    #[must_use]
    pub const fn is_filtered(&self) -> bool {
        self.search.is_some()
            || self.category.is_some()
            || self.brand.is_some()
            || self.min_price.is_some()
            || self.max_price.is_some()
    }

    /// Render the filters as query-string pairs.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(brand) = &self.brand {
            pairs.push(("brand", brand.clone()));
        }
        if let Some(min_price) = &self.min_price {
            pairs.push(("minPrice", min_price.amount().to_string()));
        }
        if let Some(max_price) = &self.max_price {
            pairs.push(("maxPrice", max_price.amount().to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// One page of catalog results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    /// Products in this page.
    pub products: Vec<Product>,
    /// Total matching products.
    pub total: u32,
    /// Page number (1-based).
    pub page: u32,
    /// Page size.
    pub limit: u32,
    /// Total pages.
    pub total_pages: u32,
}

// =============================================================================
// Cart Types
// =============================================================================

/// A line in the cart, flattened from the backend's nested `product` shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// ID of the cart line itself.
    pub line_id: easy_gadget_core::CartLineId,
    /// ID of the underlying product (what the server expects in mutations).
    pub product_id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Quantity.
    pub quantity: u32,
    /// Primary product image URL.
    pub image: String,
    /// Brand name.
    pub brand: String,
}

impl CartItem {
    /// Line total (unit price x quantity).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// The server cart, as of the last successful fetch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    /// Cart lines.
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Total item quantity across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Total price across all lines.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }
}

// =============================================================================
// Order Types
// =============================================================================

/// A product line on an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    /// Product ID.
    pub id: ProductId,
    /// Product name at time of order.
    pub name: String,
    /// Unit price at time of order.
    pub price: Price,
    /// Quantity ordered.
    pub quantity: u32,
    /// Product image URL.
    pub image: String,
}

/// Shipping destination for an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    pub country: String,
}

/// An order, normalized from the backend shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Order ID.
    pub id: OrderId,
    /// Owning user ID.
    pub user_id: Option<UserId>,
    /// Customer name.
    pub customer_name: String,
    /// Customer email.
    pub customer_email: String,
    /// Order total.
    pub total: Price,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Order date.
    pub date: Option<DateTime<Utc>>,
    /// Shipping destination.
    pub shipping_address: Option<ShippingAddress>,
    /// Ordered products.
    pub products: Vec<OrderLine>,
}

/// Payload for creating an order at checkout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    /// Products being ordered.
    pub products: Vec<OrderLine>,
    /// Shipping destination.
    pub shipping_address: ShippingAddress,
    /// Payment method identifier.
    pub payment_method: String,
    /// Order total.
    pub total: Price,
}

/// Result of verifying a payment reference.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentVerification {
    /// Whether the payment was verified.
    pub success: bool,
    /// The order the payment settled, if any.
    pub order_id: Option<OrderId>,
}

// =============================================================================
// Notification Types
// =============================================================================

/// A user-facing notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Notification ID.
    pub id: NotificationId,
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Category.
    pub kind: NotificationKind,
    /// Whether the notification has been read.
    pub read: bool,
    /// Creation timestamp.
    pub created_at: Option<DateTime<Utc>>,
    /// Arbitrary payload attached by the backend.
    pub data: Option<serde_json::Value>,
}

/// One page of notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPage {
    /// Notifications in this page.
    pub notifications: Vec<Notification>,
    /// Total notifications.
    pub total: u32,
    /// Unread notifications across all pages.
    pub unread_count: u32,
    /// Page number (1-based).
    pub page: u32,
    /// Page size.
    pub limit: u32,
}

// =============================================================================
// Settings Types
// =============================================================================

/// Account settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_notifications: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sms_notifications: Option<bool>,
}

/// Partial settings update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

// =============================================================================
// Admin Types
// =============================================================================

/// Admin dashboard statistics.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub revenue: Price,
    pub orders: u32,
    pub customers: u32,
    pub page_views: u32,
}

/// Admin profile data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminProfile {
    #[serde(alias = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Partial admin profile update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdminProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// A user as listed in the admin panel.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    #[serde(alias = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Upload Types
// =============================================================================

/// What kind of asset is being uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadKind {
    #[default]
    Image,
    Video,
}

impl UploadKind {
    /// Wire value for the multipart `type` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use easy_gadget_core::CartLineId;

    fn item(line: &str, product: &str, price: i64, quantity: u32) -> CartItem {
        CartItem {
            line_id: CartLineId::new(line),
            product_id: ProductId::new(product),
            name: format!("Item {product}"),
            price: Price::from(price),
            quantity,
            image: String::new(),
            brand: String::new(),
        }
    }

    #[test]
    fn test_cart_totals() {
        let cart = Cart {
            items: vec![item("l1", "a", 1000, 2), item("l2", "b", 500, 1)],
        };
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), Price::from(2500));
    }

    #[test]
    fn test_empty_cart_totals() {
        let cart = Cart::default();
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Price::ZERO);
    }

    #[test]
    fn test_filters_to_query() {
        let filters = ProductFilters {
            search: Some("phone".to_string()),
            min_price: Some(Price::from(100)),
            page: Some(2),
            ..Default::default()
        };
        let pairs = filters.to_query();
        assert!(pairs.contains(&("search", "phone".to_string())));
        assert!(pairs.contains(&("minPrice", "100".to_string())));
        assert!(pairs.contains(&("page", "2".to_string())));
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn test_filters_is_filtered() {
        assert!(!ProductFilters::default().is_filtered());
        // Pagination alone does not count as a filter
        assert!(
            !ProductFilters {
                page: Some(3),
                ..Default::default()
            }
            .is_filtered()
        );
        assert!(
            ProductFilters {
                brand: Some("Sony".to_string()),
                ..Default::default()
            }
            .is_filtered()
        );
    }

    #[test]
    fn test_settings_update_skips_none() {
        let update = SettingsUpdate {
            name: Some("New Name".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, "{\"name\":\"New Name\"}");
    }
}
