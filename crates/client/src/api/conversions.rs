//! Wire-to-domain conversion functions.
//!
//! The single place where backend response shapes become canonical types:
//! `_id` becomes a typed ID, `category` collapses to its name, `image`
//! falls back to the gallery, and `in_stock` is derived from `stock`.

use easy_gadget_core::{CartLineId, NotificationId, OrderId, ProductId, UserId};

use crate::types::{
    Cart, CartItem, Notification, NotificationPage, Order, OrderLine, Product, ProductPage, User,
};

use super::wire::{
    WireCart, WireCartLine, WireCategory, WireNotification, WireNotificationPage, WireOrder,
    WireOrderLine, WireProduct, WireProductPage, WireUser,
};

/// Collapse the category field to its name.
fn category_name(category: Option<WireCategory>) -> String {
    match category {
        Some(WireCategory::Name(name)) => name,
        Some(WireCategory::Document { name }) => name.unwrap_or_default(),
        None => String::new(),
    }
}

/// Primary image: the explicit `image` field, else the first gallery entry.
fn primary_image(image: Option<String>, images: &[String]) -> String {
    image
        .filter(|url| !url.is_empty())
        .or_else(|| images.first().cloned())
        .unwrap_or_default()
}

pub fn convert_user(user: WireUser) -> User {
    User {
        id: UserId::new(user.id),
        email: user.email,
        name: user.name,
        role: user.role,
        phone: user.phone,
        address: user.address,
    }
}

pub fn convert_product(product: WireProduct) -> Product {
    let image = primary_image(product.image, &product.images);
    Product {
        id: ProductId::new(product.id),
        name: product.name,
        brand: product.brand.unwrap_or_default(),
        price: product.price.unwrap_or_default(),
        original_price: product.original_price,
        category: category_name(product.category),
        description: product.description,
        image,
        images: product.images,
        rating: product.rating,
        reviews: product.reviews,
        in_stock: product.stock > 0,
        stock: product.stock,
        is_new: product.is_new,
        features: product.features,
        created_at: product.created_at,
        updated_at: product.updated_at,
    }
}

pub fn convert_product_page(page: WireProductPage) -> ProductPage {
    ProductPage {
        products: page.products.into_iter().map(convert_product).collect(),
        total: page.total,
        page: page.page,
        limit: page.limit,
        total_pages: page.total_pages,
    }
}

fn convert_cart_line(line: WireCartLine) -> CartItem {
    let image = primary_image(line.product.image, &line.product.images);
    CartItem {
        line_id: CartLineId::new(line.id),
        product_id: ProductId::new(line.product.id),
        name: line.product.name,
        price: line.product.price.unwrap_or_default(),
        quantity: line.quantity,
        image,
        brand: line.product.brand.unwrap_or_default(),
    }
}

pub fn convert_cart(cart: WireCart) -> Cart {
    Cart {
        items: cart.items.into_iter().map(convert_cart_line).collect(),
    }
}

fn convert_order_line(line: WireOrderLine) -> OrderLine {
    OrderLine {
        id: ProductId::new(line.id),
        name: line.name,
        price: line.price.unwrap_or_default(),
        quantity: line.quantity,
        image: line.image.unwrap_or_default(),
    }
}

pub fn convert_order(order: WireOrder) -> Order {
    Order {
        id: OrderId::new(order.id),
        user_id: order.user_id.map(UserId::new),
        customer_name: order.customer_name,
        customer_email: order.customer_email,
        total: order.total.unwrap_or_default(),
        status: order.status,
        date: order.date,
        shipping_address: order.shipping_address,
        products: order.products.into_iter().map(convert_order_line).collect(),
    }
}

pub fn convert_notification(notification: WireNotification) -> Notification {
    Notification {
        id: NotificationId::new(notification.id),
        title: notification.title,
        message: notification.message,
        kind: notification.kind,
        read: notification.read,
        created_at: notification.created_at,
        data: notification.data,
    }
}

pub fn convert_notification_page(page: WireNotificationPage) -> NotificationPage {
    NotificationPage {
        notifications: page
            .notifications
            .into_iter()
            .map(convert_notification)
            .collect(),
        total: page.total,
        unread_count: page.unread_count,
        page: page.page,
        limit: page.limit,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use easy_gadget_core::{OrderStatus, Price};

    #[test]
    fn test_category_as_bare_string() {
        let product: WireProduct = serde_json::from_str(
            r#"{"_id":"p1","name":"Phone","category":"Phones","stock":3}"#,
        )
        .unwrap();
        let product = convert_product(product);
        assert_eq!(product.category, "Phones");
        assert!(product.in_stock);
    }

    #[test]
    fn test_category_as_populated_document() {
        let product: WireProduct = serde_json::from_str(
            r#"{"_id":"p1","name":"Phone","category":{"_id":"c1","name":"Phones"},"stock":0}"#,
        )
        .unwrap();
        let product = convert_product(product);
        assert_eq!(product.category, "Phones");
        assert!(!product.in_stock);
    }

    #[test]
    fn test_category_document_without_name() {
        let product: WireProduct =
            serde_json::from_str(r#"{"_id":"p1","name":"Phone","category":{"_id":"c1"}}"#).unwrap();
        assert_eq!(convert_product(product).category, "");
    }

    #[test]
    fn test_missing_category() {
        let product: WireProduct = serde_json::from_str(r#"{"_id":"p1","name":"Phone"}"#).unwrap();
        assert_eq!(convert_product(product).category, "");
    }

    #[test]
    fn test_image_falls_back_to_gallery() {
        let product: WireProduct = serde_json::from_str(
            r#"{"_id":"p1","name":"Phone","images":["a.jpg","b.jpg"]}"#,
        )
        .unwrap();
        assert_eq!(convert_product(product).image, "a.jpg");
    }

    #[test]
    fn test_explicit_image_wins_over_gallery() {
        let product: WireProduct = serde_json::from_str(
            r#"{"_id":"p1","name":"Phone","image":"main.jpg","images":["a.jpg"]}"#,
        )
        .unwrap();
        assert_eq!(convert_product(product).image, "main.jpg");
    }

    #[test]
    fn test_empty_image_treated_as_missing() {
        let product: WireProduct = serde_json::from_str(
            r#"{"_id":"p1","name":"Phone","image":"","images":["a.jpg"]}"#,
        )
        .unwrap();
        assert_eq!(convert_product(product).image, "a.jpg");
    }

    #[test]
    fn test_in_stock_derived_from_stock() {
        let product: WireProduct =
            serde_json::from_str(r#"{"_id":"p1","name":"Phone","stock":1}"#).unwrap();
        assert!(convert_product(product).in_stock);

        let product: WireProduct =
            serde_json::from_str(r#"{"_id":"p1","name":"Phone","stock":0}"#).unwrap();
        assert!(!convert_product(product).in_stock);
    }

    #[test]
    fn test_cart_line_flattening() {
        let cart: WireCart = serde_json::from_str(
            r#"{"items":[{"_id":"line1","quantity":2,"product":{
                "_id":"p1","name":"Phone","price":1000,"images":["a.jpg"],"brand":"Sony"
            }}]}"#,
        )
        .unwrap();
        let cart = convert_cart(cart);
        let item = cart.items.first().unwrap();

        assert_eq!(item.line_id, CartLineId::new("line1"));
        assert_eq!(item.product_id, ProductId::new("p1"));
        assert_eq!(item.price, Price::from(1000));
        assert_eq!(item.quantity, 2);
        assert_eq!(item.image, "a.jpg");
        assert_eq!(item.brand, "Sony");
    }

    #[test]
    fn test_cart_line_missing_price_and_brand() {
        let cart: WireCart = serde_json::from_str(
            r#"{"items":[{"_id":"l1","quantity":1,"product":{"_id":"p1","name":"X"}}]}"#,
        )
        .unwrap();
        let item = convert_cart(cart).items.remove(0);
        assert_eq!(item.price, Price::ZERO);
        assert_eq!(item.brand, "");
        assert_eq!(item.image, "");
    }

    #[test]
    fn test_order_conversion() {
        let order: WireOrder = serde_json::from_str(
            r#"{"_id":"o1","customerName":"A","customerEmail":"a@b.c","total":2500,
                "status":"shipped","products":[{"id":"p1","name":"X","price":500,"quantity":5}]}"#,
        )
        .unwrap();
        let order = convert_order(order);
        assert_eq!(order.id, OrderId::new("o1"));
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.total, Price::from(2500));
        assert_eq!(order.products.len(), 1);
    }

    #[test]
    fn test_notification_page_conversion() {
        let page: WireNotificationPage = serde_json::from_str(
            r#"{"notifications":[{"_id":"n1","title":"T","message":"M","type":"order"}],
                "total":1,"unreadCount":1,"page":1,"limit":20}"#,
        )
        .unwrap();
        let page = convert_notification_page(page);
        assert_eq!(page.unread_count, 1);
        assert_eq!(
            page.notifications.first().unwrap().id,
            NotificationId::new("n1")
        );
    }
}
