//! End-to-end tests for the cart reconciliation protocol.
//!
//! The server owns the cart; after every mutation the client refetches and
//! the local mirror must match whatever the server actually stored, even
//! when the server silently adjusted the request (stock clamping).

#![allow(clippy::unwrap_used)]

use easy_gadget_core::{CartLineId, ProductId};
use easy_gadget_integration_tests::TestContext;

#[tokio::test]
async fn test_cart_converges_after_add() {
    let ctx = TestContext::new().await;
    ctx.seed_product("p1", "Wireless Earbuds", 49.99, 10);
    ctx.login().await;

    ctx.client
        .cart()
        .add_to_cart(&ProductId::new("p1"), 2)
        .await
        .unwrap();

    let items = ctx.client.cart().items();
    assert_eq!(items.len(), 1);
    let line = items.first().unwrap();
    assert_eq!(line.name, "Wireless Earbuds");
    assert_eq!(line.quantity, 2);
    assert_eq!(line.product_id, ProductId::new("p1"));
    assert_eq!(ctx.client.cart().total_items(), 2);

    // The mirror is the server's cart, not a local echo of the request
    let server = ctx.server_cart();
    assert_eq!(server.len(), 1);
    assert_eq!(server.first().unwrap().quantity, 2);
}

#[tokio::test]
async fn test_client_learns_server_side_clamping() {
    let ctx = TestContext::new().await;
    ctx.seed_product("p1", "Limited Drop", 199.0, 3);
    ctx.login().await;

    let cart = ctx.client.cart();
    cart.add_to_cart(&ProductId::new("p1"), 2).await.unwrap();
    // Server clamps 2 + 2 to the stock of 3; only the refetch reveals it
    cart.add_to_cart(&ProductId::new("p1"), 2).await.unwrap();

    assert_eq!(cart.total_items(), 3);
}

#[tokio::test]
async fn test_update_quantity_zero_removes_the_line() {
    let ctx = TestContext::new().await;
    ctx.seed_product("p1", "USB Hub", 25.0, 10);
    ctx.login().await;

    let cart = ctx.client.cart();
    cart.add_to_cart(&ProductId::new("p1"), 1).await.unwrap();
    let line_id = cart.items().first().unwrap().line_id.clone();

    cart.update_quantity(&line_id, 0).await.unwrap();

    assert!(cart.items().is_empty());
    assert!(ctx.server_cart().is_empty());
    // Zero quantity is a removal on the wire, not an update
    let requests = ctx.requests();
    assert!(requests.contains(&"DELETE /cart/item/p1".to_owned()));
    assert!(!requests.contains(&"PUT /cart/item/p1".to_owned()));
}

#[tokio::test]
async fn test_update_quantity_addresses_product_not_line() {
    let ctx = TestContext::new().await;
    ctx.seed_product("p1", "USB Hub", 25.0, 10);
    ctx.login().await;

    let cart = ctx.client.cart();
    cart.add_to_cart(&ProductId::new("p1"), 1).await.unwrap();
    let line_id = cart.items().first().unwrap().line_id.clone();
    assert_ne!(line_id.as_str(), "p1");

    cart.update_quantity(&line_id, 4).await.unwrap();

    assert_eq!(cart.total_items(), 4);
    // The server routes cart mutations by product ID
    assert!(ctx.requests().contains(&"PUT /cart/item/p1".to_owned()));
}

#[tokio::test]
async fn test_remove_from_cart() {
    let ctx = TestContext::new().await;
    ctx.seed_product("p1", "USB Hub", 25.0, 10);
    ctx.seed_product("p2", "Webcam", 60.0, 5);
    ctx.login().await;

    let cart = ctx.client.cart();
    cart.add_to_cart(&ProductId::new("p1"), 1).await.unwrap();
    cart.add_to_cart(&ProductId::new("p2"), 1).await.unwrap();

    let line_id = cart
        .items()
        .iter()
        .find(|item| item.product_id.as_str() == "p1")
        .unwrap()
        .line_id
        .clone();
    cart.remove_from_cart(&line_id).await.unwrap();

    let items = cart.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items.first().unwrap().product_id.as_str(), "p2");
}

#[tokio::test]
async fn test_remove_unknown_line_is_a_local_no_op() {
    let ctx = TestContext::new().await;
    ctx.seed_product("p1", "USB Hub", 25.0, 10);
    ctx.login().await;

    let cart = ctx.client.cart();
    cart.add_to_cart(&ProductId::new("p1"), 1).await.unwrap();
    let before = ctx.requests().len();

    cart.remove_from_cart(&CartLineId::new("no-such-line"))
        .await
        .unwrap();

    // Nothing hit the wire and the cart is untouched
    assert_eq!(ctx.requests().len(), before);
    assert_eq!(cart.total_items(), 1);
}

#[tokio::test]
async fn test_clear_is_one_atomic_request() {
    let ctx = TestContext::new().await;
    ctx.seed_product("p1", "USB Hub", 25.0, 10);
    ctx.seed_product("p2", "Webcam", 60.0, 5);
    ctx.login().await;

    let cart = ctx.client.cart();
    cart.add_to_cart(&ProductId::new("p1"), 2).await.unwrap();
    cart.add_to_cart(&ProductId::new("p2"), 1).await.unwrap();

    cart.clear().await.unwrap();

    assert!(cart.items().is_empty());
    assert!(ctx.server_cart().is_empty());

    let requests = ctx.requests();
    assert_eq!(
        requests
            .iter()
            .filter(|r| r.as_str() == "DELETE /cart")
            .count(),
        1
    );
    // Not a per-line removal loop
    assert!(!requests.iter().any(|r| r.starts_with("DELETE /cart/item/")));
}

#[tokio::test]
async fn test_totals_follow_the_server_cart() {
    let ctx = TestContext::new().await;
    ctx.seed_product("p1", "USB Hub", 25.0, 10);
    ctx.seed_product("p2", "Webcam", 60.0, 5);
    ctx.login().await;

    let cart = ctx.client.cart();
    cart.add_to_cart(&ProductId::new("p1"), 2).await.unwrap();
    cart.add_to_cart(&ProductId::new("p2"), 1).await.unwrap();

    assert_eq!(cart.total_items(), 3);
    assert_eq!(cart.total_price().to_string(), "110.00");
}
