//! Tests for the client-side auth guard and the catalog read path.

#![allow(clippy::unwrap_used)]

use easy_gadget_client::ApiError;
use easy_gadget_client::types::ProductFilters;
use easy_gadget_core::ProductId;
use easy_gadget_integration_tests::TestContext;

#[tokio::test]
async fn test_unauthenticated_add_never_touches_the_network() {
    let ctx = TestContext::new().await;
    ctx.seed_product("p1", "Wireless Earbuds", 49.99, 10);

    let error = ctx
        .client
        .cart()
        .add_to_cart(&ProductId::new("p1"), 1)
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::AuthRequired));
    assert!(ctx.requests().is_empty());
    assert!(ctx.client.cart().items().is_empty());
}

#[tokio::test]
async fn test_unauthenticated_refresh_is_empty_and_local() {
    let ctx = TestContext::new().await;

    ctx.client.cart().refresh().await.unwrap();

    assert!(ctx.client.cart().items().is_empty());
    assert!(ctx.requests().is_empty());
}

#[tokio::test]
async fn test_catalog_is_public() {
    let ctx = TestContext::new().await;
    ctx.seed_product("p1", "Wireless Earbuds", 49.99, 10);
    ctx.seed_product("p2", "Out Of Stock Thing", 10.0, 0);

    let page = ctx
        .client
        .products()
        .list(&ProductFilters::default())
        .await
        .unwrap();

    assert_eq!(page.total, 2);
    let earbuds = page
        .products
        .iter()
        .find(|p| p.id.as_str() == "p1")
        .unwrap();
    assert!(earbuds.in_stock);
    assert_eq!(earbuds.category, "Gadgets");
    // Primary image falls back to the first gallery image
    assert_eq!(earbuds.image, "https://cdn.example.com/img.jpg");

    let sold_out = page
        .products
        .iter()
        .find(|p| p.id.as_str() == "p2")
        .unwrap();
    assert!(!sold_out.in_stock);
}

#[tokio::test]
async fn test_unfiltered_listings_are_served_from_cache() {
    let ctx = TestContext::new().await;
    ctx.seed_product("p1", "Wireless Earbuds", 49.99, 10);

    let filters = ProductFilters::default();
    ctx.client.products().list(&filters).await.unwrap();
    ctx.client.products().list(&filters).await.unwrap();

    let hits = ctx
        .requests()
        .iter()
        .filter(|r| r.as_str() == "GET /products")
        .count();
    assert_eq!(hits, 1);
}

#[tokio::test]
async fn test_filtered_listings_bypass_the_cache() {
    let ctx = TestContext::new().await;
    ctx.seed_product("p1", "Wireless Earbuds", 49.99, 10);

    let filters = ProductFilters {
        search: Some("earbuds".to_owned()),
        ..Default::default()
    };
    ctx.client.products().list(&filters).await.unwrap();
    ctx.client.products().list(&filters).await.unwrap();

    let hits = ctx
        .requests()
        .iter()
        .filter(|r| r.as_str() == "GET /products")
        .count();
    assert_eq!(hits, 2);
}
