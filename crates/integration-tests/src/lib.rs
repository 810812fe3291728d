//! Integration test harness for the EasyGadget client SDK.
//!
//! Spins up an in-process mock of the EasyGadget backend on a loopback port
//! and points a real [`Client`] at it, so every test exercises the full
//! request path: bearer injection, wire decoding, normalization, and the
//! cart reconciliation protocol.
//!
//! The mock speaks the backend's wire dialect (Mongo `_id` keys, populated
//! `product` documents inside cart lines, `{ "message": ... }` error bodies)
//! and records every request it sees, so tests can assert both on client
//! state and on what actually went over the wire.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p easy-gadget-integration-tests
//! ```

// Test harness: panicking on setup failure is the point.
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::{Path, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router, middleware};
use serde_json::{Value, json};

use easy_gadget_client::{Client, ClientConfig};
use easy_gadget_core::Email;

/// The bearer token the mock backend hands out on login.
pub const TEST_TOKEN: &str = "tok-integration";

/// Credentials the mock backend accepts.
pub const TEST_EMAIL: &str = "jane@example.com";
pub const TEST_PASSWORD: &str = "hunter2";

/// A product known to the mock backend.
#[derive(Debug, Clone)]
pub struct MockProduct {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub stock: u32,
}

/// A cart line as the mock backend stores it.
#[derive(Debug, Clone)]
pub struct MockCartLine {
    pub id: String,
    pub product_id: String,
    pub quantity: u32,
}

/// Mutable backend state shared between the server task and the test.
#[derive(Debug, Default)]
pub struct BackendState {
    pub products: Vec<MockProduct>,
    pub cart: Vec<MockCartLine>,
    /// Every request the server saw, as `"METHOD /path"`.
    pub requests: Vec<String>,
    /// Raw multipart body of the last avatar upload, if any.
    pub avatar_body: Option<String>,
    next_line: u32,
}

impl BackendState {
    fn product(&self, id: &str) -> Option<MockProduct> {
        self.products.iter().find(|p| p.id == id).cloned()
    }

    fn line_json(&self, line: &MockCartLine) -> Value {
        let product = self.product(&line.product_id);
        json!({
            "_id": line.id,
            "quantity": line.quantity,
            "product": {
                "_id": line.product_id,
                "name": product.as_ref().map_or("", |p| p.name.as_str()),
                "price": product.as_ref().map_or(0.0, |p| p.price),
                "images": ["https://cdn.example.com/img.jpg"],
            },
        })
    }

    fn cart_json(&self) -> Value {
        let items: Vec<Value> = self.cart.iter().map(|line| self.line_json(line)).collect();
        json!({ "items": items })
    }
}

type Shared = Arc<Mutex<BackendState>>;

fn lock(state: &Shared) -> std::sync::MutexGuard<'_, BackendState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Not authorized" })),
    )
        .into_response()
}

fn bearer_ok(request: &Request) -> bool {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == format!("Bearer {TEST_TOKEN}"))
}

async fn record_requests(State(state): State<Shared>, request: Request, next: Next) -> Response {
    lock(&state).requests.push(format!(
        "{} {}",
        request.method(),
        request.uri().path()
    ));
    next.run(request).await
}

async fn login(Json(body): Json<Value>) -> Response {
    let email = body.get("email").and_then(Value::as_str);
    let password = body.get("password").and_then(Value::as_str);
    if email == Some(TEST_EMAIL) && password == Some(TEST_PASSWORD) {
        (
            StatusCode::OK,
            Json(json!({
                "token": TEST_TOKEN,
                "user": {
                    "_id": "user-1",
                    "email": TEST_EMAIL,
                    "name": "Jane Doe",
                    "role": "user",
                },
            })),
        )
            .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid email or password" })),
        )
            .into_response()
    }
}

async fn logout() -> Response {
    // Deliberately broken: logout must still clear the local session
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "Session backend unavailable" })),
    )
        .into_response()
}

async fn list_products(State(state): State<Shared>) -> Response {
    let state = lock(&state);
    let products: Vec<Value> = state
        .products
        .iter()
        .map(|p| {
            json!({
                "_id": p.id,
                "name": p.name,
                "price": p.price,
                "stock": p.stock,
                "category": { "name": "Gadgets" },
                "images": ["https://cdn.example.com/img.jpg"],
            })
        })
        .collect();
    let total = u32::try_from(products.len()).unwrap();
    Json(json!({
        "products": products,
        "total": total,
        "page": 1,
        "limit": 20,
        "totalPages": 1,
    }))
    .into_response()
}

async fn get_cart(State(state): State<Shared>, request: Request) -> Response {
    if !bearer_ok(&request) {
        return unauthorized();
    }
    Json(lock(&state).cart_json()).into_response()
}

async fn add_to_cart(State(state): State<Shared>, request: Request) -> Response {
    if !bearer_ok(&request) {
        return unauthorized();
    }
    let bytes = axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    let product_id = body.get("productId").and_then(Value::as_str).unwrap_or("");
    let quantity = body.get("quantity").and_then(Value::as_u64).unwrap_or(1);
    let quantity = u32::try_from(quantity).unwrap_or(1);

    let mut state = lock(&state);
    let Some(product) = state.product(product_id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Product not found" })),
        )
            .into_response();
    };

    let product_id = product_id.to_owned();
    if let Some(line) = state.cart.iter_mut().find(|l| l.product_id == product_id) {
        // The server clamps to stock, the client only learns via refetch
        line.quantity = (line.quantity + quantity).min(product.stock);
    } else {
        state.next_line += 1;
        let id = format!("line-{}", state.next_line);
        state.cart.push(MockCartLine {
            id,
            product_id,
            quantity: quantity.min(product.stock),
        });
    }
    Json(state.cart_json()).into_response()
}

async fn update_cart_item(
    State(state): State<Shared>,
    Path(product_id): Path<String>,
    request: Request,
) -> Response {
    if !bearer_ok(&request) {
        return unauthorized();
    }
    let bytes = axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    let quantity = body.get("quantity").and_then(Value::as_u64).unwrap_or(1);
    let quantity = u32::try_from(quantity).unwrap_or(1);

    let mut state = lock(&state);
    let stock = state.product(&product_id).map_or(0, |p| p.stock);
    let Some(line) = state.cart.iter_mut().find(|l| l.product_id == product_id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Item not found in cart" })),
        )
            .into_response();
    };
    line.quantity = quantity.min(stock);
    Json(state.cart_json()).into_response()
}

async fn remove_cart_item(
    State(state): State<Shared>,
    Path(product_id): Path<String>,
    request: Request,
) -> Response {
    if !bearer_ok(&request) {
        return unauthorized();
    }
    let mut state = lock(&state);
    state.cart.retain(|l| l.product_id != product_id);
    Json(state.cart_json()).into_response()
}

async fn upload_avatar(State(state): State<Shared>, request: Request) -> Response {
    if !bearer_ok(&request) {
        return unauthorized();
    }
    let bytes = axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .unwrap();
    lock(&state).avatar_body = Some(String::from_utf8_lossy(&bytes).into_owned());
    Json(json!({ "url": "https://cdn.example.com/avatars/u1.jpg" })).into_response()
}

async fn clear_cart(State(state): State<Shared>, request: Request) -> Response {
    if !bearer_ok(&request) {
        return unauthorized();
    }
    let mut state = lock(&state);
    state.cart.clear();
    Json(json!({ "message": "Cart cleared" })).into_response()
}

/// A running mock backend plus a client pointed at it.
pub struct TestContext {
    pub client: Client,
    pub state: Shared,
    pub base_url: String,
    // Holds the session file until the test is done
    _session_dir: tempfile::TempDir,
}

impl TestContext {
    /// Start a mock backend on an ephemeral port and build a client with a
    /// fresh session file against it.
    pub async fn new() -> Self {
        let state: Shared = Arc::new(Mutex::new(BackendState::default()));

        let app = Router::new()
            .route("/auth/login", post(login))
            .route("/auth/logout", post(logout))
            .route("/products", get(list_products))
            .route("/cart", get(get_cart).post(add_to_cart).delete(clear_cart))
            .route(
                "/cart/item/{id}",
                put(update_cart_item).delete(remove_cart_item),
            )
            .route("/users/avatar", post(upload_avatar))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                record_requests,
            ))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let base_url = format!("http://{addr}");
        let session_dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::new(
            base_url.parse().unwrap(),
            session_dir.path().join("session.json"),
        );
        let client = Client::new(config).unwrap();

        Self {
            client,
            state,
            base_url,
            _session_dir: session_dir,
        }
    }

    /// Seed a product into the mock catalog.
    pub fn seed_product(&self, id: &str, name: &str, price: f64, stock: u32) {
        lock(&self.state).products.push(MockProduct {
            id: id.to_owned(),
            name: name.to_owned(),
            price,
            stock,
        });
    }

    /// Log in as the test user.
    pub async fn login(&self) {
        let email: Email = TEST_EMAIL.parse().unwrap();
        self.client
            .auth()
            .login(&email, TEST_PASSWORD)
            .await
            .unwrap();
    }

    /// Every request the mock backend has seen so far.
    pub fn requests(&self) -> Vec<String> {
        lock(&self.state).requests.clone()
    }

    /// The mock backend's current cart lines.
    pub fn server_cart(&self) -> Vec<MockCartLine> {
        lock(&self.state).cart.clone()
    }

    /// The raw multipart body of the last avatar upload.
    pub fn avatar_body(&self) -> Option<String> {
        lock(&self.state).avatar_body.clone()
    }
}
