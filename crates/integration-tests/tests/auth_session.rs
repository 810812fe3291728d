//! End-to-end tests for login, session persistence, and bearer injection.

#![allow(clippy::unwrap_used)]

use easy_gadget_client::{ApiError, Client};
use easy_gadget_core::Email;
use easy_gadget_integration_tests::{TEST_EMAIL, TEST_PASSWORD, TestContext};

#[tokio::test]
async fn test_login_caches_user_and_token() {
    let ctx = TestContext::new().await;
    ctx.login().await;

    let user = ctx.client.current_user().unwrap();
    assert_eq!(user.email, TEST_EMAIL);
    assert_eq!(user.name, "Jane Doe");
    assert!(!user.is_admin());
    assert!(ctx.client.session().is_authenticated());
}

#[tokio::test]
async fn test_bearer_token_reaches_protected_endpoints() {
    let ctx = TestContext::new().await;
    ctx.login().await;

    // The mock 401s any /cart request without the exact bearer header, so
    // a successful refresh proves the header was injected
    ctx.client.cart().refresh().await.unwrap();
    assert!(ctx.requests().contains(&"GET /cart".to_owned()));
}

#[tokio::test]
async fn test_rejected_login_surfaces_the_server_message() {
    let ctx = TestContext::new().await;
    let email: Email = TEST_EMAIL.parse().unwrap();

    let error = ctx
        .client
        .auth()
        .login(&email, "wrong-password")
        .await
        .unwrap_err();

    match &error {
        ApiError::Status { status, message } => {
            assert_eq!(*status, 401);
            assert_eq!(message, "Invalid email or password");
        }
        other => panic!("expected status error, got {other:?}"),
    }
    // The display form is exactly the server's message
    assert_eq!(error.to_string(), "Invalid email or password");
    assert!(!ctx.client.session().is_authenticated());
}

#[tokio::test]
async fn test_session_survives_a_new_client() {
    let ctx = TestContext::new().await;
    ctx.login().await;

    // Same config, fresh client: the session file is the only carry-over
    let revived = Client::new(ctx.client.config().clone()).unwrap();
    assert!(revived.session().is_authenticated());
    assert_eq!(revived.current_user().unwrap().email, TEST_EMAIL);

    // And the restored token still authenticates
    revived.cart().refresh().await.unwrap();
}

#[tokio::test]
async fn test_logout_clears_the_session_even_when_the_server_errors() {
    let ctx = TestContext::new().await;
    ctx.login().await;

    // The mock's logout endpoint always 500s
    ctx.client.auth().logout().await;

    assert!(!ctx.client.session().is_authenticated());
    assert!(ctx.client.current_user().is_none());
    assert!(ctx.requests().contains(&"POST /auth/logout".to_owned()));
}

#[tokio::test]
async fn test_login_uses_the_configured_credentials_endpoint() {
    let ctx = TestContext::new().await;
    let email: Email = TEST_EMAIL.parse().unwrap();
    ctx.client.auth().login(&email, TEST_PASSWORD).await.unwrap();

    assert_eq!(ctx.requests(), vec!["POST /auth/login".to_owned()]);
}
