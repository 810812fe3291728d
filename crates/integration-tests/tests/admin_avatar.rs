//! End-to-end test for the avatar upload wire contract.

#![allow(clippy::unwrap_used)]

use easy_gadget_integration_tests::TestContext;

#[tokio::test]
async fn test_avatar_upload_posts_a_file_part_to_users_avatar() {
    let ctx = TestContext::new().await;
    ctx.login().await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portrait.jpg");
    std::fs::write(&path, b"not-really-a-jpeg").unwrap();

    let url = ctx.client.admin().update_avatar(&path).await.unwrap();
    assert_eq!(url, "https://cdn.example.com/avatars/u1.jpg");

    // The backend serves avatar uploads at POST /users/avatar
    assert!(ctx.requests().contains(&"POST /users/avatar".to_owned()));

    // ... and reads the image from the `file` multipart field
    let body = ctx.avatar_body().unwrap();
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("filename=\"portrait.jpg\""));
    assert!(body.contains("not-really-a-jpeg"));
}
