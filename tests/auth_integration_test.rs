//! Integration tests for registration and login

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = common::TestApp::new().await;

    let body = json!({ "username": "alice", "password": "SecurePassword123" });
    let (status, response) = app.post("/api/register", None, &body).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response["message"], "User created successfully");
    // No token at registration
    assert!(response.get("token").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = common::TestApp::new().await;

    let body = json!({ "username": "alice", "password": "SecurePassword123" });
    let (status, _) = app.post("/api/register", None, &body).await;
    assert_eq!(status, StatusCode::CREATED);

    // Second registration fails regardless of password
    let body = json!({ "username": "alice", "password": "DifferentPassword456" });
    let (status, _) = app.post("/api/register", None, &body).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_incomplete_data() {
    let app = common::TestApp::new().await;

    let (status, response) = app
        .post("/api/register", None, &json!({ "username": "alice" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["message"], "Incomplete data");

    let (status, _) = app
        .post("/api/register", None, &json!({ "password": "SecurePassword123" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.post("/api/register", None, &json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_invalid_username_format() {
    let app = common::TestApp::new().await;

    for username in ["ab", "has space", "dash-ed", "waaaaaaaaaaaaaaaytoolong"] {
        let body = json!({ "username": username, "password": "SecurePassword123" });
        let (status, _) = app.post("/api/register", None, &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "username: {username}");
    }
}

#[tokio::test]
async fn test_register_short_password() {
    let app = common::TestApp::new().await;

    let body = json!({ "username": "alice", "password": "short" });
    let (status, _) = app.post("/api/register", None, &body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success_returns_token() {
    let app = common::TestApp::new().await;

    let body = json!({ "username": "alice", "password": "SecurePassword123" });
    app.post("/api/register", None, &body).await;

    let (status, response) = app.post("/api/login", None, &body).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!response["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_via_basic_auth_header() {
    let app = common::TestApp::new().await;

    let body = json!({ "username": "alice", "password": "SecurePassword123" });
    app.post("/api/register", None, &body).await;

    let (status, response) = app
        .post_basic("/api/login", "alice", "SecurePassword123")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!response["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_missing_credentials() {
    let app = common::TestApp::new().await;

    let (status, response) = app.post("/api/login", None, &json!({})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(response["message"], "Authentication required");
}

#[tokio::test]
async fn test_login_wrong_password_matches_unknown_user() {
    let app = common::TestApp::new().await;

    let body = json!({ "username": "alice", "password": "SecurePassword123" });
    app.post("/api/register", None, &body).await;

    // Wrong password for an existing user
    let wrong = json!({ "username": "alice", "password": "WrongPassword456" });
    let (status_wrong, response_wrong) = app.post("/api/login", None, &wrong).await;

    // Nonexistent user
    let unknown = json!({ "username": "nobody", "password": "SecurePassword123" });
    let (status_unknown, response_unknown) = app.post("/api/login", None, &unknown).await;

    // Both must be indistinguishable to prevent username enumeration
    assert_eq!(status_wrong, StatusCode::UNAUTHORIZED);
    assert_eq!(status_unknown, StatusCode::UNAUTHORIZED);
    assert_eq!(response_wrong["message"], response_unknown["message"]);
    assert_eq!(response_wrong["message"], "Incorrect credentials");
}
