//! Common test utilities for integration tests
//!
//! Each TestApp owns a fresh in-memory SQLite database, so tests are
//! isolated without any teardown. Rate limiting is disabled by default
//! because oneshot requests carry no peer address to key on; tests that
//! exercise the limiter use `with_rate_limit` and supply a client
//! address through the `x-forwarded-for` header.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;
use ventes_api::{
    auth::TokenService,
    config::{AppConfig, DatabaseConfig, JwtConfig, RateLimitConfig, ServerConfig},
    db, routes,
    state::AppState,
};

/// Test application wrapper
pub struct TestApp {
    pub app: Router,
    pub pool: SqlitePool,
    pub tokens: TokenService,
}

impl TestApp {
    /// Create a new test application over a fresh in-memory database
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Like `new`, but with the rate limiter enabled at the given quotas
    pub async fn with_rate_limit(register_per_hour: u32, login_per_minute: u32) -> Self {
        let mut config = test_config();
        config.rate_limit = RateLimitConfig {
            enabled: true,
            register_per_hour,
            login_per_minute,
        };
        Self::with_config(config).await
    }

    async fn with_config(config: AppConfig) -> Self {
        let pool = db::create_pool("sqlite::memory:", 1)
            .await
            .expect("Failed to create test database pool");
        db::init_schema(&pool).await.expect("Failed to init schema");

        let state = AppState::new(pool.clone(), config);
        let tokens = state.tokens().clone();
        let app = routes::create_router(state);

        Self { app, pool, tokens }
    }

    /// Send a request, returning status and parsed JSON body
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        bearer: Option<&str>,
        body: Option<&Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(token) = bearer {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }

        let request = match body {
            Some(value) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }

    pub async fn get(&self, path: &str, bearer: Option<&str>) -> (StatusCode, Value) {
        self.request("GET", path, bearer, None).await
    }

    pub async fn post(
        &self,
        path: &str,
        bearer: Option<&str>,
        body: &Value,
    ) -> (StatusCode, Value) {
        self.request("POST", path, bearer, Some(body)).await
    }

    pub async fn put(&self, path: &str, bearer: Option<&str>, body: &Value) -> (StatusCode, Value) {
        self.request("PUT", path, bearer, Some(body)).await
    }

    pub async fn delete(&self, path: &str, bearer: Option<&str>) -> (StatusCode, Value) {
        self.request("DELETE", path, bearer, None).await
    }

    /// POST as if originating from the given client address
    ///
    /// The limiter keys on `x-forwarded-for` before the peer address,
    /// which oneshot requests do not have.
    pub async fn post_from(&self, ip: &str, path: &str, body: &Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("x-forwarded-for", ip)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }

    /// POST with an `Authorization: Basic` header and no body
    pub async fn post_basic(
        &self,
        path: &str,
        username: &str,
        password: &str,
    ) -> (StatusCode, Value) {
        let encoded = STANDARD.encode(format!("{username}:{password}"));
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Authorization", format!("Basic {encoded}"))
            .body(Body::empty())
            .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }

    /// Register a user and log in, returning a valid session token
    pub async fn register_and_login(&self, username: &str, password: &str) -> String {
        let body = json!({ "username": username, "password": password });

        let (status, _) = self.post("/api/register", None, &body).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, response) = self.post("/api/login", None, &body).await;
        assert_eq!(status, StatusCode::OK);

        response["token"].as_str().unwrap().to_string()
    }

    /// Look up a registered user's id
    pub async fn user_id(&self, username: &str) -> i64 {
        sqlx::query_scalar("SELECT id FROM users WHERE username = ?")
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .expect("user not found")
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: "test-secret-key-for-testing-only-32chars".to_string(),
            token_expiry_secs: 86400,
        },
        rate_limit: RateLimitConfig {
            enabled: false,
            register_per_hour: 5,
            login_per_minute: 10,
        },
    }
}
