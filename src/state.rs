//! Application state management
//!
//! Shared application state passed to all request handlers via Axum's
//! state extraction. All fields are cheap to clone: the pool is internally
//! reference-counted, the config is wrapped in an Arc, and the token
//! service holds pre-computed keys behind Arcs.

use crate::auth::TokenService;
use crate::config::AppConfig;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Pre-initialized token service with cached keys
    pub tokens: TokenService,
}

impl AppState {
    /// Create a new application state
    ///
    /// Pre-computes the JWT keys from the configured secret; call once at
    /// startup.
    pub fn new(db: SqlitePool, config: AppConfig) -> Self {
        let tokens = TokenService::new(&config.jwt.secret, config.jwt.token_expiry_secs);

        Self {
            db,
            config: Arc::new(config),
            tokens,
        }
    }

    #[inline]
    pub fn db(&self) -> &SqlitePool {
        &self.db
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }
}
