//! Route definitions for the Ventes API
//!
//! Assembles the router, applies the middleware stack, and installs the
//! uniform JSON envelopes for route-not-found, method-not-allowed, and
//! unhandled faults. Register and login carry their own rate-limit layers,
//! keyed by client address.

use crate::config::RateLimitConfig;
use crate::error::{ApiError, ErrorResponse};
use crate::state::AppState;
use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod health;
mod ventes;

/// Confirmation response body
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes(&state.config().rate_limit))
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API routes
fn api_routes(rate_limit: &RateLimitConfig) -> Router<AppState> {
    let mut register =
        Router::new().route("/register", post(auth::register).fallback(method_not_allowed));
    let mut login = Router::new().route("/login", post(auth::login).fallback(method_not_allowed));

    if rate_limit.enabled {
        let register_conf = Arc::new(
            GovernorConfigBuilder::default()
                .key_extractor(SmartIpKeyExtractor)
                .per_second(u64::from((3600 / rate_limit.register_per_hour.max(1)).max(1)))
                .burst_size(rate_limit.register_per_hour.max(1))
                .finish()
                .expect("invalid register rate limit configuration"),
        );
        register = register.route_layer(GovernorLayer {
            config: register_conf,
        });

        let login_conf = Arc::new(
            GovernorConfigBuilder::default()
                .key_extractor(SmartIpKeyExtractor)
                .per_second(u64::from((60 / rate_limit.login_per_minute.max(1)).max(1)))
                .burst_size(rate_limit.login_per_minute.max(1))
                .finish()
                .expect("invalid login rate limit configuration"),
        );
        login = login.route_layer(GovernorLayer { config: login_conf });
    }

    Router::new()
        .merge(register)
        .merge(login)
        .route(
            "/ventes",
            get(ventes::list_ventes)
                .post(ventes::create_vente)
                .fallback(method_not_allowed),
        )
        .route(
            "/ventes/:id",
            get(ventes::get_vente)
                .put(ventes::update_vente)
                .delete(ventes::delete_vente)
                .fallback(method_not_allowed),
        )
        .route(
            "/health",
            get(health::health_check).fallback(method_not_allowed),
        )
}

/// Uniform envelope for unknown routes
async fn not_found() -> ApiError {
    ApiError::NotFound("Resource not found".to_string())
}

/// Uniform envelope for known routes hit with the wrong method
async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Uniform envelope for handler panics; leaks no internal detail
fn handle_panic(_err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    tracing::error!("Unhandled panic while serving request");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            message: "An internal error occurred".to_string(),
            errors: None,
        }),
    )
        .into_response()
}
