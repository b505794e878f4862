//! Authentication routes
//!
//! Registration and login. Login accepts credentials either from an HTTP
//! basic-auth header or from a JSON body; the body is only consulted when
//! the header is absent.

use super::MessageResponse;
use crate::error::{ApiError, ApiResult};
use crate::services::AuthService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

pub const MSG_INCOMPLETE: &str = "Incomplete data";
pub const MSG_AUTH_REQUIRED: &str = "Authentication required";

/// Credentials supplied as a JSON body
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Successful login response
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Register a new user
///
/// POST /api/register
///
/// No token is issued at registration; clients log in afterwards.
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let Ok(Json(req)) = body else {
        return Err(ApiError::BadRequest(MSG_INCOMPLETE.to_string()));
    };

    let (username, password) = match (req.username, req.password) {
        (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
        _ => return Err(ApiError::BadRequest(MSG_INCOMPLETE.to_string())),
    };

    AuthService::register(state.db(), &username, &password).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully")),
    ))
}

/// Login with username and password
///
/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let credentials = basic_credentials(&headers).or_else(|| {
        body.ok().and_then(|Json(req)| match (req.username, req.password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Some((u, p)),
            _ => None,
        })
    });

    let Some((username, password)) = credentials else {
        return Err(ApiError::Unauthorized(MSG_AUTH_REQUIRED.to_string()));
    };

    let token = AuthService::login(state.db(), state.tokens(), &username, &password).await?;

    Ok(Json(TokenResponse { token }))
}

/// Extract credentials from an `Authorization: Basic` header, if present
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = String::from_utf8(STANDARD.decode(encoded).ok()?).ok()?;
    let (username, password) = decoded.split_once(':')?;

    if username.is_empty() || password.is_empty() {
        return None;
    }

    Some((username.to_string(), password.to_string()))
}
