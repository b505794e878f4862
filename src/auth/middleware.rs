//! Authentication middleware
//!
//! Provides the `AuthUser` extractor used by every sales route. It parses
//! the bearer token, verifies it with the pre-computed keys from AppState,
//! and resolves the embedded user id to an existing user record. The
//! resolved record is the acting identity handed to the handler.
//!
//! A missing token and an unusable one are reported distinctly ("Token
//! missing" vs "Token invalid"); all verification and resolution failures
//! collapse into the latter.

use crate::error::ApiError;
use crate::repositories::UserRepository;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};

/// Authenticated user resolved from a bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    /// Stored but not consulted for authorization decisions.
    pub role: String,
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // Only the `Bearer <token>` form is accepted
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|header| header.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::Unauthorized("Token missing".to_string()))?;

        let claims = app_state
            .tokens()
            .verify(token)
            .map_err(|_| ApiError::Unauthorized("Token invalid".to_string()))?;

        let user_id: i64 = claims
            .sub
            .parse()
            .map_err(|_| ApiError::Unauthorized("Token invalid".to_string()))?;

        let user = UserRepository::find_by_id(app_state.db(), user_id)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Token invalid".to_string()))?;

        Ok(AuthUser {
            id: user.id,
            username: user.username,
            role: user.role,
        })
    }
}
