//! Authentication service: registration and login
//!
//! Registration hashes on the blocking thread pool and never issues a
//! token; login verifies credentials and returns a signed session token.
//! Unknown-user and wrong-password failures share one message so the API
//! does not leak which usernames exist.

use crate::auth::{PasswordService, TokenService};
use crate::error::ApiError;
use crate::repositories::UserRepository;
use sqlx::SqlitePool;

pub const MSG_USERNAME_FORMAT: &str =
    "Username must be 3 to 20 alphanumeric characters or underscores";
pub const MSG_PASSWORD_LENGTH: &str = "Password must be at least 8 characters";
pub const MSG_USER_EXISTS: &str = "User already exists";
pub const MSG_BAD_CREDENTIALS: &str = "Incorrect credentials";

/// Username rule: 3-20 chars, ASCII alphanumeric or underscore.
fn valid_username(username: &str) -> bool {
    let len = username.chars().count();
    (3..=20).contains(&len)
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Authentication operations
pub struct AuthService;

impl AuthService {
    /// Register a new user
    ///
    /// The username pre-check catches sequential duplicates with a clean
    /// 409; the UNIQUE constraint catches the racing ones.
    pub async fn register(
        pool: &SqlitePool,
        username: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        if !valid_username(username) {
            return Err(ApiError::BadRequest(MSG_USERNAME_FORMAT.to_string()));
        }

        if password.len() < 8 {
            return Err(ApiError::BadRequest(MSG_PASSWORD_LENGTH.to_string()));
        }

        if UserRepository::find_by_username(pool, username)
            .await?
            .is_some()
        {
            return Err(ApiError::Conflict(MSG_USER_EXISTS.to_string()));
        }

        let password_hash = PasswordService::hash_async(password.to_string())
            .await
            .map_err(ApiError::Internal)?;

        UserRepository::create(pool, username, &password_hash)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db_err)
                    if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
                {
                    ApiError::Conflict(MSG_USER_EXISTS.to_string())
                }
                _ => ApiError::Database(e),
            })?;

        Ok(())
    }

    /// Login with username and password, returning a session token
    pub async fn login(
        pool: &SqlitePool,
        tokens: &TokenService,
        username: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        let user = UserRepository::find_by_username(pool, username)
            .await?
            .ok_or_else(|| ApiError::Unauthorized(MSG_BAD_CREDENTIALS.to_string()))?;

        let valid = PasswordService::verify_async(password.to_string(), user.password.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            return Err(ApiError::Unauthorized(MSG_BAD_CREDENTIALS.to_string()));
        }

        tokens.issue(user.id).map_err(ApiError::Internal)
    }
}
