//! Session token generation and validation
//!
//! Signs a small claims payload (user id + expiry) with a shared secret
//! using HS256. Keys are pre-computed once at startup and shared via Arc.

use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Pre-computed keys for token operations
///
/// Expensive to derive, so they are created once and cached in AppState.
#[derive(Clone)]
struct TokenKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl TokenKeys {
    fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// Token service for issue/verify operations
///
/// Cloning is cheap; the keys are behind Arcs. Create once at startup and
/// store in AppState rather than per-request.
#[derive(Clone)]
pub struct TokenService {
    keys: TokenKeys,
    expiry_secs: i64,
}

impl TokenService {
    /// Create a new token service with pre-computed keys
    pub fn new(secret: &str, expiry_secs: i64) -> Self {
        Self {
            keys: TokenKeys::new(secret),
            expiry_secs,
        }
    }

    /// Issue a token for a user, expiring after the configured window
    #[inline]
    pub fn issue(&self, user_id: i64) -> Result<String> {
        self.issue_with_expiry(user_id, self.expiry_secs)
    }

    /// Issue a token with an explicit expiry offset in seconds
    ///
    /// A negative offset produces an already-expired token, which is
    /// useful for exercising rejection paths.
    pub fn issue_with_expiry(&self, user_id: i64, expiry_secs: i64) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(expiry_secs);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to issue token: {}", e))
    }

    /// Verify a token's signature and expiry, returning its claims
    #[inline]
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let token_data = decode::<Claims>(token, &self.keys.decoding, &Validation::default())
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?;

        Ok(token_data.claims)
    }

    /// Token validity window in seconds
    #[inline]
    pub fn expiry_secs(&self) -> i64 {
        self.expiry_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> TokenService {
        TokenService::new("test-secret", 86400)
    }

    #[test]
    fn test_issue_and_verify() {
        let service = create_test_service();

        let token = service.issue(42).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, "42");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = create_test_service();

        // Well past the default 60s validation leeway
        let token = service.issue_with_expiry(42, -3600).unwrap();
        assert!(service.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = create_test_service();
        assert!(service.verify("invalid.token.here").is_err());
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let service = create_test_service();
        let other = TokenService::new("different-secret", 86400);

        let token = other.issue(42).unwrap();
        assert!(service.verify(&token).is_err());
    }

    #[test]
    fn test_service_is_clone_cheap() {
        let service = create_test_service();
        let _cloned = service.clone(); // Should be cheap due to Arc
    }
}
