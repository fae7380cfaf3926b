use std::time::Duration;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;
use crate::user_id::UserId;

/// Issuer stamped into every access token.
pub const ISSUER: &str = "chirpy";

/// Access token claims.
///
/// Field order is the serialization order, which keeps minting
/// deterministic for a given subject and clock value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Issuer
    pub iss: String,

    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user, valid for `ttl` from `now`.
    ///
    /// # Errors
    /// * `SigningFailed` - `ttl` pushes the expiry past the timestamp range
    pub fn for_user(user_id: &UserId, now: DateTime<Utc>, ttl: Duration) -> Result<Self, JwtError> {
        let iat = now.timestamp();
        let exp = i64::try_from(ttl.as_secs())
            .ok()
            .and_then(|ttl| iat.checked_add(ttl))
            .ok_or_else(|| JwtError::SigningFailed("Token lifetime out of range".to_string()))?;

        Ok(Self {
            iss: ISSUER.to_string(),
            sub: user_id.to_string(),
            iat,
            exp,
        })
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }

    /// Parse the subject back into a user id.
    ///
    /// # Errors
    /// * `UnparseableSubject` - Subject is not a UUID
    pub fn user_id(&self) -> Result<UserId, JwtError> {
        UserId::from_string(&self.sub).map_err(|e| JwtError::UnparseableSubject(e.to_string()))
    }
}
