use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use super::errors::RenewalTokenError;
use super::record::RenewalTokenRecord;

/// Persistence contract for renewal tokens.
///
/// Implemented by the caller's storage layer. Lookups must be exact matches
/// on the token string.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RenewalTokenStore: Send + Sync {
    /// Persist a newly issued token.
    async fn save(&self, record: &RenewalTokenRecord) -> Result<(), RenewalTokenError>;

    /// Find a token, returning `None` when it was never issued.
    async fn find(&self, token: &str) -> Result<Option<RenewalTokenRecord>, RenewalTokenError>;

    /// Mark a token revoked.
    ///
    /// # Errors
    /// * `NotFound` - No such token
    async fn revoke(&self, token: &str, revoked_at: DateTime<Utc>)
        -> Result<(), RenewalTokenError>;
}
