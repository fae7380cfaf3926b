use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::errors::RenewalTokenError;
use crate::user_id::UserId;

/// Lifetime of a renewal token when configuration does not override it.
pub const DEFAULT_RENEWAL_TOKEN_TTL_DAYS: i64 = 60;

/// Persisted state of a renewal token.
///
/// The token itself carries no structure; ownership, expiry and revocation
/// live here, in whatever store the caller provides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewalTokenRecord {
    pub token: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

/// Lifecycle state of a renewal token at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenewalTokenStatus {
    Active,
    Expired,
    Revoked,
}

impl RenewalTokenRecord {
    /// Build the record for a freshly generated token.
    pub fn issue(token: String, user_id: UserId, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            token,
            user_id,
            created_at: now,
            expires_at: now + ttl,
            revoked_at: None,
        }
    }

    /// Revocation takes precedence over expiry.
    pub fn status(&self, now: DateTime<Utc>) -> RenewalTokenStatus {
        if self.revoked_at.is_some() {
            RenewalTokenStatus::Revoked
        } else if now > self.expires_at {
            RenewalTokenStatus::Expired
        } else {
            RenewalTokenStatus::Active
        }
    }

    /// Return the owner if the token is still usable at `now`.
    ///
    /// # Errors
    /// * `Revoked` - Token was revoked
    /// * `Expired` - Token is past its expiry
    pub fn ensure_active(&self, now: DateTime<Utc>) -> Result<UserId, RenewalTokenError> {
        match self.status(now) {
            RenewalTokenStatus::Active => Ok(self.user_id),
            RenewalTokenStatus::Expired => Err(RenewalTokenError::Expired),
            RenewalTokenStatus::Revoked => Err(RenewalTokenError::Revoked),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).expect("valid timestamp")
    }

    fn record() -> RenewalTokenRecord {
        RenewalTokenRecord::issue(
            "token".to_string(),
            UserId::new(),
            at(1_000),
            Duration::days(DEFAULT_RENEWAL_TOKEN_TTL_DAYS),
        )
    }

    #[test]
    fn test_issue_sets_expiry() {
        let record = record();
        assert_eq!(record.expires_at - record.created_at, Duration::days(60));
        assert!(record.revoked_at.is_none());
    }

    #[test]
    fn test_status_transitions() {
        let mut record = record();
        let expires_at = record.expires_at;

        assert_eq!(record.status(at(1_000)), RenewalTokenStatus::Active);
        assert_eq!(record.status(expires_at), RenewalTokenStatus::Active);
        assert_eq!(
            record.status(expires_at + Duration::seconds(1)),
            RenewalTokenStatus::Expired
        );

        record.revoked_at = Some(at(2_000));
        assert_eq!(record.status(at(1_000)), RenewalTokenStatus::Revoked);
        assert_eq!(
            record.status(expires_at + Duration::seconds(1)),
            RenewalTokenStatus::Revoked
        );
    }

    #[test]
    fn test_ensure_active() {
        let mut record = record();
        assert_eq!(record.ensure_active(at(1_000)), Ok(record.user_id));

        record.revoked_at = Some(at(1_500));
        assert_eq!(
            record.ensure_active(at(2_000)),
            Err(RenewalTokenError::Revoked)
        );
    }
}
