use thiserror::Error;

/// Error type for renewal token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenewalTokenError {
    #[error("Entropy source failed: {0}")]
    EntropySourceFailure(String),

    #[error("Renewal token not found")]
    NotFound,

    #[error("Renewal token is expired")]
    Expired,

    #[error("Renewal token has been revoked")]
    Revoked,

    #[error("Renewal token store error: {0}")]
    Store(String),
}
