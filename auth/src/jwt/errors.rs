use thiserror::Error;

/// Error type for access token operations.
///
/// Every variant means the token must be rejected. They stay distinct so
/// logs can tell a forged token from an old one.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token was issued by another service")]
    InvalidIssuer,

    #[error("Token subject is not a valid user id: {0}")]
    UnparseableSubject(String),
}
