use thiserror::Error;

/// Error type for password operations.
///
/// A wrong password is not an error: `verify` returns `Ok(false)`.
/// `MalformedHash` means the stored record itself is unusable.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
}
