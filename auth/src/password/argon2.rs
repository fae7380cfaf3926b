use argon2::password_hash::Error as PasswordHashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;
use rand::rngs::OsRng;
use rand::RngCore;

use super::errors::PasswordError;
use crate::config::PasswordConfig;

const SALT_BYTES: usize = 16;

/// Password hashing implementation.
///
/// Produces Argon2id hashes in PHC string format. Verification reads the
/// algorithm, cost parameters and salt back out of the stored string, so
/// hashes made under older parameters keep verifying after a config change.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Create a new password hasher with the `argon2` crate defaults.
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Create a hasher with explicit cost parameters.
    ///
    /// # Errors
    /// * `HashingFailed` - Parameters are outside the ranges Argon2 accepts
    pub fn with_config(config: &PasswordConfig) -> Result<Self, PasswordError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| PasswordError::HashingFailed(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash, may be empty
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Entropy source or hashing primitive failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let mut salt_bytes = [0u8; SALT_BYTES];
        OsRng
            .try_fill_bytes(&mut salt_bytes)
            .map_err(|e| PasswordError::HashingFailed(format!("Entropy source failed: {}", e)))?;
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `MalformedHash` - Hash cannot be parsed, is truncated, or names an
    ///   algorithm other than Argon2
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| PasswordError::MalformedHash(format!("Invalid password hash: {}", e)))?;

        Algorithm::try_from(parsed_hash.algorithm)
            .map_err(|e| PasswordError::MalformedHash(format!("Unsupported algorithm: {}", e)))?;

        if parsed_hash.salt.is_none() || parsed_hash.hash.is_none() {
            return Err(PasswordError::MalformedHash(
                "Hash record is missing its salt or digest".to_string(),
            ));
        }

        match self.argon2().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(PasswordError::MalformedHash(e.to_string())),
        }
    }

    /// Run [`hash`](Self::hash) on the blocking thread pool.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing failed or the worker task panicked
    pub async fn spawn_hash(&self, password: String) -> Result<String, PasswordError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| PasswordError::HashingFailed(format!("Hashing task failed: {}", e)))?
    }

    /// Run [`verify`](Self::verify) on the blocking thread pool.
    ///
    /// # Errors
    /// * `MalformedHash` - Stored hash is unusable
    /// * `HashingFailed` - The worker task panicked
    pub async fn spawn_verify(&self, password: String, hash: String) -> Result<bool, PasswordError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|e| PasswordError::HashingFailed(format!("Verification task failed: {}", e)))?
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
