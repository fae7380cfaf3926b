use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::ISSUER;
use super::errors::JwtError;
use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::user_id::UserId;

/// Lifetime of an access token when the caller does not pick one.
pub const DEFAULT_ACCESS_TOKEN_TTL: Duration = Duration::from_secs(3600);

/// Access token handler for minting and validating tokens.
///
/// Uses HS256 (HMAC with SHA-256) with a single shared secret. Tokens are
/// stateless: validity is the signature plus the embedded expiry.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Errors
    /// * `SigningFailed` - Secret is empty
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::SigningFailed(
                "Signing secret must not be empty".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl: DEFAULT_ACCESS_TOKEN_TTL,
            clock: Arc::new(SystemClock),
        })
    }

    /// Override the lifetime used by [`mint`](Self::mint).
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Replace the time source used for issuing and expiry checks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Mint an access token for `user_id` with the configured lifetime.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn mint(&self, user_id: &UserId) -> Result<String, JwtError> {
        self.mint_with_ttl(user_id, self.ttl)
    }

    /// Mint an access token for `user_id` valid for `ttl` from now.
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed or `ttl` is out of range
    pub fn mint_with_ttl(&self, user_id: &UserId, ttl: Duration) -> Result<String, JwtError> {
        let claims = Claims::for_user(user_id, self.clock.now(), ttl)?;
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))
    }

    /// Validate a token and return the user it was issued to.
    ///
    /// # Errors
    /// * `InvalidSignature` - Signed with another secret or tampered with
    /// * `Expired` - Current time is past the `exp` claim
    /// * `Malformed` - Not a JWT, or claims have the wrong shape
    /// * `InvalidIssuer` - Issued by another service
    /// * `UnparseableSubject` - Subject is not a user id
    pub fn validate(&self, token: &str) -> Result<UserId, JwtError> {
        self.decode(token)?.user_id()
    }

    /// Verify the signature, issuer and expiry, returning the claims.
    ///
    /// # Errors
    /// Same as [`validate`](Self::validate), minus `UnparseableSubject`.
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is checked below against the injected clock
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.set_issuer(&[ISSUER]);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::ExpiredSignature => JwtError::Expired,
                ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
                _ => JwtError::Malformed(e.to_string()),
            })?;

        let claims = token_data.claims;
        if claims.is_expired(self.clock.now().timestamp()) {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }
}
