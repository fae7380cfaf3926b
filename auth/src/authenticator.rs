use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;
use http::HeaderMap;
use secrecy::ExposeSecret;
use secrecy::SecretString;
use subtle::ConstantTimeEq;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::config::Config;
use crate::credentials;
use crate::credentials::CredentialError;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::renewal;
use crate::renewal::RenewalTokenError;
use crate::renewal::RenewalTokenRecord;
use crate::renewal::RenewalTokenStore;
use crate::user_id::UserId;

const MAX_RENEWAL_TOKEN_TTL_DAYS: i64 = 3650;
const MAX_ACCESS_TOKEN_TTL_SECONDS: u64 = 30 * 24 * 3600;

/// Authentication coordinator combining password verification, access
/// tokens and renewal tokens.
///
/// Owns no storage. Flows that touch renewal token state take the caller's
/// [`RenewalTokenStore`].
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    renewal_ttl: Duration,
    api_key: Option<SecretString>,
    clock: Arc<dyn Clock>,
}

/// Credentials issued on a successful login.
pub struct Session {
    pub user_id: UserId,
    /// JWT access token
    pub access_token: String,
    /// Renewal token and the record the store must persist
    pub renewal: RenewalTokenRecord,
}

/// How the transport layer should report a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The caller's credentials were missing, wrong or stale
    Unauthenticated,
    /// The service could not do its part
    Internal,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("API key rejected")]
    ApiKeyRejected,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),

    #[error("Renewal token error: {0}")]
    RenewalTokenError(#[from] RenewalTokenError),

    #[error("Credential error: {0}")]
    CredentialError(#[from] CredentialError),
}

impl AuthenticationError {
    /// Classify the failure for the caller.
    ///
    /// A malformed stored hash is `Internal`: the record is corrupt, which is
    /// not the same as a wrong password.
    pub fn kind(&self) -> FailureKind {
        match self {
            AuthenticationError::InvalidCredentials
            | AuthenticationError::ApiKeyRejected
            | AuthenticationError::CredentialError(_) => FailureKind::Unauthenticated,
            AuthenticationError::InvalidConfiguration(_)
            | AuthenticationError::PasswordError(_) => FailureKind::Internal,
            AuthenticationError::JwtError(JwtError::SigningFailed(_)) => FailureKind::Internal,
            AuthenticationError::JwtError(_) => FailureKind::Unauthenticated,
            AuthenticationError::RenewalTokenError(
                RenewalTokenError::EntropySourceFailure(_) | RenewalTokenError::Store(_),
            ) => FailureKind::Internal,
            AuthenticationError::RenewalTokenError(_) => FailureKind::Unauthenticated,
        }
    }
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `config` - Signing secret, token lifetimes, Argon2 costs and API key
    ///
    /// # Errors
    /// * `JwtError` - Signing secret is empty
    /// * `PasswordError` - Argon2 parameters are invalid
    /// * `InvalidConfiguration` - Access or renewal token lifetime out of range
    pub fn new(config: &Config) -> Result<Self, AuthenticationError> {
        let renewal_ttl = Some(config.renewal.ttl_days)
            .filter(|days| (1..=MAX_RENEWAL_TOKEN_TTL_DAYS).contains(days))
            .and_then(Duration::try_days)
            .ok_or_else(|| {
                AuthenticationError::InvalidConfiguration(format!(
                    "renewal.ttl_days must be between 1 and {}",
                    MAX_RENEWAL_TOKEN_TTL_DAYS
                ))
            })?;

        let access_ttl_seconds = config.jwt.access_token_ttl_seconds;
        if !(1..=MAX_ACCESS_TOKEN_TTL_SECONDS).contains(&access_ttl_seconds) {
            return Err(AuthenticationError::InvalidConfiguration(format!(
                "jwt.access_token_ttl_seconds must be between 1 and {}",
                MAX_ACCESS_TOKEN_TTL_SECONDS
            )));
        }

        let jwt_handler = JwtHandler::new(config.jwt.secret.expose_secret().as_bytes())?
            .with_ttl(StdDuration::from_secs(access_ttl_seconds));

        Ok(Self {
            password_hasher: PasswordHasher::with_config(&config.password)?,
            jwt_handler,
            renewal_ttl,
            api_key: config
                .api_key
                .key
                .as_ref()
                .map(|key| SecretString::from(key.expose_secret().to_string())),
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the time source for token issuance, expiry and revocation.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.jwt_handler = self.jwt_handler.with_clock(Arc::clone(&clock));
        self.clock = clock;
        self
    }

    pub fn jwt_handler(&self) -> &JwtHandler {
        &self.jwt_handler
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Hash a password on the blocking thread pool.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub async fn spawn_hash_password(&self, password: String) -> Result<String, PasswordError> {
        self.password_hasher.spawn_hash(password).await
    }

    /// Verify credentials and issue a session.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Owner of `stored_hash`
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is malformed
    /// * `JwtError` / `RenewalTokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: UserId,
    ) -> Result<Session, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;
        self.session_if_valid(is_valid, user_id)
    }

    /// Like [`authenticate`](Self::authenticate), with verification on the
    /// blocking pool and the renewal token saved to `store`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is malformed
    /// * `RenewalTokenError` - Token generation or the store failed
    pub async fn login<S>(
        &self,
        store: &S,
        password: String,
        stored_hash: String,
        user_id: UserId,
    ) -> Result<Session, AuthenticationError>
    where
        S: RenewalTokenStore + ?Sized,
    {
        let is_valid = self
            .password_hasher
            .spawn_verify(password, stored_hash)
            .await?;
        let session = self.session_if_valid(is_valid, user_id)?;

        store.save(&session.renewal).await?;

        Ok(session)
    }

    fn session_if_valid(
        &self,
        is_valid: bool,
        user_id: UserId,
    ) -> Result<Session, AuthenticationError> {
        if !is_valid {
            tracing::warn!(user_id = %user_id, "Password verification failed");
            return Err(AuthenticationError::InvalidCredentials);
        }

        self.issue_session(user_id)
    }

    /// Issue an access token and a renewal token without checking a password.
    ///
    /// # Errors
    /// * `JwtError` - Access token signing failed
    /// * `RenewalTokenError` - Entropy source failed
    pub fn issue_session(&self, user_id: UserId) -> Result<Session, AuthenticationError> {
        let access_token = self.jwt_handler.mint(&user_id)?;
        let renewal = RenewalTokenRecord::issue(
            renewal::generate()?,
            user_id,
            self.clock.now(),
            self.renewal_ttl,
        );

        tracing::debug!(
            user_id = %user_id,
            renewal_expires_at = %renewal.expires_at,
            "Session issued"
        );

        Ok(Session {
            user_id,
            access_token,
            renewal,
        })
    }

    /// Exchange a renewal token for a fresh access token.
    ///
    /// # Errors
    /// * `RenewalTokenError::NotFound` / `Expired` / `Revoked` - Token unusable
    /// * `RenewalTokenError::Store` - Lookup failed
    /// * `JwtError` - Access token signing failed
    pub async fn refresh<S>(&self, store: &S, renewal_token: &str) -> Result<String, AuthenticationError>
    where
        S: RenewalTokenStore + ?Sized,
    {
        let record = store
            .find(renewal_token)
            .await?
            .ok_or(RenewalTokenError::NotFound)?;

        let user_id = record.ensure_active(self.clock.now()).map_err(|e| {
            tracing::warn!(user_id = %record.user_id, error = %e, "Renewal token rejected");
            e
        })?;

        let access_token = self.jwt_handler.mint(&user_id)?;
        tracing::debug!(user_id = %user_id, "Access token renewed");

        Ok(access_token)
    }

    /// Revoke a renewal token as of now.
    ///
    /// # Errors
    /// * `RenewalTokenError` - Token unknown or the store failed
    pub async fn revoke<S>(&self, store: &S, renewal_token: &str) -> Result<(), AuthenticationError>
    where
        S: RenewalTokenStore + ?Sized,
    {
        store.revoke(renewal_token, self.clock.now()).await?;
        tracing::debug!("Renewal token revoked");
        Ok(())
    }

    /// Authenticate a request from its `Authorization` header values.
    ///
    /// # Errors
    /// * `CredentialError` - No usable bearer credential
    /// * `JwtError` - Token rejected
    pub fn authorize<S: AsRef<str>>(&self, values: &[S]) -> Result<UserId, AuthenticationError> {
        let token = credentials::extract_bearer(values)?;
        self.validate_access_token(&token)
    }

    /// [`authorize`](Self::authorize) over an `http::HeaderMap`.
    ///
    /// # Errors
    /// Same as [`authorize`](Self::authorize).
    pub fn authorize_headers(&self, headers: &HeaderMap) -> Result<UserId, AuthenticationError> {
        let token = credentials::extract_bearer_from_headers(headers)?;
        self.validate_access_token(&token)
    }

    fn validate_access_token(&self, token: &str) -> Result<UserId, AuthenticationError> {
        self.jwt_handler.validate(token).map_err(|e| {
            tracing::warn!(error = %e, "Access token rejected");
            AuthenticationError::from(e)
        })
    }

    /// Check an `ApiKey` credential against the configured key.
    ///
    /// # Errors
    /// * `CredentialError` - No usable API key credential
    /// * `ApiKeyRejected` - Key differs, or no key is configured
    pub fn verify_api_key<S: AsRef<str>>(&self, values: &[S]) -> Result<(), AuthenticationError> {
        let presented = credentials::extract_api_key(values)?;

        let matches = self.api_key.as_ref().is_some_and(|expected| {
            constant_time_eq(expected.expose_secret().as_bytes(), presented.as_bytes())
        });

        if !matches {
            tracing::warn!("API key rejected");
            return Err(AuthenticationError::ApiKeyRejected);
        }

        Ok(())
    }
}

// Lengths may differ; only the contents are compared in constant time.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
