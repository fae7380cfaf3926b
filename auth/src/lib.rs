//! Credential issuance and validation for the chirpy service
//!
//! Provides the security-sensitive core the HTTP handlers call into:
//! - Password hashing (Argon2id)
//! - Access tokens (HS256 JWT bound to a user id)
//! - Opaque renewal tokens and the store contract that tracks them
//! - `Authorization` header parsing for `Bearer` and `ApiKey` credentials
//! - Authentication coordination
//!
//! Apart from [`Config::load`], which reads configuration files and the
//! environment at startup, nothing here performs I/O except through a
//! caller-supplied [`RenewalTokenStore`]. Every failure is a typed error; the
//! caller decides how to render it (see [`AuthenticationError::kind`]).
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use chirpy_auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Access Tokens
//! ```
//! use chirpy_auth::{JwtHandler, UserId};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let user_id = UserId::new();
//! let token = handler.mint(&user_id).unwrap();
//! assert_eq!(handler.validate(&token).unwrap(), user_id);
//! ```
//!
//! ## Header Extraction
//! ```
//! use chirpy_auth::credentials::{extract_api_key, extract_bearer};
//!
//! assert_eq!(extract_bearer(&["Bearer abc123"]).unwrap(), "abc123");
//! assert!(extract_api_key(&["Bearer abc123"]).is_err());
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use chirpy_auth::{Authenticator, Config, UserId};
//!
//! let auth = Authenticator::new(&Config::with_secret("secret_key_at_least_32_bytes_long!")).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue tokens
//! let user_id = UserId::new();
//! let session = auth.authenticate("password123", &hash, user_id).unwrap();
//!
//! // Protected request: validate the bearer token
//! let header = format!("Bearer {}", session.access_token);
//! assert_eq!(auth.authorize(&[header]).unwrap(), user_id);
//! ```

pub mod authenticator;
pub mod clock;
pub mod config;
pub mod credentials;
pub mod jwt;
pub mod password;
pub mod renewal;
pub mod user_id;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::FailureKind;
pub use authenticator::Session;
pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use config::Config;
pub use credentials::CredentialError;
pub use credentials::CredentialScheme;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use renewal::RenewalTokenError;
pub use renewal::RenewalTokenRecord;
pub use renewal::RenewalTokenStore;
pub use user_id::UserId;
