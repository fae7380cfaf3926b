use std::fmt;

use thiserror::Error;

/// Authorization scheme a credential was expected under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialScheme {
    Bearer,
    ApiKey,
}

impl CredentialScheme {
    /// Exact header prefix, including the single trailing space.
    pub fn prefix(self) -> &'static str {
        match self {
            CredentialScheme::Bearer => "Bearer ",
            CredentialScheme::ApiKey => "ApiKey ",
        }
    }
}

impl fmt::Display for CredentialScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialScheme::Bearer => f.write_str("Bearer"),
            CredentialScheme::ApiKey => f.write_str("ApiKey"),
        }
    }
}

/// Error for credential extraction from request headers.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Authorization header not found")]
    HeaderMissing(CredentialScheme),

    #[error("Authorization header does not contain a {0} credential")]
    SchemeMismatch(CredentialScheme),

    #[error("{0} credential is empty")]
    EmptyCredential(CredentialScheme),
}

impl CredentialError {
    /// Scheme the caller was trying to extract.
    pub fn scheme(&self) -> CredentialScheme {
        match *self {
            CredentialError::HeaderMissing(scheme)
            | CredentialError::SchemeMismatch(scheme)
            | CredentialError::EmptyCredential(scheme) => scheme,
        }
    }
}
