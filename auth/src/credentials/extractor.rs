use http::header::AUTHORIZATION;
use http::HeaderMap;

use super::errors::CredentialError;
use super::errors::CredentialScheme;

/// Extract a bearer token from the values of one header.
///
/// Only the first value is considered. The prefix match is exact and
/// case-sensitive; the remainder is trimmed.
///
/// # Errors
/// * `HeaderMissing` - No value present
/// * `SchemeMismatch` - First value does not start with `"Bearer "`
/// * `EmptyCredential` - Nothing left after the prefix
pub fn extract_bearer<S: AsRef<str>>(values: &[S]) -> Result<String, CredentialError> {
    extract(values, CredentialScheme::Bearer)
}

/// Extract an API key from the values of one header.
///
/// Same rules as [`extract_bearer`] with the `"ApiKey "` prefix.
pub fn extract_api_key<S: AsRef<str>>(values: &[S]) -> Result<String, CredentialError> {
    extract(values, CredentialScheme::ApiKey)
}

/// [`extract_bearer`] over every `Authorization` value in `headers`.
pub fn extract_bearer_from_headers(headers: &HeaderMap) -> Result<String, CredentialError> {
    extract_bearer(&authorization_values(headers))
}

/// [`extract_api_key`] over every `Authorization` value in `headers`.
pub fn extract_api_key_from_headers(headers: &HeaderMap) -> Result<String, CredentialError> {
    extract_api_key(&authorization_values(headers))
}

fn extract<S: AsRef<str>>(
    values: &[S],
    scheme: CredentialScheme,
) -> Result<String, CredentialError> {
    let value = values
        .first()
        .ok_or(CredentialError::HeaderMissing(scheme))?;

    let credential = value
        .as_ref()
        .strip_prefix(scheme.prefix())
        .ok_or(CredentialError::SchemeMismatch(scheme))?
        .trim();

    if credential.is_empty() {
        return Err(CredentialError::EmptyCredential(scheme));
    }

    Ok(credential.to_string())
}

// Values that are not visible ASCII become empty strings, which then fail
// the prefix check.
fn authorization_values(headers: &HeaderMap) -> Vec<&str> {
    headers
        .get_all(AUTHORIZATION)
        .iter()
        .map(|value| value.to_str().unwrap_or_default())
        .collect()
}
