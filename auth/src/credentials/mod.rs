pub mod errors;
pub mod extractor;

pub use errors::CredentialError;
pub use errors::CredentialScheme;
pub use extractor::extract_api_key;
pub use extractor::extract_api_key_from_headers;
pub use extractor::extract_bearer;
pub use extractor::extract_bearer_from_headers;
