use rand::rngs::OsRng;
use rand::RngCore;

use super::errors::RenewalTokenError;

/// Renewal token size in bytes (32 bytes = 256 bits of entropy)
pub const RENEWAL_TOKEN_BYTES: usize = 32;

/// Generate an opaque renewal token.
///
/// Draws 32 bytes from the operating system CSPRNG and hex encodes them,
/// giving a 64 character lowercase string.
///
/// # Errors
/// * `EntropySourceFailure` - The OS random source could not supply bytes
pub fn generate() -> Result<String, RenewalTokenError> {
    let mut bytes = [0u8; RENEWAL_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| RenewalTokenError::EntropySourceFailure(e.to_string()))?;

    Ok(hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_token_shape() {
        let token = generate().expect("Failed to generate token");

        assert_eq!(token.len(), RENEWAL_TOKEN_BYTES * 2);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_tokens_do_not_collide() {
        let count = 10_000;
        let tokens: HashSet<String> = (0..count)
            .map(|_| generate().expect("Failed to generate token"))
            .collect();

        assert_eq!(tokens.len(), count);
        assert!(tokens.iter().all(|token| token.len() == 64));
    }
}
