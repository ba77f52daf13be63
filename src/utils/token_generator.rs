//! Share-token generation.
//!
//! Tokens gate a one-shot import of rewritten recipes, so they must be
//! unguessable: 32 bytes of OS entropy, URL-safe base64 without padding.

/// Length of random bytes before base64 encoding (256 bits of entropy).
const TOKEN_LENGTH_BYTES: usize = 32;

/// Generates a cryptographically secure, URL-safe share token.
///
/// Produces a 43-character token suitable for direct embedding in a share
/// link path segment.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
///
/// # Examples
///
/// ```ignore
/// let token = generate_share_token();
/// assert_eq!(token.len(), 43);
/// ```
pub fn generate_share_token() -> String {
    use base64::Engine as _;

    let mut buffer = [0u8; TOKEN_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_token_has_expected_length() {
        // 32 bytes -> ceil(32 * 4 / 3) = 43 base64 chars without padding.
        assert_eq!(generate_share_token().len(), 43);
    }

    #[test]
    fn test_token_is_url_safe() {
        let token = generate_share_token();
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_tokens_are_unique() {
        let tokens: HashSet<String> = (0..100).map(|_| generate_share_token()).collect();
        assert_eq!(tokens.len(), 100);
    }
}
