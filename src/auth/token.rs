use std::fmt::Write as _;

use rand::{rngs::OsRng, RngCore};

/// Raw entropy behind an access token. Hex encoding doubles this on the wire.
pub const TOKEN_BYTES: usize = 128;

/// Issue a fresh opaque bearer credential: 128 random bytes, hex-encoded.
/// Tokens never expire; the stored value is the whole session state.
pub fn generate_access_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    let mut token = String::with_capacity(TOKEN_BYTES * 2);
    for byte in bytes {
        let _ = write!(token, "{byte:02x}");
    }
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_256_hex_chars() {
        let token = generate_access_token();
        assert_eq!(token.len(), TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn tokens_are_unique_per_issue() {
        assert_ne!(generate_access_token(), generate_access_token());
    }
}
