//! Hashing utilities
//!
//! Used by the storage sink to derive dedupe keys for persisted records.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of a byte buffer.
pub fn sha256_hex(data: impl AsRef<[u8]>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_ref());
    hex::encode(hasher.finalize())
}

/// Hex-encoded SHA-256 over several parts joined with a `|` separator.
///
/// The separator keeps ("ab", "c") and ("a", "bc") from colliding.
pub fn sha256_hex_parts(parts: &[&str]) -> String {
    sha256_hex(parts.join("|"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex_known_vector() {
        let checksum = sha256_hex(b"hello world");
        assert_eq!(
            checksum,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_sha256_hex_parts_separator_matters() {
        assert_ne!(sha256_hex_parts(&["ab", "c"]), sha256_hex_parts(&["a", "bc"]));
    }

    #[test]
    fn test_sha256_hex_parts_is_deterministic() {
        let a = sha256_hex_parts(&["bilibili", "4242", "Some Title"]);
        let b = sha256_hex_parts(&["bilibili", "4242", "Some Title"]);
        assert_eq!(a, b);
    }
}
