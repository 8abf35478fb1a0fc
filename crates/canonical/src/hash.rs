//! Content hashes for normalized text.
//!
//! ```text
//! SHA-256(version.to_be_bytes() || 0x00 || normalized_text_bytes)
//! ```
//!
//! The preprocessing version is part of the digest, so the same raw document
//! normalized under two different rule tables never shares a hash.

use sha2::{Digest, Sha256};

/// Hex-encoded, version-aware SHA-256 of normalized text.
///
/// ```rust
/// use canonical::content_hash;
///
/// let v1 = content_hash(1, "машинный обучение");
/// assert_eq!(v1.len(), 64);
/// assert_ne!(v1, content_hash(2, "машинный обучение"));
/// assert_eq!(v1, content_hash(1, "машинный обучение"));
/// ```
pub fn content_hash(version: u32, normalized: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(version.to_be_bytes());
    hasher.update([0]);
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_hash_is_stable() {
        let texts = ["", "hello world", "привет мир", "emoji \u{1f600}"];
        for text in texts {
            assert_eq!(content_hash(1, text), content_hash(1, text));
        }
        assert_ne!(content_hash(1, ""), content_hash(1, " "));
    }
}
