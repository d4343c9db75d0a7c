use sha2::{Digest, Sha256};

/// Stable content fingerprint of résumé text, used for dedup and repeat-submission analytics.
///
/// Lowercase hex SHA-256 of the UTF-8 bytes. No salt, no time component.
pub fn fingerprint(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            fingerprint("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_deterministic() {
        let text = "Senior Rust Engineer with 8 years of experience";
        assert_eq!(fingerprint(text), fingerprint(text));
    }

    #[test]
    fn test_distinct_texts_distinct_digests() {
        assert_ne!(fingerprint("resume v1"), fingerprint("resume v2"));
    }

    #[test]
    fn test_digest_shape() {
        let digest = fingerprint("");
        assert_eq!(digest.len(), 64);
        assert!(digest
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}
