//! Audit hashing of original instruction text.

use sha2::{Digest, Sha256};

/// Computes the SHA-256 hex digest of a recipe's original instructions.
///
/// The instructions are joined with newlines before hashing so the digest is
/// stable regardless of how the caller stored the list. The hash is recorded
/// on the shared artifact purely for audit and non-repudiation; it is never
/// used for similarity matching.
pub fn source_hash(instructions: &[String]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(instructions.join("\n").as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_hex_sha256() {
        let hash = source_hash(&["Preheat oven.".to_string(), "Bake for 20 min.".to_string()]);
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_is_deterministic() {
        let steps = vec!["Boil water.".to_string(), "Add pasta.".to_string()];
        assert_eq!(source_hash(&steps), source_hash(&steps));
    }

    #[test]
    fn test_hash_changes_with_content() {
        let a = source_hash(&["Boil water.".to_string()]);
        let b = source_hash(&["Boil milk.".to_string()]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_instructions_hash() {
        // SHA-256 of the empty string.
        assert_eq!(
            source_hash(&[]),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
