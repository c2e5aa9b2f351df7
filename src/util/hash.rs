//! Hashing utilities for stable identifiers.

use sha2::{Digest, Sha256};

/// A hasher for building fingerprints from multiple components.
#[derive(Default)]
pub struct Fingerprint {
    hasher: Sha256,
}

impl Fingerprint {
    /// Create a new fingerprint builder.
    pub fn new() -> Self {
        Fingerprint {
            hasher: Sha256::new(),
        }
    }

    /// Add a string component to the fingerprint.
    pub fn update_str(&mut self, s: &str) -> &mut Self {
        self.hasher.update(s.as_bytes());
        self.hasher.update(b"\0"); // Separator
        self
    }

    /// Add multiple strings to the fingerprint.
    pub fn update_strs<'a>(&mut self, items: impl IntoIterator<Item = &'a str>) -> &mut Self {
        for s in items {
            self.update_str(s);
        }
        self
    }

    /// Finalize and return the fingerprint as a hex string.
    pub fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }

    /// Finalize and return the first `len` hex characters, uppercased.
    pub fn finish_upper(self, len: usize) -> String {
        let mut digest = self.finish();
        digest.truncate(len);
        digest.make_ascii_uppercase();
        digest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_is_sha256_hex() {
        let mut fp = Fingerprint::new();
        fp.update_str("hello");
        let digest = fp.finish();

        assert_eq!(digest.len(), 64);
        assert_ne!(digest, "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824");
    }

    #[test]
    fn test_fingerprint_separates_components() {
        let joined = {
            let mut fp = Fingerprint::new();
            fp.update_str("ab").update_str("c");
            fp.finish()
        };

        let split = {
            let mut fp = Fingerprint::new();
            fp.update_str("a").update_str("bc");
            fp.finish()
        };

        assert_ne!(joined, split);
    }

    #[test]
    fn test_finish_upper() {
        let mut fp = Fingerprint::new();
        fp.update_strs(["ref", "A.swift"]);
        let short = fp.finish_upper(24);

        assert_eq!(short.len(), 24);
        assert!(short
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }
}
