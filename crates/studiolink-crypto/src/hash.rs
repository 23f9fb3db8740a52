//! Secret hashing using BLAKE3.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A BLAKE3 digest of a raw secret (32 bytes).
///
/// The store indexes keys by this hash; the plaintext secret never reaches
/// persistence. Lookup by hash also means validation leaks nothing about
/// which field of the secret was wrong: an unknown secret is just a miss.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecretHash([u8; 32]);

impl SecretHash {
    /// Hash arbitrary data.
    #[must_use]
    pub fn hash(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Get the raw bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Create from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Encode as hex string (the storage-key form).
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Decode from hex string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid hex or not 32 bytes.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for SecretHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Truncated: full hashes in logs invite copy-paste into lookups.
        write!(f, "SecretHash({}…)", &self.to_hex()[..8])
    }
}

impl fmt::Display for SecretHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        let a = SecretHash::hash(b"slk_example");
        let b = SecretHash::hash(b"slk_example");
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_inputs_differ() {
        assert_ne!(SecretHash::hash(b"a"), SecretHash::hash(b"b"));
    }

    #[test]
    fn test_hex_roundtrip() {
        let hash = SecretHash::hash(b"roundtrip");
        let back = SecretHash::from_hex(&hash.to_hex()).unwrap();
        assert_eq!(hash, back);
    }

    #[test]
    fn test_debug_is_truncated() {
        let hash = SecretHash::hash(b"debug");
        let debug = format!("{hash:?}");
        assert!(debug.len() < hash.to_hex().len());
    }
}
