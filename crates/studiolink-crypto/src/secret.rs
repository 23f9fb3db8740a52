//! Raw bearer secrets.

use rand::RngCore;
use rand::rngs::OsRng;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CryptoError, CryptoResult};
use crate::hash::SecretHash;

/// Entropy of a generated secret in bytes (256 bits).
///
/// The floor for studio keys is 128 bits; we generate double that so the
/// margin never depends on downstream truncation behaving.
pub const SECRET_ENTROPY_BYTES: usize = 32;

/// Namespace prefix carried by every studio-key secret.
///
/// Purely for routing and operator recognition; it contributes no secrecy
/// and no metadata about the issuing studio, tier, or time.
pub const SECRET_PREFIX: &str = "slk_";

/// A raw studio-key secret.
///
/// Rendered to the issuing studio exactly once; afterwards only the
/// [`SecretHash`] survives. The in-memory copy is wiped on drop and the
/// `Debug` form is redacted so the plaintext cannot leak through logs.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct RawSecret(String);

impl RawSecret {
    /// Generate a fresh secret from the OS CSPRNG.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; SECRET_ENTROPY_BYTES];
        OsRng.fill_bytes(&mut bytes);
        let secret = Self(format!("{SECRET_PREFIX}{}", hex::encode(bytes)));
        bytes.zeroize();
        secret
    }

    /// Parse a secret presented by a creator.
    ///
    /// Accepts exactly the shape [`generate`](Self::generate) produces.
    /// Anything else is rejected before a store lookup happens.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::BadNamespace`] for a missing prefix and
    /// [`CryptoError::InvalidEncoding`] for a malformed body.
    pub fn parse(s: &str) -> CryptoResult<Self> {
        let body = s
            .strip_prefix(SECRET_PREFIX)
            .ok_or(CryptoError::BadNamespace {
                expected: SECRET_PREFIX,
            })?;

        let bytes = hex::decode(body)
            .map_err(|e| CryptoError::InvalidEncoding(e.to_string()))?;
        if bytes.len() != SECRET_ENTROPY_BYTES {
            return Err(CryptoError::InvalidEncoding(format!(
                "expected {SECRET_ENTROPY_BYTES} bytes, got {}",
                bytes.len()
            )));
        }

        Ok(Self(s.to_string()))
    }

    /// The plaintext secret. Render it to the issuer once; do not store it.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// The store-side digest of this secret.
    #[must_use]
    pub fn hash(&self) -> SecretHash {
        SecretHash::hash(self.0.as_bytes())
    }
}

impl std::fmt::Debug for RawSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RawSecret({SECRET_PREFIX}…redacted)")
    }
}
