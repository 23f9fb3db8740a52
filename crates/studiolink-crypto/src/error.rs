//! Crypto error types.

/// Errors from secret handling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CryptoError {
    /// The presented string does not carry the studio-key namespace prefix.
    #[error("secret is missing the `{expected}` namespace prefix")]
    BadNamespace {
        /// The prefix every studio-key secret carries.
        expected: &'static str,
    },

    /// The secret body is not valid hex of the expected length.
    #[error("secret encoding is invalid: {0}")]
    InvalidEncoding(String),
}

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;
