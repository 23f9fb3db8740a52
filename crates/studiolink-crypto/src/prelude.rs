//! Prelude module - commonly used types for convenient import.
//!
//! Use `use studiolink_crypto::prelude::*;` to import all essential types.

// Errors
pub use crate::{CryptoError, CryptoResult};

// Secret material
pub use crate::{RawSecret, SecretHash, SECRET_ENTROPY_BYTES, SECRET_PREFIX};
