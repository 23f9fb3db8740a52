//! StudioLink Crypto - Secret material for bearer keys.
//!
//! This crate provides:
//! - [`RawSecret`]: the opaque bearer secret handed to a studio exactly once
//! - [`SecretHash`]: the BLAKE3 digest the store keeps instead of the secret
//!
//! # Security Philosophy
//!
//! A studio key is a bearer capability: possession of the raw secret is the
//! credential. The secret is 256 bits from the OS CSPRNG (well above the
//! 128-bit floor), carries no embedded metadata beyond a namespace prefix,
//! and is never persisted; only its hash is, so a stolen store cannot
//! reproduce usable secrets.
//!
//! # Example
//!
//! ```
//! use studiolink_crypto::RawSecret;
//!
//! let secret = RawSecret::generate();
//! assert!(secret.expose().starts_with("slk_"));
//!
//! // The store-side form is a one-way hash.
//! let hash = secret.hash();
//! assert_eq!(hash, RawSecret::parse(secret.expose()).unwrap().hash());
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod hash;
mod secret;

pub use error::{CryptoError, CryptoResult};
pub use hash::SecretHash;
pub use secret::{RawSecret, SECRET_ENTROPY_BYTES, SECRET_PREFIX};
