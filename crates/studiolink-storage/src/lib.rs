//! StudioLink Storage - the durable store seam.
//!
//! The registry is the sole writer of all delegated-access state, but it does
//! not care *where* that state lives. This crate defines the byte-level
//! [`KvStore`] trait the registry writes through, plus an in-memory reference
//! implementation for tests and single-process deployments.
//!
//! # Conditional writes
//!
//! The one operation that cannot be emulated with `get` + `set` is
//! [`KvStore::put_if_absent`]: the redemption race (two creators presenting
//! the same key at once) is settled by exactly one atomic insert winning.
//! Any production backend must implement it as a single transactional write,
//! not a read-then-write pair.
//!
//! # Errors
//!
//! [`StorageError`] covers infrastructure failures only (connection loss,
//! codec problems). Domain outcomes (revoked, expired, already redeemed)
//! are never storage errors; they belong to the registry's taxonomy.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod error;
pub mod kv;

pub use error::{StorageError, StorageResult};
pub use kv::{KvStore, MemoryKvStore};
