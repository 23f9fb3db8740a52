//! StudioLink Core - Foundation types for delegated studio access.
//!
//! This crate provides:
//! - Id newtypes for studios, creators, keys, and relationships
//! - The closed [`Capability`] set and the [`PermissionTier`] capability model
//! - [`Studio`] records and their activation status
//! - Common [`Timestamp`] handling
//!
//! # Security Model
//!
//! Permission tiers are a closed, ordered enumeration. Each tier's capability
//! set is a `const` slice, so what a tier grants is fixed at compile time:
//! [`Capability::StartBroadcast`] is excluded from every tier because no set
//! contains it, not because a runtime filter strips it.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod capability;
mod studio;
mod tier;
mod types;

pub use capability::Capability;
pub use studio::{Studio, StudioStatus};
pub use tier::{PermissionTier, TierParseError};
pub use types::{CreatorId, RelationshipId, StudioId, StudioKeyId, Timestamp};
