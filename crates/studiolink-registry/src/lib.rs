//! StudioLink Registry - Studio key lifecycle and creator relationships.
//!
//! This crate provides:
//! - Key issuance bound to a studio and a permission tier
//! - Lazy validation of presented secrets (usable / revoked / expired /
//!   already redeemed)
//! - The relationship state machine (pending → active ⇄ inactive, revoked)
//! - Cascading revocation and lazy expiration downgrade
//! - The single access-check entry point every studio-side action calls
//!
//! # Security Model
//!
//! A studio key is a single-redemption bearer capability. Redemption is
//! settled by one atomic conditional write, so exactly one creator can ever
//! redeem a given key. The relationship created by redemption freezes the
//! key's tier by value; revoking the key unconditionally revokes the
//! relationship. Revoked is terminal; the record survives for audit.
//!
//! # Example
//!
//! ```
//! use studiolink_core::{Capability, PermissionTier, CreatorId};
//! use studiolink_registry::{AccessDecision, StudioRegistry};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let rt = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
//! # rt.block_on(async {
//! let registry = StudioRegistry::in_memory();
//!
//! let studio = registry.register_studio("Nova", "ops@nova.example", 0.2).await?;
//! let (key, secret) = registry
//!     .issue_key(studio.id, PermissionTier::Support, "onboarding", None)
//!     .await?;
//!
//! // A creator redeems the raw secret, then approves the pending binding.
//! let creator = CreatorId::new();
//! let relationship = registry.redeem(secret.expose(), creator).await?;
//! let relationship = registry.approve(relationship.id).await?;
//!
//! let decision = registry.check(relationship.id, Capability::PlanContent).await?;
//! assert!(decision.is_allowed());
//!
//! // Going live is never delegable, whatever the tier.
//! let decision = registry.check(relationship.id, Capability::StartBroadcast).await?;
//! assert!(!decision.is_allowed());
//! # let _ = key;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # })?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod access;
mod error;
mod key;
mod registry;
mod relationship;
mod store;
mod validate;

pub use access::{AccessDecision, DenyReason};
pub use error::{RegistryError, RegistryResult};
pub use key::StudioKey;
pub use registry::StudioRegistry;
pub use relationship::{CreatorRelationship, RelationshipStatus};
pub use store::RegistryStore;
pub use validate::{ValidationOutcome, ValidationReason};
