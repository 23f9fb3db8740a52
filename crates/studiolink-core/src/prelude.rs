//! Prelude module - commonly used types for convenient import.
//!
//! Use `use studiolink_core::prelude::*;` to import all essential types.

// Identifiers and time
pub use crate::{CreatorId, RelationshipId, StudioId, StudioKeyId, Timestamp};

// Capability model
pub use crate::{Capability, PermissionTier, TierParseError};

// Studios
pub use crate::{Studio, StudioStatus};
