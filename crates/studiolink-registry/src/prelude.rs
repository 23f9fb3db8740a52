//! Prelude module - commonly used types for convenient import.
//!
//! Use `use studiolink_registry::prelude::*;` to import all essential types.

// Errors
pub use crate::{RegistryError, RegistryResult};

// Records
pub use crate::{CreatorRelationship, RelationshipStatus, StudioKey};

// Validation and access outcomes
pub use crate::{AccessDecision, DenyReason, ValidationOutcome, ValidationReason};

// The registry itself
pub use crate::{RegistryStore, StudioRegistry};
