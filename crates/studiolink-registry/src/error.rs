//! Registry error types.
//!
//! Every kind here is terminal for the operation that produced it: none
//! represents a transient condition the core should retry. The calling UI
//! decides what to do next (typically: request a fresh key). Storage-layer
//! failures pass through as [`RegistryError::Storage`], a separate
//! infrastructure taxonomy retried by the storage client, not here.

use studiolink_core::{RelationshipId, StudioId, StudioKeyId, TierParseError};
use studiolink_storage::StorageError;

use crate::relationship::RelationshipStatus;

/// Errors from registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The studio does not exist or is not active.
    #[error("studio {0} does not exist or is not active")]
    InvalidStudio(StudioId),

    /// A tier label from a collaborator did not parse.
    #[error(transparent)]
    InvalidTier(#[from] TierParseError),

    /// The presented secret or id matches nothing.
    #[error("not found: {0}")]
    NotFound(String),

    /// The key has been revoked by the owning studio.
    #[error("key {0} has been revoked by the studio")]
    Revoked(StudioKeyId),

    /// The key's expiration is in the past.
    #[error("key {0} has expired")]
    Expired(StudioKeyId),

    /// The key was already redeemed by a creator.
    #[error("key {0} has already been redeemed")]
    AlreadyRedeemed(StudioKeyId),

    /// The relationship's current status forbids the requested transition.
    #[error("relationship {relationship_id} cannot move from {from} to {to}")]
    InvalidTransition {
        /// The relationship being transitioned.
        relationship_id: RelationshipId,
        /// Its current status.
        from: RelationshipStatus,
        /// The requested status.
        to: RelationshipStatus,
    },

    /// The originating key expired before the relationship could activate;
    /// a fresh key must be issued.
    #[error("key {0} expired before approval; issue a new key")]
    KeyExpired(StudioKeyId),

    /// Infrastructure failure in the backing store.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
