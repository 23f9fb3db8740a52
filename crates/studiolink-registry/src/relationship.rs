//! Creator relationship records and their state machine.

use serde::{Deserialize, Serialize};

use studiolink_core::{CreatorId, PermissionTier, RelationshipId, StudioId, StudioKeyId, Timestamp};

/// Status of a studio-creator relationship.
///
/// ```text
/// Pending ──approve──▶ Active ◀──toggle──▶ Inactive
///    │                    │                    │
///    └──reject──▶      Revoked  ◀───cascade────┘
/// ```
///
/// Revoked is terminal. The record itself is never destroyed; it is the
/// audit trail of the grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipStatus {
    /// Created by redemption; awaiting the creator's approval.
    Pending,
    /// Approved; access checks may pass.
    Active,
    /// Paused by the creator or downgraded by key expiration. Reversible.
    Inactive,
    /// Terminal. Reached by creator rejection or key-revocation cascade.
    Revoked,
}

impl RelationshipStatus {
    /// Whether no further transition can leave this status.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Revoked)
    }

    /// The creator-facing transition matrix.
    ///
    /// The revocation cascade deliberately bypasses this: a key revocation
    /// forces Revoked from any status.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Active)
                | (Self::Pending, Self::Revoked)
                | (Self::Active, Self::Inactive)
                | (Self::Inactive, Self::Active)
        )
    }
}

impl std::fmt::Display for RelationshipStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
            Self::Revoked => write!(f, "revoked"),
        }
    }
}

/// The durable binding between a studio and a creator, created only by a
/// successful key redemption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatorRelationship {
    /// Unique relationship identifier.
    pub id: RelationshipId,
    /// The studio side of the binding.
    pub studio_id: StudioId,
    /// The creator side of the binding.
    pub creator_id: CreatorId,
    /// Tier copied by value from the key at redemption time. Immutable
    /// thereafter; later changes to anything else never touch it.
    pub tier: PermissionTier,
    /// Current status.
    pub status: RelationshipStatus,
    /// Per-relationship commission override, if agreed; falls back to the
    /// studio's default rate otherwise.
    pub commission_override: Option<f64>,
    /// Free-form notes kept by the studio.
    pub notes: String,
    /// When the relationship was created (redemption time).
    pub created_at: Timestamp,
    /// When the relationship last changed.
    pub updated_at: Timestamp,
    /// The key whose redemption created this relationship.
    pub key_id: StudioKeyId,
}

impl CreatorRelationship {
    /// Create a fresh Pending relationship from a redemption.
    #[must_use]
    pub fn new(
        studio_id: StudioId,
        creator_id: CreatorId,
        tier: PermissionTier,
        key_id: StudioKeyId,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: RelationshipId::new(),
            studio_id,
            creator_id,
            tier,
            status: RelationshipStatus::Pending,
            commission_override: None,
            notes: String::new(),
            created_at: now,
            updated_at: now,
            key_id,
        }
    }

    /// Whether access checks can currently pass.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == RelationshipStatus::Active
    }

    pub(crate) fn set_status(&mut self, status: RelationshipStatus) {
        self.status = status;
        self.touch();
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
