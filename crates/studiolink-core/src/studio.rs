//! Studio records.

use serde::{Deserialize, Serialize};

use crate::types::{StudioId, Timestamp};

/// Whether a studio may operate on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudioStatus {
    /// Operating normally; may issue keys.
    Active,
    /// Suspended by the platform; key issuance is blocked. Existing
    /// relationships are untouched; suspension is not a revocation.
    Suspended,
}

impl std::fmt::Display for StudioStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Suspended => write!(f, "suspended"),
        }
    }
}

/// An agency or business entity that manages creators through delegated,
/// scoped access. A studio never holds creator credentials; it holds keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Studio {
    /// Unique studio identifier.
    pub id: StudioId,
    /// Display name.
    pub name: String,
    /// Contact address for platform correspondence.
    pub contact: String,
    /// Default commission rate as a fraction in `[0, 1]`.
    pub commission_rate: f64,
    /// Operating status.
    pub status: StudioStatus,
    /// When the studio was registered.
    pub created_at: Timestamp,
}

impl Studio {
    /// Create a new active studio.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        contact: impl Into<String>,
        commission_rate: f64,
    ) -> Self {
        Self {
            id: StudioId::new(),
            name: name.into(),
            contact: contact.into(),
            commission_rate,
            status: StudioStatus::Active,
            created_at: Timestamp::now(),
        }
    }

    /// Whether the studio may currently issue keys.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == StudioStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_studio_is_active() {
        let studio = Studio::new("Nova", "ops@nova.example", 0.2);
        assert!(studio.is_active());
        assert_eq!(studio.status, StudioStatus::Active);
    }

    #[test]
    fn test_suspended_studio_is_not_active() {
        let mut studio = Studio::new("Nova", "ops@nova.example", 0.2);
        studio.status = StudioStatus::Suspended;
        assert!(!studio.is_active());
    }
}
