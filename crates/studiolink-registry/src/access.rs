//! Access check outcomes.

use serde::{Deserialize, Serialize};

/// Why an access check denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// The relationship is not Active (pending, paused, or revoked).
    NotActive,
    /// The relationship is Active but its frozen tier does not grant the
    /// requested capability.
    CapabilityNotGranted,
}

impl std::fmt::Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotActive => write!(f, "relationship is not active"),
            Self::CapabilityNotGranted => write!(f, "capability not granted by tier"),
        }
    }
}

/// The outcome of an access check.
///
/// A denial is a normal outcome, not an error: the calling UI renders the
/// machine-readable reason ("requires full access" vs "connection revoked").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    /// The action may proceed.
    Allow,
    /// The action must not proceed.
    Deny(DenyReason),
}

impl AccessDecision {
    /// Whether the action may proceed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// The denial reason, if denied.
    #[must_use]
    pub fn deny_reason(&self) -> Option<DenyReason> {
        match self {
            Self::Allow => None,
            Self::Deny(reason) => Some(*reason),
        }
    }
}
