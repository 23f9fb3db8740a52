//! Permission tiers and the capability model.
//!
//! A tier is a pure value, not an entity: it deterministically maps to a
//! capability set. The sets are `const` slices and strictly nested
//! (View ⊂ Support ⊂ Full), and none of them contains
//! [`Capability::StartBroadcast`]: going live stays with the creator.

use serde::{Deserialize, Serialize};

use crate::capability::Capability;

/// Capabilities granted by [`PermissionTier::View`].
const VIEW_CAPABILITIES: &[Capability] = &[Capability::ViewStatistics, Capability::ViewContent];

/// Capabilities granted by [`PermissionTier::Support`].
const SUPPORT_CAPABILITIES: &[Capability] = &[
    Capability::ViewStatistics,
    Capability::ViewContent,
    Capability::PlanContent,
    Capability::ManageFanInteractions,
];

/// Capabilities granted by [`PermissionTier::Full`].
///
/// Everything except [`Capability::StartBroadcast`].
const FULL_CAPABILITIES: &[Capability] = &[
    Capability::ViewStatistics,
    Capability::ViewContent,
    Capability::ViewFinancials,
    Capability::PlanContent,
    Capability::ManageFanInteractions,
    Capability::EditStreamSettings,
    Capability::EditContent,
    Capability::ManagePlatformSettings,
    Capability::ManageFinancials,
];

/// A named, ordered capability set. Ordering follows declaration order:
/// `View < Support < Full`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PermissionTier {
    /// Read-only visibility into statistics and content.
    View,
    /// View plus content planning and fan interaction handling.
    Support,
    /// Everything a studio can be delegated. Starting a broadcast is not
    /// delegable and stays outside even this tier.
    Full,
}

impl PermissionTier {
    /// All tiers, in ascending order.
    pub const ALL: &'static [Self] = &[Self::View, Self::Support, Self::Full];

    /// The capability set this tier grants.
    ///
    /// Pure and total: same tier, same slice, every call.
    #[must_use]
    pub const fn capabilities(self) -> &'static [Capability] {
        match self {
            Self::View => VIEW_CAPABILITIES,
            Self::Support => SUPPORT_CAPABILITIES,
            Self::Full => FULL_CAPABILITIES,
        }
    }

    /// Whether this tier grants a capability.
    #[must_use]
    pub fn grants(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

impl std::fmt::Display for PermissionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::View => write!(f, "view"),
            Self::Support => write!(f, "support"),
            Self::Full => write!(f, "full"),
        }
    }
}

/// A tier label did not match any known tier.
///
/// This is the only way an "invalid tier" can exist: the typed API makes
/// unrecognized tiers unrepresentable, so the error lives at the parsing
/// seam where UI-supplied labels enter the core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized permission tier `{0}`")]
pub struct TierParseError(pub String);

impl std::str::FromStr for PermissionTier {
    type Err = TierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "view" => Ok(Self::View),
            "support" => Ok(Self::Support),
            "full" => Ok(Self::Full),
            _ => Err(TierParseError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every tier's set must be contained in the next tier's set.
    #[test]
    fn test_capability_sets_are_monotonic() {
        for pair in PermissionTier::ALL.windows(2) {
            let (lower, higher) = (pair[0], pair[1]);
            for cap in lower.capabilities() {
                assert!(
                    higher.grants(*cap),
                    "{higher} must grant everything {lower} grants, missing {cap}"
                );
            }
        }
    }

    /// No tier may ever grant `StartBroadcast`.
    #[test]
    fn test_start_broadcast_never_granted() {
        for tier in PermissionTier::ALL {
            assert!(
                !tier.grants(Capability::StartBroadcast),
                "{tier} must not grant start_broadcast"
            );
        }
    }

    #[test]
    fn test_full_grants_everything_else() {
        for cap in Capability::ALL {
            if *cap == Capability::StartBroadcast {
                continue;
            }
            assert!(PermissionTier::Full.grants(*cap));
        }
    }

    #[test]
    fn test_tier_ordering() {
        assert!(PermissionTier::View < PermissionTier::Support);
        assert!(PermissionTier::Support < PermissionTier::Full);
    }

    #[test]
    fn test_parse_labels() {
        assert_eq!("view".parse::<PermissionTier>().unwrap(), PermissionTier::View);
        assert_eq!(" Full ".parse::<PermissionTier>().unwrap(), PermissionTier::Full);
        assert_eq!(
            "admin".parse::<PermissionTier>().unwrap_err(),
            TierParseError("admin".to_string())
        );
    }

    #[test]
    fn test_grants_is_deterministic() {
        for tier in PermissionTier::ALL {
            for cap in Capability::ALL {
                assert_eq!(tier.grants(*cap), tier.grants(*cap));
            }
        }
    }
}
