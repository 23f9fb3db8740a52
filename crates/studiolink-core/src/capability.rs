//! The closed set of atomic permissions.

use serde::{Deserialize, Serialize};

/// An atomic, named permission checked against a relationship's frozen tier.
///
/// The set is closed: collaborator code matches on it exhaustively, so a new
/// capability is a deliberate, reviewed change everywhere it is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Read dashboard statistics.
    ViewStatistics,
    /// Read published and scheduled content.
    ViewContent,
    /// Read earnings and payout figures.
    ViewFinancials,
    /// Create and schedule content drafts.
    PlanContent,
    /// Reply to and moderate fan interactions.
    ManageFanInteractions,
    /// Change stream configuration (titles, overlays, schedules).
    EditStreamSettings,
    /// Edit or remove existing content.
    EditContent,
    /// Change account-level platform settings.
    ManagePlatformSettings,
    /// Manage payout methods and financial settings.
    ManageFinancials,
    /// Go live on the creator's channel. Reserved to the creator;
    /// no delegation tier ever grants this.
    StartBroadcast,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ViewStatistics => "view_statistics",
            Self::ViewContent => "view_content",
            Self::ViewFinancials => "view_financials",
            Self::PlanContent => "plan_content",
            Self::ManageFanInteractions => "manage_fan_interactions",
            Self::EditStreamSettings => "edit_stream_settings",
            Self::EditContent => "edit_content",
            Self::ManagePlatformSettings => "manage_platform_settings",
            Self::ManageFinancials => "manage_financials",
            Self::StartBroadcast => "start_broadcast",
        };
        write!(f, "{name}")
    }
}

impl Capability {
    /// Every capability, including [`Capability::StartBroadcast`].
    ///
    /// Used by invariant tests to sweep the whole set; tier sets are defined
    /// independently in the tier module.
    pub const ALL: &'static [Self] = &[
        Self::ViewStatistics,
        Self::ViewContent,
        Self::ViewFinancials,
        Self::PlanContent,
        Self::ManageFanInteractions,
        Self::EditStreamSettings,
        Self::EditContent,
        Self::ManagePlatformSettings,
        Self::ManageFinancials,
        Self::StartBroadcast,
    ];
}
