//! Common identifier and timestamp types.
//!
//! Every entity id is a uuid-backed newtype with a short, prefixed `Display`
//! form for logs. Full uuids are used as storage keys; the display form is
//! for humans only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A UTC timestamp.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    /// The current time.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Wrap an existing datetime.
    #[must_use]
    pub const fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Whether this timestamp is strictly in the past.
    #[must_use]
    pub fn is_past(&self) -> bool {
        self.0 < Utc::now()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident, $prefix:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a fresh random id.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wrap an existing uuid.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, ":{}"), &self.0.to_string()[..8])
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a studio.
    StudioId,
    "studio"
);

entity_id!(
    /// Unique identifier for a creator. The creator entity itself lives
    /// outside this core; only its id crosses the boundary.
    CreatorId,
    "creator"
);

entity_id!(
    /// Unique identifier for a studio key.
    StudioKeyId,
    "key"
);

entity_id!(
    /// Unique identifier for a studio-creator relationship.
    RelationshipId,
    "rel"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(StudioId::new(), StudioId::new());
        assert_ne!(StudioKeyId::new(), StudioKeyId::new());
    }

    #[test]
    #[allow(clippy::arithmetic_side_effects)]
    fn test_display_prefix() {
        let id = RelationshipId::new();
        let shown = id.to_string();
        assert!(shown.starts_with("rel:"));
        assert_eq!(shown.len(), "rel:".len() + 8);
    }

    #[test]
    #[allow(clippy::arithmetic_side_effects)]
    fn test_timestamp_ordering() {
        let past = Timestamp::from_datetime(Utc::now() - chrono::Duration::seconds(5));
        let now = Timestamp::now();
        assert!(past < now);
        assert!(past.is_past());
    }

    #[test]
    fn test_id_serde_roundtrip() {
        let id = StudioId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: StudioId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
