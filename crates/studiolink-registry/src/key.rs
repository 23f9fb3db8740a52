//! Studio key records.
//!
//! A key is a capability credential, not an authorization record: beyond
//! "redeemed" and "revoked" it carries no relationship state. The raw secret
//! is not here at all, only its hash, so nothing recoverable ever rests in
//! the store.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use studiolink_core::{CreatorId, PermissionTier, StudioId, StudioKeyId, Timestamp};
use studiolink_crypto::SecretHash;

/// A studio key: a single-redemption, tier-scoped bearer credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioKey {
    /// Unique key identifier.
    pub id: StudioKeyId,
    /// The studio this key belongs to.
    pub studio_id: StudioId,
    /// BLAKE3 digest of the raw secret; the lookup index.
    pub secret_hash: SecretHash,
    /// The tier a redemption of this key will freeze into the relationship.
    pub tier: PermissionTier,
    /// Human label chosen by the studio ("spring onboarding", …).
    pub label: String,
    /// When the key was issued.
    pub created_at: Timestamp,
    /// When the key expires (None = no expiration).
    pub expires_at: Option<Timestamp>,
    /// Whether the studio has revoked this key. Monotonic false → true.
    ///
    /// Authoritative state lives in the store's revocation marker; this
    /// field is overlaid at read time.
    #[serde(default)]
    pub revoked: bool,
    /// The creator who redeemed this key, set at most once.
    ///
    /// Authoritative state lives in the store's redemption marker; this
    /// field is overlaid at read time.
    #[serde(default)]
    pub redeemed_by: Option<CreatorId>,
    /// How many access checks have passed through this key.
    #[serde(default)]
    pub usage_count: u64,
    /// When the key last passed an access check.
    #[serde(default)]
    pub last_used_at: Option<Timestamp>,
}

impl StudioKey {
    /// Create a new unredeemed, unrevoked key.
    ///
    /// `ttl` positivity is the caller's contract; a non-positive duration
    /// yields a key that is already expired (tests lean on this to simulate
    /// clock advance without sleeping).
    #[must_use]
    pub fn new(
        studio_id: StudioId,
        tier: PermissionTier,
        label: impl Into<String>,
        ttl: Option<Duration>,
        secret_hash: SecretHash,
    ) -> Self {
        let expires_at = ttl.map(|d| {
            // chrono DateTime + Duration panics only near the year-262143 bound
            #[allow(clippy::arithmetic_side_effects)]
            let expiry = Utc::now() + d;
            Timestamp::from_datetime(expiry)
        });

        Self {
            id: StudioKeyId::new(),
            studio_id,
            secret_hash,
            tier,
            label: label.into(),
            created_at: Timestamp::now(),
            expires_at,
            revoked: false,
            redeemed_by: None,
            usage_count: 0,
            last_used_at: None,
        }
    }

    /// Whether the key's expiration, if any, is in the past.
    ///
    /// Evaluated lazily against the clock on every call; no cached status.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| exp.is_past())
    }

    /// Whether the key has been redeemed.
    #[must_use]
    pub fn is_redeemed(&self) -> bool {
        self.redeemed_by.is_some()
    }
}
