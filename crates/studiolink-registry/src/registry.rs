//! The registry, sole writer of keys, studios, and relationships.
//!
//! Every collaborator-facing operation lives here:
//!
//! 1. A studio issues a key scoped to a tier (and optionally a TTL)
//! 2. A creator redeems the raw secret; exactly one redemption can win
//! 3. The creator approves or rejects the resulting Pending relationship
//! 4. Every studio-side action calls [`StudioRegistry::check`] first
//!
//! Expiration is never swept by a timer: it is evaluated lazily whenever a
//! relationship is loaded, which trades slightly stale "active" status for
//! the absence of a whole class of scheduler bugs.

use std::sync::Arc;

use chrono::Duration;

use studiolink_core::{
    Capability, CreatorId, RelationshipId, Studio, StudioId, StudioKeyId, StudioStatus,
    PermissionTier,
};
use studiolink_crypto::RawSecret;
use studiolink_storage::{KvStore, MemoryKvStore};

use crate::access::{AccessDecision, DenyReason};
use crate::error::{RegistryError, RegistryResult};
use crate::key::StudioKey;
use crate::relationship::{CreatorRelationship, RelationshipStatus};
use crate::store::RegistryStore;
use crate::validate::ValidationOutcome;

/// The delegated-access registry.
///
/// Cheap to share behind an `Arc`; all interior state lives in the store.
pub struct StudioRegistry {
    store: RegistryStore,
}

impl StudioRegistry {
    /// Create a registry over a KV backend.
    #[must_use]
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self {
            store: RegistryStore::new(kv),
        }
    }

    /// Create a registry over an in-memory store (tests, single process).
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryKvStore::new()))
    }

    /// Direct access to the typed store (read-side collaborators).
    #[must_use]
    pub fn store(&self) -> &RegistryStore {
        &self.store
    }

    // -- Studios --

    /// Register a new active studio.
    ///
    /// # Errors
    ///
    /// Returns a storage error if persistence fails.
    pub async fn register_studio(
        &self,
        name: impl Into<String>,
        contact: impl Into<String>,
        commission_rate: f64,
    ) -> RegistryResult<Studio> {
        let studio = Studio::new(name, contact, commission_rate);
        self.store.put_studio(&studio).await?;
        tracing::info!(studio = %studio.id, name = %studio.name, "registered studio");
        Ok(studio)
    }

    /// Change a studio's operating status.
    ///
    /// Suspension gates future key issuance only; existing keys and
    /// relationships are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for an unknown studio.
    pub async fn set_studio_status(
        &self,
        studio_id: StudioId,
        status: StudioStatus,
    ) -> RegistryResult<Studio> {
        let Some(mut studio) = self.store.studio(studio_id).await? else {
            return Err(RegistryError::NotFound(studio_id.to_string()));
        };
        studio.status = status;
        self.store.put_studio(&studio).await?;
        tracing::info!(studio = %studio_id, %status, "changed studio status");
        Ok(studio)
    }

    /// Load a studio by id.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend fails.
    pub async fn studio(&self, studio_id: StudioId) -> RegistryResult<Option<Studio>> {
        Ok(self.store.studio(studio_id).await?)
    }

    // -- Token issuer --

    /// Issue a new key for a studio.
    ///
    /// Returns the persisted record plus the raw secret, which is rendered
    /// here exactly once and never recoverable afterwards. `ttl` positivity
    /// is the caller's contract; a non-positive duration yields a key that
    /// is already expired.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidStudio`] if the studio is missing or
    /// suspended.
    pub async fn issue_key(
        &self,
        studio_id: StudioId,
        tier: PermissionTier,
        label: impl Into<String>,
        ttl: Option<Duration>,
    ) -> RegistryResult<(StudioKey, RawSecret)> {
        match self.store.studio(studio_id).await? {
            Some(studio) if studio.is_active() => {},
            _ => return Err(RegistryError::InvalidStudio(studio_id)),
        }

        let secret = RawSecret::generate();
        let key = StudioKey::new(studio_id, tier, label, ttl, secret.hash());
        self.store.insert_key(&key).await?;

        tracing::info!(
            key = %key.id,
            studio = %studio_id,
            %tier,
            expires = %key.expires_at.map(|t| t.to_string()).unwrap_or_else(|| "never".into()),
            "issued studio key"
        );
        Ok((key, secret))
    }

    // -- Token validator --

    /// Decide whether a presented secret is usable, and why not if not.
    ///
    /// Read-only: failed or probing validations never touch usage counters.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend fails; an unparseable or
    /// unknown secret is a `NotFound` *outcome*, not an error.
    pub async fn validate(&self, raw_secret: &str) -> RegistryResult<ValidationOutcome> {
        let Ok(secret) = RawSecret::parse(raw_secret) else {
            // Malformed input gets the same answer as an unknown secret:
            // nothing about the namespace is worth leaking.
            return Ok(ValidationOutcome::not_found());
        };
        match self.store.key_by_secret(&secret.hash()).await? {
            Some(key) => Ok(ValidationOutcome::of_key(key)),
            None => Ok(ValidationOutcome::not_found()),
        }
    }

    // -- Relationship registry --

    /// Redeem a raw secret for a creator, creating a Pending relationship.
    ///
    /// The winner is decided by one atomic conditional write on the
    /// redemption marker: under N concurrent attempts exactly one succeeds
    /// and the rest report [`RegistryError::AlreadyRedeemed`].
    ///
    /// # Errors
    ///
    /// Returns the validation failure ([`RegistryError::NotFound`],
    /// [`RegistryError::Revoked`], [`RegistryError::Expired`],
    /// [`RegistryError::AlreadyRedeemed`]) when the key is not usable.
    pub async fn redeem(
        &self,
        raw_secret: &str,
        creator_id: CreatorId,
    ) -> RegistryResult<CreatorRelationship> {
        let key = self.validate(raw_secret).await?.into_usable_key()?;

        if !self.store.claim_redemption(key.id, creator_id).await? {
            tracing::warn!(key = %key.id, creator = %creator_id, "lost redemption race");
            return Err(RegistryError::AlreadyRedeemed(key.id));
        }

        // Tier is copied by value here: this is the freeze. Whatever happens
        // to the key afterwards, the relationship's tier never moves.
        let rel = CreatorRelationship::new(key.studio_id, creator_id, key.tier, key.id);
        self.store.put_relationship(&rel).await?;

        tracing::info!(
            relationship = %rel.id,
            key = %key.id,
            studio = %key.studio_id,
            creator = %creator_id,
            tier = %rel.tier,
            "key redeemed; relationship pending approval"
        );
        Ok(rel)
    }

    /// Creator approves a Pending relationship: Pending → Active.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidTransition`] unless the relationship
    /// is Pending, and [`RegistryError::KeyExpired`] if the originating key
    /// expired before approval: the record stays Pending and a fresh key
    /// must be issued.
    pub async fn approve(&self, relationship_id: RelationshipId) -> RegistryResult<CreatorRelationship> {
        let mut rel = self.require_relationship(relationship_id).await?;
        Self::guard_transition(&rel, RelationshipStatus::Active)?;

        let key = self.require_key(rel.key_id).await?;
        if key.is_expired() {
            tracing::warn!(
                relationship = %rel.id,
                key = %key.id,
                "approval refused: originating key expired before approval"
            );
            return Err(RegistryError::KeyExpired(key.id));
        }

        rel.set_status(RelationshipStatus::Active);
        self.store.put_relationship(&rel).await?;
        tracing::info!(relationship = %rel.id, "relationship approved");
        Ok(rel)
    }

    /// Creator rejects a Pending relationship: Pending → Revoked (terminal).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidTransition`] unless the relationship
    /// is Pending.
    pub async fn reject(&self, relationship_id: RelationshipId) -> RegistryResult<CreatorRelationship> {
        let mut rel = self.require_relationship(relationship_id).await?;
        Self::guard_transition(&rel, RelationshipStatus::Revoked)?;

        rel.set_status(RelationshipStatus::Revoked);
        self.store.put_relationship(&rel).await?;
        tracing::info!(relationship = %rel.id, "relationship rejected by creator");
        Ok(rel)
    }

    /// Creator pauses or resumes an established relationship:
    /// Active ⇄ Inactive only.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidTransition`] from Pending or Revoked
    /// (or when already in the requested state), and
    /// [`RegistryError::KeyExpired`] when resuming under an expired key.
    pub async fn toggle(
        &self,
        relationship_id: RelationshipId,
        active: bool,
    ) -> RegistryResult<CreatorRelationship> {
        // Load through the lazy-downgrade path so an Active record whose key
        // just expired is judged as Inactive, not Active.
        let Some(mut rel) = self.relationship(relationship_id).await? else {
            return Err(RegistryError::NotFound(relationship_id.to_string()));
        };

        let target = if active {
            RelationshipStatus::Active
        } else {
            RelationshipStatus::Inactive
        };
        Self::guard_transition(&rel, target)?;

        if active {
            let key = self.require_key(rel.key_id).await?;
            if key.is_expired() {
                return Err(RegistryError::KeyExpired(key.id));
            }
        }

        rel.set_status(target);
        self.store.put_relationship(&rel).await?;
        tracing::info!(relationship = %rel.id, status = %target, "relationship toggled");
        Ok(rel)
    }

    /// Studio revokes one of its keys. Irreversible, and the
    /// security-critical path: the bound relationship (whatever its status)
    /// cascades to Revoked in the same call.
    ///
    /// Revoking an already-revoked key is a no-op success; the flag is
    /// monotonic and a retry must not fail.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for an unknown key.
    pub async fn revoke_key(&self, key_id: StudioKeyId) -> RegistryResult<()> {
        let key = self.require_key(key_id).await?;
        if key.revoked {
            return Ok(());
        }

        self.store.mark_revoked(key_id).await?;
        tracing::info!(key = %key_id, studio = %key.studio_id, "studio key revoked");

        if let Some(mut rel) = self.store.relationship_for_key(key_id).await?
            && rel.status != RelationshipStatus::Revoked
        {
            let from = rel.status;
            rel.set_status(RelationshipStatus::Revoked);
            self.store.put_relationship(&rel).await?;
            tracing::warn!(
                relationship = %rel.id,
                %from,
                "key revocation cascaded to relationship"
            );
        }
        Ok(())
    }

    /// Load a relationship, applying the lazy expiration downgrade.
    ///
    /// An Active relationship whose originating key has expired (but is not
    /// revoked; revocation cascades eagerly) is downgraded to Inactive
    /// here, on read. A fresh key and redemption restore access; the old
    /// record never becomes Active again by itself.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend fails.
    pub async fn relationship(
        &self,
        relationship_id: RelationshipId,
    ) -> RegistryResult<Option<CreatorRelationship>> {
        match self.store.relationship(relationship_id).await? {
            Some(rel) => Ok(Some(self.refresh(rel).await?)),
            None => Ok(None),
        }
    }

    /// All keys issued by a studio.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend fails.
    pub async fn keys_for_studio(&self, studio_id: StudioId) -> RegistryResult<Vec<StudioKey>> {
        Ok(self.store.keys_for_studio(studio_id).await?)
    }

    /// All relationships for a studio, each with the lazy downgrade applied.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend fails.
    pub async fn relationships_for_studio(
        &self,
        studio_id: StudioId,
    ) -> RegistryResult<Vec<CreatorRelationship>> {
        let mut out = Vec::new();
        for rel in self.store.relationships_for_studio(studio_id).await? {
            out.push(self.refresh(rel).await?);
        }
        Ok(out)
    }

    /// All relationships for a creator, each with the lazy downgrade applied.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backend fails.
    pub async fn relationships_for_creator(
        &self,
        creator_id: CreatorId,
    ) -> RegistryResult<Vec<CreatorRelationship>> {
        let mut out = Vec::new();
        for rel in self.store.relationships_for_creator(creator_id).await? {
            out.push(self.refresh(rel).await?);
        }
        Ok(out)
    }

    /// Set or clear a relationship's commission override.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for an unknown relationship.
    pub async fn set_commission_override(
        &self,
        relationship_id: RelationshipId,
        commission_override: Option<f64>,
    ) -> RegistryResult<CreatorRelationship> {
        let mut rel = self.require_relationship(relationship_id).await?;
        rel.commission_override = commission_override;
        rel.touch();
        self.store.put_relationship(&rel).await?;
        Ok(rel)
    }

    /// Replace a relationship's notes.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for an unknown relationship.
    pub async fn set_notes(
        &self,
        relationship_id: RelationshipId,
        notes: impl Into<String>,
    ) -> RegistryResult<CreatorRelationship> {
        let mut rel = self.require_relationship(relationship_id).await?;
        rel.notes = notes.into();
        rel.touch();
        self.store.put_relationship(&rel).await?;
        Ok(rel)
    }

    // -- Access check --

    /// The single entry point every studio-side action must call.
    ///
    /// Denials are outcomes, not errors: Pending/Inactive/Revoked deny with
    /// [`DenyReason::NotActive`]; an Active relationship whose frozen tier
    /// lacks the capability denies with [`DenyReason::CapabilityNotGranted`],
    /// including `StartBroadcast`, which no tier grants. Usage is recorded
    /// on the originating key only when the check allows.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] for an unknown relationship.
    pub async fn check(
        &self,
        relationship_id: RelationshipId,
        capability: Capability,
    ) -> RegistryResult<AccessDecision> {
        let Some(rel) = self.relationship(relationship_id).await? else {
            return Err(RegistryError::NotFound(relationship_id.to_string()));
        };

        if !rel.is_active() {
            tracing::warn!(
                relationship = %rel.id,
                status = %rel.status,
                %capability,
                "access denied: relationship not active"
            );
            return Ok(AccessDecision::Deny(DenyReason::NotActive));
        }

        if !rel.tier.grants(capability) {
            tracing::warn!(
                relationship = %rel.id,
                tier = %rel.tier,
                %capability,
                "access denied: capability not granted by tier"
            );
            return Ok(AccessDecision::Deny(DenyReason::CapabilityNotGranted));
        }

        self.store.record_usage(rel.key_id).await?;
        Ok(AccessDecision::Allow)
    }

    // -- Internals --

    fn guard_transition(
        rel: &CreatorRelationship,
        to: RelationshipStatus,
    ) -> RegistryResult<()> {
        if rel.status.can_transition_to(to) {
            Ok(())
        } else {
            Err(RegistryError::InvalidTransition {
                relationship_id: rel.id,
                from: rel.status,
                to,
            })
        }
    }

    async fn refresh(&self, mut rel: CreatorRelationship) -> RegistryResult<CreatorRelationship> {
        if rel.status == RelationshipStatus::Active {
            let key = self.require_key(rel.key_id).await?;
            if !key.revoked && key.is_expired() {
                rel.set_status(RelationshipStatus::Inactive);
                self.store.put_relationship(&rel).await?;
                tracing::info!(
                    relationship = %rel.id,
                    key = %key.id,
                    "originating key expired; relationship downgraded to inactive"
                );
            }
        }
        Ok(rel)
    }

    async fn require_relationship(
        &self,
        relationship_id: RelationshipId,
    ) -> RegistryResult<CreatorRelationship> {
        self.store
            .relationship(relationship_id)
            .await?
            .ok_or_else(|| RegistryError::NotFound(relationship_id.to_string()))
    }

    async fn require_key(&self, key_id: StudioKeyId) -> RegistryResult<StudioKey> {
        self.store
            .key(key_id)
            .await?
            .ok_or_else(|| RegistryError::NotFound(key_id.to_string()))
    }
}

impl std::fmt::Debug for StudioRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudioRegistry").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ValidationReason;

    async fn registry_with_studio() -> (StudioRegistry, Studio) {
        let registry = StudioRegistry::in_memory();
        let studio = registry
            .register_studio("Nova", "ops@nova.example", 0.2)
            .await
            .unwrap();
        (registry, studio)
    }

    #[tokio::test]
    async fn test_issue_requires_active_studio() {
        let (registry, studio) = registry_with_studio().await;

        registry
            .set_studio_status(studio.id, StudioStatus::Suspended)
            .await
            .unwrap();

        let err = registry
            .issue_key(studio.id, PermissionTier::View, "blocked", None)
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidStudio(id) if id == studio.id));

        // Unknown studio gets the same answer.
        let err = registry
            .issue_key(StudioId::new(), PermissionTier::View, "ghost", None)
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::InvalidStudio(_)));
    }

    #[tokio::test]
    async fn test_issued_secret_is_opaque() {
        let (registry, studio) = registry_with_studio().await;
        let (key, secret) = registry
            .issue_key(studio.id, PermissionTier::Full, "opaque", None)
            .await
            .unwrap();

        // Nothing recoverable in the plaintext beyond the namespace prefix.
        let body = &secret.expose()[4..];
        assert!(!body.contains(&studio.id.0.to_string()));
        assert!(!body.contains(&key.id.0.to_string()));
        assert!(!body.contains("full"));
    }

    #[tokio::test]
    async fn test_validate_reports_each_state() {
        let (registry, studio) = registry_with_studio().await;

        // Unknown and malformed secrets.
        let outcome = registry.validate("slk_0000").await.unwrap();
        assert_eq!(outcome.reason, ValidationReason::NotFound);
        let outcome = registry.validate("garbage").await.unwrap();
        assert_eq!(outcome.reason, ValidationReason::NotFound);

        // Usable.
        let (key, secret) = registry
            .issue_key(studio.id, PermissionTier::View, "v", None)
            .await
            .unwrap();
        assert!(registry.validate(secret.expose()).await.unwrap().usable());

        // Redeemed.
        registry.redeem(secret.expose(), CreatorId::new()).await.unwrap();
        let outcome = registry.validate(secret.expose()).await.unwrap();
        assert_eq!(outcome.reason, ValidationReason::AlreadyRedeemed);

        // Revoked wins over redeemed.
        registry.revoke_key(key.id).await.unwrap();
        let outcome = registry.validate(secret.expose()).await.unwrap();
        assert_eq!(outcome.reason, ValidationReason::Revoked);
    }

    #[tokio::test]
    async fn test_validate_does_not_touch_usage() {
        let (registry, studio) = registry_with_studio().await;
        let (key, secret) = registry
            .issue_key(studio.id, PermissionTier::View, "v", None)
            .await
            .unwrap();

        registry.validate(secret.expose()).await.unwrap();
        registry.validate(secret.expose()).await.unwrap();

        let loaded = registry.store().key(key.id).await.unwrap().unwrap();
        assert_eq!(loaded.usage_count, 0);
        assert!(loaded.last_used_at.is_none());
    }

    #[tokio::test]
    async fn test_redeem_freezes_tier() {
        let (registry, studio) = registry_with_studio().await;
        let (key, secret) = registry
            .issue_key(studio.id, PermissionTier::Support, "freeze", None)
            .await
            .unwrap();

        let creator = CreatorId::new();
        let rel = registry.redeem(secret.expose(), creator).await.unwrap();

        assert_eq!(rel.status, RelationshipStatus::Pending);
        assert_eq!(rel.tier, PermissionTier::Support);
        assert_eq!(rel.studio_id, studio.id);
        assert_eq!(rel.creator_id, creator);
        assert_eq!(rel.key_id, key.id);

        let loaded = registry.store().key(key.id).await.unwrap().unwrap();
        assert_eq!(loaded.redeemed_by, Some(creator));
    }

    #[tokio::test]
    async fn test_second_redemption_fails() {
        let (registry, studio) = registry_with_studio().await;
        let (key, secret) = registry
            .issue_key(studio.id, PermissionTier::View, "once", None)
            .await
            .unwrap();

        registry.redeem(secret.expose(), CreatorId::new()).await.unwrap();
        let err = registry
            .redeem(secret.expose(), CreatorId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::AlreadyRedeemed(id) if id == key.id));
    }

    #[tokio::test]
    async fn test_approve_and_reject_guard_pending() {
        let (registry, studio) = registry_with_studio().await;
        let (_, secret) = registry
            .issue_key(studio.id, PermissionTier::View, "guard", None)
            .await
            .unwrap();
        let rel = registry.redeem(secret.expose(), CreatorId::new()).await.unwrap();

        let rel = registry.approve(rel.id).await.unwrap();
        assert_eq!(rel.status, RelationshipStatus::Active);

        // Approving twice is a clean failure, not a silent no-op.
        let err = registry.approve(rel.id).await.unwrap_err();
        assert!(matches!(
            err,
            RegistryError::InvalidTransition {
                from: RelationshipStatus::Active,
                to: RelationshipStatus::Active,
                ..
            }
        ));

        // Rejecting an Active relationship is forbidden too.
        let err = registry.reject(rel.id).await.unwrap_err();
        assert!(matches!(err, RegistryError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_reject_is_terminal() {
        let (registry, studio) = registry_with_studio().await;
        let (_, secret) = registry
            .issue_key(studio.id, PermissionTier::View, "reject", None)
            .await
            .unwrap();
        let rel = registry.redeem(secret.expose(), CreatorId::new()).await.unwrap();

        let rel = registry.reject(rel.id).await.unwrap();
        assert_eq!(rel.status, RelationshipStatus::Revoked);

        let err = registry.approve(rel.id).await.unwrap_err();
        assert!(matches!(err, RegistryError::InvalidTransition { .. }));
        let err = registry.toggle(rel.id, true).await.unwrap_err();
        assert!(matches!(err, RegistryError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_toggle_between_active_and_inactive() {
        let (registry, studio) = registry_with_studio().await;
        let (_, secret) = registry
            .issue_key(studio.id, PermissionTier::Support, "toggle", None)
            .await
            .unwrap();
        let rel = registry.redeem(secret.expose(), CreatorId::new()).await.unwrap();

        // Toggling straight from Pending is forbidden.
        let err = registry.toggle(rel.id, false).await.unwrap_err();
        assert!(matches!(err, RegistryError::InvalidTransition { .. }));

        let rel = registry.approve(rel.id).await.unwrap();
        let rel = registry.toggle(rel.id, false).await.unwrap();
        assert_eq!(rel.status, RelationshipStatus::Inactive);
        let rel = registry.toggle(rel.id, true).await.unwrap();
        assert_eq!(rel.status, RelationshipStatus::Active);
    }

    #[tokio::test]
    async fn test_approve_fails_after_key_expiry() {
        let (registry, studio) = registry_with_studio().await;
        let (key, secret) = registry
            .issue_key(
                studio.id,
                PermissionTier::View,
                "expiring",
                Some(Duration::milliseconds(50)),
            )
            .await
            .unwrap();
        let rel = registry.redeem(secret.expose(), CreatorId::new()).await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(80)).await;

        let err = registry.approve(rel.id).await.unwrap_err();
        assert!(matches!(err, RegistryError::KeyExpired(id) if id == key.id));

        // The record stays Pending, awaiting a fresh key instead.
        let rel = registry.relationship(rel.id).await.unwrap().unwrap();
        assert_eq!(rel.status, RelationshipStatus::Pending);
    }

    #[tokio::test]
    async fn test_set_commission_override_and_notes() {
        let (registry, studio) = registry_with_studio().await;
        let (_, secret) = registry
            .issue_key(studio.id, PermissionTier::Full, "terms", None)
            .await
            .unwrap();
        let rel = registry.redeem(secret.expose(), CreatorId::new()).await.unwrap();

        let rel = registry
            .set_commission_override(rel.id, Some(0.15))
            .await
            .unwrap();
        assert_eq!(rel.commission_override, Some(0.15));

        let rel = registry.set_notes(rel.id, "priority creator").await.unwrap();
        assert_eq!(rel.notes, "priority creator");

        // The frozen tier is untouched by record edits.
        assert_eq!(rel.tier, PermissionTier::Full);
    }

    #[tokio::test]
    async fn test_listings() {
        let (registry, studio) = registry_with_studio().await;
        let creator = CreatorId::new();

        let (_, s1) = registry
            .issue_key(studio.id, PermissionTier::View, "one", None)
            .await
            .unwrap();
        registry
            .issue_key(studio.id, PermissionTier::Full, "two", None)
            .await
            .unwrap();
        registry.redeem(s1.expose(), creator).await.unwrap();

        assert_eq!(registry.keys_for_studio(studio.id).await.unwrap().len(), 2);
        assert_eq!(
            registry.relationships_for_studio(studio.id).await.unwrap().len(),
            1
        );
        assert_eq!(
            registry.relationships_for_creator(creator).await.unwrap().len(),
            1
        );
    }
}
