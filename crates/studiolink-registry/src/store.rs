//! Typed persistence layer over the [`KvStore`] seam.
//!
//! Records are JSON documents in namespaced keyspaces. Monotonic key state
//! lives in *marker* namespaces rather than inside the key record:
//!
//! - `registry:keys:revoked`: presence means the key is revoked
//! - `registry:redemptions`: key id → the creator who redeemed it
//!
//! Markers are the source of truth and are overlaid onto records at read
//! time. The key record itself is only rewritten for usage counters, so the
//! one remaining read-modify-write race is the benign counter one; the
//! redemption marker is written with an atomic insert and settles the only
//! race that matters.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use studiolink_core::{CreatorId, RelationshipId, Studio, StudioId, StudioKeyId};
use studiolink_crypto::SecretHash;
use studiolink_storage::{KvStore, StorageError, StorageResult};

use crate::key::StudioKey;
use crate::relationship::CreatorRelationship;

// -- Namespace constants --

const NS_STUDIOS: &str = "registry:studios";
const NS_KEYS: &str = "registry:keys";
const NS_KEYS_BY_SECRET: &str = "registry:keys:by-secret";
const NS_KEYS_REVOKED: &str = "registry:keys:revoked";
const NS_REDEMPTIONS: &str = "registry:redemptions";
const NS_RELATIONSHIPS: &str = "registry:relationships";
const NS_RELATIONSHIPS_BY_KEY: &str = "registry:relationships:by-key";

fn encode<T: Serialize>(value: &T) -> StorageResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| StorageError::Serialization(e.to_string()))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> StorageResult<T> {
    serde_json::from_slice(bytes).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Typed access to registry state through any [`KvStore`] backend.
///
/// This is a dumb persistence layer: every rule about *when* state may
/// change lives in the registry, which is the sole writer.
pub struct RegistryStore {
    kv: Arc<dyn KvStore>,
}

impl RegistryStore {
    /// Create a store over a KV backend.
    #[must_use]
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    // -- Studios --

    /// Persist a studio record.
    pub async fn put_studio(&self, studio: &Studio) -> StorageResult<()> {
        self.kv
            .set(NS_STUDIOS, &studio.id.0.to_string(), encode(studio)?)
            .await
    }

    /// Load a studio by id.
    pub async fn studio(&self, id: StudioId) -> StorageResult<Option<Studio>> {
        match self.kv.get(NS_STUDIOS, &id.0.to_string()).await? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    // -- Keys --

    /// Persist a freshly issued key and its secret-hash lookup index.
    pub async fn insert_key(&self, key: &StudioKey) -> StorageResult<()> {
        self.kv
            .set(NS_KEYS, &key.id.0.to_string(), encode(key)?)
            .await?;
        self.kv
            .set(
                NS_KEYS_BY_SECRET,
                &key.secret_hash.to_hex(),
                encode(&key.id)?,
            )
            .await
    }

    /// Load a key by id, with marker state overlaid.
    pub async fn key(&self, id: StudioKeyId) -> StorageResult<Option<StudioKey>> {
        match self.kv.get(NS_KEYS, &id.0.to_string()).await? {
            Some(bytes) => {
                let key = self.overlay_markers(decode(&bytes)?).await?;
                Ok(Some(key))
            },
            None => Ok(None),
        }
    }

    /// Load a key by the hash of a presented secret.
    pub async fn key_by_secret(&self, hash: &SecretHash) -> StorageResult<Option<StudioKey>> {
        let Some(bytes) = self.kv.get(NS_KEYS_BY_SECRET, &hash.to_hex()).await? else {
            return Ok(None);
        };
        let key_id: StudioKeyId = decode(&bytes)?;
        self.key(key_id).await
    }

    /// Atomically claim the redemption of a key for a creator.
    ///
    /// Returns `true` for the single caller that wins; every later or
    /// concurrent caller gets `false`. The marker value records who won.
    pub async fn claim_redemption(
        &self,
        key_id: StudioKeyId,
        creator_id: CreatorId,
    ) -> StorageResult<bool> {
        self.kv
            .put_if_absent(NS_REDEMPTIONS, &key_id.0.to_string(), encode(&creator_id)?)
            .await
    }

    /// Set the revocation marker for a key. Idempotent.
    pub async fn mark_revoked(&self, key_id: StudioKeyId) -> StorageResult<()> {
        self.kv
            .set(NS_KEYS_REVOKED, &key_id.0.to_string(), vec![1u8])
            .await
    }

    /// Bump the usage counters on a key record after an allowed check.
    pub async fn record_usage(&self, key_id: StudioKeyId) -> StorageResult<()> {
        let Some(bytes) = self.kv.get(NS_KEYS, &key_id.0.to_string()).await? else {
            return Err(StorageError::Internal(format!(
                "usage recorded against missing key {key_id}"
            )));
        };
        let mut key: StudioKey = decode(&bytes)?;
        key.usage_count = key.usage_count.saturating_add(1);
        key.last_used_at = Some(studiolink_core::Timestamp::now());
        self.kv
            .set(NS_KEYS, &key_id.0.to_string(), encode(&key)?)
            .await
    }

    /// All keys issued by a studio, markers overlaid.
    pub async fn keys_for_studio(&self, studio_id: StudioId) -> StorageResult<Vec<StudioKey>> {
        let mut keys = Vec::new();
        for id in self.kv.list_keys(NS_KEYS).await? {
            if let Some(bytes) = self.kv.get(NS_KEYS, &id).await? {
                let key: StudioKey = decode(&bytes)?;
                if key.studio_id == studio_id {
                    keys.push(self.overlay_markers(key).await?);
                }
            }
        }
        Ok(keys)
    }

    async fn overlay_markers(&self, mut key: StudioKey) -> StorageResult<StudioKey> {
        let id = key.id.0.to_string();
        if !key.revoked {
            key.revoked = self.kv.get(NS_KEYS_REVOKED, &id).await?.is_some();
        }
        if key.redeemed_by.is_none()
            && let Some(bytes) = self.kv.get(NS_REDEMPTIONS, &id).await?
        {
            key.redeemed_by = Some(decode(&bytes)?);
        }
        Ok(key)
    }

    // -- Relationships --

    /// Persist a relationship record and its by-key index.
    pub async fn put_relationship(&self, rel: &CreatorRelationship) -> StorageResult<()> {
        self.kv
            .set(NS_RELATIONSHIPS, &rel.id.0.to_string(), encode(rel)?)
            .await?;
        // One relationship per key, ever: redemption happens at most once.
        self.kv
            .set(
                NS_RELATIONSHIPS_BY_KEY,
                &rel.key_id.0.to_string(),
                encode(&rel.id)?,
            )
            .await
    }

    /// Load a relationship by id.
    pub async fn relationship(
        &self,
        id: RelationshipId,
    ) -> StorageResult<Option<CreatorRelationship>> {
        match self.kv.get(NS_RELATIONSHIPS, &id.0.to_string()).await? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Load the relationship created by redeeming a key, if any.
    pub async fn relationship_for_key(
        &self,
        key_id: StudioKeyId,
    ) -> StorageResult<Option<CreatorRelationship>> {
        let Some(bytes) = self
            .kv
            .get(NS_RELATIONSHIPS_BY_KEY, &key_id.0.to_string())
            .await?
        else {
            return Ok(None);
        };
        let rel_id: RelationshipId = decode(&bytes)?;
        self.relationship(rel_id).await
    }

    /// All relationships where the given studio is a party.
    pub async fn relationships_for_studio(
        &self,
        studio_id: StudioId,
    ) -> StorageResult<Vec<CreatorRelationship>> {
        self.filter_relationships(|rel| rel.studio_id == studio_id)
            .await
    }

    /// All relationships where the given creator is a party.
    pub async fn relationships_for_creator(
        &self,
        creator_id: CreatorId,
    ) -> StorageResult<Vec<CreatorRelationship>> {
        self.filter_relationships(|rel| rel.creator_id == creator_id)
            .await
    }

    async fn filter_relationships(
        &self,
        keep: impl Fn(&CreatorRelationship) -> bool,
    ) -> StorageResult<Vec<CreatorRelationship>> {
        let mut rels = Vec::new();
        for id in self.kv.list_keys(NS_RELATIONSHIPS).await? {
            if let Some(bytes) = self.kv.get(NS_RELATIONSHIPS, &id).await? {
                let rel: CreatorRelationship = decode(&bytes)?;
                if keep(&rel) {
                    rels.push(rel);
                }
            }
        }
        Ok(rels)
    }
}

impl std::fmt::Debug for RegistryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryStore").finish_non_exhaustive()
    }
}
