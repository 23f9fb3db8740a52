//! Namespaced key-value storage.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::StorageResult;

/// A namespaced byte-level key-value store.
///
/// Implementations must make every method atomic with respect to the others;
/// [`put_if_absent`](Self::put_if_absent) in particular must be a single
/// conditional write at the backend, because the registry uses it to settle
/// the at-most-one-redemption race.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Get a value.
    async fn get(&self, namespace: &str, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Set a value, overwriting any existing one.
    async fn set(&self, namespace: &str, key: &str, value: Vec<u8>) -> StorageResult<()>;

    /// Insert a value only if the key is currently absent.
    ///
    /// Returns `true` if this call inserted the value, `false` if the key
    /// already existed (in which case the stored value is untouched).
    async fn put_if_absent(
        &self,
        namespace: &str,
        key: &str,
        value: Vec<u8>,
    ) -> StorageResult<bool>;

    /// Delete a value. Deleting an absent key is not an error.
    async fn delete(&self, namespace: &str, key: &str) -> StorageResult<()>;

    /// List all keys in a namespace.
    async fn list_keys(&self, namespace: &str) -> StorageResult<Vec<String>>;
}

/// In-memory [`KvStore`] for tests and single-process deployments.
///
/// A single `RwLock` over all namespaces keeps `put_if_absent` trivially
/// atomic. Fine at registry scale; a real deployment swaps in an embedded
/// ACID backend behind the same trait.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    namespaces: RwLock<HashMap<String, HashMap<String, Vec<u8>>>>,
}

impl MemoryKvStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, namespace: &str, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let namespaces = self.namespaces.read().await;
        Ok(namespaces
            .get(namespace)
            .and_then(|ns| ns.get(key))
            .cloned())
    }

    async fn set(&self, namespace: &str, key: &str, value: Vec<u8>) -> StorageResult<()> {
        let mut namespaces = self.namespaces.write().await;
        namespaces
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    async fn put_if_absent(
        &self,
        namespace: &str,
        key: &str,
        value: Vec<u8>,
    ) -> StorageResult<bool> {
        let mut namespaces = self.namespaces.write().await;
        let ns = namespaces.entry(namespace.to_string()).or_default();
        if ns.contains_key(key) {
            return Ok(false);
        }
        ns.insert(key.to_string(), value);
        Ok(true)
    }

    async fn delete(&self, namespace: &str, key: &str) -> StorageResult<()> {
        let mut namespaces = self.namespaces.write().await;
        if let Some(ns) = namespaces.get_mut(namespace) {
            ns.remove(key);
        }
        Ok(())
    }

    async fn list_keys(&self, namespace: &str) -> StorageResult<Vec<String>> {
        let namespaces = self.namespaces.read().await;
        Ok(namespaces
            .get(namespace)
            .map(|ns| ns.keys().cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_get_set_delete() {
        let store = MemoryKvStore::new();

        assert!(store.get("ns", "a").await.unwrap().is_none());

        store.set("ns", "a", b"one".to_vec()).await.unwrap();
        assert_eq!(store.get("ns", "a").await.unwrap(), Some(b"one".to_vec()));

        // Namespaces are isolated.
        assert!(store.get("other", "a").await.unwrap().is_none());

        store.delete("ns", "a").await.unwrap();
        assert!(store.get("ns", "a").await.unwrap().is_none());

        // Deleting an absent key is fine.
        store.delete("ns", "missing").await.unwrap();
    }

    #[tokio::test]
    async fn test_put_if_absent() {
        let store = MemoryKvStore::new();

        assert!(store.put_if_absent("ns", "k", b"first".to_vec()).await.unwrap());
        assert!(!store.put_if_absent("ns", "k", b"second".to_vec()).await.unwrap());

        // Loser must not have overwritten the winner.
        assert_eq!(store.get("ns", "k").await.unwrap(), Some(b"first".to_vec()));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_put_if_absent_is_atomic_under_contention() {
        let store = Arc::new(MemoryKvStore::new());

        let mut handles = Vec::new();
        for i in 0..50u32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .put_if_absent("race", "slot", i.to_le_bytes().to_vec())
                    .await
                    .unwrap()
            }));
        }

        let mut outcomes = Vec::new();
        for handle in handles {
            outcomes.push(handle.await.unwrap());
        }
        assert_eq!(outcomes.iter().filter(|won| **won).count(), 1);
    }

    #[tokio::test]
    async fn test_list_keys() {
        let store = MemoryKvStore::new();
        store.set("ns", "a", vec![1]).await.unwrap();
        store.set("ns", "b", vec![2]).await.unwrap();

        let mut keys = store.list_keys("ns").await.unwrap();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);

        assert!(store.list_keys("empty").await.unwrap().is_empty());
    }
}
