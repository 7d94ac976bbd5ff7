// Store registry - the named cache inventory
// Author: kelexine (https://github.com/kelexine)

use crate::cache::store::CacheStore;
use crate::config::CacheConfig;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// The inventory of named cache stores.
///
/// Activation enumerates this inventory and deletes every store whose
/// name does not match the current versioned store name, so after
/// activation exactly one store remains.
pub struct StoreRegistry {
    config: CacheConfig,
    stores: RwLock<HashMap<String, Arc<CacheStore>>>,
}

impl StoreRegistry {
    /// Create an empty registry; stores are created on first open.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            stores: RwLock::new(HashMap::new()),
        }
    }

    /// Open the store with the given name, creating it if absent.
    pub async fn open(&self, name: &str) -> Arc<CacheStore> {
        let mut stores = self.stores.write().await;
        if let Some(store) = stores.get(name) {
            return store.clone();
        }
        debug!("Opening cache store: {}", name);
        let store = Arc::new(CacheStore::new(name, &self.config));
        stores.insert(name.to_string(), store.clone());
        store
    }

    /// Enumerate the names of all existing stores.
    pub async fn names(&self) -> Vec<String> {
        self.stores.read().await.keys().cloned().collect()
    }

    /// Delete the named store. Returns whether a store was removed.
    pub async fn delete(&self, name: &str) -> bool {
        let removed = self.stores.write().await.remove(name).is_some();
        if removed {
            debug!("Deleted cache store: {}", name);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_is_idempotent() {
        let registry = StoreRegistry::new(CacheConfig::default());

        let a = registry.open("report-viewer-cache-v1").await;
        let b = registry.open("report-viewer-cache-v1").await;
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.names().await, vec!["report-viewer-cache-v1"]);
    }

    #[tokio::test]
    async fn test_delete_removes_store() {
        let registry = StoreRegistry::new(CacheConfig::default());

        registry.open("report-viewer-cache-v1").await;
        assert!(registry.delete("report-viewer-cache-v1").await);
        assert!(!registry.delete("report-viewer-cache-v1").await);
        assert!(registry.names().await.is_empty());
    }
}
