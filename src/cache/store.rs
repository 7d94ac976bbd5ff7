// Named cache store - bootstrap and runtime entry populations
// Author: kelexine (https://github.com/kelexine)

use crate::cache::models::{CacheStats, CachedResponse};
use crate::config::CacheConfig;
use crate::error::{GatewayError, Result};
use lru::LruCache;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use tokio::sync::RwLock;
use tracing::debug;

/// A single named store of URL → response entries.
///
/// Entries come in two populations: bootstrap entries inserted at install
/// time and never evicted, and runtime entries inserted on first
/// successful fetch and bounded by an LRU capacity.
pub struct CacheStore {
    name: String,
    enabled: bool,
    bootstrap: RwLock<HashMap<String, CachedResponse>>,
    runtime: RwLock<LruCache<String, CachedResponse>>,
    stats: RwLock<CacheStats>,
}

impl CacheStore {
    /// Create an empty store named per the given configuration.
    pub fn new(name: impl Into<String>, config: &CacheConfig) -> Self {
        let capacity =
            NonZeroUsize::new(config.max_runtime_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            name: name.into(),
            enabled: config.enabled,
            bootstrap: RwLock::new(HashMap::new()),
            runtime: RwLock::new(LruCache::new(capacity)),
            stats: RwLock::new(CacheStats::default()),
        }
    }

    /// The versioned store name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a URL, recording a hit or miss.
    ///
    /// Bootstrap entries take precedence over runtime entries; a runtime
    /// hit refreshes the entry's LRU position.
    pub async fn lookup(&self, url: &str) -> Option<CachedResponse> {
        if let Some(entry) = self.bootstrap.read().await.get(url) {
            debug!("Bootstrap cache hit: {}", url);
            self.stats.write().await.hits += 1;
            return Some(entry.clone());
        }

        if let Some(entry) = self.runtime.write().await.get(url) {
            debug!("Runtime cache hit: {}", url);
            self.stats.write().await.hits += 1;
            return Some(entry.clone());
        }

        debug!("Cache miss: {}", url);
        self.stats.write().await.misses += 1;
        None
    }

    /// Whether the store holds an entry for the URL. Does not touch
    /// statistics or LRU order.
    pub async fn contains(&self, url: &str) -> bool {
        self.bootstrap.read().await.contains_key(url)
            || self.runtime.read().await.contains(url)
    }

    /// Insert a bootstrap entry. Bootstrap entries are exempt from
    /// eviction so the viewer shell stays servable offline.
    pub async fn insert_bootstrap(&self, url: impl Into<String>, entry: CachedResponse) -> Result<()> {
        if !self.enabled {
            return Err(GatewayError::CacheWrite("caching disabled".to_string()));
        }
        self.bootstrap.write().await.insert(url.into(), entry);
        self.stats.write().await.puts += 1;
        Ok(())
    }

    /// Insert a runtime entry, evicting the least recently used runtime
    /// entry when the configured capacity is reached.
    pub async fn insert_runtime(&self, url: impl Into<String>, entry: CachedResponse) -> Result<()> {
        if !self.enabled {
            return Err(GatewayError::CacheWrite("caching disabled".to_string()));
        }
        let url = url.into();

        // A URL already in the bootstrap population is refreshed there,
        // keeping it exempt from eviction.
        let mut bootstrap = self.bootstrap.write().await;
        if bootstrap.contains_key(&url) {
            bootstrap.insert(url, entry);
            self.stats.write().await.puts += 1;
            return Ok(());
        }
        drop(bootstrap);

        let evicted = self.runtime.write().await.push(url.clone(), entry);
        let mut stats = self.stats.write().await;
        stats.puts += 1;
        if let Some((old_url, _)) = evicted {
            if old_url != url {
                debug!("Evicted runtime entry: {}", old_url);
                stats.evictions += 1;
            }
        }
        Ok(())
    }

    /// Total number of entries across both populations.
    pub async fn entry_count(&self) -> usize {
        self.bootstrap.read().await.len() + self.runtime.read().await.len()
    }

    /// Get cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.stats.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn entry(body: &str) -> CachedResponse {
        CachedResponse::new(200, vec![], Bytes::from(body.to_string()))
    }

    fn config(max: usize) -> CacheConfig {
        CacheConfig {
            max_runtime_entries: max,
            ..CacheConfig::default()
        }
    }

    #[tokio::test]
    async fn test_lookup_records_hits_and_misses() {
        let store = CacheStore::new("report-viewer-cache-v1", &config(8));

        assert!(store.lookup("/styles.css").await.is_none());
        store
            .insert_bootstrap("/styles.css", entry("body{}"))
            .await
            .unwrap();
        assert!(store.lookup("/styles.css").await.is_some());

        let stats = store.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.puts, 1);
    }

    #[tokio::test]
    async fn test_runtime_eviction_spares_bootstrap() {
        let store = CacheStore::new("report-viewer-cache-v1", &config(2));

        store.insert_bootstrap("/", entry("shell")).await.unwrap();
        store.insert_runtime("/a.png", entry("a")).await.unwrap();
        store.insert_runtime("/b.png", entry("b")).await.unwrap();
        store.insert_runtime("/c.png", entry("c")).await.unwrap();

        // /a.png was least recently used and the capacity is 2
        assert!(!store.contains("/a.png").await);
        assert!(store.contains("/b.png").await);
        assert!(store.contains("/c.png").await);
        assert!(store.contains("/").await);
        assert_eq!(store.stats().await.evictions, 1);
    }

    #[tokio::test]
    async fn test_disabled_store_rejects_writes() {
        let cfg = CacheConfig {
            enabled: false,
            ..CacheConfig::default()
        };
        let store = CacheStore::new("report-viewer-cache-v1", &cfg);

        let err = store.insert_runtime("/x", entry("x")).await.unwrap_err();
        assert!(matches!(err, GatewayError::CacheWrite(_)));
        assert!(!store.contains("/x").await);
    }

    #[tokio::test]
    async fn test_runtime_insert_refreshes_bootstrap_entry() {
        let store = CacheStore::new("report-viewer-cache-v1", &config(1));

        store.insert_bootstrap("/index.html", entry("old")).await.unwrap();
        store.insert_runtime("/index.html", entry("new")).await.unwrap();

        let hit = store.lookup("/index.html").await.unwrap();
        assert_eq!(hit.body, Bytes::from("new"));
        // Still exempt from eviction
        store.insert_runtime("/a", entry("a")).await.unwrap();
        store.insert_runtime("/b", entry("b")).await.unwrap();
        assert!(store.contains("/index.html").await);
    }
}
