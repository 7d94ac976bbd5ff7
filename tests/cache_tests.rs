// Simplified cache tests - testing only public APIs
// Author: kelexine (https://github.com/kelexine)

use bytes::Bytes;
use reportgate::cache::{CachedResponse, CacheStore, StoreRegistry};
use reportgate::config::CacheConfig;

#[tokio::test]
async fn test_cache_stats_initialization() {
    let store = CacheStore::new("report-viewer-cache-v1", &CacheConfig::default());
    let stats = store.stats().await;

    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 0);
    assert_eq!(stats.puts, 0);
    assert_eq!(stats.evictions, 0);
}

#[test]
fn test_cache_config_defaults() {
    let config = CacheConfig::default();

    assert_eq!(config.store_prefix, "report-viewer-cache");
    assert_eq!(config.version, "v1");
    assert_eq!(config.max_runtime_entries, 256);
    assert!(config.enabled); // Should be enabled by default
}

#[test]
fn test_store_name_is_version_suffixed() {
    let config = CacheConfig {
        store_prefix: "report-viewer-cache".to_string(),
        version: "v7".to_string(),
        ..CacheConfig::default()
    };

    assert_eq!(config.store_name(), "report-viewer-cache-v7");
}

#[tokio::test]
async fn test_bootstrap_entry_round_trip() {
    let store = CacheStore::new("report-viewer-cache-v1", &CacheConfig::default());

    let entry = CachedResponse::new(
        200,
        vec![("content-type".to_string(), "text/css".to_string())],
        Bytes::from("body { margin: 0 }"),
    );
    store
        .insert_bootstrap("http://origin.test/styles.css", entry)
        .await
        .unwrap();

    let hit = store.lookup("http://origin.test/styles.css").await.unwrap();
    assert_eq!(hit.status, 200);
    assert_eq!(hit.body, Bytes::from("body { margin: 0 }"));
    assert_eq!(hit.headers[0].1, "text/css");
}

#[tokio::test]
async fn test_registry_open_names_delete() {
    let registry = StoreRegistry::new(CacheConfig::default());

    registry.open("report-viewer-cache-v1").await;
    registry.open("report-viewer-cache-v2").await;

    let mut names = registry.names().await;
    names.sort();
    assert_eq!(
        names,
        vec!["report-viewer-cache-v1".to_string(), "report-viewer-cache-v2".to_string()]
    );

    assert!(registry.delete("report-viewer-cache-v1").await);
    assert_eq!(registry.names().await, vec!["report-viewer-cache-v2".to_string()]);
}
