//! Cached response and statistics models.

// Author: kelexine (https://github.com/kelexine)

use bytes::Bytes;
use chrono::{DateTime, Utc};

/// A response held in a cache store, cloned out on every hit.
#[derive(Debug, Clone)]
pub struct CachedResponse {
    /// HTTP status code of the stored response.
    pub status: u16,
    /// Response headers, in arrival order.
    pub headers: Vec<(String, String)>,
    /// Response body bytes.
    pub body: Bytes,
    /// When the entry was stored.
    pub stored_at: DateTime<Utc>,
}

impl CachedResponse {
    /// Build an entry from response parts, stamped with the current time.
    pub fn new(status: u16, headers: Vec<(String, String)>, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
            stored_at: Utc::now(),
        }
    }
}

/// Statistics for cache operations.
#[derive(Debug, Default, Clone)]
pub struct CacheStats {
    /// Number of successful cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Number of entries written.
    pub puts: u64,
    /// Number of runtime entries evicted by the LRU bound.
    pub evictions: u64,
}
