//! Configuration data structures for the reportgate gateway.
//!
//! This module defines the schema for the application settings, including
//! server parameters, the upstream asset origin, cache store naming, the
//! worker's bootstrap/exclusion lists, and the version stamper.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};

/// The root configuration object for the application.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings (host, port).
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream asset origin settings.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Cache store naming and sizing settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Worker bootstrap and exclusion settings.
    #[serde(default)]
    pub worker: WorkerConfig,

    /// Logging and observability settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Version stamper settings.
    #[serde(default)]
    pub stamper: StamperConfig,
}

/// Settings for the built-in HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The IP address or hostname the server should bind to.
    /// Default: `127.0.0.1`
    #[serde(default = "default_host")]
    pub host: String,

    /// The port number the server should listen on.
    /// Default: `8080`
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Settings for the upstream origin the gateway fronts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the origin serving the viewer's static assets.
    /// Relative request URLs are resolved against this base.
    /// Default: `http://127.0.0.1:8000`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Connection and request timeout in seconds.
    /// Default: `30`
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

/// Settings for the named cache store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether response caching is enabled at all.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Prefix of the versioned store name.
    /// Default: `report-viewer-cache`
    #[serde(default = "default_store_prefix")]
    pub store_prefix: String,

    /// Version tag appended to the store name. Bumping this tag is the
    /// only supported cache invalidation mechanism: activation deletes
    /// every store whose name does not match.
    /// Default: `v1`
    #[serde(default = "default_cache_version")]
    pub version: String,

    /// Maximum number of runtime (non-bootstrap) entries retained per
    /// store. Bootstrap entries are never evicted.
    /// Default: `256`
    #[serde(default = "default_max_runtime_entries")]
    pub max_runtime_entries: usize,
}

impl CacheConfig {
    /// The full versioned store name, e.g. `report-viewer-cache-v1`.
    pub fn store_name(&self) -> String {
        format!("{}-{}", self.store_prefix, self.version)
    }
}

/// Settings for the worker lifecycle and fetch policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Assets fetched and cached at install time so the viewer shell can
    /// be served with no network access. Relative URLs resolve against
    /// the upstream base.
    #[serde(default = "default_bootstrap_assets")]
    pub bootstrap_assets: Vec<String>,

    /// Host substrings excluded from caching entirely. Requests whose
    /// URL contains any of these bypass the cache in both directions.
    /// Default: the embedded report provider.
    #[serde(default = "default_excluded_hosts")]
    pub excluded_hosts: Vec<String>,

    /// Whether a freshly installed worker generation activates without
    /// waiting for the previous generation to be released.
    /// Default: `true`
    #[serde(default = "default_true")]
    pub skip_waiting: bool,
}

/// Settings for application logging and output format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level (`trace`, `debug`, `info`, `warn`, `error`).
    /// Default: `info`
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for logs (`pretty`, `json`, `compact`).
    /// Default: `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Settings for the deploy-time version stamper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StamperConfig {
    /// Version string written into `?v=` asset references.
    /// Default: `1.0`
    #[serde(default = "default_stamp_version")]
    pub version: String,

    /// HTML files to rewrite in place.
    /// Default: `["index.html"]`
    #[serde(default = "default_stamp_files")]
    pub files: Vec<String>,
}

// Default trait implementations linking to custom logic

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            store_prefix: default_store_prefix(),
            version: default_cache_version(),
            max_runtime_entries: default_max_runtime_entries(),
        }
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            bootstrap_assets: default_bootstrap_assets(),
            excluded_hosts: default_excluded_hosts(),
            skip_waiting: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for StamperConfig {
    fn default() -> Self {
        Self {
            version: default_stamp_version(),
            files: default_stamp_files(),
        }
    }
}

// Helper functions for serde defaults and shared constants
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_store_prefix() -> String {
    "report-viewer-cache".to_string()
}

fn default_cache_version() -> String {
    "v1".to_string()
}

fn default_max_runtime_entries() -> usize {
    256
}

fn default_bootstrap_assets() -> Vec<String> {
    vec![
        "/".to_string(),
        "/index.html".to_string(),
        "/styles.css".to_string(),
        "/script.js".to_string(),
        "https://fonts.googleapis.com/css2?family=Roboto:wght@300;400;500;700&display=swap"
            .to_string(),
        "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css".to_string(),
    ]
}

fn default_excluded_hosts() -> Vec<String> {
    vec!["powerbi.com".to_string()]
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_stamp_version() -> String {
    "1.0".to_string()
}

fn default_stamp_files() -> Vec<String> {
    vec!["index.html".to_string()]
}
