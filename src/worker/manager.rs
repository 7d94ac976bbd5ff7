// Cache worker - lifecycle driver and fetch interception
// Author: kelexine (https://github.com/kelexine)

use crate::cache::{CachedResponse, CacheStore, StoreRegistry};
use crate::config::AppConfig;
use crate::error::{GatewayError, Result};
use crate::metrics;
use crate::worker::fetch::{
    is_cacheable, is_excluded, is_same_origin, resolve_url, FetchResult, RemoteFetch,
};
use crate::worker::lifecycle::{activation_plan, WorkerState};
use crate::worker::messages::ControlMessage;
use futures::future::try_join_all;
use reqwest::Url;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// The cache worker: owns the versioned store, walks the install and
/// activate transitions, and serves every interception request
/// cache-first with network fallback.
pub struct CacheWorker {
    config: AppConfig,
    base: Url,
    registry: Arc<StoreRegistry>,
    store: Arc<CacheStore>,
    state: RwLock<WorkerState>,
    fetcher: Arc<dyn RemoteFetch>,
}

impl CacheWorker {
    /// Construct a worker over the given registry. The versioned store
    /// is opened immediately; the worker starts in Installing.
    pub async fn new(
        config: AppConfig,
        registry: Arc<StoreRegistry>,
        fetcher: Arc<dyn RemoteFetch>,
    ) -> Result<Self> {
        let base = Url::parse(&config.upstream.base_url).map_err(|e| {
            GatewayError::Config(format!(
                "invalid upstream base URL '{}': {}",
                config.upstream.base_url, e
            ))
        })?;
        let store = registry.open(&config.cache.store_name()).await;

        Ok(Self {
            config,
            base,
            registry,
            store,
            state: RwLock::new(WorkerState::Installing),
            fetcher,
        })
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> WorkerState {
        *self.state.read().await
    }

    /// The worker's versioned store.
    pub fn store(&self) -> Arc<CacheStore> {
        self.store.clone()
    }

    /// The store inventory the worker operates on.
    pub fn registry(&self) -> Arc<StoreRegistry> {
        self.registry.clone()
    }

    /// Install: fetch every bootstrap asset concurrently and populate
    /// the store. All-or-nothing: any failed bootstrap fetch fails
    /// install. With `skip_waiting` the worker activates immediately
    /// instead of parking at Installed.
    pub async fn install(&self) -> Result<()> {
        *self.state.write().await = WorkerState::Installing;
        info!(
            "Installing worker: precaching {} bootstrap assets into {}",
            self.config.worker.bootstrap_assets.len(),
            self.store.name()
        );

        let precache = self.config.worker.bootstrap_assets.iter().map(|asset| {
            let store = self.store.clone();
            let fetcher = self.fetcher.clone();
            let base = self.base.clone();
            async move {
                let url = resolve_url(asset, &base)?;
                let resp = fetcher.fetch(url.as_str()).await.map_err(|e| {
                    GatewayError::Install(format!("bootstrap fetch {} failed: {}", url, e))
                })?;
                if resp.status != 200 {
                    return Err(GatewayError::Install(format!(
                        "bootstrap fetch {} returned status {}",
                        url, resp.status
                    )));
                }
                debug!("Precached bootstrap asset: {}", url);
                store
                    .insert_bootstrap(
                        url.as_str(),
                        CachedResponse::new(resp.status, resp.headers, resp.body),
                    )
                    .await
            }
        });
        try_join_all(precache).await?;

        metrics::update_store_entries(self.store.entry_count().await);
        *self.state.write().await = WorkerState::Installed;
        info!("Worker installed");

        if self.config.worker.skip_waiting {
            self.activate().await?;
        }
        Ok(())
    }

    /// Activate: delete every store whose name is not the current
    /// versioned store name, then start controlling fetches.
    pub async fn activate(&self) -> Result<()> {
        *self.state.write().await = WorkerState::Activating;

        let inventory = self.registry.names().await;
        let stale = activation_plan(&inventory, self.store.name());
        for name in &stale {
            self.registry.delete(name).await;
            info!("Deleted stale cache store: {}", name);
        }

        *self.state.write().await = WorkerState::Active;
        info!(
            "Worker active: store {} retained, {} stale stores pruned",
            self.store.name(),
            stale.len()
        );
        Ok(())
    }

    /// Handle a control message. SkipWaiting activates a waiting
    /// generation; an already-active worker treats it as a no-op.
    pub async fn handle_message(&self, msg: ControlMessage) -> Result<WorkerState> {
        match msg {
            ControlMessage::SkipWaiting => {
                let state = self.state().await;
                if state == WorkerState::Installed {
                    info!("skipWaiting received: activating waiting worker");
                    self.activate().await?;
                } else {
                    debug!("skipWaiting received in state {}: no-op", state);
                }
            }
        }
        Ok(self.state().await)
    }

    /// Serve one intercepted request.
    ///
    /// Excluded URLs bypass the cache in both directions. Otherwise the
    /// cache is consulted first; on a miss the network response is
    /// returned, and written back to the store when it is a plain
    /// successful same-origin response. A failed cache write is logged
    /// and does not fail the request. A network failure on a miss
    /// propagates to the caller.
    pub async fn handle_fetch(&self, raw_url: &str) -> Result<FetchResult> {
        let url = resolve_url(raw_url, &self.base)?;

        if is_excluded(url.as_str(), &self.config.worker.excluded_hosts) {
            debug!("Excluded from caching: {}", url);
            let resp = self.fetcher.fetch(url.as_str()).await?;
            metrics::record_fetch_outcome("bypass");
            return Ok(FetchResult::bypass(resp));
        }

        // Fetches are not controlled until activation has claimed them.
        if self.state().await != WorkerState::Active {
            debug!("Worker not active; passing {} to the network", url);
            let resp = self.fetcher.fetch(url.as_str()).await?;
            metrics::record_fetch_outcome("bypass");
            return Ok(FetchResult::bypass(resp));
        }

        if let Some(entry) = self.store.lookup(url.as_str()).await {
            metrics::record_fetch_outcome("hit");
            return Ok(FetchResult::hit(entry));
        }

        let resp = self.fetcher.fetch(url.as_str()).await?;
        if is_cacheable(resp.status, is_same_origin(&url, &self.base)) {
            let entry = CachedResponse::new(resp.status, resp.headers.clone(), resp.body.clone());
            if let Err(e) = self.store.insert_runtime(url.as_str(), entry).await {
                warn!("Cache write failed for {}: {}", url, e);
            }
            metrics::update_store_entries(self.store.entry_count().await);
        }
        metrics::record_fetch_outcome("miss");
        Ok(FetchResult::miss(resp))
    }
}
