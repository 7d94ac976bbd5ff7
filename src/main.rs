// reportgate - Offline-first caching gateway for embedded BI report viewers
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use reportgate::cache::StoreRegistry;
use reportgate::cli::Args;
use reportgate::config::AppConfig;
use reportgate::server::create_router;
use reportgate::stamper;
use reportgate::utils::logging;
use reportgate::worker::{CacheWorker, HttpFetcher};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let config = AppConfig::load()?;

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting reportgate v{}", env!("CARGO_PKG_VERSION"));

    // Phase 2.5: Handle --stamp flag (one-shot version stamping)
    if args.stamp {
        let report = stamper::run(&config.stamper)?;
        info!(
            "Stamped {} file(s) to version {}",
            report.updated.len(),
            config.stamper.version
        );
        return Ok(());
    }

    // Phase 3: Construct the cache worker
    info!("Fronting upstream origin {}", config.upstream.base_url);
    let registry = Arc::new(StoreRegistry::new(config.cache.clone()));
    let fetcher = Arc::new(HttpFetcher::new(&config.upstream)?);
    let worker = Arc::new(CacheWorker::new(config.clone(), registry, fetcher).await?);

    // Phase 4: Install (precache bootstrap assets) and activate
    worker.install().await?;
    info!("Worker state: {}", worker.state().await);

    // Phase 5: Build and start HTTP server
    let app = create_router(config.clone(), worker)?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 6: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
