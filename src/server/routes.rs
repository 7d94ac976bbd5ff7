// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{fetch_handler, health_handler, message_handler, metrics_handler};
use super::middleware::request_id_layers;
use crate::config::AppConfig;
use crate::error::Result;
use crate::worker::CacheWorker;
use axum::{routing::{get, post}, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub worker: Arc<CacheWorker>,
}

pub fn create_router(config: AppConfig, worker: Arc<CacheWorker>) -> Result<Router> {
    let state = AppState { config, worker };

    let (set_request_id, propagate_request_id) = request_id_layers();

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/fetch", get(fetch_handler))
        .route("/worker/message", post(message_handler))
        .layer(
            ServiceBuilder::new()
                .layer(set_request_id)
                .layer(propagate_request_id)
                .layer(TraceLayer::new_for_http())
                // Control messages are tiny; anything larger is not ours
                .layer(tower_http::limit::RequestBodyLimitLayer::new(64 * 1024)),
        )
        .with_state(state);

    Ok(app)
}
