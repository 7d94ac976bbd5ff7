// HTTP request handlers
// Author: kelexine (https://github.com/kelexine)

use super::routes::AppState;
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info};

use crate::error::GatewayError;
use crate::metrics;
use crate::worker::{ControlMessage, MessageAck, WorkerState};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;

    // Check worker lifecycle state
    let worker_state = state.worker.state().await;
    let worker_check = if worker_state == WorkerState::Active {
        HealthCheck {
            status: "ok".to_string(),
            message: format!("Worker {}", worker_state),
        }
    } else {
        overall_status = HealthStatus::Degraded;
        HealthCheck {
            status: "warning".to_string(),
            message: format!("Worker {} (not yet controlling fetches)", worker_state),
        }
    };
    checks.insert("worker_state".to_string(), worker_check);

    // Check the active cache store
    let store = state.worker.store();
    let stats = store.stats().await;
    let store_check = HealthCheck {
        status: "ok".to_string(),
        message: format!(
            "Store {}: {} entries, {} hits, {} misses",
            store.name(),
            store.entry_count().await,
            stats.hits,
            stats.misses
        ),
    };
    checks.insert("cache_store".to_string(), store_check);

    // Check the store inventory
    let mut names = state.worker.registry().names().await;
    names.sort();
    let inventory_check = HealthCheck {
        status: "ok".to_string(),
        message: format!("Stores: [{}]", names.join(", ")),
    };
    checks.insert("store_inventory".to_string(), inventory_check);

    // Check configuration
    let config_check = HealthCheck {
        status: "ok".to_string(),
        message: format!("Upstream base: {}", state.config.upstream.base_url),
    };
    checks.insert("configuration".to_string(), config_check);

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[derive(Debug, Deserialize)]
pub struct FetchParams {
    /// Request URL, relative to the upstream base or absolute.
    pub url: String,
}

/// Handler for the fetch interception endpoint.
///
/// Serves the URL through the worker's cache-first policy and reports
/// how it was served in the `x-cache` response header.
pub async fn fetch_handler(
    State(state): State<AppState>,
    Query(params): Query<FetchParams>,
) -> Result<Response, GatewayError> {
    let started = Instant::now();
    debug!("Intercepted fetch: {}", params.url);

    let result = state.worker.handle_fetch(&params.url).await?;
    let status =
        StatusCode::from_u16(result.status).unwrap_or(StatusCode::BAD_GATEWAY);

    let mut builder = Response::builder().status(status);
    for (name, value) in &result.headers {
        // The body is re-framed by axum; drop the original framing headers
        if name.eq_ignore_ascii_case("transfer-encoding")
            || name.eq_ignore_ascii_case("connection")
            || name.eq_ignore_ascii_case("content-length")
        {
            continue;
        }
        builder = builder.header(name.as_str(), value.as_str());
    }

    let response = builder
        .header("x-cache", result.outcome.as_str())
        .body(Body::from(result.body))
        .map_err(|e| GatewayError::Internal(e.to_string()))?;

    metrics::record_request("GET", "/fetch", status.as_u16(), started.elapsed().as_secs_f64());
    Ok(response)
}

/// Handler for worker control messages.
pub async fn message_handler(
    State(state): State<AppState>,
    Json(msg): Json<ControlMessage>,
) -> Result<Json<MessageAck>, GatewayError> {
    info!("Control message received: {:?}", msg);
    let new_state = state.worker.handle_message(msg).await?;
    Ok(Json(MessageAck { state: new_state }))
}

/// Handler for Prometheus text exposition.
pub async fn metrics_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics::gather_metrics(),
    )
}
