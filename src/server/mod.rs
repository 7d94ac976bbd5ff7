//! Axum-based HTTP server implementation for the reportgate gateway.
//!
//! This module is responsible for setting up the HTTP server, configuring
//! routes, and handling incoming requests from the report viewer page.
//! Every asset request is routed through the cache worker's fetch policy.
//!
//! # Components
//!
//! - `handlers`: Implementation of individual endpoints (fetch, message, health, metrics).
//! - `middleware`: Custom tower/axum middleware for request ID tracking.
//! - `routes`: The main router configuration that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use routes::{create_router, AppState};
