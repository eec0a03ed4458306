//! HTTP surface: a composable axum router exposing the pipeline.
//!
//! Three endpoints, one of substance:
//!
//! * `GET /vector-check?pdf_url=<url>&original_page_number=<n>` — download
//!   and classify
//! * `GET /health` — liveness probe
//! * `GET /` — service banner
//!
//! [`router`] returns a plain `Router`, so embedders can mount it under a
//! prefix or serve it from their own listener; the `vectorcheck` binary is
//! a thin shim that binds a listener and calls it.

pub mod error;
pub mod routes;

use crate::classify::Classifier;
use crate::config::ServiceConfig;
use crate::error::VectorCheckError;
use crate::pipeline::fetch::Fetcher;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

/// Shared per-service state: the fetcher (with its pooled HTTP client) and
/// the classifier, both constructed once at startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub fetcher: Fetcher,
    pub classifier: Classifier,
}

impl AppState {
    pub fn new(config: &ServiceConfig) -> Result<Self, VectorCheckError> {
        Ok(Self {
            fetcher: Fetcher::new(config)?,
            classifier: Classifier::new(config.thresholds),
        })
    }
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .route("/vector-check", get(routes::vector_check))
        .with_state(state)
}
