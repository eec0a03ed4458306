//! Request handlers.

use crate::pipeline::extract::extract_pages;
use crate::report::{DocumentReport, PageNumbering};
use crate::server::error::ApiError;
use crate::server::AppState;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Query parameters for `GET /vector-check`.
///
/// `original_page_number` is honoured only for single-page documents; see
/// [`PageNumbering`] for the reasoning.
#[derive(Debug, Deserialize)]
pub struct VectorCheckParams {
    pub pdf_url: String,
    pub original_page_number: Option<u32>,
}

/// `GET /vector-check` — download the PDF and classify every page.
pub async fn vector_check(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VectorCheckParams>,
) -> Result<Json<DocumentReport>, ApiError> {
    let started = Instant::now();

    let bytes = state.fetcher.fetch(&params.pdf_url).await?;
    let outcomes = extract_pages(bytes).await?;

    let numbering = match params.original_page_number {
        Some(n) => PageNumbering::OverrideSingle(n),
        None => PageNumbering::Natural,
    };
    let report = DocumentReport::build(&params.pdf_url, outcomes, numbering, &state.classifier);

    info!(
        url = %params.pdf_url,
        pages = report.page_count,
        vector_pages = report.vector_pages_count,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "document classified"
    );

    Ok(Json(report))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// `GET /health` — liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

/// `GET /` — service banner.
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "vectorcheck: send PDF URLs to /vector-check",
    })
}
