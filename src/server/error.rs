//! HTTP error mapping: pipeline errors to status codes and `detail` bodies.
//!
//! The mapping mirrors what the download actually told us: the source said
//! 404 → we say 404; the source never answered → 502; the source was too
//! slow → 408. Anything that is the *caller's* fault (bad URL, not a PDF,
//! unreadable document) is a 400, and only genuinely unexpected faults
//! surface as 500.

use crate::error::VectorCheckError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

/// Error body shape: every error response carries a `detail` string.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Wrapper giving [`VectorCheckError`] an HTTP representation without
/// coupling the pipeline crates to axum.
#[derive(Debug)]
pub struct ApiError(pub VectorCheckError);

impl From<VectorCheckError> for ApiError {
    fn from(err: VectorCheckError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            VectorCheckError::InvalidUrl { .. }
            | VectorCheckError::DownloadFailed { .. }
            | VectorCheckError::NotAPdf { .. }
            | VectorCheckError::DocumentParse { .. }
            | VectorCheckError::InvalidConfig(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),

            VectorCheckError::FetchHttp { url, status: 403 } => (
                StatusCode::FORBIDDEN,
                format!("access to PDF source '{url}' is forbidden or the link expired"),
            ),
            VectorCheckError::FetchHttp { url, status: 404 } => (
                StatusCode::NOT_FOUND,
                format!("PDF source not found: '{url}'"),
            ),
            VectorCheckError::FetchHttp { .. } => (StatusCode::BAD_REQUEST, self.0.to_string()),

            VectorCheckError::FetchTimeout { .. } => {
                (StatusCode::REQUEST_TIMEOUT, self.0.to_string())
            }
            VectorCheckError::PayloadTooLarge { .. } => {
                (StatusCode::PAYLOAD_TOO_LARGE, self.0.to_string())
            }
            VectorCheckError::FetchConnection { .. } => {
                (StatusCode::BAD_GATEWAY, self.0.to_string())
            }

            VectorCheckError::Internal(detail) => {
                error!(detail, "internal error on request path");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "unexpected internal error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_detail(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        json["detail"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn invalid_url_maps_to_400() {
        let response = ApiError(VectorCheckError::InvalidUrl {
            url: "ftp://x".into(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_detail(response).await.contains("invalid URL"));
    }

    #[tokio::test]
    async fn source_404_maps_to_404_and_mentions_not_found() {
        let response = ApiError(VectorCheckError::FetchHttp {
            url: "http://example.com/gone.pdf".into(),
            status: 404,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_detail(response).await.contains("not found"));
    }

    #[tokio::test]
    async fn source_403_maps_to_403() {
        let response = ApiError(VectorCheckError::FetchHttp {
            url: "http://example.com/private.pdf".into(),
            status: 403,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn other_source_statuses_map_to_400() {
        let response = ApiError(VectorCheckError::FetchHttp {
            url: "http://example.com/a.pdf".into(),
            status: 500,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn timeout_maps_to_408() {
        let response = ApiError(VectorCheckError::FetchTimeout {
            url: "http://example.com/slow.pdf".into(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn oversized_payload_maps_to_413() {
        let response = ApiError(VectorCheckError::PayloadTooLarge {
            limit_bytes: 1024,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn connection_failure_maps_to_502() {
        let response = ApiError(VectorCheckError::FetchConnection {
            url: "http://example.com/a.pdf".into(),
            reason: "refused".into(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn internal_maps_to_500_and_hides_detail() {
        let response =
            ApiError(VectorCheckError::Internal("worker task panicked".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let detail = body_detail(response).await;
        assert!(!detail.contains("panicked"));
    }
}
