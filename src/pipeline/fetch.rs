//! Document download: bounded, retried, size-capped HTTP fetch.
//!
//! ## Why stream instead of `bytes()`?
//!
//! The size ceiling must hold against servers that omit or misreport
//! `Content-Length`. Reading the body chunk by chunk lets us abort the
//! moment the running total crosses the ceiling instead of buffering an
//! arbitrarily large body first and checking afterwards. The header is
//! still checked up front as a fast path, so an honest server gets its 413
//! before a single body byte moves.
//!
//! ## Retry policy
//!
//! Connect faults and the transient status set (408, 429, 500, 502, 503,
//! 504) are retried with exponential backoff: 500 ms → 1 s → 2 s by
//! default. Deterministic failures (403, 404, invalid URL, oversized
//! payload) fail on the first attempt; retrying them only delays the
//! caller's error response.

use crate::config::ServiceConfig;
use crate::error::VectorCheckError;
use futures::StreamExt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// HTTP fetcher for PDF sources.
///
/// Owns its `reqwest::Client`; construct one per service and share it.
/// The client pools connections internally and is cheap to clone.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    max_bytes: u64,
    max_retries: u32,
    retry_backoff_ms: u64,
}

impl Fetcher {
    /// Build a fetcher from the service config.
    ///
    /// The connect/read timeout pair comes from the config; there is no
    /// whole-request timeout, so a slow-but-steady large download is not
    /// cut off mid-transfer.
    pub fn new(config: &ServiceConfig) -> Result<Self, VectorCheckError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .read_timeout(Duration::from_secs(config.read_timeout_secs))
            .build()
            .map_err(|e| VectorCheckError::Internal(format!("HTTP client build failed: {e}")))?;

        Ok(Self {
            client,
            max_bytes: config.max_download_bytes,
            max_retries: config.max_retries,
            retry_backoff_ms: config.retry_backoff_ms,
        })
    }

    /// Download the PDF at `url`, returning its raw bytes.
    ///
    /// # Errors
    /// * [`VectorCheckError::InvalidUrl`] — not an absolute http/https URL
    /// * [`VectorCheckError::FetchTimeout`] / [`VectorCheckError::FetchConnection`]
    /// * [`VectorCheckError::FetchHttp`] — non-success status after retries
    /// * [`VectorCheckError::PayloadTooLarge`] — ceiling exceeded
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, VectorCheckError> {
        let parsed = validate_url(url)?;
        info!(%parsed, "downloading PDF");

        let mut backoff_ms = self.retry_backoff_ms;
        let mut attempt = 0u32;
        loop {
            match self.try_fetch(&parsed).await {
                Ok(bytes) => {
                    debug!(bytes = bytes.len(), "download complete");
                    return Ok(bytes);
                }
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    warn!(
                        attempt,
                        max = self.max_retries,
                        backoff_ms,
                        error = %e,
                        "transient download failure, retrying"
                    );
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    backoff_ms = backoff_ms.saturating_mul(2);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// One download attempt: request, status check, size-capped body read.
    async fn try_fetch(&self, url: &reqwest::Url) -> Result<Vec<u8>, VectorCheckError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| map_reqwest_error(url.as_str(), &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(VectorCheckError::FetchHttp {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Fast path: an honest Content-Length gets rejected before the body.
        if let Some(declared) = response.content_length() {
            if declared > self.max_bytes {
                return Err(VectorCheckError::PayloadTooLarge {
                    limit_bytes: self.max_bytes,
                });
            }
        }

        let mut buf: Vec<u8> = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| map_reqwest_error(url.as_str(), &e))?;
            if (buf.len() + chunk.len()) as u64 > self.max_bytes {
                return Err(VectorCheckError::PayloadTooLarge {
                    limit_bytes: self.max_bytes,
                });
            }
            buf.extend_from_slice(&chunk);
        }

        Ok(buf)
    }
}

/// Parse and validate the source URL. Only absolute http/https URLs pass.
fn validate_url(url: &str) -> Result<reqwest::Url, VectorCheckError> {
    let parsed = reqwest::Url::parse(url).map_err(|_| VectorCheckError::InvalidUrl {
        url: url.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(VectorCheckError::InvalidUrl {
            url: url.to_string(),
        });
    }
    Ok(parsed)
}

/// Map a reqwest error to the fetch taxonomy.
fn map_reqwest_error(url: &str, e: &reqwest::Error) -> VectorCheckError {
    if e.is_timeout() {
        VectorCheckError::FetchTimeout {
            url: url.to_string(),
        }
    } else if e.is_connect() {
        VectorCheckError::FetchConnection {
            url: url.to_string(),
            reason: e.to_string(),
        }
    } else {
        VectorCheckError::DownloadFailed {
            url: url.to_string(),
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_and_https_urls_are_accepted() {
        assert!(validate_url("http://example.com/doc.pdf").is_ok());
        assert!(validate_url("https://example.com/doc.pdf").is_ok());
    }

    #[test]
    fn other_schemes_are_rejected() {
        for url in [
            "ftp://example.com/doc.pdf",
            "file:///etc/passwd",
            "doc.pdf",
            "/tmp/doc.pdf",
            "",
        ] {
            assert!(
                matches!(validate_url(url), Err(VectorCheckError::InvalidUrl { .. })),
                "should reject {url:?}"
            );
        }
    }

    #[tokio::test]
    async fn connection_refused_maps_to_fetch_connection() {
        // Bind-then-drop guarantees nothing is listening on the port.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = crate::ServiceConfig::builder()
            .max_retries(0)
            .build()
            .unwrap();
        let fetcher = Fetcher::new(&config).unwrap();
        let err = fetcher
            .fetch(&format!("http://127.0.0.1:{port}/doc.pdf"))
            .await
            .unwrap_err();
        assert!(
            matches!(err, VectorCheckError::FetchConnection { .. }),
            "got: {err}"
        );
    }
}
