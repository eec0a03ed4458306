//! Error types for the vectorcheck library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`VectorCheckError`] — **Fatal**: the request cannot proceed at all
//!   (invalid URL, download failed, document unreadable). Returned as
//!   `Err(VectorCheckError)` from the fetch and extract entry points and
//!   mapped to an HTTP error status by the server layer.
//!
//! * [`PageError`] — **Non-fatal**: a single page's metrics could not be
//!   derived (corrupt content stream) but the rest of the document is fine.
//!   The aggregator converts it into a degraded
//!   [`crate::classify::ClassificationResult`] for that page only and keeps
//!   going.
//!
//! The separation keeps the fail-soft/fail-hard decision explicit: anything
//! that crosses from `PageError` to `VectorCheckError` is a deliberate
//! escalation, never an accident of propagation.

use thiserror::Error;

/// All fatal errors returned by the vectorcheck library.
///
/// Page-level failures use [`PageError`] and are recovered in the report
/// aggregator rather than propagated here.
#[derive(Debug, Error)]
pub enum VectorCheckError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// The supplied URL is not an absolute http/https URL.
    #[error("invalid URL '{url}': only http and https URLs are accepted")]
    InvalidUrl { url: String },

    /// Download failed for a reason that is neither a timeout nor a
    /// connection fault (body read error, redirect loop, …).
    #[error("failed to download '{url}': {reason}")]
    DownloadFailed { url: String, reason: String },

    /// The download exceeded the configured read or connect timeout.
    #[error("download timed out for '{url}'")]
    FetchTimeout { url: String },

    /// TCP/TLS connection to the source could not be established.
    #[error("connection to '{url}' failed: {reason}")]
    FetchConnection { url: String, reason: String },

    /// The source answered with a non-success HTTP status.
    #[error("source '{url}' returned HTTP {status}")]
    FetchHttp { url: String, status: u16 },

    /// The response body exceeded the size ceiling.
    ///
    /// Raised either from the `Content-Length` pre-check or from the
    /// incremental byte count while streaming, whichever trips first.
    #[error("PDF exceeds the size limit of {limit_bytes} bytes")]
    PayloadTooLarge { limit_bytes: u64 },

    // ── Document errors ───────────────────────────────────────────────────
    /// The downloaded bytes do not start with the `%PDF` magic.
    #[error("downloaded file is not a PDF (first bytes: {magic:?})")]
    NotAPdf { magic: [u8; 4] },

    /// The document as a whole is unreadable (broken xref, encryption, …).
    #[error("PDF could not be parsed: {detail}")]
    DocumentParse { detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error (panicked worker task, client build failure).
    #[error("internal error: {0}")]
    Internal(String),
}

impl VectorCheckError {
    /// Whether the fetcher may retry after this error.
    ///
    /// Connection faults and the usual transient status set qualify;
    /// everything else (403, 404, bad URL, oversized payload) will not get
    /// better by asking again.
    pub fn is_transient(&self) -> bool {
        match self {
            VectorCheckError::FetchConnection { .. } => true,
            VectorCheckError::FetchHttp { status, .. } => {
                matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
            }
            _ => false,
        }
    }
}

/// A non-fatal error for a single page.
///
/// Converted into a degraded classification by
/// [`crate::report::DocumentReport::build`]; the remaining pages of the
/// document are still processed.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum PageError {
    /// The page's content stream object(s) could not be fetched.
    #[error("page {page}: content stream unreadable: {detail}")]
    ContentUnreadable { page: u32, detail: String },

    /// The content stream bytes were fetched but do not decode as a valid
    /// operator sequence.
    #[error("page {page}: content stream undecodable: {detail}")]
    ContentUndecodable { page: u32, detail: String },
}
