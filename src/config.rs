//! Service configuration.
//!
//! All pipeline behaviour is controlled through [`ServiceConfig`], built via
//! its [`ServiceConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share the config across handlers, log it at startup, and diff
//! two deployments to understand why their verdicts differ.
//!
//! The classification thresholds ride along inside the config as a
//! [`ClassifierThresholds`] value rather than as scattered literals, so a
//! tuned deployment changes one struct and zero logic.

use crate::classify::ClassifierThresholds;
use crate::error::VectorCheckError;
use serde::{Deserialize, Serialize};

/// Default download ceiling: 50 MB.
pub const DEFAULT_MAX_DOWNLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Configuration for the fetch/extract/classify pipeline.
///
/// Built via [`ServiceConfig::builder()`] or [`ServiceConfig::default()`].
///
/// # Example
/// ```rust
/// use vectorcheck::ServiceConfig;
///
/// let config = ServiceConfig::builder()
///     .max_download_bytes(10 * 1024 * 1024)
///     .read_timeout_secs(20)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Hard ceiling on the downloaded PDF size in bytes. Default: 50 MB.
    ///
    /// Enforced incrementally while streaming the response body, not just
    /// against the `Content-Length` header: a server that lies about (or
    /// omits) the header still cannot push more than this many bytes.
    pub max_download_bytes: u64,

    /// TCP/TLS connect timeout in seconds. Default: 10.
    pub connect_timeout_secs: u64,

    /// Read timeout in seconds, applied between body chunks. Default: 30.
    ///
    /// A stalled origin trips this without capping the total transfer time
    /// of a large-but-healthy download the way a single whole-request
    /// timeout would.
    pub read_timeout_secs: u64,

    /// Maximum retry attempts on a transient download failure. Default: 3.
    ///
    /// Only connect faults and the transient status set (408, 429, 5xx
    /// gateway family) are retried. 403/404 and friends fail immediately;
    /// retrying a missing document only delays the caller's 404.
    pub max_retries: u32,

    /// Initial retry delay in milliseconds, doubling per attempt. Default: 500.
    pub retry_backoff_ms: u64,

    /// Classification thresholds. Default: the standard policy constants.
    pub thresholds: ClassifierThresholds,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_download_bytes: DEFAULT_MAX_DOWNLOAD_BYTES,
            connect_timeout_secs: 10,
            read_timeout_secs: 30,
            max_retries: 3,
            retry_backoff_ms: 500,
            thresholds: ClassifierThresholds::default(),
        }
    }
}

impl ServiceConfig {
    /// Create a new builder for `ServiceConfig`.
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ServiceConfig`].
#[derive(Debug)]
pub struct ServiceConfigBuilder {
    config: ServiceConfig,
}

impl ServiceConfigBuilder {
    pub fn max_download_bytes(mut self, bytes: u64) -> Self {
        self.config.max_download_bytes = bytes;
        self
    }

    pub fn connect_timeout_secs(mut self, secs: u64) -> Self {
        self.config.connect_timeout_secs = secs;
        self
    }

    pub fn read_timeout_secs(mut self, secs: u64) -> Self {
        self.config.read_timeout_secs = secs;
        self
    }

    pub fn max_retries(mut self, n: u32) -> Self {
        self.config.max_retries = n;
        self
    }

    pub fn retry_backoff_ms(mut self, ms: u64) -> Self {
        self.config.retry_backoff_ms = ms;
        self
    }

    pub fn thresholds(mut self, thresholds: ClassifierThresholds) -> Self {
        self.config.thresholds = thresholds;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ServiceConfig, VectorCheckError> {
        let c = &self.config;
        if c.max_download_bytes == 0 {
            return Err(VectorCheckError::InvalidConfig(
                "max_download_bytes must be ≥ 1".into(),
            ));
        }
        if c.connect_timeout_secs == 0 || c.read_timeout_secs == 0 {
            return Err(VectorCheckError::InvalidConfig(
                "timeouts must be ≥ 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}
