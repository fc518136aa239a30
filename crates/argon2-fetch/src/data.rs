//! Immutable configuration for fetch operations.

use std::sync::Arc;
use std::time::Duration;

/// Configuration for HTTP fetching operations.
///
/// # Examples
///
/// ```
/// use argon2_fetch::FetchOptions;
/// use std::time::Duration;
///
/// let options = FetchOptions::default()
///     .max_retries(5)
///     .retry_backoff(Duration::from_millis(200))
///     .header("User-Agent", "argon2-ffi");
/// ```
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Expected SHA-256 checksum. If set, a mismatching download fails and
    /// nothing is written to the destination.
    pub checksum: Option<[u8; 32]>,

    /// Retries after the initial attempt. Only network errors are retried.
    ///
    /// Default: 3
    pub max_retries: u32,

    /// Base delay for exponential backoff; retry N waits
    /// `retry_backoff * 2^N`.
    ///
    /// Default: 100ms
    pub retry_backoff: Duration,

    /// Headers sent with every request, including retries.
    pub headers: Arc<[(String, String)]>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            checksum:      None,
            max_retries:   3,
            retry_backoff: Duration::from_millis(100),
            headers:       Arc::new([]),
        }
    }
}

impl FetchOptions {
    #[must_use]
    pub fn checksum(mut self, checksum: Option<[u8; 32]>) -> Self {
        self.checksum = checksum;
        self
    }

    #[must_use]
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn retry_backoff(mut self, retry_backoff: Duration) -> Self {
        self.retry_backoff = retry_backoff;
        self
    }

    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut headers = self.headers.to_vec();
        headers.push((key.into(), value.into()));
        self.headers = headers.into();
        self
    }
}
