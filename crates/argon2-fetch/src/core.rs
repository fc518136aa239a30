//! Pure transformations used by the fetcher.

use std::time::Duration;

use crate::{Error, Result};

/// Calculate the delay before a retry attempt using exponential backoff.
///
/// The delay formula is: `base * 2^retry_count`
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use argon2_fetch::retry_delay;
///
/// assert_eq!(retry_delay(0, Duration::from_millis(100)), Duration::from_millis(100));
/// assert_eq!(retry_delay(1, Duration::from_millis(100)), Duration::from_millis(200));
/// assert_eq!(retry_delay(2, Duration::from_millis(100)), Duration::from_millis(400));
/// ```
pub fn retry_delay(retry_count: u32, base: Duration) -> Duration {
    let multiplier = 2_u32.saturating_pow(retry_count);
    base.saturating_mul(multiplier)
}

/// Parse a hex-encoded SHA-256 digest.
pub fn parse_sha256(hex_digest: &str) -> Result<[u8; 32]> {
    let bytes = hex::decode(hex_digest.trim())
        .map_err(|_| Error::InvalidChecksum(hex_digest.to_string()))?;
    bytes
        .try_into()
        .map_err(|_| Error::InvalidChecksum(hex_digest.to_string()))
}
