use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use sha2::{Digest, Sha256};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::core::retry_delay;
use crate::data::FetchOptions;
use crate::effects::http::HttpClient;
use crate::error::{Error, Result};

/// Downloads files with verification and atomic placement.
pub struct Fetcher<C: HttpClient> {
    client: C,
}

impl<C: HttpClient> Fetcher<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Fetch `url` into `destination`, retrying transient failures.
    ///
    /// The destination is either left untouched or replaced by the complete,
    /// verified body; a partial download is never visible there.
    pub async fn fetch(
        &self,
        url: &str,
        destination: &Path,
        options: &FetchOptions,
    ) -> Result<PathBuf> {
        let mut attempt = 0u32;
        loop {
            match self.fetch_once(url, destination, options).await {
                Ok(bytes) => {
                    info!(url, destination = %destination.display(), bytes, "download complete");
                    return Ok(destination.to_path_buf());
                }
                Err(err) if err.is_retryable() && attempt < options.max_retries => {
                    let delay = retry_delay(attempt, options.retry_backoff);
                    warn!(url, attempt, ?delay, error = %err, "download failed, retrying");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) if err.is_retryable() && attempt > 0 => {
                    return Err(Error::MaxRetriesExceeded {
                        count:  attempt + 1,
                        source: Box::new(err),
                    });
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn fetch_once(&self, url: &str, destination: &Path, options: &FetchOptions) -> Result<u64> {
        let parent = destination
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| Error::InvalidDestination(destination.to_path_buf()))?;
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(Error::io(parent))?;

        // Dropping the TempPath on any early return removes the staging file.
        let staging = tempfile::Builder::new()
            .prefix(".")
            .suffix(".tmp")
            .tempfile_in(parent)
            .map_err(Error::io(parent))?;
        let (std_file, staging_path) = staging.into_parts();
        let mut file = tokio::fs::File::from_std(std_file);

        debug!(url, staging = %staging_path.display(), "connecting");
        let mut stream = self
            .client
            .stream(url, &options.headers)
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let mut hasher = options.checksum.map(|_| Sha256::new());
        let mut bytes_downloaded = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| Error::Network(e.to_string()))?;
            if let Some(h) = hasher.as_mut() {
                h.update(&chunk);
            }
            file.write_all(&chunk)
                .await
                .map_err(Error::io(&*staging_path))?;
            bytes_downloaded += chunk.len() as u64;
        }

        file.flush().await.map_err(Error::io(&*staging_path))?;
        file.sync_all().await.map_err(Error::io(&*staging_path))?;
        drop(file);

        if let (Some(expected), Some(h)) = (options.checksum, hasher) {
            let actual = h.finalize();
            if actual.as_slice() != expected.as_slice() {
                return Err(Error::ChecksumMismatch {
                    expected: hex::encode(expected),
                    actual:   hex::encode(actual),
                });
            }
        }

        staging_path
            .persist(destination)
            .map_err(|e| Error::io(destination)(e.error))?;

        Ok(bytes_downloaded)
    }
}
