//! Resolving, fetching and loading the native library.
//!
//! A [`Provisioner`] turns a [`ProvisionConfig`] into a loaded
//! [`CallChannel`] once. The outcome, success or failure, is recorded and
//! handed to every later caller; a failed load is never retried within the
//! same provisioner.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use argon2_fetch::{Fetcher, HttpClient};
use argon2_platform::{Target, dir};
use once_cell::sync::Lazy;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::channel::CallChannel;

mod config;
mod error;

pub use config::{
    CachePolicy, DEFAULT_RELEASE_URL, ENV_CACHE, ENV_CACHE_DIR, ENV_LOCAL, ENV_LOCAL_DIR,
    ENV_RELEASE_URL, ENV_SHA256, ProvisionConfig, Source,
};
pub use error::ProvisionError;

/// File stem of the native library; platform prefixes and suffixes are added
/// per OS.
pub const LIBRARY_NAME: &str = "argon2_native";

/// Directory name under the per-user cache root.
pub const APP_NAME: &str = "argon2-ffi";

type Outcome = Result<CallChannel, Arc<ProvisionError>>;

/// URL of `file` in the release tagged `v<version>`.
pub fn release_url(base_url: &str, version: &str, file: &str) -> String {
    format!("{}/v{version}/{file}", base_url.trim_end_matches('/'))
}

/// Release asset name for `target`, e.g. `libargon2_native-x86_64.so`.
pub fn release_file_name(target: &Target) -> String {
    target
        .os()
        .dylib_file_name(&format!("{LIBRARY_NAME}-{}", target.arch()))
}

fn default_local_dir(target: &Target) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../target")
        .join(target.triple())
        .join("release")
}

/// Loads the native library once and shares the outcome.
pub struct Provisioner<C: HttpClient> {
    config:  ProvisionConfig,
    fetcher: Fetcher<C>,
    channel: OnceCell<Outcome>,
}

impl<C: HttpClient> Provisioner<C> {
    pub fn new(client: C, config: ProvisionConfig) -> Self {
        Self {
            config,
            fetcher: Fetcher::new(client),
            channel: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &ProvisionConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &Fetcher<C> {
        &self.fetcher
    }

    /// Whether provisioning has run to completion, successfully or not.
    pub fn is_initialized(&self) -> bool {
        self.channel.initialized()
    }

    /// The loaded library. Concurrent first callers wait for a single
    /// provisioning run; every caller sees its recorded outcome.
    pub async fn acquire(&self) -> Result<CallChannel, Arc<ProvisionError>> {
        self.channel
            .get_or_init(|| async { self.provision().await.map_err(Arc::new) })
            .await
            .clone()
    }

    async fn provision(&self) -> Result<CallChannel, ProvisionError> {
        let target = Target::current()?;
        let path = self.locate(&target).await?;
        CallChannel::load(&path)
    }

    /// Path of the native library for `target`, fetching it when the source
    /// and cache policy call for it.
    pub async fn locate(&self, target: &Target) -> Result<PathBuf, ProvisionError> {
        match &self.config.source {
            Source::Local { dir } => {
                let dir = dir.clone().unwrap_or_else(|| default_local_dir(target));
                let path = dir.join(target.os().dylib_file_name(LIBRARY_NAME));
                debug!(path = %path.display(), "resolving local build");
                if path.is_file() {
                    Ok(path)
                } else {
                    Err(ProvisionError::NotFound(path))
                }
            }
            Source::Remote { base_url } => self.locate_release(base_url, target).await,
        }
    }

    async fn locate_release(
        &self,
        base_url: &str,
        target: &Target,
    ) -> Result<PathBuf, ProvisionError> {
        let version = &self.config.version;
        semver::Version::parse(version).map_err(|source| ProvisionError::InvalidVersion {
            version: version.clone(),
            source,
        })?;

        let root = match &self.config.cache_dir {
            Some(dir) => dir.clone(),
            None => dir::app_cache(APP_NAME)?,
        };
        let file = release_file_name(target);
        let cached = root.join(version).join(target.triple()).join(&file);

        match self.config.cache_policy {
            CachePolicy::Use | CachePolicy::Only if cached.is_file() => {
                debug!(path = %cached.display(), "using cached native library");
                return Ok(cached);
            }
            CachePolicy::Only => return Err(ProvisionError::NotCached(cached)),
            CachePolicy::Use | CachePolicy::Reload => {}
        }

        if let Some(parent) = cached.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| ProvisionError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let url = release_url(base_url, version, &file);
        info!(url = %url, path = %cached.display(), "fetching native library");
        Ok(self.fetcher.fetch(&url, &cached, &self.config.fetch).await?)
    }
}

mod global {
    use super::*;
    use crate::error::Result;

    static GLOBAL: Lazy<OnceCell<Outcome>> = Lazy::new(OnceCell::new);

    async fn init() -> Outcome {
        let config = ProvisionConfig::from_env().map_err(Arc::new)?;
        debug!(?config, "provisioning native library");
        Provisioner::new(argon2_fetch::ReqwestClient::new(), config)
            .acquire()
            .await
    }

    /// The process-wide library, provisioned from the environment on first
    /// use and never unloaded.
    pub async fn acquire() -> Result<CallChannel> {
        Ok(GLOBAL.get_or_init(init).await.clone()?)
    }

    /// Whether the process-wide library has been provisioned, successfully
    /// or not.
    pub fn library_loaded() -> bool {
        GLOBAL.initialized()
    }
}

pub use global::{acquire, library_loaded};
