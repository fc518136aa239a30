use std::path::PathBuf;
use std::str::FromStr;

use argon2_fetch::{FetchOptions, parse_sha256};

use super::ProvisionError;

pub const ENV_LOCAL: &str = "ARGON2_FFI_LOCAL";
pub const ENV_LOCAL_DIR: &str = "ARGON2_FFI_LOCAL_DIR";
pub const ENV_RELEASE_URL: &str = "ARGON2_FFI_RELEASE_URL";
pub const ENV_CACHE_DIR: &str = "ARGON2_FFI_CACHE_DIR";
pub const ENV_CACHE: &str = "ARGON2_FFI_CACHE";
pub const ENV_SHA256: &str = "ARGON2_FFI_SHA256";

/// Base URL of published releases. Binaries live under `v<version>/`.
pub const DEFAULT_RELEASE_URL: &str = "https://github.com/argon2-ffi/argon2-ffi/releases/download";

fn user_agent() -> String {
    format!("{}/{}", super::APP_NAME, crate::version())
}

/// What to do with a previously fetched binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Reuse a cached binary, fetch when absent.
    #[default]
    Use,
    /// Always fetch, replacing any cached binary.
    Reload,
    /// Never fetch; a missing cached binary is an error.
    Only,
}

impl FromStr for CachePolicy {
    type Err = ProvisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "use" => Ok(CachePolicy::Use),
            "reload" | "reloadAll" => Ok(CachePolicy::Reload),
            "only" => Ok(CachePolicy::Only),
            other => Err(ProvisionError::Config {
                var:   ENV_CACHE,
                value: other.to_string(),
            }),
        }
    }
}

/// Where the native library comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A local build. `None` means the workspace's release directory for the
    /// running target.
    Local { dir: Option<PathBuf> },
    /// A versioned release published under `base_url`.
    Remote { base_url: String },
}

/// How to provision the native library.
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    /// Release version; must be valid semver for remote sources.
    pub version:      String,
    pub source:       Source,
    pub cache_policy: CachePolicy,
    /// Cache root. `None` uses the per-user cache directory.
    pub cache_dir:    Option<PathBuf>,
    pub fetch:        FetchOptions,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self::remote(DEFAULT_RELEASE_URL)
    }
}

impl ProvisionConfig {
    /// Published releases under `base_url`, cached after the first fetch.
    pub fn remote(base_url: impl Into<String>) -> Self {
        Self {
            version:      crate::version().to_string(),
            source:       Source::Remote {
                base_url: base_url.into(),
            },
            cache_policy: CachePolicy::Use,
            cache_dir:    None,
            fetch:        FetchOptions::default().header("User-Agent", user_agent()),
        }
    }

    /// A local build, re-resolved on every process start.
    pub fn local(dir: Option<PathBuf>) -> Self {
        Self {
            source: Source::Local { dir },
            cache_policy: CachePolicy::Reload,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    #[must_use]
    pub fn cache_policy(mut self, cache_policy: CachePolicy) -> Self {
        self.cache_policy = cache_policy;
        self
    }

    #[must_use]
    pub fn cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(cache_dir.into());
        self
    }

    #[must_use]
    pub fn fetch(mut self, fetch: FetchOptions) -> Self {
        self.fetch = fetch;
        self
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ProvisionError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from `lookup`, which maps a variable name to
    /// its value. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ProvisionError> {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let local = get(ENV_LOCAL).is_some_and(|v| v != "0" && !v.eq_ignore_ascii_case("false"));
        let mut config = if local {
            Self::local(get(ENV_LOCAL_DIR).map(PathBuf::from))
        } else {
            Self::remote(get(ENV_RELEASE_URL).unwrap_or_else(|| DEFAULT_RELEASE_URL.to_string()))
        };

        if let Some(policy) = get(ENV_CACHE) {
            config.cache_policy = policy.parse()?;
        }
        if let Some(dir) = get(ENV_CACHE_DIR) {
            config.cache_dir = Some(PathBuf::from(dir));
        }
        if let Some(sum) = get(ENV_SHA256) {
            let checksum = parse_sha256(&sum).map_err(|_| ProvisionError::Config {
                var:   ENV_SHA256,
                value: sum,
            })?;
            config.fetch = config.fetch.checksum(Some(checksum));
        }

        Ok(config)
    }
}
