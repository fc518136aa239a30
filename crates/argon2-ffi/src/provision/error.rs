use std::path::PathBuf;

use thiserror::Error;

/// Why the native library could not be made available.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error(transparent)]
    Platform(#[from] argon2_platform::Error),

    #[error("invalid release version {version:?}")]
    InvalidVersion {
        version: String,
        #[source]
        source:  semver::Error,
    },

    #[error("invalid value for {var}: {value:?}")]
    Config { var: &'static str, value: String },

    #[error("native library not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("native library not cached and cache policy is `only`: {}", .0.display())]
    NotCached(PathBuf),

    #[error("failed to fetch native library: {0}")]
    Fetch(#[from] argon2_fetch::Error),

    #[error("failed to load {}: {source}", path.display())]
    Load {
        path:   PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("native library does not export `{name}`")]
    MissingSymbol {
        name:   &'static str,
        #[source]
        source: libloading::Error,
    },

    #[error("cache directory error at {}: {source}", path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },
}
