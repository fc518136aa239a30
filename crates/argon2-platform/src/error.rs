use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unsupported operating system: {0}")]
    UnsupportedPlatform(String),

    #[error("no per-user cache directory available")]
    NoCacheDir,
}
