use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed request: {0}")]
    Request(#[from] serde_json::Error),

    #[error("unknown variant: {0}")]
    UnknownVariant(String),

    #[error("unknown version: {0}")]
    UnknownVersion(String),

    #[error("salt too long: {0} bytes (max {max})", max = crate::command::MAX_SALT_LEN)]
    SaltTooLong(usize),

    #[error("{0}")]
    Argon2(argon2::Error),

    #[error("{0}")]
    PasswordHash(argon2::password_hash::Error),
}

impl From<argon2::Error> for Error {
    fn from(e: argon2::Error) -> Self { Error::Argon2(e) }
}

impl From<argon2::password_hash::Error> for Error {
    fn from(e: argon2::password_hash::Error) -> Self { Error::PasswordHash(e) }
}
