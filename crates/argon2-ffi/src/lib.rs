//! Argon2 password hashing through a dynamically loaded native backend.
//!
//! # Architecture
//!
//! - [`provision`] - Resolve, fetch and load the native library for the
//!   running target, once per process
//! - [`codec`] - Validate options and encode requests; decode responses
//! - [`NativeBuffer`] - Ownership of a buffer allocated on the native side,
//!   released exactly once
//! - [`CallChannel`] - The native entry points, run on the blocking pool
//!
//! # Example
//!
//! ```no_run
//! # async fn demo() -> argon2_ffi::Result<()> {
//! let hash = argon2_ffi::hash("Geheim!123", &Default::default()).await?;
//! assert!(argon2_ffi::verify(&hash, "Geheim!123", None, &Default::default()).await?);
//! # Ok(())
//! # }
//! ```

mod buffer;
mod channel;
pub mod codec;
mod error;
mod facade;
mod options;
pub mod provision;
pub mod testing;

pub use buffer::NativeBuffer;
pub use channel::{CallChannel, EntryFn, FreeFn, Symbols};
pub use codec::password_from_utf8;
pub use error::{Argon2Error, ErrorKind, NativeDiagnostic, Result};
pub use facade::Argon2;
pub use options::{
    ExtraData, HashOptions, MAX_GENERATED_SALT_SIZE, MIN_SALT_SIZE, ThreadMode, Variant, Version,
};
pub use provision::library_loaded;

/// Version of this library; selects the native release to fetch.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Hash `password` with the process-wide native library.
///
/// Options are validated before the library is provisioned, so an
/// [`ErrorKind::InvalidInput`] failure never triggers a download.
pub async fn hash(password: &str, options: &HashOptions) -> Result<String> {
    let request = codec::encode_hash_request(password, options)?;
    let channel = provision::acquire().await?;
    facade::send_hash(&channel, request).await
}

/// Verify `password` against an encoded hash with the process-wide native
/// library. `secret` and `data` must match what was used for hashing.
pub async fn verify(
    hash: &str,
    password: &str,
    secret: Option<&[u8]>,
    data: &ExtraData,
) -> Result<bool> {
    let request = codec::encode_verify_request(hash, password, secret, data)?;
    let channel = provision::acquire().await?;
    facade::send_verify(&channel, request).await
}
