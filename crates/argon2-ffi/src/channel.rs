//! The native entry points, called off the async runtime.

use std::path::Path;
use std::sync::Arc;

use libloading::Library;
use tracing::{debug, info};

use crate::buffer::NativeBuffer;
use crate::error::{Argon2Error, ErrorKind, Result};
use crate::provision::ProvisionError;

/// `hash` and `verify`: request bytes in, framed response buffer out.
pub type EntryFn = unsafe extern "C" fn(*const u8, usize) -> *const u8;

/// `free_buf`: releases a response buffer given its full length.
pub type FreeFn = unsafe extern "C" fn(*mut u8, usize);

/// The three symbols a native backend exports.
#[derive(Debug, Clone, Copy)]
pub struct Symbols {
    hash:     EntryFn,
    verify:   EntryFn,
    free_buf: FreeFn,
}

impl Symbols {
    /// # Safety
    ///
    /// The functions must implement the buffer protocol: entry points read
    /// exactly `len` request bytes and return null or a framed buffer that
    /// `free_buf` releases. They must be callable from any thread.
    pub unsafe fn new(hash: EntryFn, verify: EntryFn, free_buf: FreeFn) -> Self {
        Self {
            hash,
            verify,
            free_buf,
        }
    }
}

unsafe fn symbol<T: Copy>(
    library: &Library,
    name: &'static str,
) -> std::result::Result<T, ProvisionError> {
    let symbol = unsafe { library.get::<T>(name.as_bytes()) }
        .map_err(|source| ProvisionError::MissingSymbol { name, source })?;
    Ok(*symbol)
}

/// Handle to a loaded native backend.
///
/// Cloning is cheap; every clone keeps the library mapped.
#[derive(Clone)]
pub struct CallChannel {
    symbols: Symbols,
    library: Option<Arc<Library>>,
}

impl CallChannel {
    /// Map the library at `path` and resolve its entry points.
    pub fn load(path: &Path) -> std::result::Result<Self, ProvisionError> {
        debug!(path = %path.display(), "loading native library");
        let library = unsafe { Library::new(path) }.map_err(|source| ProvisionError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        let symbols = unsafe {
            Symbols::new(
                symbol::<EntryFn>(&library, "hash")?,
                symbol::<EntryFn>(&library, "verify")?,
                symbol::<FreeFn>(&library, "free_buf")?,
            )
        };
        info!(path = %path.display(), "native library loaded");

        Ok(Self {
            symbols,
            library: Some(Arc::new(library)),
        })
    }

    /// A channel over functions already linked into the process.
    pub fn from_symbols(symbols: Symbols) -> Self {
        Self {
            symbols,
            library: None,
        }
    }

    pub async fn hash(&self, request: Vec<u8>) -> Result<NativeBuffer> {
        self.call("hash", self.symbols.hash, request).await
    }

    pub async fn verify(&self, request: Vec<u8>) -> Result<NativeBuffer> {
        self.call("verify", self.symbols.verify, request).await
    }

    /// Run `entry` on the blocking pool. The returned buffer is owned before
    /// the task completes, so it is released even if nobody awaits it.
    async fn call(
        &self,
        operation: &'static str,
        entry: EntryFn,
        request: Vec<u8>,
    ) -> Result<NativeBuffer> {
        let free = self.symbols.free_buf;
        let library = self.library.clone();

        tokio::task::spawn_blocking(move || {
            let ptr = unsafe { entry(request.as_ptr(), request.len()) };
            unsafe { NativeBuffer::from_raw(ptr, free) }.retaining(library)
        })
        .await
        .map_err(|e| {
            Argon2Error::new(
                ErrorKind::Native,
                format!("native `{operation}` call did not complete"),
            )
            .with_source(e)
        })
    }
}

impl std::fmt::Debug for CallChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallChannel")
            .field("symbols", &self.symbols)
            .field("dynamic", &self.library.is_some())
            .finish()
    }
}
