use std::ptr::{self, NonNull};
use std::sync::Arc;

use libloading::Library;

use crate::channel::FreeFn;

/// Size of the big-endian `u32` length prefix of every native buffer.
pub const PREFIX_LEN: usize = 4;

/// A response buffer allocated by the native library.
///
/// The buffer is laid out as `[u32 big-endian length][payload]` and must be
/// handed back through the library's `free_buf` with `length + 4`. Owning a
/// `NativeBuffer` is owning that obligation: it is discharged exactly once,
/// either by [`read_and_free`](Self::read_and_free) or on drop.
pub struct NativeBuffer {
    ptr:     Option<NonNull<u8>>,
    free:    FreeFn,
    library: Option<Arc<Library>>,
}

// The buffer is exclusively owned and `free_buf` has no thread affinity.
unsafe impl Send for NativeBuffer {}

impl NativeBuffer {
    /// Take ownership of a pointer returned by a native entry point.
    ///
    /// # Safety
    ///
    /// `ptr` must be null or point to a framed buffer that stays valid until
    /// it is released through `free`, and nothing else may release it.
    pub unsafe fn from_raw(ptr: *const u8, free: FreeFn) -> Self {
        Self {
            ptr: NonNull::new(ptr.cast_mut()),
            free,
            library: None,
        }
    }

    /// Keep `library` mapped until the buffer has been released.
    pub(crate) fn retaining(mut self, library: Option<Arc<Library>>) -> Self {
        self.library = library;
        self
    }

    pub fn is_null(&self) -> bool {
        self.ptr.is_none()
    }

    fn payload_len(ptr: NonNull<u8>) -> usize {
        let mut prefix = [0u8; PREFIX_LEN];
        unsafe { ptr::copy_nonoverlapping(ptr.as_ptr(), prefix.as_mut_ptr(), PREFIX_LEN) };
        u32::from_be_bytes(prefix) as usize
    }

    /// Copy the payload into owned memory and release the native buffer.
    /// A null buffer yields an empty payload and releases nothing.
    pub fn read_and_free(mut self) -> Vec<u8> {
        let Some(ptr) = self.ptr else {
            return Vec::new();
        };

        let len = Self::payload_len(ptr);
        let payload =
            unsafe { std::slice::from_raw_parts(ptr.as_ptr().add(PREFIX_LEN), len) }.to_vec();
        self.release();
        payload
    }

    fn release(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            let len = Self::payload_len(ptr);
            unsafe { (self.free)(ptr.as_ptr(), len + PREFIX_LEN) };
        }
    }
}

impl Drop for NativeBuffer {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for NativeBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeBuffer")
            .field("ptr", &self.ptr)
            .finish_non_exhaustive()
    }
}
