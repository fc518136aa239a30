//! Native Argon2 backend with a byte-buffer C ABI.
//!
//! Three symbols are exported:
//!
//! - `hash(ptr, len) -> *const u8`
//! - `verify(ptr, len) -> *const u8`
//! - `free_buf(ptr, len)`
//!
//! Requests are JSON documents. Every response is a heap buffer framed as
//! `[u32 big-endian length][JSON payload]` holding
//! `{"result": ..., "error": string | null}`. The caller owns the buffer and
//! must hand it back through `free_buf` with `length + 4` exactly once.

use std::panic;
use std::ptr;

use serde::Serialize;

pub mod command;
mod error;

pub use error::{Error, Result};

#[derive(Serialize)]
struct Response<T> {
    result: Option<T>,
    error:  Option<String>,
}

impl<T: Serialize> Response<T> {
    fn from_outcome(outcome: std::thread::Result<Result<T>>) -> Self {
        match outcome {
            Ok(Ok(result)) => Self {
                result: Some(result),
                error:  None,
            },
            Ok(Err(err)) => Self {
                result: None,
                error:  Some(err.to_string()),
            },
            Err(_) => Self {
                result: None,
                error:  Some("native backend panicked".to_string()),
            },
        }
    }

    fn encode(&self) -> Vec<u8> {
        serde_json::to_vec(self).unwrap_or_else(|e| {
            serde_json::json!({ "result": null, "error": e.to_string() })
                .to_string()
                .into_bytes()
        })
    }
}

fn pack_into_buf(payload: &[u8]) -> *const u8 {
    let mut buf = Vec::with_capacity(payload.len() + 4);
    buf.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    buf.extend_from_slice(payload);

    Box::into_raw(buf.into_boxed_slice()).cast::<u8>()
}

unsafe fn request_bytes<'a>(ptr: *const u8, len: usize) -> &'a [u8] {
    if ptr.is_null() || len == 0 {
        return &[];
    }
    unsafe { std::slice::from_raw_parts(ptr, len) }
}

/// Release a buffer returned by [`hash`] or [`verify`].
///
/// # Safety
///
/// `ptr` must come from this library and `len` must be its full length
/// (payload length + 4). Each buffer may be released once.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn free_buf(ptr: *mut u8, len: usize) {
    if ptr.is_null() {
        return;
    }
    drop(unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(ptr, len)) });
}

/// Hash a JSON request. The result payload is the encoded hash as bytes.
///
/// # Safety
///
/// `ptr` must be valid for reads of `len` bytes for the duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hash(ptr: *const u8, len: usize) -> *const u8 {
    let request = unsafe { request_bytes(ptr, len) };
    let outcome = panic::catch_unwind(|| command::hash(request).map(String::into_bytes));
    pack_into_buf(&Response::from_outcome(outcome).encode())
}

/// Verify a JSON request. The result payload is a boolean.
///
/// # Safety
///
/// `ptr` must be valid for reads of `len` bytes for the duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn verify(ptr: *const u8, len: usize) -> *const u8 {
    let request = unsafe { request_bytes(ptr, len) };
    let outcome = panic::catch_unwind(|| command::verify(request));
    pack_into_buf(&Response::from_outcome(outcome).encode())
}

#[cfg(test)]
mod tests {
    use super::*;

    unsafe fn take(ptr: *const u8) -> serde_json::Value {
        let len = u32::from_be_bytes(unsafe { *ptr.cast::<[u8; 4]>() }) as usize;
        let payload = unsafe { std::slice::from_raw_parts(ptr.add(4), len) }.to_vec();
        unsafe { free_buf(ptr.cast_mut(), len + 4) };
        serde_json::from_slice(&payload).unwrap()
    }

    #[test]
    fn test_hash_response_framing() {
        let request = br#"{"password":"test","options":{"salt":[1,2,3,4,5,6,7,8]}}"#;
        let response = unsafe { take(hash(request.as_ptr(), request.len())) };

        assert!(response["error"].is_null());
        let bytes: Vec<u8> = serde_json::from_value(response["result"].clone()).unwrap();
        assert!(String::from_utf8(bytes).unwrap().starts_with("$argon2i$v=16$"));
    }

    #[test]
    fn test_error_response() {
        let request = br#"{"password":"test"}"#;
        let response = unsafe { take(hash(request.as_ptr(), request.len())) };

        assert!(response["result"].is_null());
        assert!(response["error"].as_str().unwrap().contains("malformed request"));
    }

    #[test]
    fn test_null_request() {
        let response = unsafe { take(verify(ptr::null(), 0)) };
        assert!(response["error"].is_string());
    }

    #[test]
    fn test_free_null_is_noop() {
        unsafe { free_buf(ptr::null_mut(), 0) };
    }
}
