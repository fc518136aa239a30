//! HTTP downloading with streaming verification and atomic placement.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable configuration
//! - [`core`] - Pure transformations
//! - [`effects`] - I/O operations behind the [`HttpClient`] trait
//!
//! # Key Features
//!
//! - **Single-Pass**: bytes are hashed while they stream to disk
//! - **Atomic Placement**: downloads are staged in a temporary file next to
//!   the destination and only renamed into place once complete and verified
//! - **Bounded Retries**: transient network failures are retried with
//!   exponential backoff; verification failures are not

pub mod core;
pub mod data;
mod effects;
mod error;

pub use self::core::{parse_sha256, retry_delay};
pub use data::FetchOptions;
pub use effects::{BoxStream, Fetcher, HttpClient};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestClient;

pub use error::{Error, Result};
