//! Platform detection for picking a prebuilt native binary.
//!
//! Everything here is a pure function of the running process: the compiled
//! target architecture and operating system, plus a handful of environment
//! variables for per-user directories.

pub use error::{Error, Result};
pub use os::Os;
pub use triple::Target;

pub mod arch;
pub mod dir;
mod error;
pub mod os;
mod triple;
