//! Architecture detection.

/// Architecture of the running process, as the compiler names it
/// (`x86_64`, `aarch64`, ...).
///
/// The value is not interpreted: it becomes the first component of the
/// target triple and of remote artifact names as-is.
pub fn detect() -> &'static str {
    std::env::consts::ARCH
}
