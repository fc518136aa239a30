//! Operating system detection.

use std::fmt;

use crate::{Error, Result};

/// Operating system families a native binary is published for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    Windows,
    Macos,
    Linux,
}

impl Os {
    /// Parse an OS name. Accepts both the Rust (`macos`) and the Darwin
    /// spelling.
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "windows" => Ok(Os::Windows),
            "macos" | "darwin" => Ok(Os::Macos),
            "linux" => Ok(Os::Linux),
            other => Err(Error::UnsupportedPlatform(other.to_string())),
        }
    }

    /// Detect the operating system of the running process.
    pub fn detect() -> Result<Self> {
        Self::parse(std::env::consts::OS)
    }

    /// Vendor and ABI part of the target triple.
    pub fn triple_suffix(self) -> &'static str {
        match self {
            Os::Windows => "pc-windows-msvc",
            Os::Macos => "apple-darwin",
            Os::Linux => "unknown-linux-gnu",
        }
    }

    /// File name of a dynamic library named `stem` on this OS.
    pub fn dylib_file_name(self, stem: &str) -> String {
        match self {
            Os::Windows => format!("{stem}.dll"),
            Os::Macos => format!("lib{stem}.dylib"),
            Os::Linux => format!("lib{stem}.so"),
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Os::Windows => write!(f, "windows"),
            Os::Macos => write!(f, "darwin"),
            Os::Linux => write!(f, "linux"),
        }
    }
}
