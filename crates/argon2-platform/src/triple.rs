use std::fmt;

use crate::{Os, Result, arch};

/// Architecture and operating system of a native binary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    arch: String,
    os:   Os,
}

impl Target {
    pub fn new(arch: impl Into<String>, os: Os) -> Self {
        Self {
            arch: arch.into(),
            os,
        }
    }

    /// Target of the running process. Recomputed on every call.
    pub fn current() -> Result<Self> {
        Ok(Self::new(arch::detect(), Os::detect()?))
    }

    pub fn arch(&self) -> &str { &self.arch }

    pub fn os(&self) -> Os { self.os }

    /// Canonical triple, e.g. `x86_64-unknown-linux-gnu`.
    pub fn triple(&self) -> String {
        format!("{}-{}", self.arch, self.os.triple_suffix())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.arch, self.os.triple_suffix())
    }
}
