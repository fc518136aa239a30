use std::env;
use std::path::PathBuf;

use crate::{Error, Result};

pub fn user_home() -> Option<PathBuf> {
    home::home_dir()
}

pub fn user_cache() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var_os("LOCALAPPDATA").map(|p| PathBuf::from(p).join("Cache"))
    }
    #[cfg(target_os = "macos")]
    {
        user_home().map(|p| p.join("Library/Caches"))
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        env::var_os("XDG_CACHE_HOME")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(|| user_home().map(|p| p.join(".cache")))
    }
}

/// Cache directory for `app`, e.g. `~/.cache/argon2-ffi`.
pub fn app_cache(app: &str) -> Result<PathBuf> {
    user_cache().map(|p| p.join(app)).ok_or(Error::NoCacheDir)
}
