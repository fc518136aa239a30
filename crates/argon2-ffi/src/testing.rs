//! Assertions on the shape of encoded hashes.

use regex::Regex;

use crate::options::{Variant, Version};

/// Expected parameters of an encoded hash. Unset fields accept any value
/// the encoding allows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodedHashPattern {
    pub variant:     Option<Variant>,
    pub version:     Option<Version>,
    pub memory_cost: Option<u32>,
    pub time_cost:   Option<u32>,
    pub lanes:       Option<u32>,
}

impl EncodedHashPattern {
    fn regex(&self) -> Result<Regex, regex::Error> {
        let variant = self
            .variant
            .map_or_else(|| "argon2(i|d|id)".to_string(), |v| v.as_str().to_string());
        let version = self
            .version
            .map_or_else(|| "(16|19)".to_string(), |v| v.to_string());
        let number = |n: Option<u32>| n.map_or_else(|| "[0-9]+".to_string(), |n| n.to_string());

        Regex::new(&format!(
            r"^\${variant}\$v={version}\$m={},t={},p={}\$.+$",
            number(self.memory_cost),
            number(self.time_cost),
            number(self.lanes),
        ))
    }
}

/// Whether `hash` is an encoded Argon2 hash matching `pattern`.
pub fn is_argon2_encoded(hash: &str, pattern: &EncodedHashPattern) -> bool {
    pattern.regex().is_ok_and(|rx| rx.is_match(hash))
}

/// Panic unless `hash` is an encoded Argon2 hash matching `pattern`.
#[track_caller]
pub fn assert_argon2_encoded(hash: &str, pattern: &EncodedHashPattern) {
    assert!(
        is_argon2_encoded(hash, pattern),
        "not an Argon2 encoded hash matching {pattern:?}: {hash:?}"
    );
}
