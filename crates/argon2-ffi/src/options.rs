//! Types configuring a hashing operation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Argon2Error, Result};

/// Minimum accepted salt length in bytes.
pub const MIN_SALT_SIZE: usize = 8;

/// Upper bound for the length of a generated salt.
pub const MAX_GENERATED_SALT_SIZE: usize = 32;

/// Argon2 variants.
///
/// - `Argon2i`: data-independent memory access, resists side-channel attacks
/// - `Argon2d`: data-dependent memory access, resists GPU cracking
/// - `Argon2id`: hybrid of the two
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Argon2i,
    Argon2d,
    Argon2id,
}

impl Variant {
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Argon2i => "argon2i",
            Variant::Argon2d => "argon2d",
            Variant::Argon2id => "argon2id",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = Argon2Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "argon2i" => Ok(Variant::Argon2i),
            "argon2d" => Ok(Variant::Argon2d),
            "argon2id" => Ok(Variant::Argon2id),
            other => Err(Argon2Error::invalid_input(format!(
                "variant must be either \"argon2i\", \"argon2d\" or \"argon2id\": {other}"
            ))),
        }
    }
}

/// Argon2 revisions. Sent over the wire as the decimal string of the
/// revision number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Version {
    #[serde(rename = "16")]
    V0x10,
    #[serde(rename = "19")]
    V0x13,
}

impl Version {
    /// Revision number as it appears in an encoded hash (`v=16`, `v=19`).
    pub fn number(self) -> u32 {
        match self {
            Version::V0x10 => 0x10,
            Version::V0x13 => 0x13,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl FromStr for Version {
    type Err = Argon2Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "16" | "0x10" => Ok(Version::V0x10),
            "19" | "0x13" => Ok(Version::V0x13),
            other => Err(Argon2Error::invalid_input(format!(
                "version must be either 16 or 19: {other}"
            ))),
        }
    }
}

/// Lane scheduling hint. Backends without threading treat it as advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadMode {
    Sequential,
    Parallel,
}

impl FromStr for ThreadMode {
    type Err = Argon2Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sequential" => Ok(ThreadMode::Sequential),
            "parallel" => Ok(ThreadMode::Parallel),
            other => Err(Argon2Error::invalid_input(format!(
                "thread mode must be either \"sequential\" or \"parallel\": {other}"
            ))),
        }
    }
}

/// Additional data folded into the hash.
///
/// Structured values are serialized before they reach the bridge, see
/// [`ExtraData::json`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExtraData {
    #[default]
    None,
    Bytes(Vec<u8>),
}

impl ExtraData {
    /// Serialize `value` to JSON and carry its bytes.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::to_vec(value).map(ExtraData::Bytes).map_err(|e| {
            Argon2Error::invalid_input("data must be serializable to JSON").with_source(e)
        })
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            ExtraData::None => None,
            ExtraData::Bytes(bytes) => Some(bytes),
        }
    }
}

impl From<Vec<u8>> for ExtraData {
    fn from(bytes: Vec<u8>) -> Self {
        ExtraData::Bytes(bytes)
    }
}

/// Options of a hashing operation. Every field is optional; the backend
/// applies its own defaults (argon2i, version 16, 4096 KiB, 3 iterations,
/// 1 lane, 32 output bytes) to what is left unset. A missing salt is
/// generated by the bridge.
///
/// # Examples
///
/// ```
/// use argon2_ffi::{HashOptions, Variant, Version};
///
/// let options = HashOptions::default()
///     .salt(*b"0123456789abcdef")
///     .variant(Variant::Argon2id)
///     .version(Version::V0x13)
///     .memory_cost(8192)
///     .time_cost(10)
///     .lanes(4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HashOptions {
    /// At least 8 bytes. The bundled backend accepts at most 48, the most
    /// an encoded hash can carry; longer salts fail as a native error.
    pub salt:        Option<Vec<u8>>,
    /// Keyed into the hash; verification needs the same secret.
    pub secret:      Option<Vec<u8>>,
    /// Appended to the password before hashing. It is not a separate input:
    /// `"pw"` with data `b"x"` verifies as password `"pwx"` without data.
    pub data:        ExtraData,
    pub variant:     Option<Variant>,
    pub version:     Option<Version>,
    /// KiB of memory the computation must use.
    pub memory_cost: Option<u32>,
    /// Number of passes over memory.
    pub time_cost:   Option<u32>,
    pub lanes:       Option<u32>,
    /// Output length in bytes.
    pub hash_length: Option<u32>,
    pub thread_mode: Option<ThreadMode>,
}

impl HashOptions {
    #[must_use]
    pub fn salt(mut self, salt: impl Into<Vec<u8>>) -> Self {
        self.salt = Some(salt.into());
        self
    }

    #[must_use]
    pub fn secret(mut self, secret: impl Into<Vec<u8>>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    #[must_use]
    pub fn data(mut self, data: ExtraData) -> Self {
        self.data = data;
        self
    }

    #[must_use]
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    #[must_use]
    pub fn version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    #[must_use]
    pub fn memory_cost(mut self, memory_cost: u32) -> Self {
        self.memory_cost = Some(memory_cost);
        self
    }

    #[must_use]
    pub fn time_cost(mut self, time_cost: u32) -> Self {
        self.time_cost = Some(time_cost);
        self
    }

    #[must_use]
    pub fn lanes(mut self, lanes: u32) -> Self {
        self.lanes = Some(lanes);
        self
    }

    #[must_use]
    pub fn hash_length(mut self, hash_length: u32) -> Self {
        self.hash_length = Some(hash_length);
        self
    }

    #[must_use]
    pub fn thread_mode(mut self, thread_mode: ThreadMode) -> Self {
        self.thread_mode = Some(thread_mode);
        self
    }
}
