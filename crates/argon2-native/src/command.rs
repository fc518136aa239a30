use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use serde::Deserialize;

use crate::error::{Error, Result};

pub const DEFAULT_MEMORY_COST: u32 = 4096;
pub const DEFAULT_TIME_COST: u32 = 3;
pub const DEFAULT_LANES: u32 = 1;

/// Longest salt that fits the 64-character B64 field of an encoded hash.
pub const MAX_SALT_LEN: usize = 48;

/// Hash options as sent by the bridge. `threadMode` may also be present;
/// lanes are always computed sequentially here so it is ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HashOptions {
    salt:        Vec<u8>,
    secret:      Option<Vec<u8>>,
    data:        Option<Vec<u8>>,
    variant:     Option<String>,
    version:     Option<String>,
    memory_cost: Option<u32>,
    time_cost:   Option<u32>,
    lanes:       Option<u32>,
    hash_length: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct HashRequest {
    password: String,
    options:  HashOptions,
}

#[derive(Debug, Deserialize)]
struct VerifyRequest {
    hash:     String,
    password: String,
    secret:   Option<Vec<u8>>,
    data:     Option<Vec<u8>>,
}

fn parse_variant(variant: Option<&str>) -> Result<Algorithm> {
    match variant {
        None | Some("argon2i") => Ok(Algorithm::Argon2i),
        Some("argon2d") => Ok(Algorithm::Argon2d),
        Some("argon2id") => Ok(Algorithm::Argon2id),
        Some(other) => Err(Error::UnknownVariant(other.to_string())),
    }
}

fn parse_version(version: Option<&str>) -> Result<Version> {
    match version {
        None | Some("16") => Ok(Version::V0x10),
        Some("19") => Ok(Version::V0x13),
        Some(other) => Err(Error::UnknownVersion(other.to_string())),
    }
}

fn instance<'k>(
    secret: Option<&'k [u8]>,
    algorithm: Algorithm,
    version: Version,
    params: Params,
) -> Result<Argon2<'k>> {
    match secret {
        Some(secret) => Ok(Argon2::new_with_secret(secret, algorithm, version, params)?),
        None => Ok(Argon2::new(algorithm, version, params)),
    }
}

/// Associated data is folded in by appending it to the password.
fn hashed_input(password: &str, data: Option<&[u8]>) -> Vec<u8> {
    let mut input = password.as_bytes().to_vec();
    if let Some(data) = data {
        input.extend_from_slice(data);
    }
    input
}

/// Hash a JSON request and return the PHC-encoded hash string.
pub fn hash(request: &[u8]) -> Result<String> {
    let HashRequest { password, options } = serde_json::from_slice(request)?;

    let algorithm = parse_variant(options.variant.as_deref())?;
    let version = parse_version(options.version.as_deref())?;
    let params = Params::new(
        options.memory_cost.unwrap_or(DEFAULT_MEMORY_COST),
        options.time_cost.unwrap_or(DEFAULT_TIME_COST),
        options.lanes.unwrap_or(DEFAULT_LANES),
        options.hash_length.map(|len| len as usize),
    )?;

    let argon2 = instance(options.secret.as_deref(), algorithm, version, params)?;
    if options.salt.len() > MAX_SALT_LEN {
        return Err(Error::SaltTooLong(options.salt.len()));
    }
    let salt = SaltString::encode_b64(&options.salt)?;
    let input = hashed_input(&password, options.data.as_deref());

    Ok(argon2.hash_password(&input, &salt)?.to_string())
}

/// Verify a JSON request. A well-formed hash that does not match yields
/// `Ok(false)`; only malformed input is an error.
pub fn verify(request: &[u8]) -> Result<bool> {
    let request: VerifyRequest = serde_json::from_slice(request)?;
    let parsed = PasswordHash::new(&request.hash)?;

    // Algorithm, version and cost parameters come from the parsed hash.
    let argon2 = instance(
        request.secret.as_deref(),
        Algorithm::default(),
        Version::default(),
        Params::default(),
    )?;
    let input = hashed_input(&request.password, request.data.as_deref());

    match argon2.verify_password(&input, &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e.into()),
    }
}
