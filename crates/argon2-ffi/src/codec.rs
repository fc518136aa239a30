//! JSON wire encoding for requests and responses.
//!
//! Byte sequences travel as arrays of byte-valued integers, which is how
//! `serde_json` serializes `&[u8]` and `Vec<u8>`. Optional fields are left
//! out entirely so the backend applies its own defaults.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Argon2Error, ErrorKind, Result};
use crate::options::{
    ExtraData, HashOptions, MAX_GENERATED_SALT_SIZE, MIN_SALT_SIZE, ThreadMode, Variant, Version,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireOptions<'a> {
    salt:        &'a [u8],
    #[serde(skip_serializing_if = "Option::is_none")]
    secret:      Option<&'a [u8]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data:        Option<&'a [u8]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    variant:     Option<Variant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version:     Option<Version>,
    #[serde(skip_serializing_if = "Option::is_none")]
    memory_cost: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_cost:   Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lanes:       Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hash_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread_mode: Option<ThreadMode>,
}

#[derive(Serialize)]
struct WireHashRequest<'a> {
    password: &'a str,
    options:  WireOptions<'a>,
}

#[derive(Serialize)]
struct WireVerifyRequest<'a> {
    hash:     &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret:   Option<&'a [u8]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data:     Option<&'a [u8]>,
}

#[derive(Deserialize)]
struct WireResponse<T> {
    result: Option<T>,
    error:  Option<String>,
}

/// Interpret raw password bytes as text.
pub fn password_from_utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| {
        Argon2Error::invalid_input("Password argument must be a string.").with_source(e)
    })
}

fn generate_salt() -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let len = rng.gen_range(MIN_SALT_SIZE..=MAX_GENERATED_SALT_SIZE);
    let mut salt = vec![0u8; len];
    rng.fill(salt.as_mut_slice());
    salt
}

fn check_cost(name: &str, value: Option<u32>) -> Result<()> {
    match value {
        Some(0) => Err(Argon2Error::invalid_input(format!(
            "{name} must be greater than zero"
        ))),
        _ => Ok(()),
    }
}

fn to_json<T: Serialize>(request: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(request).map_err(|e| {
        Argon2Error::invalid_input("request could not be serialized").with_source(e)
    })
}

/// Validate `options` and serialize a hash request.
///
/// A missing salt is replaced by a random one of 8 to 32 bytes; a supplied
/// salt shorter than [`MIN_SALT_SIZE`] is rejected.
pub fn encode_hash_request(password: &str, options: &HashOptions) -> Result<Vec<u8>> {
    let generated;
    let salt = match options.salt.as_deref() {
        Some(salt) if salt.len() < MIN_SALT_SIZE => {
            return Err(Argon2Error::invalid_input(format!(
                "Input salt is too short: {}",
                salt.len()
            )));
        }
        Some(salt) => salt,
        None => {
            generated = generate_salt();
            trace!(len = generated.len(), "generated salt");
            &generated[..]
        }
    };

    check_cost("memoryCost", options.memory_cost)?;
    check_cost("timeCost", options.time_cost)?;
    check_cost("lanes", options.lanes)?;
    check_cost("hashLength", options.hash_length)?;

    to_json(&WireHashRequest {
        password,
        options: WireOptions {
            salt,
            secret: options.secret.as_deref(),
            data: options.data.as_bytes(),
            variant: options.variant,
            version: options.version,
            memory_cost: options.memory_cost,
            time_cost: options.time_cost,
            lanes: options.lanes,
            hash_length: options.hash_length,
            thread_mode: options.thread_mode,
        },
    })
}

/// Serialize a verify request.
pub fn encode_verify_request(
    hash: &str,
    password: &str,
    secret: Option<&[u8]>,
    data: &ExtraData,
) -> Result<Vec<u8>> {
    to_json(&WireVerifyRequest {
        hash,
        password,
        secret,
        data: data.as_bytes(),
    })
}

fn decode<T: for<'de> Deserialize<'de>>(operation: &str, payload: &[u8]) -> Result<T> {
    if payload.is_empty() {
        return Err(Argon2Error::new(
            ErrorKind::Native,
            format!("`{operation}` returned no response"),
        ));
    }

    let response: WireResponse<T> = serde_json::from_slice(payload).map_err(|e| {
        Argon2Error::new(
            ErrorKind::Native,
            format!("`{operation}` returned a malformed response"),
        )
        .with_source(e)
    })?;

    match response {
        WireResponse {
            error: Some(diagnostic),
            ..
        } => Err(Argon2Error::native(operation, diagnostic)),
        WireResponse {
            result: Some(result),
            ..
        } => Ok(result),
        WireResponse { result: None, .. } => Err(Argon2Error::new(
            ErrorKind::Native,
            format!("`{operation}` returned neither a result nor an error"),
        )),
    }
}

/// Decode a hash response; the result payload is the encoded hash as bytes.
pub fn decode_hash_response(payload: &[u8]) -> Result<String> {
    let bytes: Vec<u8> = decode("hash", payload)?;
    String::from_utf8(bytes).map_err(|e| {
        Argon2Error::new(ErrorKind::Native, "`hash` returned a non-UTF-8 hash").with_source(e)
    })
}

pub fn decode_verify_response(payload: &[u8]) -> Result<bool> {
    decode("verify", payload)
}
