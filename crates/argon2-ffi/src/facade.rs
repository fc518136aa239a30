use tracing::debug;

use crate::channel::CallChannel;
use crate::codec;
use crate::error::Result;
use crate::options::{ExtraData, HashOptions};

/// Hashing and verification over an explicit [`CallChannel`].
///
/// The free functions [`crate::hash`] and [`crate::verify`] use the
/// process-wide library; an `Argon2` is for callers that provision their own.
#[derive(Debug, Clone)]
pub struct Argon2 {
    channel: CallChannel,
}

impl Argon2 {
    pub fn new(channel: CallChannel) -> Self {
        Self { channel }
    }

    /// Hash `password` and return the encoded hash string.
    pub async fn hash(&self, password: &str, options: &HashOptions) -> Result<String> {
        let request = codec::encode_hash_request(password, options)?;
        send_hash(&self.channel, request).await
    }

    /// Check `password` against an encoded hash. A mismatch is `Ok(false)`.
    pub async fn verify(
        &self,
        hash: &str,
        password: &str,
        secret: Option<&[u8]>,
        data: &ExtraData,
    ) -> Result<bool> {
        let request = codec::encode_verify_request(hash, password, secret, data)?;
        send_verify(&self.channel, request).await
    }
}

pub(crate) async fn send_hash(channel: &CallChannel, request: Vec<u8>) -> Result<String> {
    debug!(len = request.len(), "calling native hash");
    let payload = channel.hash(request).await?.read_and_free();
    codec::decode_hash_response(&payload)
}

pub(crate) async fn send_verify(channel: &CallChannel, request: Vec<u8>) -> Result<bool> {
    debug!(len = request.len(), "calling native verify");
    let payload = channel.verify(request).await?.read_and_free();
    codec::decode_verify_response(&payload)
}
