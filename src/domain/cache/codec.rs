//! Pluggable cache value codecs
//!
//! Values are stored as strings so the recorded entry size is the encoded
//! UTF-8 byte length, independent of the value type.

use std::fmt::Debug;
use std::marker::PhantomData;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use serde::{Serialize, de::DeserializeOwned};

use crate::domain::DomainError;

/// Encodes values to and from their stored string form
pub trait CacheCodec<V>: Send + Sync + Debug {
    fn encode(&self, value: &V) -> Result<String, DomainError>;
    fn decode(&self, raw: &str) -> Result<V, DomainError>;
}

/// Default codec: JSON via serde
pub struct JsonCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonCodec<T> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for JsonCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Debug for JsonCodec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("JsonCodec")
    }
}

impl<T> CacheCodec<T> for JsonCodec<T>
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    fn encode(&self, value: &T) -> Result<String, DomainError> {
        serde_json::to_string(value)
            .map_err(|e| DomainError::cache(format!("Failed to serialize cache value: {}", e)))
    }

    fn decode(&self, raw: &str) -> Result<T, DomainError> {
        serde_json::from_str(raw)
            .map_err(|e| DomainError::cache(format!("Failed to deserialize cache value: {}", e)))
    }
}

/// Codec for binary payloads (audio), stored as base64
#[derive(Debug, Clone, Default)]
pub struct Base64Codec;

impl Base64Codec {
    pub fn new() -> Self {
        Self
    }
}

impl CacheCodec<Bytes> for Base64Codec {
    fn encode(&self, value: &Bytes) -> Result<String, DomainError> {
        Ok(BASE64.encode(value))
    }

    fn decode(&self, raw: &str) -> Result<Bytes, DomainError> {
        BASE64
            .decode(raw)
            .map(Bytes::from)
            .map_err(|e| DomainError::cache(format!("Failed to decode binary cache value: {}", e)))
    }
}
