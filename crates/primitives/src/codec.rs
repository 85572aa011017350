//! Canonical record encoding
//!
//! An emitted record is stored as bytes. Two observers of the same log must
//! agree on what was emitted, so every codec here is deterministic: the same
//! logical value always encodes to the same bytes.

use chronicle_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encodes records for the log and decodes them for readers
pub trait EventCodec: Send + Sync {
    /// Short stable name, e.g. `"bincode"`
    fn name(&self) -> &'static str;

    /// Encode `value` canonically
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>>;

    /// Decode bytes produced by [`EventCodec::encode`]
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T>;
}

/// Compact binary encoding (fixed-width little-endian integers)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BincodeCodec;

impl EventCodec for BincodeCodec {
    fn name(&self) -> &'static str {
        "bincode"
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        bincode::serialize(value).map_err(|e| Error::SerializationFailed(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        bincode::deserialize(bytes).map_err(|e| Error::SerializationFailed(e.to_string()))
    }
}

/// Compact JSON encoding
///
/// Object keys come out in a fixed order (struct field order, sorted maps),
/// which keeps the output canonical.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonCodec;

impl EventCodec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| Error::SerializationFailed(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        serde_json::from_slice(bytes).map_err(|e| Error::SerializationFailed(e.to_string()))
    }
}

/// Codec chosen at runtime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CodecKind {
    /// [`BincodeCodec`]
    #[default]
    Bincode,
    /// [`JsonCodec`]
    Json,
}

impl EventCodec for CodecKind {
    fn name(&self) -> &'static str {
        match self {
            CodecKind::Bincode => BincodeCodec.name(),
            CodecKind::Json => JsonCodec.name(),
        }
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        match self {
            CodecKind::Bincode => BincodeCodec.encode(value),
            CodecKind::Json => JsonCodec.encode(value),
        }
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        match self {
            CodecKind::Bincode => BincodeCodec.decode(bytes),
            CodecKind::Json => JsonCodec.decode(bytes),
        }
    }
}
