//! Canonical binary codec (BCS)
//!
//! Deterministic encoding used for every on-chain value this crate touches:
//! - Fixed-width little-endian unsigned integers (u8/u16/u32/u64/u128)
//! - ULEB128 length prefixes for sequences, byte vectors and strings
//! - Fixed-length byte arrays (addresses, public keys)
//! - Enum variants as a ULEB128 variant index followed by the variant body
//!
//! Every logical value has exactly one valid encoding, so decoders reject
//! non-minimal ULEB128 lengths and boolean bytes other than 0 and 1.

pub mod serializer;
pub mod deserializer;


pub use serializer::*;
pub use deserializer::*;

/// Largest sequence length representable on chain (lengths are u32 ULEB128)
pub const MAX_SEQUENCE_LENGTH: usize = u32::MAX as usize;

/// Error types for encoding and decoding
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("truncated input: needed {needed} bytes at offset {offset}, only {remaining} remaining")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    #[error("{count} trailing bytes left unconsumed after offset {offset}")]
    TrailingBytes { offset: usize, count: usize },

    #[error("unknown argument type: {0}")]
    UnknownArgumentType(String),

    #[error("invalid {type_name} variant index {index}")]
    InvalidVariant { type_name: &'static str, index: u32 },

    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("invalid bool byte 0x{0:02x}")]
    InvalidBool(u8),

    #[error("ULEB128 value does not fit in u32")]
    LengthOverflow,

    #[error("non-canonical ULEB128 encoding at offset {offset}")]
    NonCanonicalLength { offset: usize },

    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid value: {0}")]
    InvalidValue(String),
}

pub type CodecResult<T> = Result<T, CodecError>;

/// A value with a canonical encoding
pub trait BcsSerialize {
    fn serialize(&self, serializer: &mut Serializer);

    /// Encode into a fresh byte vector
    fn to_bcs_bytes(&self) -> Vec<u8> {
        let mut serializer = Serializer::new();
        self.serialize(&mut serializer);
        serializer.into_bytes()
    }
}

/// A value that can be read back from its canonical encoding
pub trait BcsDeserialize: Sized {
    fn deserialize(deserializer: &mut Deserializer<'_>) -> CodecResult<Self>;

    /// Decode from a complete byte slice; every byte must be consumed
    fn from_bcs_bytes(bytes: &[u8]) -> CodecResult<Self> {
        let mut deserializer = Deserializer::new(bytes);
        let value = Self::deserialize(&mut deserializer)?;
        deserializer.finish()?;
        Ok(value)
    }
}

impl BcsSerialize for u8 {
    fn serialize(&self, serializer: &mut Serializer) {
        serializer.serialize_u8(*self);
    }
}

impl BcsDeserialize for u8 {
    fn deserialize(deserializer: &mut Deserializer<'_>) -> CodecResult<Self> {
        deserializer.deserialize_u8()
    }
}

impl BcsSerialize for u64 {
    fn serialize(&self, serializer: &mut Serializer) {
        serializer.serialize_u64(*self);
    }
}

impl BcsDeserialize for u64 {
    fn deserialize(deserializer: &mut Deserializer<'_>) -> CodecResult<Self> {
        deserializer.deserialize_u64()
    }
}

impl BcsSerialize for u128 {
    fn serialize(&self, serializer: &mut Serializer) {
        serializer.serialize_u128(*self);
    }
}

impl BcsDeserialize for u128 {
    fn deserialize(deserializer: &mut Deserializer<'_>) -> CodecResult<Self> {
        deserializer.deserialize_u128()
    }
}

impl BcsSerialize for bool {
    fn serialize(&self, serializer: &mut Serializer) {
        serializer.serialize_bool(*self);
    }
}

impl BcsDeserialize for bool {
    fn deserialize(deserializer: &mut Deserializer<'_>) -> CodecResult<Self> {
        deserializer.deserialize_bool()
    }
}

impl BcsSerialize for String {
    fn serialize(&self, serializer: &mut Serializer) {
        serializer.serialize_str(self);
    }
}

impl BcsDeserialize for String {
    fn deserialize(deserializer: &mut Deserializer<'_>) -> CodecResult<Self> {
        deserializer.deserialize_str()
    }
}

impl<T: BcsSerialize> BcsSerialize for Vec<T> {
    fn serialize(&self, serializer: &mut Serializer) {
        serialize_vector(self, serializer);
    }
}

impl<T: BcsDeserialize> BcsDeserialize for Vec<T> {
    fn deserialize(deserializer: &mut Deserializer<'_>) -> CodecResult<Self> {
        deserialize_vector(deserializer)
    }
}

impl<const N: usize> BcsSerialize for [u8; N] {
    fn serialize(&self, serializer: &mut Serializer) {
        serializer.serialize_fixed_bytes(self);
    }
}

impl<const N: usize> BcsDeserialize for [u8; N] {
    fn deserialize(deserializer: &mut Deserializer<'_>) -> CodecResult<Self> {
        deserializer.deserialize_fixed_bytes::<N>()
    }
}

/// Encode a sequence: ULEB128 length, then each element
pub fn serialize_vector<T: BcsSerialize>(items: &[T], serializer: &mut Serializer) {
    serializer.serialize_len(items.len());
    for item in items {
        item.serialize(serializer);
    }
}

/// Decode a sequence: ULEB128 length, then that many elements
pub fn deserialize_vector<T: BcsDeserialize>(deserializer: &mut Deserializer<'_>) -> CodecResult<Vec<T>> {
    let len = deserializer.deserialize_len()?;
    // Every element occupies at least one byte, so cap the pre-allocation
    let mut items = Vec::with_capacity(len.min(deserializer.remaining()));
    for _ in 0..len {
        items.push(T::deserialize(deserializer)?);
    }
    Ok(items)
}
