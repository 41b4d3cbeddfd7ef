//! Tagged message codec

use std::fmt::Debug;

use super::type_info::TypeInfo;
use super::MessageError;
use crate::bcs::{BcsDeserialize, BcsSerialize, Deserializer, Serializer};

/// A message kind: its fixed type info and its body type
pub trait MessageVariant {
    type Inner: BcsSerialize + BcsDeserialize + Clone + PartialEq + Eq + Debug;

    fn type_info() -> TypeInfo;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedMessage<V: MessageVariant> {
    type_info: TypeInfo,
    pub inner: V::Inner,
}

impl<V: MessageVariant> TaggedMessage<V> {
    pub fn new(inner: V::Inner) -> Self {
        Self {
            type_info: V::type_info(),
            inner,
        }
    }

    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// Encoded type info every message of this variant starts with
    pub fn prefix() -> Vec<u8> {
        V::type_info().to_bcs_bytes()
    }

    pub fn is_variant(bytes: &[u8]) -> bool {
        bytes.starts_with(&Self::prefix())
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut serializer = Serializer::new();
        V::type_info().serialize(&mut serializer);
        self.inner.serialize(&mut serializer);
        serializer.into_bytes()
    }

    /// Decode a complete blob; fails with `InvalidTypeInfo` if the tag is another variant's
    pub fn decode(bytes: &[u8]) -> Result<Self, MessageError> {
        let expected = V::type_info();
        if !Self::is_variant(bytes) {
            let found = TypeInfo::deserialize(&mut Deserializer::new(bytes))
                .map(|info| info.to_string())
                .unwrap_or_else(|_| format!("{} undecodable bytes", bytes.len()));
            return Err(MessageError::InvalidTypeInfo {
                expected: expected.to_string(),
                found,
            });
        }

        let mut deserializer = Deserializer::new(bytes);
        let type_info = TypeInfo::deserialize(&mut deserializer)?;
        let inner = V::Inner::deserialize(&mut deserializer)?;
        deserializer.finish()?;
        Ok(Self { type_info, inner })
    }
}
