//! Transaction authenticators

use crate::bcs::{BcsDeserialize, BcsSerialize, CodecError, CodecResult, Deserializer, Serializer};
use crate::multisig::{MultiEd25519PublicKey, MultiEd25519Signature};
use crate::types::{Ed25519PublicKey, Ed25519Signature};

/// Signature envelope attached to a raw transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionAuthenticator {
    Ed25519 {
        public_key: Ed25519PublicKey,
        signature: Ed25519Signature,
    },
    MultiEd25519 {
        public_key: MultiEd25519PublicKey,
        signature: MultiEd25519Signature,
    },
}

impl TransactionAuthenticator {
    const ED25519: u32 = 0;
    const MULTI_ED25519: u32 = 1;

    pub fn ed25519(public_key: Ed25519PublicKey, signature: Ed25519Signature) -> Self {
        TransactionAuthenticator::Ed25519 { public_key, signature }
    }

    pub fn scheme(&self) -> &'static str {
        match self {
            TransactionAuthenticator::Ed25519 { .. } => "ed25519",
            TransactionAuthenticator::MultiEd25519 { .. } => "multi_ed25519",
        }
    }
}

impl BcsSerialize for TransactionAuthenticator {
    fn serialize(&self, serializer: &mut Serializer) {
        match self {
            TransactionAuthenticator::Ed25519 { public_key, signature } => {
                serializer.serialize_variant_index(Self::ED25519);
                public_key.serialize(serializer);
                signature.serialize(serializer);
            }
            TransactionAuthenticator::MultiEd25519 { public_key, signature } => {
                serializer.serialize_variant_index(Self::MULTI_ED25519);
                public_key.serialize(serializer);
                signature.serialize(serializer);
            }
        }
    }
}

impl BcsDeserialize for TransactionAuthenticator {
    fn deserialize(deserializer: &mut Deserializer<'_>) -> CodecResult<Self> {
        let authenticator = match deserializer.deserialize_variant_index()? {
            Self::ED25519 => TransactionAuthenticator::Ed25519 {
                public_key: Ed25519PublicKey::deserialize(deserializer)?,
                signature: Ed25519Signature::deserialize(deserializer)?,
            },
            Self::MULTI_ED25519 => TransactionAuthenticator::MultiEd25519 {
                public_key: MultiEd25519PublicKey::deserialize(deserializer)?,
                signature: MultiEd25519Signature::deserialize(deserializer)?,
            },
            index => {
                return Err(CodecError::InvalidVariant {
                    type_name: "TransactionAuthenticator",
                    index,
                })
            }
        };
        Ok(authenticator)
    }
}
