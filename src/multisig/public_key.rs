//! Threshold public key

use serde::{Serialize, Serializer};
use std::fmt;

use super::{MultisigError, MAX_NUM_OF_KEYS};
use crate::bcs::{BcsDeserialize, BcsSerialize, CodecError, CodecResult, Deserializer, Serializer as BcsWriter};
use crate::types::{AccountAddress, Ed25519PublicKey, ED25519_PUBLIC_KEY_LENGTH};
use crate::utils::crypto::sha3_256_concat;

/// Authentication key scheme byte for threshold Ed25519
pub const MULTI_ED25519_SCHEME: u8 = 1;

/// `n` ordered member keys and a threshold `t`, `1 <= t <= n <= 32`
///
/// Member order is caller-controlled and part of the key's identity.
#[derive(Clone, PartialEq, Eq)]
pub struct MultiEd25519PublicKey {
    public_keys: Vec<Ed25519PublicKey>,
    threshold: u8,
}

impl MultiEd25519PublicKey {
    pub fn new(public_keys: Vec<Ed25519PublicKey>, threshold: u8) -> Result<Self, MultisigError> {
        if public_keys.len() > MAX_NUM_OF_KEYS {
            return Err(MultisigError::TooManyKeys(public_keys.len()));
        }
        if threshold == 0 || threshold as usize > public_keys.len() {
            return Err(MultisigError::InvalidThreshold {
                threshold,
                keys: public_keys.len(),
            });
        }
        Ok(Self { public_keys, threshold })
    }

    /// Parse `key_1 || .. || key_n || threshold`
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MultisigError> {
        let (threshold, keys) = bytes
            .split_last()
            .ok_or_else(|| MultisigError::InvalidPublicKey("empty key blob".to_string()))?;
        if keys.len() % ED25519_PUBLIC_KEY_LENGTH != 0 {
            return Err(MultisigError::InvalidPublicKey(format!(
                "key blob length {} is not a multiple of {} plus one",
                bytes.len(),
                ED25519_PUBLIC_KEY_LENGTH
            )));
        }

        let public_keys = keys
            .chunks_exact(ED25519_PUBLIC_KEY_LENGTH)
            .map(|chunk| {
                let mut key = [0u8; ED25519_PUBLIC_KEY_LENGTH];
                key.copy_from_slice(chunk);
                Ed25519PublicKey::new(key)
            })
            .collect();
        Self::new(public_keys, *threshold)
    }

    pub fn public_keys(&self) -> &[Ed25519PublicKey] {
        &self.public_keys
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Position of `key` among the members
    pub fn index_of(&self, key: &Ed25519PublicKey) -> Option<usize> {
        self.public_keys.iter().position(|k| k == key)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.public_keys.len() * ED25519_PUBLIC_KEY_LENGTH + 1);
        for key in &self.public_keys {
            bytes.extend_from_slice(key.as_bytes());
        }
        bytes.push(self.threshold);
        bytes
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes()))
    }

    /// sha3_256(key bytes || 0x01)
    pub fn authentication_key(&self) -> [u8; 32] {
        sha3_256_concat(&[&self.to_bytes()[..], &[MULTI_ED25519_SCHEME][..]])
    }

    /// Account address, equal to the authentication key
    pub fn address(&self) -> AccountAddress {
        AccountAddress::new(self.authentication_key())
    }
}

impl fmt::Debug for MultiEd25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MultiEd25519PublicKey({}-of-{}, {})",
            self.threshold,
            self.public_keys.len(),
            self.to_hex()
        )
    }
}

impl Serialize for MultiEd25519PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl BcsSerialize for MultiEd25519PublicKey {
    fn serialize(&self, serializer: &mut BcsWriter) {
        serializer.serialize_bytes(&self.to_bytes());
    }
}

impl BcsDeserialize for MultiEd25519PublicKey {
    fn deserialize(deserializer: &mut Deserializer<'_>) -> CodecResult<Self> {
        let bytes = deserializer.deserialize_bytes()?;
        Self::from_bytes(&bytes).map_err(|e| CodecError::InvalidValue(e.to_string()))
    }
}
