//! Threshold signatures and multisig transaction assembly

use std::collections::BTreeMap;

use super::public_key::MultiEd25519PublicKey;
use super::{MultisigError, MAX_NUM_OF_KEYS};
use crate::bcs::{BcsDeserialize, BcsSerialize, CodecError, CodecResult, Deserializer, Serializer};
use crate::transaction::{RawTransaction, SignedTransaction, TransactionAuthenticator};
use crate::types::{Ed25519PublicKey, Ed25519Signature, ED25519_SIGNATURE_LENGTH};
use crate::utils::crypto::verify_ed25519;
use crate::{log_debug, log_warn};

/// Signer bitmap width in bytes
pub const BITMAP_NUM_OF_BYTES: usize = 4;

/// Set the bit for member `index`; bits are numbered MSB-first within each byte
pub fn bitmap_set_bit(bitmap: &mut [u8; BITMAP_NUM_OF_BYTES], index: usize) {
    let bucket = index / 8;
    let offset = index % 8;
    bitmap[bucket] |= 128 >> offset;
}

pub fn bitmap_get_bit(bitmap: &[u8; BITMAP_NUM_OF_BYTES], index: usize) -> bool {
    let bucket = index / 8;
    let offset = index % 8;
    bitmap[bucket] & (128 >> offset) != 0
}

/// Member indices whose bit is set, ascending
pub fn bitmap_indices(bitmap: &[u8; BITMAP_NUM_OF_BYTES]) -> Vec<usize> {
    (0..MAX_NUM_OF_KEYS).filter(|i| bitmap_get_bit(bitmap, *i)).collect()
}

/// Signatures from a subset of members, ordered by member index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiEd25519Signature {
    signatures: Vec<Ed25519Signature>,
    bitmap: [u8; BITMAP_NUM_OF_BYTES],
}

impl MultiEd25519Signature {
    /// Build from `(member index, signature)` pairs in any order
    pub fn new(mut signed: Vec<(usize, Ed25519Signature)>) -> Result<Self, MultisigError> {
        signed.sort_by_key(|(index, _)| *index);

        let mut bitmap = [0u8; BITMAP_NUM_OF_BYTES];
        let mut signatures = Vec::with_capacity(signed.len());
        for (index, signature) in signed {
            if index >= MAX_NUM_OF_KEYS {
                return Err(MultisigError::InvalidSignature(format!("signer index {} out of range", index)));
            }
            if bitmap_get_bit(&bitmap, index) {
                return Err(MultisigError::InvalidSignature(format!("duplicate signature for index {}", index)));
            }
            bitmap_set_bit(&mut bitmap, index);
            signatures.push(signature);
        }
        Ok(Self { signatures, bitmap })
    }

    /// Parse `sig_1 || .. || sig_k || bitmap`
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MultisigError> {
        if bytes.len() < BITMAP_NUM_OF_BYTES {
            return Err(MultisigError::InvalidSignature("signature blob shorter than bitmap".to_string()));
        }
        let (sig_bytes, bitmap_bytes) = bytes.split_at(bytes.len() - BITMAP_NUM_OF_BYTES);
        if sig_bytes.len() % ED25519_SIGNATURE_LENGTH != 0 {
            return Err(MultisigError::InvalidSignature(format!(
                "signature blob length {} is not a multiple of {} plus bitmap",
                bytes.len(),
                ED25519_SIGNATURE_LENGTH
            )));
        }

        let mut bitmap = [0u8; BITMAP_NUM_OF_BYTES];
        bitmap.copy_from_slice(bitmap_bytes);
        let signatures: Vec<Ed25519Signature> = sig_bytes
            .chunks_exact(ED25519_SIGNATURE_LENGTH)
            .map(|chunk| {
                let mut sig = [0u8; ED25519_SIGNATURE_LENGTH];
                sig.copy_from_slice(chunk);
                Ed25519Signature::new(sig)
            })
            .collect();

        let set_bits = bitmap_indices(&bitmap).len();
        if set_bits != signatures.len() {
            return Err(MultisigError::InvalidSignature(format!(
                "bitmap has {} bits set but blob carries {} signatures",
                set_bits,
                signatures.len()
            )));
        }
        Ok(Self { signatures, bitmap })
    }

    pub fn signatures(&self) -> &[Ed25519Signature] {
        &self.signatures
    }

    pub fn bitmap(&self) -> &[u8; BITMAP_NUM_OF_BYTES] {
        &self.bitmap
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.signatures.len() * ED25519_SIGNATURE_LENGTH + BITMAP_NUM_OF_BYTES);
        for signature in &self.signatures {
            bytes.extend_from_slice(signature.as_bytes());
        }
        bytes.extend_from_slice(&self.bitmap);
        bytes
    }

    /// Check every carried signature against its member key, and the threshold
    pub fn verify(&self, message: &[u8], public_key: &MultiEd25519PublicKey) -> Result<(), MultisigError> {
        let indices = bitmap_indices(&self.bitmap);
        if indices.len() < public_key.threshold() as usize {
            return Err(MultisigError::NotEnoughSignatures {
                have: indices.len(),
                threshold: public_key.threshold(),
            });
        }

        for (index, signature) in indices.iter().zip(&self.signatures) {
            let member = public_key
                .public_keys()
                .get(*index)
                .ok_or_else(|| MultisigError::UnknownSigner(format!("index {}", index)))?;
            if !verify_ed25519(member, message, signature) {
                return Err(MultisigError::InvalidSignature(format!(
                    "signature from member {} ({}) does not verify",
                    index, member
                )));
            }
        }
        Ok(())
    }
}

impl BcsSerialize for MultiEd25519Signature {
    fn serialize(&self, serializer: &mut Serializer) {
        serializer.serialize_bytes(&self.to_bytes());
    }
}

impl BcsDeserialize for MultiEd25519Signature {
    fn deserialize(deserializer: &mut Deserializer<'_>) -> CodecResult<Self> {
        let bytes = deserializer.deserialize_bytes()?;
        Self::from_bytes(&bytes).map_err(|e| CodecError::InvalidValue(e.to_string()))
    }
}

/// Owner signatures gathered for one pending multisig transaction
#[derive(Debug, Clone)]
pub struct MultisigSignatureSet {
    public_key: MultiEd25519PublicKey,
    signatures: BTreeMap<usize, Ed25519Signature>,
}

impl MultisigSignatureSet {
    pub fn new(public_key: MultiEd25519PublicKey) -> Self {
        Self {
            public_key,
            signatures: BTreeMap::new(),
        }
    }

    pub fn public_key(&self) -> &MultiEd25519PublicKey {
        &self.public_key
    }

    /// Record `signer`'s signature; a repeat signature from the same owner replaces the earlier one
    pub fn add(&mut self, signer: &Ed25519PublicKey, signature: Ed25519Signature) -> Result<usize, MultisigError> {
        let index = self
            .public_key
            .index_of(signer)
            .ok_or_else(|| MultisigError::UnknownSigner(signer.to_hex()))?;
        if self.signatures.insert(index, signature).is_some() {
            log_debug!("multisig", "Replacing owner signature", index = index);
        }
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Whether the threshold has been reached
    pub fn is_complete(&self) -> bool {
        self.signatures.len() >= self.public_key.threshold() as usize
    }

    pub fn to_signature(&self) -> Result<MultiEd25519Signature, MultisigError> {
        if !self.is_complete() {
            return Err(MultisigError::NotEnoughSignatures {
                have: self.signatures.len(),
                threshold: self.public_key.threshold(),
            });
        }
        MultiEd25519Signature::new(self.signatures.iter().map(|(i, s)| (*i, *s)).collect())
    }

    /// Verify the collected signatures over `raw` and wrap them into a signed transaction
    pub fn assemble(&self, raw: RawTransaction) -> Result<SignedTransaction, MultisigError> {
        let signature = self.to_signature()?;
        if let Err(e) = signature.verify(&raw.signing_message(), &self.public_key) {
            log_warn!("multisig", "Multisig assembly rejected", error = e);
            return Err(e);
        }
        Ok(SignedTransaction::from_verified(
            raw,
            TransactionAuthenticator::MultiEd25519 {
                public_key: self.public_key.clone(),
                signature,
            },
        ))
    }
}
