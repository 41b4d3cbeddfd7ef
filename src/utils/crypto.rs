//! Hashing and signature helpers
//!
//! Every digest on this chain is SHA3-256, including signing prefixes and
//! authentication keys.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use sha3::{Digest, Sha3_256};

use crate::types::{Ed25519PublicKey, Ed25519Signature};

/// SHA3-256 of a single buffer
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// SHA3-256 over several buffers fed in order
pub fn sha3_256_concat(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Ed25519 check; keys that are not valid curve points never verify
pub fn verify_ed25519(public_key: &Ed25519PublicKey, message: &[u8], signature: &Ed25519Signature) -> bool {
    let verifying_key = match VerifyingKey::from_bytes(public_key.as_bytes()) {
        Ok(key) => key,
        Err(_) => return false,
    };
    let signature = Signature::from_bytes(signature.as_bytes());
    verifying_key.verify(message, &signature).is_ok()
}
