//! Threshold (k-of-n) Ed25519 accounts
//!
//! - [`MultiEd25519PublicKey`]: ordered member keys plus threshold
//! - [`MultiEd25519Signature`]: per-member signatures with a signer bitmap
//! - [`MultisigSignatureSet`]: collects owner signatures for one pending
//!   transaction and assembles the signed envelope
//! - [`MultisigDeriver`]: MSafe address derivation with nonce disambiguation

pub mod address;
pub mod public_key;
pub mod signature;


pub use address::*;
pub use public_key::*;
pub use signature::*;

/// Most member keys a threshold key can hold
pub const MAX_NUM_OF_KEYS: usize = 32;

/// Error types for multisig key and signature handling
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MultisigError {
    #[error("invalid threshold {threshold} for {keys} keys (need 1 <= threshold <= keys)")]
    InvalidThreshold { threshold: u8, keys: usize },

    #[error("too many keys: {0} (max 32)")]
    TooManyKeys(usize),

    #[error("nonce {0} does not fit the 4-byte nonce key")]
    InvalidNonce(u64),

    #[error("invalid multisig public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid multisig signature: {0}")]
    InvalidSignature(String),

    #[error("signer {0} is not a member of this multisig key")]
    UnknownSigner(String),

    #[error("not enough signatures: have {have}, need {threshold}")]
    NotEnoughSignatures { have: usize, threshold: u8 },
}
