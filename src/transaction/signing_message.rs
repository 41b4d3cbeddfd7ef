//! Canonical signing message
//!
//! signing_message = sha3_256("APTOS::RawTransaction") || bcs(raw_txn)

use super::raw::RawTransaction;
use crate::bcs::BcsSerialize;
use crate::utils::crypto::{sha3_256, sha3_256_concat};

/// Domain-separation salt for raw transaction signatures
pub const RAW_TRANSACTION_SALT: &[u8] = b"APTOS::RawTransaction";

/// Length of the hashed domain-separation prefix
pub const SIGNING_PREFIX_LENGTH: usize = 32;

/// Hashed prefix every raw transaction signing message starts with
pub fn raw_transaction_prefix() -> [u8; SIGNING_PREFIX_LENGTH] {
    sha3_256(RAW_TRANSACTION_SALT)
}

impl RawTransaction {
    /// Bytes an Ed25519 signature over this transaction is computed on
    pub fn signing_message(&self) -> Vec<u8> {
        let body = self.to_bcs_bytes();
        let mut message = Vec::with_capacity(SIGNING_PREFIX_LENGTH + body.len());
        message.extend_from_slice(&raw_transaction_prefix());
        message.extend_from_slice(&body);
        message
    }

    /// Display hash, sha3_256 of the signing message
    pub fn hash(&self) -> [u8; 32] {
        sha3_256_concat(&[&raw_transaction_prefix()[..], &self.to_bcs_bytes()[..]])
    }

    pub fn hash_hex(&self) -> String {
        format!("0x{}", hex::encode(self.hash()))
    }
}
