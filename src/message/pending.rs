//! Pending MSafe payload dispatch
//!
//! An MSafe pending slot stores the exact bytes owners sign: either a tagged
//! proof message or a raw transaction signing message.

use super::migration::{AccountCreationMessage, MigrationProofMessage};
use super::MessageError;
use crate::bcs::BcsDeserialize;
use crate::transaction::{raw_transaction_prefix, RawTransaction, SIGNING_PREFIX_LENGTH};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingPayload {
    MigrationProof(MigrationProofMessage),
    AccountCreation(AccountCreationMessage),
    Transaction(RawTransaction),
}

impl PendingPayload {
    /// Dispatch on the leading bytes
    pub fn classify(bytes: &[u8]) -> Result<Self, MessageError> {
        if MigrationProofMessage::is_variant(bytes) {
            return Ok(PendingPayload::MigrationProof(MigrationProofMessage::decode(bytes)?));
        }
        if AccountCreationMessage::is_variant(bytes) {
            return Ok(PendingPayload::AccountCreation(AccountCreationMessage::decode(bytes)?));
        }
        Ok(PendingPayload::Transaction(decode_signing_message(bytes)?))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PendingPayload::MigrationProof(_) => "migration_proof",
            PendingPayload::AccountCreation(_) => "account_creation",
            PendingPayload::Transaction(_) => "transaction",
        }
    }
}

/// Recover the raw transaction from `prefix || bcs(raw)`
pub fn decode_signing_message(bytes: &[u8]) -> Result<RawTransaction, MessageError> {
    if bytes.len() < SIGNING_PREFIX_LENGTH || bytes[..SIGNING_PREFIX_LENGTH] != raw_transaction_prefix() {
        return Err(MessageError::InvalidSigningPrefix);
    }
    Ok(RawTransaction::from_bcs_bytes(&bytes[SIGNING_PREFIX_LENGTH..])?)
}
