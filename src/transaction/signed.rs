//! Signed transactions
//!
//! Bytes handed back by a wallet decode into an [`UnverifiedSignedTransaction`].
//! A [`SignedTransaction`] can only be built inside the crate, by the post-sign
//! verifier or the multisig assembler after checking every signature.

use super::authenticator::TransactionAuthenticator;
use super::raw::RawTransaction;
use crate::bcs::{BcsDeserialize, BcsSerialize, CodecResult, Deserializer, Serializer};

/// Wallet-returned signed transaction that has not been checked yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnverifiedSignedTransaction {
    pub raw_txn: RawTransaction,
    pub authenticator: TransactionAuthenticator,
}

impl UnverifiedSignedTransaction {
    pub fn new(raw_txn: RawTransaction, authenticator: TransactionAuthenticator) -> Self {
        Self { raw_txn, authenticator }
    }
}

impl BcsSerialize for UnverifiedSignedTransaction {
    fn serialize(&self, serializer: &mut Serializer) {
        self.raw_txn.serialize(serializer);
        self.authenticator.serialize(serializer);
    }
}

impl BcsDeserialize for UnverifiedSignedTransaction {
    fn deserialize(deserializer: &mut Deserializer<'_>) -> CodecResult<Self> {
        Ok(Self {
            raw_txn: RawTransaction::deserialize(deserializer)?,
            authenticator: TransactionAuthenticator::deserialize(deserializer)?,
        })
    }
}

/// Signed transaction whose fields and signatures have been verified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    raw_txn: RawTransaction,
    authenticator: TransactionAuthenticator,
}

impl SignedTransaction {
    pub(crate) fn from_verified(raw_txn: RawTransaction, authenticator: TransactionAuthenticator) -> Self {
        Self { raw_txn, authenticator }
    }

    pub fn raw_txn(&self) -> &RawTransaction {
        &self.raw_txn
    }

    pub fn authenticator(&self) -> &TransactionAuthenticator {
        &self.authenticator
    }

    /// Canonical bytes ready for submission
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bcs_bytes()))
    }
}

impl BcsSerialize for SignedTransaction {
    fn serialize(&self, serializer: &mut Serializer) {
        self.raw_txn.serialize(serializer);
        self.authenticator.serialize(serializer);
    }
}
