//! Multisig account creation messages
//!
//! Signed by owners when an MSafe wallet is migrated to a native multisig
//! account. Both variants carry the same body and differ only in the tag.

use super::tagged::{MessageVariant, TaggedMessage};
use super::type_info::TypeInfo;
use crate::bcs::{BcsDeserialize, BcsSerialize, CodecResult, Deserializer, Serializer};
use crate::types::AccountAddress;

pub const MULTISIG_ACCOUNT_MODULE: &str = "multisig_account";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultisigAccountCreationMessage {
    pub chain_id: u8,
    pub account_address: AccountAddress,
    pub sequence_number: u64,
    pub owners: Vec<AccountAddress>,
    pub num_signatures_required: u64,
}

impl BcsSerialize for MultisigAccountCreationMessage {
    fn serialize(&self, serializer: &mut Serializer) {
        serializer.serialize_u8(self.chain_id);
        self.account_address.serialize(serializer);
        serializer.serialize_u64(self.sequence_number);
        self.owners.serialize(serializer);
        serializer.serialize_u64(self.num_signatures_required);
    }
}

impl BcsDeserialize for MultisigAccountCreationMessage {
    fn deserialize(deserializer: &mut Deserializer<'_>) -> CodecResult<Self> {
        Ok(Self {
            chain_id: deserializer.deserialize_u8()?,
            account_address: AccountAddress::deserialize(deserializer)?,
            sequence_number: deserializer.deserialize_u64()?,
            owners: Vec::<AccountAddress>::deserialize(deserializer)?,
            num_signatures_required: deserializer.deserialize_u64()?,
        })
    }
}

/// `0x1::multisig_account::MultisigAccountCreationWithAuthKeyRevocationMessage`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationProof;

impl MessageVariant for MigrationProof {
    type Inner = MultisigAccountCreationMessage;

    fn type_info() -> TypeInfo {
        TypeInfo::new(
            AccountAddress::one(),
            MULTISIG_ACCOUNT_MODULE,
            "MultisigAccountCreationWithAuthKeyRevocationMessage",
        )
    }
}

/// `0x1::multisig_account::MultisigAccountCreationMessage`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountCreationProof;

impl MessageVariant for AccountCreationProof {
    type Inner = MultisigAccountCreationMessage;

    fn type_info() -> TypeInfo {
        TypeInfo::new(AccountAddress::one(), MULTISIG_ACCOUNT_MODULE, "MultisigAccountCreationMessage")
    }
}

pub type MigrationProofMessage = TaggedMessage<MigrationProof>;
pub type AccountCreationMessage = TaggedMessage<AccountCreationProof>;
