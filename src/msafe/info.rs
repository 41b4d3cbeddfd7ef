//! Pending transaction summary for display

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use std::fmt;

use super::builder::MsafeTxnBuilder;
use super::{functions, MsafeError};
use crate::message::{MultisigAccountCreationMessage, PendingPayload};
use crate::move_types::TypeTag;
use crate::transaction::{EntryFunctionCall, RawTransaction, TransactionPayload};
use crate::types::{AccountAddress, Ed25519PublicKey};
use crate::utils::sha3_256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingTxnType {
    AptCoinTransfer,
    AnyCoinTransfer,
    AnyCoinRegister,
    Revert,
    EntryFunction,
    ModulePublish,
    MoveScript,
    Migrate,
    AccountCreation,
}

impl PendingTxnType {
    pub fn label(&self) -> &'static str {
        match self {
            PendingTxnType::AptCoinTransfer => "Transfer APT",
            PendingTxnType::AnyCoinTransfer => "Transfer COIN",
            PendingTxnType::AnyCoinRegister => "Register COIN",
            PendingTxnType::Revert => "Revert transaction",
            PendingTxnType::EntryFunction => "Entry function",
            PendingTxnType::ModulePublish => "Module publish",
            PendingTxnType::MoveScript => "Move script",
            PendingTxnType::Migrate => "Migrate MSafe",
            PendingTxnType::AccountCreation => "Create multisig account",
        }
    }

    /// Best-effort label for a transaction from the MSafe account
    pub fn classify(raw: &RawTransaction, msafe: &MsafeTxnBuilder) -> Self {
        let call = match &raw.payload {
            TransactionPayload::EntryFunction(call) => call,
            TransactionPayload::Script(_) => return PendingTxnType::MoveScript,
            TransactionPayload::ModuleBundle(_) => return PendingTxnType::ModulePublish,
        };

        if msafe.is_msafe_call(call, functions::REVERT) {
            return PendingTxnType::Revert;
        }
        if call.module.address != AccountAddress::one() {
            return PendingTxnType::EntryFunction;
        }
        match (call.module.name.as_str(), call.function.as_str()) {
            ("coin", "transfer") if call.type_args == [TypeTag::aptos_coin()] => PendingTxnType::AptCoinTransfer,
            ("coin", "transfer") => PendingTxnType::AnyCoinTransfer,
            ("coin", "register") | ("managed_coin", "register") => PendingTxnType::AnyCoinRegister,
            ("code", "publish_package_txn") => PendingTxnType::ModulePublish,
            _ => PendingTxnType::EntryFunction,
        }
    }
}

impl fmt::Display for PendingTxnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Entry function call rendered as strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryFunctionInfo {
    pub fn_name: String,
    pub type_args: Vec<String>,
    /// Each argument's BCS bytes as `0x` hex
    pub args: Vec<String>,
}

impl From<&EntryFunctionCall> for EntryFunctionInfo {
    fn from(call: &EntryFunctionCall) -> Self {
        Self {
            fn_name: call.function_tag(),
            type_args: call.type_args.iter().map(|t| t.to_string()).collect(),
            args: call.args.iter().map(|a| format!("0x{}", hex::encode(a))).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingTxnInfo {
    pub tx_type: PendingTxnType,
    /// sha3-256 of the signed payload
    pub hash: String,
    pub sender: AccountAddress,
    pub sequence_number: u64,
    /// Unset for proof messages, which do not expire
    pub expiration: Option<DateTime<Utc>>,
    pub chain_id: u8,
    pub gas_price: u64,
    pub max_gas: u64,
    pub args: Option<EntryFunctionInfo>,
    pub num_sigs: Option<usize>,
    pub is_signed: bool,
}

impl PendingTxnInfo {
    pub fn from_raw(raw: &RawTransaction, msafe: &MsafeTxnBuilder) -> Self {
        let args = match &raw.payload {
            TransactionPayload::EntryFunction(call) => Some(EntryFunctionInfo::from(call)),
            _ => None,
        };
        Self {
            tx_type: PendingTxnType::classify(raw, msafe),
            hash: raw.hash_hex(),
            sender: raw.sender,
            sequence_number: raw.sequence_number,
            expiration: i64::try_from(raw.expiration_timestamp_secs)
                .ok()
                .and_then(|secs| Utc.timestamp_opt(secs, 0).single()),
            chain_id: raw.chain_id,
            gas_price: raw.gas_unit_price,
            max_gas: raw.max_gas_amount,
            args,
            num_sigs: None,
            is_signed: false,
        }
    }

    fn from_proof(tx_type: PendingTxnType, message: &MultisigAccountCreationMessage, encoded: &[u8]) -> Self {
        Self {
            tx_type,
            hash: format!("0x{}", hex::encode(sha3_256(encoded))),
            sender: message.account_address,
            sequence_number: message.sequence_number,
            expiration: None,
            chain_id: message.chain_id,
            gas_price: 0,
            max_gas: 0,
            args: None,
            num_sigs: None,
            is_signed: false,
        }
    }

    /// Summarise the bytes stored in an MSafe pending slot
    pub fn from_pending(bytes: &[u8], msafe: &MsafeTxnBuilder) -> Result<Self, MsafeError> {
        Ok(Self::from_payload(&PendingPayload::classify(bytes)?, msafe))
    }

    pub fn from_payload(payload: &PendingPayload, msafe: &MsafeTxnBuilder) -> Self {
        match payload {
            PendingPayload::MigrationProof(message) => {
                Self::from_proof(PendingTxnType::Migrate, &message.inner, &message.encode())
            }
            PendingPayload::AccountCreation(message) => {
                Self::from_proof(PendingTxnType::AccountCreation, &message.inner, &message.encode())
            }
            PendingPayload::Transaction(raw) => Self::from_raw(raw, msafe),
        }
    }

    /// Record collected signatures and whether `owner` is among the signers
    pub fn with_signatures(mut self, signers: &[Ed25519PublicKey], owner: Option<&Ed25519PublicKey>) -> Self {
        self.num_sigs = Some(signers.len());
        self.is_signed = owner.map_or(false, |pk| signers.contains(pk));
        self
    }
}
