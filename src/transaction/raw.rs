//! Raw (unsigned) transactions

use super::payload::TransactionPayload;
use crate::bcs::{BcsDeserialize, BcsSerialize, CodecResult, Deserializer, Serializer};
use crate::types::AccountAddress;

/// Unsigned transaction, encoded field by field in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTransaction {
    pub sender: AccountAddress,
    pub sequence_number: u64,
    pub payload: TransactionPayload,
    pub max_gas_amount: u64,
    pub gas_unit_price: u64,
    pub expiration_timestamp_secs: u64,
    pub chain_id: u8,
}

/// Field names as reported by the post-sign verifier
pub mod fields {
    pub const SENDER: &str = "sender";
    pub const SEQUENCE_NUMBER: &str = "sequence_number";
    pub const PAYLOAD: &str = "payload";
    pub const MAX_GAS_AMOUNT: &str = "max_gas_amount";
    pub const GAS_UNIT_PRICE: &str = "gas_unit_price";
    pub const EXPIRATION_TIMESTAMP_SECS: &str = "expiration_timestamp_secs";
    pub const CHAIN_ID: &str = "chain_id";
}

/// One differing field between two raw transactions, rendered for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDiff {
    pub field: &'static str,
    pub expected: String,
    pub actual: String,
}

impl RawTransaction {
    /// Compare against `other` field by field, in encoding order
    ///
    /// Payloads are compared by their canonical encodings and rendered as hex.
    pub fn diff(&self, other: &RawTransaction) -> Vec<FieldDiff> {
        let mut diffs = Vec::new();
        let mut push = |field: &'static str, expected: String, actual: String| {
            if expected != actual {
                diffs.push(FieldDiff { field, expected, actual });
            }
        };

        push(fields::SENDER, self.sender.to_hex(), other.sender.to_hex());
        push(
            fields::SEQUENCE_NUMBER,
            self.sequence_number.to_string(),
            other.sequence_number.to_string(),
        );
        push(
            fields::PAYLOAD,
            hex::encode(self.payload.to_bcs_bytes()),
            hex::encode(other.payload.to_bcs_bytes()),
        );
        push(
            fields::MAX_GAS_AMOUNT,
            self.max_gas_amount.to_string(),
            other.max_gas_amount.to_string(),
        );
        push(
            fields::GAS_UNIT_PRICE,
            self.gas_unit_price.to_string(),
            other.gas_unit_price.to_string(),
        );
        push(
            fields::EXPIRATION_TIMESTAMP_SECS,
            self.expiration_timestamp_secs.to_string(),
            other.expiration_timestamp_secs.to_string(),
        );
        push(fields::CHAIN_ID, self.chain_id.to_string(), other.chain_id.to_string());

        diffs
    }
}

impl BcsSerialize for RawTransaction {
    fn serialize(&self, serializer: &mut Serializer) {
        self.sender.serialize(serializer);
        serializer.serialize_u64(self.sequence_number);
        self.payload.serialize(serializer);
        serializer.serialize_u64(self.max_gas_amount);
        serializer.serialize_u64(self.gas_unit_price);
        serializer.serialize_u64(self.expiration_timestamp_secs);
        serializer.serialize_u8(self.chain_id);
    }
}

impl BcsDeserialize for RawTransaction {
    fn deserialize(deserializer: &mut Deserializer<'_>) -> CodecResult<Self> {
        Ok(Self {
            sender: AccountAddress::deserialize(deserializer)?,
            sequence_number: deserializer.deserialize_u64()?,
            payload: TransactionPayload::deserialize(deserializer)?,
            max_gas_amount: deserializer.deserialize_u64()?,
            gas_unit_price: deserializer.deserialize_u64()?,
            expiration_timestamp_secs: deserializer.deserialize_u64()?,
            chain_id: deserializer.deserialize_u8()?,
        })
    }
}
