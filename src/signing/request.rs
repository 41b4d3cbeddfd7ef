//! Wallet-facing signing request

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::RequestError;
use crate::abi::{AbiLookup, ArgFormatter, ArgumentDecoder};
use crate::log_debug;
use crate::transaction::{EntryFunctionCall, RawTransaction};

/// Human-readable entry function call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SigningPayload {
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Value>,
}

impl SigningPayload {
    pub fn to_value(&self) -> Value {
        json!({
            "function": self.function,
            "type_arguments": self.type_arguments,
            "arguments": self.arguments,
        })
    }
}

/// Transaction metadata with every number as a decimal string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningOptions {
    pub max_gas_amount: String,
    pub gas_unit_price: String,
    pub expiration_timestamp_secs: String,
    pub sequence_number: String,
    pub sender: String,
}

impl SigningOptions {
    pub fn from_raw(raw: &RawTransaction) -> Self {
        Self {
            max_gas_amount: raw.max_gas_amount.to_string(),
            gas_unit_price: raw.gas_unit_price.to_string(),
            expiration_timestamp_secs: raw.expiration_timestamp_secs.to_string(),
            sequence_number: raw.sequence_number.to_string(),
            sender: raw.sender.to_hex(),
        }
    }

    pub fn to_value(&self) -> Value {
        json!({
            "max_gas_amount": self.max_gas_amount,
            "gas_unit_price": self.gas_unit_price,
            "expiration_timestamp_secs": self.expiration_timestamp_secs,
            "sequence_number": self.sequence_number,
            "sender": self.sender,
        })
    }

    pub fn to_camel_case(&self) -> CamelCaseSigningOptions {
        CamelCaseSigningOptions {
            payload_type: ENTRY_FUNCTION_PAYLOAD.to_string(),
            gas_unit_price: self.gas_unit_price.clone(),
            max_gas_fee: self.max_gas_amount.clone(),
            sender: self.sender.clone(),
            expiration_timestamp: self.expiration_timestamp_secs.clone(),
            sequence_number: self.sequence_number.clone(),
        }
    }
}

pub const ENTRY_FUNCTION_PAYLOAD: &str = "entry_function_payload";

/// Option naming used by Petra
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CamelCaseSigningOptions {
    #[serde(rename = "type")]
    pub payload_type: String,
    pub gas_unit_price: String,
    pub max_gas_fee: String,
    pub sender: String,
    pub expiration_timestamp: String,
    pub sequence_number: String,
}

impl CamelCaseSigningOptions {
    pub fn to_value(&self) -> Value {
        json!({
            "type": self.payload_type,
            "gasUnitPrice": self.gas_unit_price,
            "maxGasFee": self.max_gas_fee,
            "sender": self.sender,
            "expirationTimestamp": self.expiration_timestamp,
            "sequenceNumber": self.sequence_number,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SigningRequest {
    pub payload: SigningPayload,
    pub options: SigningOptions,
}

/// Builds [`SigningRequest`]s for one wallet's argument formatting
pub struct SigningRequestBuilder<'a> {
    lookup: &'a dyn AbiLookup,
    formatter: &'a dyn ArgFormatter,
}

impl<'a> SigningRequestBuilder<'a> {
    pub fn new(lookup: &'a dyn AbiLookup, formatter: &'a dyn ArgFormatter) -> Self {
        Self { lookup, formatter }
    }

    /// Only entry function payloads can be expressed in this form
    pub async fn build(&self, raw: &RawTransaction) -> Result<SigningRequest, RequestError> {
        let call = raw.payload.as_entry_function()?;
        Ok(SigningRequest {
            payload: self.payload(call).await?,
            options: SigningOptions::from_raw(raw),
        })
    }

    pub async fn payload(&self, call: &EntryFunctionCall) -> Result<SigningPayload, RequestError> {
        let signature = self.lookup.get_function_abi(&call.module, &call.function).await?;
        let arguments = ArgumentDecoder::new(self.formatter).decode_call(call, &signature)?;
        let function = call.function_tag();

        log_debug!("signing", "Built signing payload", function = function, args = arguments.len());

        Ok(SigningPayload {
            function,
            type_arguments: call.type_args.iter().map(|t| t.to_string()).collect(),
            arguments,
        })
    }
}
