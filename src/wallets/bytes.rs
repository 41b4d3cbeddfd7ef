//! Byte shapes wallets use on the JSON boundary

use serde_json::{Map, Value};

use super::WalletError;
use crate::bcs::BcsDeserialize;
use crate::transaction::UnverifiedSignedTransaction;

/// `[1, 2, 3]`
pub fn to_array(bytes: &[u8]) -> Value {
    Value::Array(bytes.iter().map(|b| Value::from(*b)).collect())
}

/// `"1,2,3"`
pub fn to_comma_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| b.to_string()).collect::<Vec<_>>().join(",")
}

pub fn from_comma_string(s: &str) -> Result<Vec<u8>, WalletError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    trimmed
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<u8>()
                .map_err(|_| WalletError::MalformedResponse(format!("invalid byte '{}' in comma list", part)))
        })
        .collect()
}

pub fn from_array(value: &Value) -> Result<Vec<u8>, WalletError> {
    let items = value
        .as_array()
        .ok_or_else(|| WalletError::MalformedResponse(format!("expected byte array, got {}", type_name(value))))?;
    items.iter().map(byte_value).collect()
}

/// Indexable byte map such as `{"0": 12, "1": 34}`
///
/// Keys are read in numeric order and must cover `0..len` exactly. A plain
/// array is accepted too.
pub fn from_byte_map(value: &Value) -> Result<Vec<u8>, WalletError> {
    match value {
        Value::Array(_) => from_array(value),
        Value::Object(map) => from_object(map),
        other => Err(WalletError::MalformedResponse(format!(
            "expected byte map, got {}",
            type_name(other)
        ))),
    }
}

fn from_object(map: &Map<String, Value>) -> Result<Vec<u8>, WalletError> {
    let mut entries = map
        .iter()
        .map(|(key, value)| {
            let index = key
                .parse::<usize>()
                .map_err(|_| WalletError::MalformedResponse(format!("non-numeric byte map key '{}'", key)))?;
            Ok((index, byte_value(value)?))
        })
        .collect::<Result<Vec<_>, WalletError>>()?;
    entries.sort_by_key(|(index, _)| *index);

    for (expected, (index, _)) in entries.iter().enumerate() {
        if *index != expected {
            return Err(WalletError::MalformedResponse(format!("byte map is missing index {}", expected)));
        }
    }
    Ok(entries.into_iter().map(|(_, byte)| byte).collect())
}

fn byte_value(value: &Value) -> Result<u8, WalletError> {
    value
        .as_u64()
        .and_then(|n| u8::try_from(n).ok())
        .ok_or_else(|| WalletError::MalformedResponse(format!("invalid byte value {}", value)))
}

/// Field `key` of a response object
pub fn field<'a>(response: &'a Value, key: &str) -> Result<&'a Value, WalletError> {
    response
        .get(key)
        .ok_or_else(|| WalletError::MalformedResponse(format!("response has no '{}' field", key)))
}

pub fn as_str(value: &Value) -> Result<&str, WalletError> {
    value
        .as_str()
        .ok_or_else(|| WalletError::MalformedResponse(format!("expected string, got {}", type_name(value))))
}

pub fn signed_transaction(bytes: &[u8]) -> Result<UnverifiedSignedTransaction, WalletError> {
    Ok(UnverifiedSignedTransaction::from_bcs_bytes(bytes)?)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
