//! Shared types for the MSafe wallet adaptor
//!
//! Account addresses and Ed25519 key material cross every module boundary
//! (codec, verifier, multisig deriver, FFI), so they live here.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::bcs::{BcsDeserialize, BcsSerialize, CodecError, CodecResult, Deserializer as BcsReader, Serializer as BcsWriter};
use crate::error::{AdaptorError, AdaptorResult};

/// Length of an account address in bytes
pub const ADDRESS_LENGTH: usize = 32;
/// Length of an Ed25519 public key in bytes
pub const ED25519_PUBLIC_KEY_LENGTH: usize = 32;
/// Length of an Ed25519 signature in bytes
pub const ED25519_SIGNATURE_LENGTH: usize = 64;

/// Parse a hex string with or without `0x` into bytes
pub fn decode_hex(input: &str) -> AdaptorResult<Vec<u8>> {
    Ok(hex::decode(strip_hex_prefix(input))?)
}

fn strip_hex_prefix(input: &str) -> &str {
    let trimmed = input.trim();
    trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed)
}

// =============================================================================
// Account Address
// =============================================================================

/// 32-byte account address, displayed as 0x-prefixed hex
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct AccountAddress([u8; ADDRESS_LENGTH]);

impl AccountAddress {
    pub const ZERO: AccountAddress = AccountAddress([0u8; ADDRESS_LENGTH]);

    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Framework address `0x1`
    pub const fn one() -> Self {
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[ADDRESS_LENGTH - 1] = 1;
        Self(bytes)
    }

    /// Parse from hex; short forms such as `0x1` are left-padded with zeros
    pub fn from_hex(s: &str) -> AdaptorResult<Self> {
        let stripped = strip_hex_prefix(s);
        if stripped.is_empty() || stripped.len() > ADDRESS_LENGTH * 2 {
            return Err(AdaptorError::invalid_address(format!("Invalid address length: {}", s)));
        }

        let padded = format!("{:0>64}", stripped);
        let bytes = hex::decode(&padded)
            .map_err(|e| AdaptorError::invalid_address(format!("Invalid hex: {}", e)))?;

        let mut arr = [0u8; ADDRESS_LENGTH];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    pub fn from_slice(bytes: &[u8]) -> AdaptorResult<Self> {
        let arr: [u8; ADDRESS_LENGTH] = bytes
            .try_into()
            .map_err(|_| AdaptorError::invalid_address(format!("Expected 32 bytes, got {}", bytes.len())))?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    pub fn into_bytes(self) -> [u8; ADDRESS_LENGTH] {
        self.0
    }

    /// Full 64-digit hex with 0x prefix
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Hex with leading zeros removed (`0x1`)
    pub fn to_short_hex(&self) -> String {
        let hex = hex::encode(self.0);
        let trimmed = hex.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{}", trimmed)
        }
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress({})", self.to_short_hex())
    }
}

impl FromStr for AccountAddress {
    type Err = AdaptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as Deserialize>::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl BcsSerialize for AccountAddress {
    fn serialize(&self, serializer: &mut BcsWriter) {
        serializer.serialize_fixed_bytes(&self.0);
    }
}

impl BcsDeserialize for AccountAddress {
    fn deserialize(deserializer: &mut BcsReader<'_>) -> CodecResult<Self> {
        Ok(Self(deserializer.deserialize_fixed_bytes::<ADDRESS_LENGTH>()?))
    }
}

// =============================================================================
// Ed25519 Key Material
// =============================================================================

/// Ed25519 public key; on the wire a length-prefixed 32-byte vector
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ed25519PublicKey(#[serde(with = "crate::serde_bytes::hex32")] [u8; ED25519_PUBLIC_KEY_LENGTH]);

impl Ed25519PublicKey {
    pub const fn new(bytes: [u8; ED25519_PUBLIC_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> AdaptorResult<Self> {
        let arr: [u8; ED25519_PUBLIC_KEY_LENGTH] = bytes.try_into().map_err(|_| {
            AdaptorError::invalid_public_key(format!("Expected 32-byte public key, got {}", bytes.len()))
        })?;
        Ok(Self(arr))
    }

    pub fn from_hex(s: &str) -> AdaptorResult<Self> {
        Self::from_slice(&decode_hex(s)?)
    }

    pub fn as_bytes(&self) -> &[u8; ED25519_PUBLIC_KEY_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Ed25519PublicKey {
    type Err = AdaptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl BcsSerialize for Ed25519PublicKey {
    fn serialize(&self, serializer: &mut BcsWriter) {
        serializer.serialize_bytes(&self.0);
    }
}

impl BcsDeserialize for Ed25519PublicKey {
    fn deserialize(deserializer: &mut BcsReader<'_>) -> CodecResult<Self> {
        let bytes = deserializer.deserialize_bytes()?;
        let arr: [u8; ED25519_PUBLIC_KEY_LENGTH] =
            bytes.as_slice().try_into().map_err(|_| CodecError::InvalidLength {
                expected: ED25519_PUBLIC_KEY_LENGTH,
                actual: bytes.len(),
            })?;
        Ok(Self(arr))
    }
}

/// Ed25519 signature; on the wire a length-prefixed 64-byte vector
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ed25519Signature(#[serde(with = "crate::serde_bytes::hex64")] [u8; ED25519_SIGNATURE_LENGTH]);

impl Ed25519Signature {
    pub const fn new(bytes: [u8; ED25519_SIGNATURE_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> AdaptorResult<Self> {
        let arr: [u8; ED25519_SIGNATURE_LENGTH] = bytes.try_into().map_err(|_| {
            AdaptorError::invalid_signature(format!("Expected 64-byte signature, got {}", bytes.len()))
        })?;
        Ok(Self(arr))
    }

    pub fn from_hex(s: &str) -> AdaptorResult<Self> {
        Self::from_slice(&decode_hex(s)?)
    }

    pub fn as_bytes(&self) -> &[u8; ED25519_SIGNATURE_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Signature({})", self.to_hex())
    }
}

impl BcsSerialize for Ed25519Signature {
    fn serialize(&self, serializer: &mut BcsWriter) {
        serializer.serialize_bytes(&self.0);
    }
}

impl BcsDeserialize for Ed25519Signature {
    fn deserialize(deserializer: &mut BcsReader<'_>) -> CodecResult<Self> {
        let bytes = deserializer.deserialize_bytes()?;
        let arr: [u8; ED25519_SIGNATURE_LENGTH] =
            bytes.as_slice().try_into().map_err(|_| CodecError::InvalidLength {
                expected: ED25519_SIGNATURE_LENGTH,
                actual: bytes.len(),
            })?;
        Ok(Self(arr))
    }
}

// =============================================================================
// API Response (FFI / CLI)
// =============================================================================

/// Uniform JSON envelope returned across the FFI boundary
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<AdaptorError>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: AdaptorError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"success":false,"error":{"code":"internal","message":"Serialization failed"}}"#.to_string()
        })
    }
}
