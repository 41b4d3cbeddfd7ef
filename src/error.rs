//! Unified error type for the MSafe wallet adaptor
//!
//! Each module owns a precise `thiserror` enum. They all collapse into
//! [`AdaptorError`] at the crate boundary (CLI, FFI) for uniform reporting.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::abi::AbiError;
use crate::bcs::CodecError;
use crate::message::MessageError;
use crate::move_types::TypeTagError;
use crate::msafe::MsafeError;
use crate::multisig::MultisigError;
use crate::signing::{RequestError, VerificationError};
use crate::transaction::PayloadError;
use crate::wallets::WalletError;

/// Main error type for all adaptor operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptorError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl AdaptorError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, msg)
    }

    pub fn invalid_address(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidAddress, msg)
    }

    pub fn invalid_public_key(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidPublicKey, msg)
    }

    pub fn invalid_signature(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidSignature, msg)
    }

    pub fn invalid_transaction(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidTransaction, msg)
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, msg)
    }
}

impl fmt::Display for AdaptorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for AdaptorError {}

/// Error codes for categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Input errors
    InvalidInput,
    InvalidAddress,
    InvalidPublicKey,
    InvalidSignature,
    InvalidTransaction,
    InvalidTypeTag,

    // Codec errors
    DecodeError,
    JsonError,
    HexError,

    // ABI errors
    AbiNotFound,
    FunctionNotFound,
    AbiMismatch,

    // Signing errors
    UnsupportedPayload,
    VerificationFailed,

    // Wallet errors
    WalletRejected,
    WalletResponse,
    UnknownWallet,

    // Multisig / message errors
    InvalidThreshold,
    MultisigError,
    InvalidMessage,

    // Network errors
    NetworkError,
    Timeout,
    ConfigError,

    // Internal
    Internal,
}

/// Result type alias for adaptor operations
pub type AdaptorResult<T> = Result<T, AdaptorError>;

// Conversions from common error types

impl From<serde_json::Error> for AdaptorError {
    fn from(e: serde_json::Error) -> Self {
        AdaptorError::new(ErrorCode::JsonError, e.to_string())
    }
}

impl From<hex::FromHexError> for AdaptorError {
    fn from(e: hex::FromHexError) -> Self {
        AdaptorError::new(ErrorCode::HexError, e.to_string())
    }
}

impl From<std::io::Error> for AdaptorError {
    fn from(e: std::io::Error) -> Self {
        AdaptorError::new(ErrorCode::Internal, e.to_string())
    }
}

impl From<reqwest::Error> for AdaptorError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AdaptorError::new(ErrorCode::Timeout, "Request timed out")
        } else if e.is_connect() {
            AdaptorError::new(ErrorCode::NetworkError, "Connection failed")
        } else {
            AdaptorError::new(ErrorCode::NetworkError, e.to_string())
        }
    }
}

// Conversions from module errors

impl From<CodecError> for AdaptorError {
    fn from(e: CodecError) -> Self {
        AdaptorError::new(ErrorCode::DecodeError, e.to_string())
    }
}

impl From<TypeTagError> for AdaptorError {
    fn from(e: TypeTagError) -> Self {
        AdaptorError::new(ErrorCode::InvalidTypeTag, e.to_string())
    }
}

impl From<AbiError> for AdaptorError {
    fn from(e: AbiError) -> Self {
        let code = match &e {
            AbiError::AbiNotFound { .. } => ErrorCode::AbiNotFound,
            AbiError::FunctionNotFound { .. } => ErrorCode::FunctionNotFound,
            AbiError::WrongTypeArgCount { .. } | AbiError::ArgumentCountMismatch { .. } => ErrorCode::AbiMismatch,
            AbiError::Transport(_) => ErrorCode::NetworkError,
            AbiError::InvalidAbi(_) => ErrorCode::AbiMismatch,
            AbiError::ArgumentDecode { .. } | AbiError::Codec(_) => ErrorCode::DecodeError,
        };
        AdaptorError::new(code, e.to_string())
    }
}

impl From<PayloadError> for AdaptorError {
    fn from(e: PayloadError) -> Self {
        AdaptorError::new(ErrorCode::UnsupportedPayload, e.to_string())
    }
}

impl From<RequestError> for AdaptorError {
    fn from(e: RequestError) -> Self {
        match e {
            RequestError::Payload(e) => e.into(),
            RequestError::Abi(e) => e.into(),
        }
    }
}

impl From<VerificationError> for AdaptorError {
    fn from(e: VerificationError) -> Self {
        AdaptorError::new(ErrorCode::VerificationFailed, e.to_string())
    }
}

impl From<MultisigError> for AdaptorError {
    fn from(e: MultisigError) -> Self {
        let code = match &e {
            MultisigError::InvalidThreshold { .. } => ErrorCode::InvalidThreshold,
            _ => ErrorCode::MultisigError,
        };
        AdaptorError::new(code, e.to_string())
    }
}

impl From<MessageError> for AdaptorError {
    fn from(e: MessageError) -> Self {
        AdaptorError::new(ErrorCode::InvalidMessage, e.to_string())
    }
}

impl From<MsafeError> for AdaptorError {
    fn from(e: MsafeError) -> Self {
        match e {
            MsafeError::InvalidFunctionName(_) => AdaptorError::invalid_input(e.to_string()),
            MsafeError::InvalidAddress(_) => AdaptorError::invalid_address(e.to_string()),
            MsafeError::TypeTag(e) => e.into(),
            MsafeError::Message(e) => e.into(),
        }
    }
}

impl From<WalletError> for AdaptorError {
    fn from(e: WalletError) -> Self {
        match e {
            WalletError::Rejected(msg) => AdaptorError::new(ErrorCode::WalletRejected, msg),
            WalletError::MalformedResponse(msg) => AdaptorError::new(ErrorCode::WalletResponse, msg),
            WalletError::UnknownWallet(name) => {
                AdaptorError::new(ErrorCode::UnknownWallet, format!("Unknown wallet: {}", name))
            }
            WalletError::Request(e) => e.into(),
            WalletError::Codec(e) => e.into(),
            WalletError::Verification(e) => e.into(),
        }
    }
}
