//! # Wallet Adapters
//!
//! One adapter per supported browser wallet. Adapters differ only in how the
//! signing request is shaped and how the wallet's response is turned back into
//! a signed transaction:
//!
//! | Wallet  | Request                              | Response                     |
//! |---------|--------------------------------------|------------------------------|
//! | Petra   | entry function + camelCase options   | byte map of signed txn       |
//! | OKX     | entry function + snake_case options  | byte map of signed txn       |
//! | Pontem  | entry function + snake_case options  | `{result: [..]}` signed txn  |
//! | Martian | raw txn as comma-separated bytes     | comma string of signed txn   |
//! | OneKey  | raw txn as hex                       | comma string of signed txn   |
//! | Rise    | raw txn bytes + bcs options          | `{signature: [..]}` signed txn |
//! | Fewcha  | raw txn bytes                        | `{data: [..]}` signature only |
//!
//! Adapters never produce a trusted transaction themselves. [`WalletSession`]
//! runs every response through the post-sign verifier.

pub mod bytes;
pub mod fewcha;
pub mod martian;
pub mod okx;
pub mod onekey;
pub mod petra;
pub mod pontem;
pub mod registry;
pub mod rise;
pub mod session;

#[cfg(test)]
mod tests;

pub use fewcha::FewchaAdapter;
pub use martian::MartianAdapter;
pub use okx::OkxAdapter;
pub use onekey::OnekeyAdapter;
pub use petra::PetraAdapter;
pub use pontem::PontemAdapter;
pub use registry::WalletRegistry;
pub use rise::RiseAdapter;
pub use session::{SignatureData, WalletSession};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::abi::AbiLookup;
use crate::bcs::CodecError;
use crate::signing::{RequestError, VerificationError};
use crate::transaction::{RawTransaction, UnverifiedSignedTransaction};
use crate::types::{AccountAddress, Ed25519PublicKey};

// ============================================================================
// Core Types
// ============================================================================

/// Supported wallet backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    Petra,
    Martian,
    Fewcha,
    Pontem,
    Rise,
    Onekey,
    Okx,
}

impl WalletKind {
    pub const ALL: [WalletKind; 7] = [
        WalletKind::Petra,
        WalletKind::Martian,
        WalletKind::Fewcha,
        WalletKind::Pontem,
        WalletKind::Rise,
        WalletKind::Onekey,
        WalletKind::Okx,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WalletKind::Petra => "Petra",
            WalletKind::Martian => "Martian",
            WalletKind::Fewcha => "Fewcha",
            WalletKind::Pontem => "Pontem",
            WalletKind::Rise => "Rise",
            WalletKind::Onekey => "Onekey",
            WalletKind::Okx => "Okx",
        }
    }
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for WalletKind {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WalletKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| WalletError::UnknownWallet(s.to_string()))
    }
}

/// Account the wallet reported on connect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectedAccount {
    pub address: AccountAddress,
    pub public_key: Ed25519PublicKey,
}

impl ConnectedAccount {
    pub fn new(address: AccountAddress, public_key: Ed25519PublicKey) -> Self {
        Self { address, public_key }
    }
}

/// Call forwarded to the wallet extension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletRequest {
    pub method: String,
    pub params: Vec<Value>,
}

impl WalletRequest {
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }
}

/// Error types for wallet interaction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WalletError {
    #[error("wallet rejected the request: {0}")]
    Rejected(String),

    #[error("malformed wallet response: {0}")]
    MalformedResponse(String),

    #[error("unknown wallet: {0}")]
    UnknownWallet(String),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("signed transaction decode failed: {0}")]
    Codec(#[from] CodecError),

    #[error("post-sign verification failed: {0}")]
    Verification(#[from] VerificationError),
}

// ============================================================================
// Traits
// ============================================================================

/// Opaque "request signature" call into a wallet backend
///
/// A user rejection or thrown error maps to [`WalletError::Rejected`].
#[async_trait]
pub trait ExternalSigner: Send + Sync {
    async fn request(&self, request: WalletRequest) -> Result<Value, WalletError>;
}

/// Request and response shaping for one wallet backend
#[async_trait]
pub trait WalletAdapter: Send + Sync {
    fn kind(&self) -> WalletKind;

    /// Shape the wallet call for `raw`
    async fn build_request(&self, raw: &RawTransaction, lookup: &dyn AbiLookup) -> Result<WalletRequest, WalletError>;

    /// Turn the wallet's answer into a signed transaction, still unverified
    fn parse_response(
        &self,
        raw: &RawTransaction,
        account: &ConnectedAccount,
        response: Value,
    ) -> Result<UnverifiedSignedTransaction, WalletError>;
}
