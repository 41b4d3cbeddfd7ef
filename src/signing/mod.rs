//! Signing requests and post-sign verification
//!
//! A signing round trip is a strict pipeline:
//! 1. [`SigningRequestBuilder`] resolves the entry function ABI and decodes its
//!    arguments into the wallet-facing JSON form
//! 2. The external wallet signs (see `wallets`)
//! 3. [`PostSignVerifier`] proves the returned transaction is the requested one
//!    and that its signature matches the connected key
//!
//! Only step 3 produces a [`crate::transaction::SignedTransaction`].

pub mod request;
pub mod verifier;


pub use request::*;
pub use verifier::*;

use crate::abi::AbiError;
use crate::transaction::PayloadError;

/// Error types for building a signing request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error(transparent)]
    Abi(#[from] AbiError),
}

/// Error types for post-sign verification
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    #[error("signed transaction differs in {field}: expected {expected}, got {actual}")]
    FieldMismatch {
        field: &'static str,
        expected: String,
        actual: String,
    },

    #[error("signed transaction encoding differs from the requested transaction")]
    EncodingMismatch,

    #[error("signature does not verify against the signing message")]
    SignatureMismatch,

    #[error("authenticator public key does not match the connected account")]
    PublicKeyMismatch,

    #[error("malformed authenticator: {0}")]
    MalformedAuthenticator(String),
}
