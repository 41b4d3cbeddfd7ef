//! MSafe Wallet Adaptor
//!
//! Core of the MSafe multisig wallet's browser-wallet bridge for Aptos.
//!
//! # Architecture
//!
//! This crate provides:
//! - **bcs**: Canonical binary codec
//! - **move_types**: Type tags and ABI type strings
//! - **transaction**: Raw and signed transactions, signing messages
//! - **abi**: ABI lookup collaborators and the ABI-guided argument decoder
//! - **signing**: Wallet-facing signing requests and the post-sign verifier
//! - **wallets**: One adapter per browser wallet, plus the sign-then-verify session
//! - **multisig**: MSafe address derivation and multisig signature assembly
//! - **message**: Tagged proof messages and pending-payload dispatch
//! - **msafe**: MSafe entry function builders and pending transaction summaries
//! - **ffi**: C-ABI exports for native hosts
//!
//! # FFI Usage
//!
//! All public FFI functions are in the `ffi` module and follow this pattern:
//! - Input: JSON string (null-terminated C string)
//! - Output: JSON string (must be freed with `msafe_free_string`)
//!
//! # Security
//!
//! Wallet backends are untrusted. Every signed transaction a wallet returns
//! passes through [`signing::PostSignVerifier`] before the crate hands out a
//! [`transaction::SignedTransaction`], and that type cannot be built any
//! other way.
//!
//! # Example
//!
//! ```rust,ignore
//! use msafe_wallet_adaptor::multisig::derive_multisig;
//!
//! let derived = derive_multisig(&owners, 2, 0)?;
//! println!("MSafe address: {}", derived.address);
//! ```

pub mod error;
pub mod types;
pub mod serde_bytes;
pub mod utils;

pub mod bcs;
pub mod move_types;
pub mod transaction;
pub mod abi;
pub mod signing;
pub mod wallets;
pub mod multisig;
pub mod message;
pub mod msafe;
pub mod ffi;

// Re-export key types for convenience
pub use error::{AdaptorError, AdaptorResult, ErrorCode};
pub use types::*;

pub use abi::{AbiLookup, CachedAbiLookup, RestAbiLookup, StaticAbiLookup};
pub use multisig::{derive_multisig, DerivedMultisig, MultisigDeriver, IMPORT_NONCE};
pub use signing::{PostSignVerifier, SigningRequest, SigningRequestBuilder};
pub use transaction::{RawTransaction, SignedTransaction, UnverifiedSignedTransaction};
pub use wallets::{ExternalSigner, WalletAdapter, WalletKind, WalletRegistry, WalletSession};

pub use ffi::{
    msafe_assemble_multisig,
    msafe_classify_pending,
    msafe_derive_address,
    msafe_free_string,
    msafe_verify_signed_transaction,
};
