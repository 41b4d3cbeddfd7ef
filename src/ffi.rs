//! FFI Layer for the MSafe wallet adaptor
//!
//! All C-ABI exports are defined here. This is the ONLY file that should
//! contain `extern "C"` functions. All functions follow a consistent pattern:
//! - Input: JSON string (null-terminated C string)
//! - Output: JSON string (must be freed with `msafe_free_string`)
//!
//! Error handling: All functions return JSON with `success` field.
//! On error, `success: false` and `error` object is populated.
//!
//! Nothing here talks to a wallet or the network; hosts drive the signing
//! pipeline themselves and use these calls for the pure parts.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use serde::{Deserialize, Serialize};

use crate::bcs::BcsDeserialize;
use crate::error::{AdaptorError, AdaptorResult};
use crate::message::{decode_signing_message, PendingPayload};
use crate::msafe::{MsafeTxnBuilder, PendingTxnInfo};
use crate::multisig::{DerivedMultisig, MultisigDeriver, MultisigSignatureSet};
use crate::signing::PostSignVerifier;
use crate::transaction::{RawTransaction, UnverifiedSignedTransaction};
use crate::types::*;

// =============================================================================
// Memory Management
// =============================================================================

/// Free a string returned by any msafe_* function
///
/// # Safety
/// The pointer must have been returned by a msafe_* function
#[unsafe(no_mangle)]
pub extern "C" fn msafe_free_string(s: *mut c_char) {
    if s.is_null() {
        return;
    }
    unsafe {
        let _ = CString::from_raw(s);
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Convert C string to Rust string, returning error JSON if invalid
fn parse_input(input: *const c_char) -> Result<String, *mut c_char> {
    if input.is_null() {
        return Err(error_response(AdaptorError::invalid_input("Null input pointer")));
    }

    let c_str = unsafe { CStr::from_ptr(input) };
    match c_str.to_str() {
        Ok(s) => Ok(s.to_owned()),
        Err(_) => Err(error_response(AdaptorError::invalid_input("Invalid UTF-8 string"))),
    }
}

/// Create a success response JSON string
fn success_response<T: Serialize>(data: T) -> *mut c_char {
    let response = ApiResponse::ok(data);
    string_to_ptr(response.to_json())
}

/// Create an error response JSON string
fn error_response(error: AdaptorError) -> *mut c_char {
    let response: ApiResponse<()> = ApiResponse::err(error);
    string_to_ptr(response.to_json())
}

/// Convert Rust string to C string pointer
fn string_to_ptr(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(c_str) => c_str.into_raw(),
        // Last resort: return a minimal error
        Err(_) => c"{\"success\":false,\"error\":{\"code\":\"internal\",\"message\":\"String conversion failed\"}}"
            .to_owned()
            .into_raw(),
    }
}

/// Parse the request, run `handler`, wrap the outcome
fn respond<R, T, F>(input: *const c_char, handler: F) -> *mut c_char
where
    R: for<'de> Deserialize<'de>,
    T: Serialize,
    F: FnOnce(R) -> AdaptorResult<T>,
{
    let json_str = match parse_input(input) {
        Ok(s) => s,
        Err(ptr) => return ptr,
    };

    let request: R = match serde_json::from_str(&json_str) {
        Ok(r) => r,
        Err(e) => return error_response(AdaptorError::invalid_input(format!("Invalid JSON: {}", e))),
    };

    match handler(request) {
        Ok(data) => success_response(data),
        Err(e) => error_response(e),
    }
}

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Deserialize)]
struct DeriveAddressRequest {
    public_keys: Vec<Ed25519PublicKey>,
    threshold: u8,
    nonce: u64,
    #[serde(default)]
    deployer: Option<AccountAddress>,
}

impl DeriveAddressRequest {
    fn derive(&self) -> AdaptorResult<DerivedMultisig> {
        let deriver = self.deployer.map(MultisigDeriver::new).unwrap_or_default();
        Ok(deriver.derive(&self.public_keys, self.threshold, self.nonce)?)
    }
}

#[derive(Debug, Deserialize)]
struct ClassifyPendingRequest {
    payload: String,
    #[serde(default)]
    msafe_deployer: Option<AccountAddress>,
}

#[derive(Debug, Serialize)]
struct ClassifyPendingResponse {
    kind: &'static str,
    info: PendingTxnInfo,
}

#[derive(Debug, Deserialize)]
struct VerifySignedRequest {
    raw_txn: String,
    signed_txn: String,
    public_key: Ed25519PublicKey,
}

#[derive(Debug, Serialize)]
struct VerifySignedResponse {
    hash: String,
    signed_txn: String,
}

#[derive(Debug, Deserialize)]
struct OwnerSignature {
    public_key: Ed25519PublicKey,
    signature: Ed25519Signature,
}

#[derive(Debug, Deserialize)]
struct AssembleMultisigRequest {
    #[serde(flatten)]
    account: DeriveAddressRequest,
    signing_message: String,
    signatures: Vec<OwnerSignature>,
}

#[derive(Debug, Serialize)]
struct AssembleMultisigResponse {
    address: AccountAddress,
    hash: String,
    signed_txn: String,
}

fn classify_pending(request: ClassifyPendingRequest) -> AdaptorResult<ClassifyPendingResponse> {
    let payload = PendingPayload::classify(&decode_hex(&request.payload)?)?;
    let msafe = request.msafe_deployer.map(MsafeTxnBuilder::new).unwrap_or_default();
    Ok(ClassifyPendingResponse {
        kind: payload.kind(),
        info: PendingTxnInfo::from_payload(&payload, &msafe),
    })
}

fn verify_signed(request: VerifySignedRequest) -> AdaptorResult<VerifySignedResponse> {
    let raw = RawTransaction::from_bcs_bytes(&decode_hex(&request.raw_txn)?)?;
    let unverified = UnverifiedSignedTransaction::from_bcs_bytes(&decode_hex(&request.signed_txn)?)?;
    let signed = PostSignVerifier::new(request.public_key).verify(&raw, unverified)?;
    Ok(VerifySignedResponse {
        hash: signed.raw_txn().hash_hex(),
        signed_txn: signed.to_hex(),
    })
}

fn assemble_multisig(request: AssembleMultisigRequest) -> AdaptorResult<AssembleMultisigResponse> {
    let derived = request.account.derive()?;
    let raw = decode_signing_message(&decode_hex(&request.signing_message)?)?;
    if raw.sender != derived.address {
        return Err(AdaptorError::invalid_transaction(format!(
            "transaction sender {} is not the multisig account {}",
            raw.sender, derived.address
        )));
    }

    let mut set = MultisigSignatureSet::new(derived.public_key);
    for owner in &request.signatures {
        set.add(&owner.public_key, owner.signature)?;
    }
    let signed = set.assemble(raw)?;
    Ok(AssembleMultisigResponse {
        address: derived.address,
        hash: signed.raw_txn().hash_hex(),
        signed_txn: signed.to_hex(),
    })
}

// =============================================================================
// Multisig Operations
// =============================================================================

/// Derive the MSafe address for an owner set
///
/// # Input
/// ```json
/// { "public_keys": ["0x..", "0x.."], "threshold": 2, "nonce": 0 }
/// ```
/// `deployer` is optional and defaults to the mainnet MSafe deployer.
///
/// # Output
/// ```json
/// { "success": true, "data": { "public_key": "0x..", "authentication_key": "0x..", "address": "0x.." } }
/// ```
#[unsafe(no_mangle)]
pub extern "C" fn msafe_derive_address(input: *const c_char) -> *mut c_char {
    respond(input, |request: DeriveAddressRequest| request.derive())
}

/// Combine owner signatures over a pending signing message
///
/// # Input
/// The `msafe_derive_address` fields plus
/// ```json
/// { "signing_message": "0x..", "signatures": [{ "public_key": "0x..", "signature": "0x.." }] }
/// ```
///
/// # Output
/// ```json
/// { "success": true, "data": { "address": "0x..", "hash": "0x..", "signed_txn": "0x.." } }
/// ```
#[unsafe(no_mangle)]
pub extern "C" fn msafe_assemble_multisig(input: *const c_char) -> *mut c_char {
    respond(input, assemble_multisig)
}

// =============================================================================
// Pending Payload Operations
// =============================================================================

/// Classify and summarise an MSafe pending payload
///
/// # Input
/// ```json
/// { "payload": "0x.." }
/// ```
///
/// # Output
/// ```json
/// { "success": true, "data": { "kind": "transaction", "info": { "tx_type": "apt_coin_transfer", ... } } }
/// ```
#[unsafe(no_mangle)]
pub extern "C" fn msafe_classify_pending(input: *const c_char) -> *mut c_char {
    respond(input, classify_pending)
}

// =============================================================================
// Verification
// =============================================================================

/// Run the post-sign checks on a wallet-returned transaction
///
/// # Input
/// ```json
/// { "raw_txn": "0x..", "signed_txn": "0x..", "public_key": "0x.." }
/// ```
///
/// # Output
/// ```json
/// { "success": true, "data": { "hash": "0x..", "signed_txn": "0x.." } }
/// ```
#[unsafe(no_mangle)]
pub extern "C" fn msafe_verify_signed_transaction(input: *const c_char) -> *mut c_char {
    respond(input, verify_signed)
}
