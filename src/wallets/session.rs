//! Sign-then-verify pipeline for one connected wallet
//!
//! `sign_and_verify(raw) = verify(parse(invoke(build(raw))))`. There is no
//! path from a wallet response to a [`SignedTransaction`] that skips the
//! verifier.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{ConnectedAccount, ExternalSigner, WalletAdapter, WalletError};
use crate::abi::AbiLookup;
use crate::bcs::BcsSerialize;
use crate::signing::PostSignVerifier;
use crate::transaction::{RawTransaction, SignedTransaction, TransactionAuthenticator};
use crate::types::Ed25519Signature;
use crate::{log_debug, log_info, log_warn};

/// Signing message and the owner's signature over it, ready to submit to MSafe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureData {
    #[serde(with = "crate::serde_bytes::hex_vec")]
    pub signing_message: Vec<u8>,
    pub signature: Ed25519Signature,
}

pub struct WalletSession {
    adapter: Arc<dyn WalletAdapter>,
    signer: Arc<dyn ExternalSigner>,
    account: ConnectedAccount,
    lookup: Arc<dyn AbiLookup>,
    verifier: PostSignVerifier,
}

impl WalletSession {
    pub fn new(
        adapter: Arc<dyn WalletAdapter>,
        signer: Arc<dyn ExternalSigner>,
        account: ConnectedAccount,
        lookup: Arc<dyn AbiLookup>,
    ) -> Self {
        Self {
            adapter,
            signer,
            verifier: PostSignVerifier::new(account.public_key),
            account,
            lookup,
        }
    }

    pub fn account(&self) -> &ConnectedAccount {
        &self.account
    }

    pub fn adapter(&self) -> &dyn WalletAdapter {
        self.adapter.as_ref()
    }

    pub async fn sign_and_verify(&self, raw: &RawTransaction) -> Result<SignedTransaction, WalletError> {
        let wallet = self.adapter.kind();
        let request = self.adapter.build_request(raw, self.lookup.as_ref()).await?;

        log_info!(
            "wallet",
            "Requesting signature",
            wallet = wallet,
            method = request.method,
            sender = raw.sender,
            txn_hash = raw.hash_hex()
        );

        let response = self.signer.request(request).await.map_err(|e| {
            log_warn!("wallet", "Wallet request failed", wallet = wallet, error = e);
            e
        })?;

        let unverified = self.adapter.parse_response(raw, &self.account, response)?;
        let signed = self.verifier.verify(raw, unverified)?;

        log_debug!("wallet", "Signature verified", wallet = wallet, signer = self.account.address);
        Ok(signed)
    }

    /// Verified signed transaction as canonical bytes
    pub async fn sign(&self, raw: &RawTransaction) -> Result<Vec<u8>, WalletError> {
        Ok(self.sign_and_verify(raw).await?.to_bcs_bytes())
    }

    pub async fn signature_data(&self, raw: &RawTransaction) -> Result<SignatureData, WalletError> {
        let signed = self.sign_and_verify(raw).await?;
        match signed.authenticator() {
            TransactionAuthenticator::Ed25519 { signature, .. } => Ok(SignatureData {
                signing_message: signed.raw_txn().signing_message(),
                signature: *signature,
            }),
            // the verifier only admits single-key authenticators
            other => Err(WalletError::MalformedResponse(format!(
                "unexpected {} authenticator",
                other.scheme()
            ))),
        }
    }
}
