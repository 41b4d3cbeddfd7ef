//! Fewcha

use async_trait::async_trait;
use serde_json::Value;

use super::{bytes, ConnectedAccount, WalletAdapter, WalletError, WalletKind, WalletRequest};
use crate::abi::AbiLookup;
use crate::bcs::BcsSerialize;
use crate::transaction::{RawTransaction, TransactionAuthenticator, UnverifiedSignedTransaction};
use crate::types::Ed25519Signature;

/// Raw transaction bytes; answers `{data: [..]}` with the bare 64-byte signature
///
/// The authenticator is assembled here from the requested transaction and
/// the connected account's key, so the verifier only has the signature left
/// to check.
#[derive(Debug, Clone, Copy, Default)]
pub struct FewchaAdapter;

#[async_trait]
impl WalletAdapter for FewchaAdapter {
    fn kind(&self) -> WalletKind {
        WalletKind::Fewcha
    }

    async fn build_request(&self, raw: &RawTransaction, _lookup: &dyn AbiLookup) -> Result<WalletRequest, WalletError> {
        Ok(WalletRequest::new(
            "aptos.signMultiSignTransaction",
            vec![bytes::to_array(&raw.to_bcs_bytes())],
        ))
    }

    fn parse_response(
        &self,
        raw: &RawTransaction,
        account: &ConnectedAccount,
        response: Value,
    ) -> Result<UnverifiedSignedTransaction, WalletError> {
        let data = bytes::from_byte_map(bytes::field(&response, "data")?)?;
        let signature = Ed25519Signature::from_slice(&data).map_err(|e| WalletError::MalformedResponse(e.message))?;
        Ok(UnverifiedSignedTransaction::new(
            raw.clone(),
            TransactionAuthenticator::ed25519(account.public_key, signature),
        ))
    }
}
