//! Pontem

use async_trait::async_trait;
use serde_json::Value;

use super::{bytes, ConnectedAccount, WalletAdapter, WalletError, WalletKind, WalletRequest};
use crate::abi::{AbiLookup, StringifyFormatter};
use crate::signing::SigningRequestBuilder;
use crate::transaction::{RawTransaction, UnverifiedSignedTransaction};

/// Entry function form with snake_case options; answers `{result: [..]}`
#[derive(Debug, Clone, Copy, Default)]
pub struct PontemAdapter;

#[async_trait]
impl WalletAdapter for PontemAdapter {
    fn kind(&self) -> WalletKind {
        WalletKind::Pontem
    }

    async fn build_request(&self, raw: &RawTransaction, lookup: &dyn AbiLookup) -> Result<WalletRequest, WalletError> {
        let request = SigningRequestBuilder::new(lookup, &StringifyFormatter).build(raw).await?;
        Ok(WalletRequest::new(
            "signTransaction",
            vec![request.payload.to_value(), request.options.to_value()],
        ))
    }

    fn parse_response(
        &self,
        _raw: &RawTransaction,
        _account: &ConnectedAccount,
        response: Value,
    ) -> Result<UnverifiedSignedTransaction, WalletError> {
        let signed = bytes::from_byte_map(bytes::field(&response, "result")?)?;
        bytes::signed_transaction(&signed)
    }
}
