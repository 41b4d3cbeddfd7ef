//! Petra

use async_trait::async_trait;
use serde_json::Value;

use super::{bytes, ConnectedAccount, WalletAdapter, WalletError, WalletKind, WalletRequest};
use crate::abi::{AbiLookup, StringifyFormatter};
use crate::signing::SigningRequestBuilder;
use crate::transaction::{RawTransaction, UnverifiedSignedTransaction};

/// Entry function form with Petra's camelCase options; answers with a byte map
#[derive(Debug, Clone, Copy, Default)]
pub struct PetraAdapter;

#[async_trait]
impl WalletAdapter for PetraAdapter {
    fn kind(&self) -> WalletKind {
        WalletKind::Petra
    }

    async fn build_request(&self, raw: &RawTransaction, lookup: &dyn AbiLookup) -> Result<WalletRequest, WalletError> {
        let request = SigningRequestBuilder::new(lookup, &StringifyFormatter).build(raw).await?;
        Ok(WalletRequest::new(
            "signTransaction",
            vec![request.payload.to_value(), request.options.to_camel_case().to_value()],
        ))
    }

    fn parse_response(
        &self,
        _raw: &RawTransaction,
        _account: &ConnectedAccount,
        response: Value,
    ) -> Result<UnverifiedSignedTransaction, WalletError> {
        bytes::signed_transaction(&bytes::from_byte_map(&response)?)
    }
}
