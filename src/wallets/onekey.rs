//! OneKey

use async_trait::async_trait;
use serde_json::Value;

use super::{bytes, ConnectedAccount, WalletAdapter, WalletError, WalletKind, WalletRequest};
use crate::abi::AbiLookup;
use crate::bcs::BcsSerialize;
use crate::transaction::{RawTransaction, UnverifiedSignedTransaction};

/// Raw transaction as un-prefixed hex; answers with a `"1,2,3"` string
#[derive(Debug, Clone, Copy, Default)]
pub struct OnekeyAdapter;

#[async_trait]
impl WalletAdapter for OnekeyAdapter {
    fn kind(&self) -> WalletKind {
        WalletKind::Onekey
    }

    async fn build_request(&self, raw: &RawTransaction, _lookup: &dyn AbiLookup) -> Result<WalletRequest, WalletError> {
        let encoded = hex::encode(raw.to_bcs_bytes());
        Ok(WalletRequest::new("signTransaction", vec![Value::String(encoded)]))
    }

    fn parse_response(
        &self,
        _raw: &RawTransaction,
        _account: &ConnectedAccount,
        response: Value,
    ) -> Result<UnverifiedSignedTransaction, WalletError> {
        let signed = bytes::from_comma_string(bytes::as_str(&response)?)?;
        bytes::signed_transaction(&signed)
    }
}
