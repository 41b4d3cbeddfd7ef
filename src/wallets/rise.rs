//! Rise

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{bytes, ConnectedAccount, WalletAdapter, WalletError, WalletKind, WalletRequest};
use crate::abi::AbiLookup;
use crate::bcs::BcsSerialize;
use crate::transaction::{RawTransaction, UnverifiedSignedTransaction};

/// Raw transaction bytes flagged as a read-only bcs payload; answers
/// `{signature: [..]}` holding the whole signed transaction
#[derive(Debug, Clone, Copy, Default)]
pub struct RiseAdapter;

#[async_trait]
impl WalletAdapter for RiseAdapter {
    fn kind(&self) -> WalletKind {
        WalletKind::Rise
    }

    async fn build_request(&self, raw: &RawTransaction, _lookup: &dyn AbiLookup) -> Result<WalletRequest, WalletError> {
        let options = json!({
            "payloadType": "bcs_payload",
            "readOnly": true,
        });
        Ok(WalletRequest::new(
            "signTransaction",
            vec![bytes::to_array(&raw.to_bcs_bytes()), options],
        ))
    }

    fn parse_response(
        &self,
        _raw: &RawTransaction,
        _account: &ConnectedAccount,
        response: Value,
    ) -> Result<UnverifiedSignedTransaction, WalletError> {
        let signed = bytes::from_byte_map(bytes::field(&response, "signature")?)?;
        bytes::signed_transaction(&signed)
    }
}
