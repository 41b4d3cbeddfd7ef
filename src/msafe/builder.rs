//! Transaction construction

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::{functions, MsafeError, MOMENTUM_SAFE};
use crate::bcs::BcsSerialize;
use crate::move_types::TypeTag;
use crate::multisig::MAINNET_DEPLOYER;
use crate::transaction::{EntryFunctionCall, ModuleId, RawTransaction, TransactionPayload};
use crate::types::{AccountAddress, Ed25519Signature};

pub const DEFAULT_GAS_UNIT_PRICE: u64 = 1000;
pub const DEFAULT_MAX_GAS: u64 = 50_000;
/// One week
pub const DEFAULT_EXPIRATION_SECS: u64 = 604_800;
pub const DEFAULT_CHAIN_ID: u8 = 1;

/// Caller overrides; anything unset falls back to the defaults above
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxOptions {
    pub max_gas: Option<u64>,
    pub gas_price: Option<u64>,
    /// Lifetime counted from now
    pub expiration_secs: Option<u64>,
    /// Absolute expiration, wins over `expiration_secs`
    pub expiration_raw: Option<u64>,
    pub sequence_number: Option<u64>,
    pub chain_id: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxConfig {
    pub max_gas: u64,
    pub gas_price: u64,
    pub expiration_secs: u64,
    pub expiration_raw: Option<u64>,
    pub sequence_number: u64,
    pub chain_id: u8,
}

impl Default for TxConfig {
    fn default() -> Self {
        Self::from_options(&TxOptions::default())
    }
}

impl TxConfig {
    pub fn from_options(opts: &TxOptions) -> Self {
        Self {
            max_gas: opts.max_gas.unwrap_or(DEFAULT_MAX_GAS),
            gas_price: opts.gas_price.unwrap_or(DEFAULT_GAS_UNIT_PRICE),
            expiration_secs: opts.expiration_secs.unwrap_or(DEFAULT_EXPIRATION_SECS),
            expiration_raw: opts.expiration_raw,
            sequence_number: opts.sequence_number.unwrap_or(0),
            chain_id: opts.chain_id.unwrap_or(DEFAULT_CHAIN_ID),
        }
    }

    /// Absolute expiration in unix seconds
    pub fn expiration_timestamp(&self) -> u64 {
        match self.expiration_raw {
            Some(raw) => raw,
            None => {
                let now = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
                now.saturating_add(self.expiration_secs)
            }
        }
    }

    pub fn build(&self, sender: AccountAddress, call: EntryFunctionCall) -> RawTransaction {
        RawTransaction {
            sender,
            sequence_number: self.sequence_number,
            payload: TransactionPayload::EntryFunction(call),
            max_gas_amount: self.max_gas,
            gas_unit_price: self.gas_price,
            expiration_timestamp_secs: self.expiration_timestamp(),
            chain_id: self.chain_id,
        }
    }
}

/// Split `"0x1::coin::transfer"` into its three parts
pub fn split_function_components(name: &str) -> Result<(AccountAddress, String, String), MsafeError> {
    let parts: Vec<&str> = name.split("::").collect();
    let [address, module, function] = parts.as_slice() else {
        return Err(MsafeError::InvalidFunctionName(name.to_string()));
    };
    if module.is_empty() || function.is_empty() {
        return Err(MsafeError::InvalidFunctionName(name.to_string()));
    }
    let address = AccountAddress::from_hex(address).map_err(|_| MsafeError::InvalidAddress(address.to_string()))?;
    Ok((address, module.to_string(), function.to_string()))
}

/// Entry function call described by strings, arguments already encoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryFunctionArgs {
    pub fn_name: String,
    pub type_args: Vec<String>,
    #[serde(with = "hex_args")]
    pub args: Vec<Vec<u8>>,
}

impl EntryFunctionArgs {
    pub fn to_call(&self) -> Result<EntryFunctionCall, MsafeError> {
        let (address, module, function) = split_function_components(&self.fn_name)?;
        let type_args = self
            .type_args
            .iter()
            .map(|t| t.parse::<TypeTag>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(EntryFunctionCall::new(
            ModuleId::new(address, module),
            function,
            type_args,
            self.args.clone(),
        ))
    }
}

mod hex_args {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::types::decode_hex;

    pub fn serialize<S: Serializer>(args: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(args.iter().map(|a| format!("0x{}", hex::encode(a))))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Vec<u8>>, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|s| decode_hex(s).map_err(serde::de::Error::custom))
            .collect()
    }
}

/// Arbitrary entry function sent from the MSafe account
pub fn entry_function_txn(
    sender: AccountAddress,
    args: &EntryFunctionArgs,
    opts: &TxOptions,
) -> Result<RawTransaction, MsafeError> {
    Ok(TxConfig::from_options(opts).build(sender, args.to_call()?))
}

/// `0x1::coin::transfer<0x1::aptos_coin::AptosCoin>(to, amount)`
pub fn apt_transfer_txn(sender: AccountAddress, to: AccountAddress, amount: u64, opts: &TxOptions) -> RawTransaction {
    let call = EntryFunctionCall::new(
        ModuleId::new(AccountAddress::one(), "coin"),
        "transfer",
        vec![TypeTag::aptos_coin()],
        vec![to.to_bcs_bytes(), amount.to_bcs_bytes()],
    );
    TxConfig::from_options(opts).build(sender, call)
}

/// Calls into the `momentum_safe` module of one MSafe deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MsafeTxnBuilder {
    modules_account: AccountAddress,
}

impl Default for MsafeTxnBuilder {
    fn default() -> Self {
        Self::new(MAINNET_DEPLOYER)
    }
}

impl MsafeTxnBuilder {
    pub fn new(modules_account: AccountAddress) -> Self {
        Self { modules_account }
    }

    pub fn modules_account(&self) -> &AccountAddress {
        &self.modules_account
    }

    fn call(&self, function: &str, args: Vec<Vec<u8>>) -> EntryFunctionCall {
        EntryFunctionCall::new(ModuleId::new(self.modules_account, MOMENTUM_SAFE), function, vec![], args)
    }

    /// Propose `payload` (a signing message) with the proposer's own signature
    pub fn init_transaction(
        &self,
        signer: AccountAddress,
        msafe: AccountAddress,
        pk_index: u8,
        payload: &[u8],
        signature: &Ed25519Signature,
        opts: &TxOptions,
    ) -> RawTransaction {
        let call = self.call(
            functions::INIT_TRANSACTION,
            vec![
                msafe.to_bcs_bytes(),
                pk_index.to_bcs_bytes(),
                payload.to_vec().to_bcs_bytes(),
                signature.to_bcs_bytes(),
            ],
        );
        TxConfig::from_options(opts).build(signer, call)
    }

    /// Add an owner signature to the pending transaction `tx_hash`
    pub fn submit_signature(
        &self,
        signer: AccountAddress,
        msafe: AccountAddress,
        pk_index: u8,
        tx_hash: &[u8],
        signature: &Ed25519Signature,
        opts: &TxOptions,
    ) -> RawTransaction {
        let call = self.call(
            functions::SUBMIT_SIGNATURE,
            vec![
                msafe.to_bcs_bytes(),
                pk_index.to_bcs_bytes(),
                tx_hash.to_vec().to_bcs_bytes(),
                signature.to_bcs_bytes(),
            ],
        );
        TxConfig::from_options(opts).build(signer, call)
    }

    /// No-op from the MSafe account that burns sequence number `sn`
    ///
    /// `sn` always overrides `opts.sequence_number`.
    pub fn revert(&self, sender: AccountAddress, sn: u64, opts: &TxOptions) -> RawTransaction {
        let mut config = TxConfig::from_options(opts);
        config.sequence_number = sn;
        config.build(sender, self.call(functions::REVERT, vec![]))
    }

    /// Whether `call` targets this deployment's `momentum_safe::<function>`
    pub fn is_msafe_call(&self, call: &EntryFunctionCall, function: &str) -> bool {
        call.module.address == self.modules_account && call.module.name == MOMENTUM_SAFE && call.function == function
    }
}
