use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ed25519_dalek::{Signer, SigningKey};
use serde_json::{json, Map, Value};

use super::*;
use crate::abi::StaticAbiLookup;
use crate::bcs::{BcsDeserialize, BcsSerialize};
use crate::move_types::TypeTag;
use crate::signing::VerificationError;
use crate::transaction::{
    fields, EntryFunctionCall, ModuleId, PayloadError, TransactionAuthenticator, TransactionPayload,
};
use crate::types::{Ed25519Signature, AccountAddress};

const COIN_ABI: &str = r#"[{
    "address": "0x1",
    "name": "coin",
    "exposed_functions": [{
        "name": "transfer",
        "visibility": "public",
        "is_entry": true,
        "generic_type_params": [{"constraints": []}],
        "params": ["&signer", "address", "u64"],
        "return": []
    }]
}]"#;

fn owner_key() -> SigningKey {
    SigningKey::from_bytes(&[7u8; 32])
}

fn account(key: &SigningKey) -> ConnectedAccount {
    ConnectedAccount::new(
        AccountAddress::new([0x0a; 32]),
        Ed25519PublicKey::new(key.verifying_key().to_bytes()),
    )
}

fn transfer_txn() -> RawTransaction {
    RawTransaction {
        sender: AccountAddress::new([0x0a; 32]),
        sequence_number: 3,
        payload: TransactionPayload::EntryFunction(EntryFunctionCall::new(
            ModuleId::new(AccountAddress::one(), "coin"),
            "transfer",
            vec![TypeTag::aptos_coin()],
            vec![AccountAddress::new([0x0b; 32]).to_bcs_bytes(), 500u64.to_bcs_bytes()],
        )),
        max_gas_amount: 50_000,
        gas_unit_price: 1_000,
        expiration_timestamp_secs: 1_700_604_800,
        chain_id: 1,
    }
}

fn sign_bytes(key: &SigningKey, raw: &RawTransaction) -> (Ed25519Signature, Vec<u8>) {
    let signature = Ed25519Signature::new(key.sign(&raw.signing_message()).to_bytes());
    let public_key = Ed25519PublicKey::new(key.verifying_key().to_bytes());
    let signed = UnverifiedSignedTransaction::new(raw.clone(), TransactionAuthenticator::ed25519(public_key, signature));
    (signature, signed.to_bcs_bytes())
}

fn byte_map(bytes: &[u8]) -> Value {
    let mut map = Map::new();
    for (i, b) in bytes.iter().enumerate() {
        map.insert(i.to_string(), json!(b));
    }
    Value::Object(map)
}

/// Response in the wallet's own shape for whatever `raw` it was asked to sign
fn respond(kind: WalletKind, key: &SigningKey, raw: &RawTransaction) -> Value {
    let (signature, signed) = sign_bytes(key, raw);
    match kind {
        WalletKind::Petra | WalletKind::Okx => byte_map(&signed),
        WalletKind::Pontem => json!({ "result": signed }),
        WalletKind::Martian | WalletKind::Onekey => json!(bytes::to_comma_string(&signed)),
        WalletKind::Rise => json!({ "signature": signed }),
        WalletKind::Fewcha => json!({ "data": signature.as_bytes().to_vec() }),
    }
}

/// Stands in for a browser wallet; signs whatever `tamper` turns the request into
struct MockWallet {
    kind: WalletKind,
    key: SigningKey,
    tamper: fn(&mut RawTransaction),
    requests: Mutex<Vec<WalletRequest>>,
    reject: bool,
}

impl MockWallet {
    fn honest(kind: WalletKind) -> Self {
        Self::tampering(kind, |_| {})
    }

    fn tampering(kind: WalletKind, tamper: fn(&mut RawTransaction)) -> Self {
        Self {
            kind,
            key: owner_key(),
            tamper,
            requests: Mutex::new(Vec::new()),
            reject: false,
        }
    }

    fn rejecting(kind: WalletKind) -> Self {
        Self {
            reject: true,
            ..Self::honest(kind)
        }
    }

    fn last_request(&self) -> WalletRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl ExternalSigner for MockWallet {
    async fn request(&self, request: WalletRequest) -> Result<Value, WalletError> {
        self.requests.lock().unwrap().push(request);
        if self.reject {
            return Err(WalletError::Rejected("User rejected the request.".to_string()));
        }
        let mut raw = transfer_txn();
        (self.tamper)(&mut raw);
        Ok(respond(self.kind, &self.key, &raw))
    }
}

fn session(wallet: Arc<MockWallet>) -> WalletSession {
    let adapter = WalletRegistry::with_defaults().get(wallet.kind).unwrap();
    let lookup = Arc::new(StaticAbiLookup::from_json(COIN_ABI).unwrap());
    WalletSession::new(adapter, wallet, account(&owner_key()), lookup)
}

#[tokio::test]
async fn test_every_wallet_signs_and_verifies() {
    let raw = transfer_txn();
    for kind in WalletKind::ALL {
        let wallet = Arc::new(MockWallet::honest(kind));
        let signed = session(wallet.clone()).sign_and_verify(&raw).await.unwrap();
        assert_eq!(signed.raw_txn(), &raw, "{kind}");
        assert_eq!(wallet.requests.lock().unwrap().len(), 1);
    }
}

#[tokio::test]
async fn test_every_wallet_catches_tampering() {
    let raw = transfer_txn();
    for kind in WalletKind::ALL {
        let wallet = Arc::new(MockWallet::tampering(kind, |t| t.sequence_number = 99));
        let err = session(wallet).sign_and_verify(&raw).await.unwrap_err();
        match err {
            // a fewcha signature is attached to the requested txn, so the bytes match and the signature does not
            WalletError::Verification(VerificationError::SignatureMismatch) => assert_eq!(kind, WalletKind::Fewcha),
            WalletError::Verification(VerificationError::FieldMismatch { field, .. }) => {
                assert_ne!(kind, WalletKind::Fewcha);
                assert_eq!(field, fields::SEQUENCE_NUMBER);
            }
            other => panic!("{kind}: unexpected {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_rejection_surfaces() {
    let wallet = Arc::new(MockWallet::rejecting(WalletKind::Petra));
    let err = session(wallet).sign_and_verify(&transfer_txn()).await.unwrap_err();
    assert!(matches!(err, WalletError::Rejected(_)));
}

#[tokio::test]
async fn test_wrong_key_is_rejected() {
    let mut wallet = MockWallet::honest(WalletKind::Martian);
    wallet.key = SigningKey::from_bytes(&[8u8; 32]);
    let err = session(Arc::new(wallet)).sign_and_verify(&transfer_txn()).await.unwrap_err();
    assert_eq!(err, WalletError::Verification(VerificationError::PublicKeyMismatch));
}

#[tokio::test]
async fn test_entry_function_request_shapes() {
    let raw = transfer_txn();
    let lookup = StaticAbiLookup::from_json(COIN_ABI).unwrap();

    let petra = PetraAdapter.build_request(&raw, &lookup).await.unwrap();
    assert_eq!(petra.method, "signTransaction");
    assert_eq!(petra.params[0]["function"], "0x1::coin::transfer");
    assert_eq!(petra.params[0]["type_arguments"], json!(["0x1::aptos_coin::AptosCoin"]));
    assert_eq!(petra.params[0]["arguments"][1], "500");
    assert_eq!(petra.params[1]["maxGasFee"], "50000");
    assert_eq!(petra.params[1]["type"], "entry_function_payload");

    for request in [
        PontemAdapter.build_request(&raw, &lookup).await.unwrap(),
        OkxAdapter.build_request(&raw, &lookup).await.unwrap(),
    ] {
        assert_eq!(request.params[0], petra.params[0]);
        assert_eq!(request.params[1]["max_gas_amount"], "50000");
        assert_eq!(request.params[1]["sequence_number"], "3");
    }
}

#[tokio::test]
async fn test_raw_bytes_request_shapes() {
    let raw = transfer_txn();
    let encoded = raw.to_bcs_bytes();
    let lookup = StaticAbiLookup::new();

    let martian = MartianAdapter.build_request(&raw, &lookup).await.unwrap();
    assert_eq!(martian.params, vec![json!(bytes::to_comma_string(&encoded))]);

    let onekey = OnekeyAdapter.build_request(&raw, &lookup).await.unwrap();
    let hex_param = onekey.params[0].as_str().unwrap();
    assert!(!hex_param.starts_with("0x"));
    assert_eq!(hex::decode(hex_param).unwrap(), encoded);

    let fewcha = FewchaAdapter.build_request(&raw, &lookup).await.unwrap();
    assert_eq!(fewcha.method, "aptos.signMultiSignTransaction");
    assert_eq!(fewcha.params, vec![json!(encoded)]);

    let rise = RiseAdapter.build_request(&raw, &lookup).await.unwrap();
    assert_eq!(rise.params[1], json!({"payloadType": "bcs_payload", "readOnly": true}));
    assert_eq!(
        RawTransaction::from_bcs_bytes(&bytes::from_array(&rise.params[0]).unwrap()).unwrap(),
        raw
    );
}

#[tokio::test]
async fn test_entry_function_wallets_refuse_scripts() {
    let mut raw = transfer_txn();
    raw.payload = TransactionPayload::ModuleBundle(vec![]);
    let wallet = Arc::new(MockWallet::honest(WalletKind::Petra));
    let err = session(wallet.clone()).sign_and_verify(&raw).await.unwrap_err();
    assert_eq!(
        err,
        WalletError::Request(RequestError::Payload(PayloadError::UnsupportedPayloadType("module_bundle")))
    );
    // never reached the wallet
    assert!(wallet.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_session_records_request() {
    let wallet = Arc::new(MockWallet::honest(WalletKind::Onekey));
    session(wallet.clone()).sign(&transfer_txn()).await.unwrap();
    assert_eq!(wallet.last_request().method, "signTransaction");
}

#[tokio::test]
async fn test_signature_data() {
    let raw = transfer_txn();
    let wallet = Arc::new(MockWallet::honest(WalletKind::Fewcha));
    let data = session(wallet).signature_data(&raw).await.unwrap();
    assert_eq!(data.signing_message, raw.signing_message());
    assert_eq!(data.signature, sign_bytes(&owner_key(), &raw).0);
}

#[test]
fn test_malformed_responses() {
    let raw = transfer_txn();
    let account = account(&owner_key());

    let short_sig = FewchaAdapter.parse_response(&raw, &account, json!({"data": [1, 2, 3]}));
    assert!(matches!(short_sig, Err(WalletError::MalformedResponse(_))));

    let missing = PontemAdapter.parse_response(&raw, &account, json!({"data": []}));
    assert!(matches!(missing, Err(WalletError::MalformedResponse(_))));

    let truncated = PetraAdapter.parse_response(&raw, &account, byte_map(&raw.to_bcs_bytes()));
    assert!(matches!(truncated, Err(WalletError::Codec(_))));

    let not_string = MartianAdapter.parse_response(&raw, &account, json!([1, 2]));
    assert!(matches!(not_string, Err(WalletError::MalformedResponse(_))));
}

#[test]
fn test_wallet_kind_names() {
    assert_eq!("petra".parse::<WalletKind>().unwrap(), WalletKind::Petra);
    assert_eq!(" OKX ".parse::<WalletKind>().unwrap(), WalletKind::Okx);
    assert_eq!(
        "metamask".parse::<WalletKind>(),
        Err(WalletError::UnknownWallet("metamask".to_string()))
    );
    assert_eq!(serde_json::to_value(WalletKind::Onekey).unwrap(), json!("onekey"));
}

#[test]
fn test_registry() {
    let registry = WalletRegistry::with_defaults();
    assert_eq!(registry.kinds().len(), WalletKind::ALL.len());
    assert_eq!(registry.get_by_name("rise").unwrap().kind(), WalletKind::Rise);
    assert!(matches!(registry.get_by_name("nope"), Err(WalletError::UnknownWallet(_))));

    let mut partial = WalletRegistry::new();
    partial.register(Arc::new(MartianAdapter));
    assert_eq!(partial.kinds(), vec![WalletKind::Martian]);
    assert!(matches!(
        partial.get(WalletKind::Petra),
        Err(WalletError::UnknownWallet(name)) if name == "Petra"
    ));
}
