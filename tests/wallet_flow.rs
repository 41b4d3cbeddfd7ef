use std::sync::Arc;

use async_trait::async_trait;
use ed25519_dalek::{Signer, SigningKey};
use serde_json::Value;

use msafe_wallet_adaptor::abi::StaticAbiLookup;
use msafe_wallet_adaptor::bcs::{BcsDeserialize, BcsSerialize};
use msafe_wallet_adaptor::message::decode_signing_message;
use msafe_wallet_adaptor::msafe::{apt_transfer_txn, MsafeTxnBuilder, PendingTxnInfo, PendingTxnType, TxOptions};
use msafe_wallet_adaptor::multisig::{derive_multisig, MultisigError, MultisigSignatureSet};
use msafe_wallet_adaptor::signing::VerificationError;
use msafe_wallet_adaptor::transaction::{TransactionAuthenticator, TransactionPayload};
use msafe_wallet_adaptor::wallets::{bytes, ConnectedAccount, WalletError, WalletRequest};
use msafe_wallet_adaptor::{
    AccountAddress, Ed25519PublicKey, Ed25519Signature, ExternalSigner, RawTransaction, UnverifiedSignedTransaction,
    WalletKind, WalletRegistry, WalletSession,
};

/// Martian-style extension: signs whatever raw transaction it is handed
struct Extension {
    key: SigningKey,
    redirect_to: Option<AccountAddress>,
}

impl Extension {
    fn honest(seed: u8) -> Self {
        Self {
            key: SigningKey::from_bytes(&[seed; 32]),
            redirect_to: None,
        }
    }

    fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey::new(self.key.verifying_key().to_bytes())
    }
}

#[async_trait]
impl ExternalSigner for Extension {
    async fn request(&self, request: WalletRequest) -> Result<Value, WalletError> {
        let encoded = request
            .params
            .first()
            .and_then(Value::as_str)
            .ok_or_else(|| WalletError::Rejected("missing transaction".to_string()))?;
        let mut raw = RawTransaction::from_bcs_bytes(&bytes::from_comma_string(encoded)?)?;
        if let (Some(to), TransactionPayload::EntryFunction(call)) = (self.redirect_to, &mut raw.payload) {
            call.args[0] = to.to_bcs_bytes();
        }

        let signature = Ed25519Signature::new(self.key.sign(&raw.signing_message()).to_bytes());
        let signed = UnverifiedSignedTransaction::new(raw, TransactionAuthenticator::ed25519(self.public_key(), signature));
        Ok(Value::String(bytes::to_comma_string(&signed.to_bcs_bytes())))
    }
}

fn session(extension: Arc<Extension>) -> WalletSession {
    let account = ConnectedAccount::new(AccountAddress::new([0x0a; 32]), extension.public_key());
    let adapter = WalletRegistry::with_defaults().get(WalletKind::Martian).unwrap();
    WalletSession::new(adapter, extension, account, Arc::new(StaticAbiLookup::new()))
}

fn opts() -> TxOptions {
    TxOptions {
        sequence_number: Some(7),
        expiration_raw: Some(1_800_000_000),
        ..TxOptions::default()
    }
}

#[tokio::test]
async fn owners_sign_and_assemble_a_multisig_transfer() {
    let owners: Vec<Arc<Extension>> = (1..=3).map(|seed| Arc::new(Extension::honest(seed))).collect();
    let owner_keys: Vec<Ed25519PublicKey> = owners.iter().map(|o| o.public_key()).collect();
    let derived = derive_multisig(&owner_keys, 2, 0).unwrap();

    let transfer = apt_transfer_txn(derived.address, AccountAddress::new([0x0b; 32]), 1_000, &opts());
    let mut signatures = MultisigSignatureSet::new(derived.public_key.clone());

    let first = session(owners[0].clone()).signature_data(&transfer).await.unwrap();
    assert_eq!(first.signing_message, transfer.signing_message());
    assert_eq!(signatures.add(&owner_keys[0], first.signature).unwrap(), 0);
    assert!(!signatures.is_complete());
    assert!(matches!(
        signatures.assemble(transfer.clone()),
        Err(MultisigError::NotEnoughSignatures { have: 1, threshold: 2 })
    ));

    let third = session(owners[2].clone()).signature_data(&transfer).await.unwrap();
    assert_eq!(signatures.add(&owner_keys[2], third.signature).unwrap(), 2);
    assert!(signatures.is_complete());

    let signed = signatures.assemble(transfer.clone()).unwrap();
    assert_eq!(signed.raw_txn(), &transfer);
    let TransactionAuthenticator::MultiEd25519 { public_key, signature } = signed.authenticator() else {
        panic!("expected a multisig authenticator");
    };
    assert_eq!(public_key.address(), derived.address);
    signature.verify(&transfer.signing_message(), public_key).unwrap();

    let decoded = UnverifiedSignedTransaction::from_bcs_bytes(&hex::decode(&signed.to_hex()[2..]).unwrap()).unwrap();
    assert_eq!(decoded.raw_txn, transfer);
}

#[tokio::test]
async fn pending_slot_is_initialised_through_the_wallet() {
    let owner = Arc::new(Extension::honest(4));
    let derived = derive_multisig(&[owner.public_key()], 1, 0).unwrap();
    let builder = MsafeTxnBuilder::default();
    let wallet = session(owner.clone());

    let transfer = apt_transfer_txn(derived.address, AccountAddress::new([0x0b; 32]), 42, &opts());
    let approval = wallet.signature_data(&transfer).await.unwrap();

    let init = builder.init_transaction(
        wallet.account().address,
        derived.address,
        0,
        &approval.signing_message,
        &approval.signature,
        &opts(),
    );
    let submitted = wallet.sign_and_verify(&init).await.unwrap();
    let TransactionPayload::EntryFunction(call) = &submitted.raw_txn().payload else {
        panic!("expected entry function");
    };
    assert_eq!(&call.module.address, builder.modules_account());

    // what the MSafe resource stores is the owner-signed signing message
    let stored = Vec::<u8>::from_bcs_bytes(&call.args[2]).unwrap();
    assert_eq!(decode_signing_message(&stored).unwrap(), transfer);

    let info = PendingTxnInfo::from_pending(&stored, &builder)
        .unwrap()
        .with_signatures(&[owner.public_key()], Some(&owner.public_key()));
    assert_eq!(info.tx_type, PendingTxnType::AptCoinTransfer);
    assert_eq!(info.sender, derived.address);
    assert_eq!(info.sequence_number, 7);
    assert!(info.is_signed);
}

#[tokio::test]
async fn redirected_transfer_never_reaches_the_caller() {
    let owner = Arc::new(Extension {
        redirect_to: Some(AccountAddress::new([0xee; 32])),
        ..Extension::honest(5)
    });
    let transfer = apt_transfer_txn(AccountAddress::new([0x0a; 32]), AccountAddress::new([0x0b; 32]), 42, &opts());

    let err = session(owner).sign(&transfer).await.unwrap_err();
    assert!(matches!(
        err,
        WalletError::Verification(VerificationError::FieldMismatch { field: "payload", .. })
    ));
}
