use super::*;
use crate::bcs::{BcsDeserialize, BcsSerialize};
use crate::message::{MigrationProofMessage, MultisigAccountCreationMessage};
use crate::move_types::TypeTag;
use crate::multisig::MAINNET_DEPLOYER;
use crate::transaction::{ModuleId, TransactionPayload};
use crate::types::{AccountAddress, Ed25519PublicKey, Ed25519Signature};

fn msafe_account() -> AccountAddress {
    AccountAddress::new([0x5a; 32])
}

fn owner() -> AccountAddress {
    AccountAddress::new([0x0c; 32])
}

fn fixed_expiry() -> TxOptions {
    TxOptions {
        expiration_raw: Some(1_800_000_000),
        ..TxOptions::default()
    }
}

#[test]
fn test_defaults() {
    let config = TxConfig::default();
    assert_eq!(config.max_gas, DEFAULT_MAX_GAS);
    assert_eq!(config.gas_price, DEFAULT_GAS_UNIT_PRICE);
    assert_eq!(config.expiration_secs, 604_800);
    assert_eq!(config.sequence_number, 0);
    assert_eq!(config.chain_id, 1);
}

#[test]
fn test_expiration_counts_from_now() {
    let before = chrono::Utc::now().timestamp() as u64;
    let expiration = TxConfig::default().expiration_timestamp();
    assert!(expiration >= before + DEFAULT_EXPIRATION_SECS);
    assert!(expiration <= before + DEFAULT_EXPIRATION_SECS + 5);

    let config = TxConfig::from_options(&fixed_expiry());
    assert_eq!(config.expiration_timestamp(), 1_800_000_000);
}

#[test]
fn test_split_function_components() {
    let (address, module, function) = split_function_components("0x1::coin::transfer").unwrap();
    assert_eq!(address, AccountAddress::one());
    assert_eq!(module, "coin");
    assert_eq!(function, "transfer");

    for bad in ["0x1::coin", "0x1::coin::transfer::extra", "0x1::::transfer", "transfer"] {
        assert_eq!(
            split_function_components(bad),
            Err(MsafeError::InvalidFunctionName(bad.to_string()))
        );
    }
    assert!(matches!(
        split_function_components("0xzz::coin::transfer"),
        Err(MsafeError::InvalidAddress(_))
    ));
}

#[test]
fn test_entry_function_txn() {
    let args = EntryFunctionArgs {
        fn_name: "0x1::coin::transfer".to_string(),
        type_args: vec!["0x1::aptos_coin::AptosCoin".to_string()],
        args: vec![owner().to_bcs_bytes(), 10u64.to_bcs_bytes()],
    };
    let opts = TxOptions {
        sequence_number: Some(4),
        gas_price: Some(150),
        ..fixed_expiry()
    };
    let raw = entry_function_txn(msafe_account(), &args, &opts).unwrap();

    assert_eq!(raw.sender, msafe_account());
    assert_eq!(raw.sequence_number, 4);
    assert_eq!(raw.gas_unit_price, 150);
    assert_eq!(raw.max_gas_amount, DEFAULT_MAX_GAS);
    // same call the dedicated APT builder produces
    assert_eq!(raw, apt_transfer_txn(msafe_account(), owner(), 10, &opts));
}

#[test]
fn test_entry_function_bad_type_arg() {
    let args = EntryFunctionArgs {
        fn_name: "0x1::coin::transfer".to_string(),
        type_args: vec!["0x1::aptos_coin::".to_string()],
        args: vec![],
    };
    assert!(matches!(
        entry_function_txn(msafe_account(), &args, &TxOptions::default()),
        Err(MsafeError::TypeTag(_))
    ));
}

#[test]
fn test_entry_function_args_json() {
    let json = r#"{"fnName":"0x1::coin::transfer","typeArgs":["0x1::aptos_coin::AptosCoin"],"args":["0x0a00000000000000"]}"#;
    let args: EntryFunctionArgs = serde_json::from_str(json).unwrap();
    assert_eq!(args.args, vec![10u64.to_bcs_bytes()]);
    assert_eq!(serde_json::to_string(&args).unwrap(), json);
}

#[test]
fn test_init_transaction_arguments() {
    let payload = vec![0xaa; 40];
    let signature = Ed25519Signature::new([0x11; 64]);
    let raw = MsafeTxnBuilder::default().init_transaction(owner(), msafe_account(), 2, &payload, &signature, &fixed_expiry());

    let TransactionPayload::EntryFunction(call) = &raw.payload else {
        panic!("expected entry function");
    };
    assert_eq!(call.module, ModuleId::new(MAINNET_DEPLOYER, MOMENTUM_SAFE));
    assert_eq!(call.function, functions::INIT_TRANSACTION);
    assert!(call.type_args.is_empty());
    assert_eq!(call.args[0], msafe_account().as_bytes().to_vec());
    assert_eq!(call.args[1], vec![2]);
    assert_eq!(Vec::<u8>::from_bcs_bytes(&call.args[2]).unwrap(), payload);
    assert_eq!(Ed25519Signature::from_bcs_bytes(&call.args[3]).unwrap(), signature);
    assert_eq!(raw.sender, owner());
}

#[test]
fn test_submit_signature_and_revert() {
    let builder = MsafeTxnBuilder::new(AccountAddress::new([0x77; 32]));
    let hash = [0x42u8; 32];
    let raw = builder.submit_signature(
        owner(),
        msafe_account(),
        0,
        &hash,
        &Ed25519Signature::new([1; 64]),
        &TxOptions::default(),
    );
    let TransactionPayload::EntryFunction(call) = &raw.payload else {
        panic!("expected entry function");
    };
    assert!(builder.is_msafe_call(call, functions::SUBMIT_SIGNATURE));
    assert_eq!(call.args[2][0], 32);

    let opts = TxOptions {
        sequence_number: Some(1),
        ..fixed_expiry()
    };
    let revert = builder.revert(msafe_account(), 9, &opts);
    assert_eq!(revert.sequence_number, 9);
    let TransactionPayload::EntryFunction(call) = &revert.payload else {
        panic!("expected entry function");
    };
    assert!(builder.is_msafe_call(call, functions::REVERT));
    assert!(call.args.is_empty());
    assert_eq!(PendingTxnType::classify(&revert, &builder), PendingTxnType::Revert);
    // another deployment's revert is just an entry function
    assert_eq!(
        PendingTxnType::classify(&revert, &MsafeTxnBuilder::default()),
        PendingTxnType::EntryFunction
    );
}

#[test]
fn test_classify_coin_calls() {
    let builder = MsafeTxnBuilder::default();
    let apt = apt_transfer_txn(msafe_account(), owner(), 1, &fixed_expiry());
    assert_eq!(PendingTxnType::classify(&apt, &builder), PendingTxnType::AptCoinTransfer);

    let usdc = entry_function_txn(
        msafe_account(),
        &EntryFunctionArgs {
            fn_name: "0x1::coin::transfer".to_string(),
            type_args: vec!["0xf22b::asset::USDC".to_string()],
            args: vec![],
        },
        &fixed_expiry(),
    )
    .unwrap();
    assert_eq!(PendingTxnType::classify(&usdc, &builder), PendingTxnType::AnyCoinTransfer);

    let mut script = apt.clone();
    script.payload = TransactionPayload::ModuleBundle(vec![]);
    assert_eq!(PendingTxnType::classify(&script, &builder), PendingTxnType::ModulePublish);
    assert_eq!(PendingTxnType::ModulePublish.to_string(), "Module publish");
}

#[test]
fn test_pending_info_from_signing_message() {
    let raw = apt_transfer_txn(msafe_account(), owner(), 25, &fixed_expiry());
    let owner_key = Ed25519PublicKey::new([3; 32]);
    let info = PendingTxnInfo::from_pending(&raw.signing_message(), &MsafeTxnBuilder::default())
        .unwrap()
        .with_signatures(&[owner_key], Some(&owner_key));

    assert_eq!(info.tx_type, PendingTxnType::AptCoinTransfer);
    assert_eq!(info.hash, raw.hash_hex());
    assert_eq!(info.sender, msafe_account());
    assert_eq!(info.expiration.unwrap().timestamp(), 1_800_000_000);
    assert_eq!(info.num_sigs, Some(1));
    assert!(info.is_signed);

    let args = info.args.unwrap();
    assert_eq!(args.fn_name, "0x1::coin::transfer");
    assert_eq!(args.type_args, vec![TypeTag::aptos_coin().to_string()]);
    assert_eq!(args.args[1], "0x1900000000000000");
}

#[test]
fn test_pending_info_from_migration_proof() {
    let message = MigrationProofMessage::new(MultisigAccountCreationMessage {
        chain_id: 1,
        account_address: msafe_account(),
        sequence_number: 12,
        owners: vec![owner()],
        num_signatures_required: 1,
    });
    let encoded = message.encode();
    let info = PendingTxnInfo::from_pending(&encoded, &MsafeTxnBuilder::default())
        .unwrap()
        .with_signatures(&[], Some(&Ed25519PublicKey::new([3; 32])));

    assert_eq!(info.tx_type, PendingTxnType::Migrate);
    assert_eq!(info.sequence_number, 12);
    assert_eq!(info.sender, msafe_account());
    assert_eq!(info.expiration, None);
    assert_eq!(info.hash, format!("0x{}", hex::encode(crate::utils::sha3_256(&encoded))));
    assert!(!info.is_signed);
}

#[test]
fn test_pending_info_rejects_garbage() {
    assert!(matches!(
        PendingTxnInfo::from_pending(&[1, 2, 3], &MsafeTxnBuilder::default()),
        Err(MsafeError::Message(_))
    ));
}
