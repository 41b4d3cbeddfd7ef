use super::*;
use crate::bcs::{BcsDeserialize, BcsSerialize, CodecError};
use crate::move_types::TypeTag;
use crate::types::{AccountAddress, Ed25519PublicKey, Ed25519Signature};

fn transfer_call() -> EntryFunctionCall {
    let recipient = AccountAddress::new([0x22; 32]);
    EntryFunctionCall::new(
        ModuleId::new(AccountAddress::one(), "coin"),
        "transfer",
        vec![TypeTag::aptos_coin()],
        vec![recipient.to_bcs_bytes(), 1_000u64.to_bcs_bytes()],
    )
}

fn sample_raw() -> RawTransaction {
    RawTransaction {
        sender: AccountAddress::new([0x11; 32]),
        sequence_number: 7,
        payload: TransactionPayload::EntryFunction(transfer_call()),
        max_gas_amount: 50_000,
        gas_unit_price: 100,
        expiration_timestamp_secs: 1_700_000_000,
        chain_id: 1,
    }
}

#[test]
fn test_raw_transaction_roundtrip() {
    let raw = sample_raw();
    let bytes = raw.to_bcs_bytes();
    assert_eq!(RawTransaction::from_bcs_bytes(&bytes).unwrap(), raw);
}

#[test]
fn test_raw_transaction_field_layout() {
    let raw = sample_raw();
    let bytes = raw.to_bcs_bytes();
    assert_eq!(&bytes[..32], &[0x11; 32]);
    assert_eq!(&bytes[32..40], &7u64.to_le_bytes());
    // entry function payload tag follows the sequence number
    assert_eq!(bytes[40], 2);
    let tail = &bytes[bytes.len() - 25..];
    assert_eq!(&tail[..8], &50_000u64.to_le_bytes());
    assert_eq!(&tail[8..16], &100u64.to_le_bytes());
    assert_eq!(&tail[16..24], &1_700_000_000u64.to_le_bytes());
    assert_eq!(tail[24], 1);
}

#[test]
fn test_truncated_raw_transaction() {
    let bytes = sample_raw().to_bcs_bytes();
    assert!(matches!(
        RawTransaction::from_bcs_bytes(&bytes[..bytes.len() - 1]),
        Err(CodecError::TruncatedInput { .. })
    ));
}

#[test]
fn test_script_payload_roundtrip() {
    let payload = TransactionPayload::Script(Script {
        code: vec![0xa1, 0x1c, 0xeb, 0x0b],
        type_args: vec![TypeTag::U64],
        args: vec![
            TransactionArgument::U8(1),
            TransactionArgument::U64(2),
            TransactionArgument::U128(3),
            TransactionArgument::Address(AccountAddress::one()),
            TransactionArgument::U8Vector(vec![4, 5]),
            TransactionArgument::Bool(true),
        ],
    });
    let bytes = payload.to_bcs_bytes();
    assert_eq!(bytes[0], 0);
    assert_eq!(TransactionPayload::from_bcs_bytes(&bytes).unwrap(), payload);
}

#[test]
fn test_unsupported_payloads_for_wallet_requests() {
    let bundle = TransactionPayload::ModuleBundle(vec![Module { code: vec![1, 2, 3] }]);
    assert_eq!(
        bundle.as_entry_function(),
        Err(PayloadError::UnsupportedPayloadType("module_bundle"))
    );
    let bytes = bundle.to_bcs_bytes();
    assert_eq!(bytes, vec![1, 1, 3, 1, 2, 3]);

    let call = transfer_call();
    let payload = TransactionPayload::EntryFunction(call.clone());
    assert_eq!(payload.as_entry_function().unwrap(), &call);
    assert_eq!(call.function_tag(), "0x1::coin::transfer");
}

#[test]
fn test_unknown_payload_variant() {
    assert_eq!(
        TransactionPayload::from_bcs_bytes(&[3]),
        Err(CodecError::InvalidVariant { type_name: "TransactionPayload", index: 3 })
    );
}

#[test]
fn test_ed25519_authenticator_layout() {
    let auth = TransactionAuthenticator::ed25519(Ed25519PublicKey::new([1; 32]), Ed25519Signature::new([2; 64]));
    let bytes = auth.to_bcs_bytes();
    assert_eq!(bytes.len(), 1 + 33 + 65);
    assert_eq!(bytes[0], 0);
    assert_eq!(bytes[1], 0x20);
    assert_eq!(bytes[34], 0x40);
    assert_eq!(TransactionAuthenticator::from_bcs_bytes(&bytes).unwrap(), auth);
}

#[test]
fn test_unknown_authenticator_rejected() {
    let mut bytes = vec![2u8];
    bytes.extend_from_slice(&[0u8; 98]);
    assert_eq!(
        TransactionAuthenticator::from_bcs_bytes(&bytes),
        Err(CodecError::InvalidVariant { type_name: "TransactionAuthenticator", index: 2 })
    );
}

#[test]
fn test_signed_transaction_decodes_unverified() {
    let unverified = UnverifiedSignedTransaction::new(
        sample_raw(),
        TransactionAuthenticator::ed25519(Ed25519PublicKey::new([1; 32]), Ed25519Signature::new([2; 64])),
    );
    let bytes = unverified.to_bcs_bytes();
    assert_eq!(UnverifiedSignedTransaction::from_bcs_bytes(&bytes).unwrap(), unverified);
}

#[test]
fn test_signed_transaction_rejects_deeply_nested_type_args() {
    let mut blob = AccountAddress::new([0x11; 32]).to_bcs_bytes();
    blob.extend(7u64.to_bcs_bytes());
    blob.push(2);
    blob.extend(ModuleId::new(AccountAddress::one(), "coin").to_bcs_bytes());
    blob.extend("transfer".to_string().to_bcs_bytes());
    // one type argument made of a long run of vector tags
    blob.push(1);
    blob.extend(std::iter::repeat(6u8).take(500_000));
    blob.push(1);

    assert!(matches!(
        UnverifiedSignedTransaction::from_bcs_bytes(&blob),
        Err(CodecError::InvalidValue(_))
    ));
}

#[test]
fn test_signing_message_prefix() {
    let raw = sample_raw();
    let message = raw.signing_message();
    assert_eq!(&message[..32], &raw_transaction_prefix());
    assert_eq!(&message[32..], raw.to_bcs_bytes().as_slice());
    assert_eq!(
        hex::encode(raw_transaction_prefix()),
        "b5e97db07fa0bd0e5598aa3643a9bc6f6693bddc1a9fec9e674a461eaa00b193"
    );
    assert_eq!(raw.hash(), crate::utils::crypto::sha3_256(&message));
}

#[test]
fn test_diff_reports_changed_fields_in_order() {
    let original = sample_raw();
    let mut tampered = original.clone();
    tampered.chain_id = 2;
    tampered.sequence_number = 8;

    let diffs = original.diff(&tampered);
    assert_eq!(diffs.len(), 2);
    assert_eq!(diffs[0].field, fields::SEQUENCE_NUMBER);
    assert_eq!(diffs[0].expected, "7");
    assert_eq!(diffs[0].actual, "8");
    assert_eq!(diffs[1].field, fields::CHAIN_ID);
    assert!(original.diff(&original).is_empty());
}
