use msafe_wallet_adaptor::bcs::{BcsDeserialize, BcsSerialize};
use msafe_wallet_adaptor::message::{
    AccountCreationMessage, MigrationProofMessage, MultisigAccountCreationMessage, PendingPayload,
};
use msafe_wallet_adaptor::move_types::TypeTag;
use msafe_wallet_adaptor::multisig::{derive_multisig, MultiEd25519PublicKey, IMPORT_NONCE};
use msafe_wallet_adaptor::transaction::{EntryFunctionCall, ModuleId, RawTransaction, TransactionPayload};
use msafe_wallet_adaptor::wallets::bytes;
use msafe_wallet_adaptor::{AccountAddress, Ed25519PublicKey};
use proptest::prelude::*;
use serde::Serialize;

fn any_address() -> impl Strategy<Value = AccountAddress> {
    prop::array::uniform32(any::<u8>()).prop_map(AccountAddress::new)
}

fn any_owners() -> impl Strategy<Value = Vec<Ed25519PublicKey>> {
    prop::collection::vec(prop::array::uniform32(any::<u8>()).prop_map(Ed25519PublicKey::new), 1..8)
}

fn any_primitive_tag() -> impl Strategy<Value = TypeTag> {
    prop_oneof![
        Just(TypeTag::Bool),
        Just(TypeTag::U8),
        Just(TypeTag::U64),
        Just(TypeTag::U128),
        Just(TypeTag::Address),
        Just(TypeTag::aptos_coin()),
    ]
}

fn any_type_tag() -> impl Strategy<Value = TypeTag> {
    any_primitive_tag().prop_recursive(3, 8, 1, |inner| inner.prop_map(TypeTag::vector))
}

fn any_raw_txn() -> impl Strategy<Value = RawTransaction> {
    (
        any_address(),
        any::<u64>(),
        any_address(),
        "[a-z_]{1,12}",
        "[a-z_]{1,12}",
        prop::collection::vec(any_type_tag(), 0..3),
        prop::collection::vec(prop::collection::vec(any::<u8>(), 0..40), 0..4),
        (any::<u64>(), any::<u64>(), any::<u64>(), any::<u8>()),
    )
        .prop_map(|(sender, sequence_number, module_address, module, function, type_args, args, tail)| {
            let (max_gas_amount, gas_unit_price, expiration_timestamp_secs, chain_id) = tail;
            RawTransaction {
                sender,
                sequence_number,
                payload: TransactionPayload::EntryFunction(EntryFunctionCall::new(
                    ModuleId::new(module_address, module),
                    function,
                    type_args,
                    args,
                )),
                max_gas_amount,
                gas_unit_price,
                expiration_timestamp_secs,
                chain_id,
            }
        })
}

fn any_creation_message() -> impl Strategy<Value = MultisigAccountCreationMessage> {
    (
        any::<u8>(),
        any_address(),
        any::<u64>(),
        prop::collection::vec(any_address(), 0..5),
        any::<u64>(),
    )
        .prop_map(
            |(chain_id, account_address, sequence_number, owners, num_signatures_required)| {
                MultisigAccountCreationMessage {
                    chain_id,
                    account_address,
                    sequence_number,
                    owners,
                    num_signatures_required,
                }
            },
        )
}

// Mirror of the on-chain layout, encoded with the reference `bcs` crate.

#[derive(Serialize)]
struct StructTagRef {
    address: [u8; 32],
    module: String,
    name: String,
    type_args: Vec<TypeTagRef>,
}

#[derive(Serialize)]
#[allow(dead_code)]
enum TypeTagRef {
    Bool,
    U8,
    U64,
    U128,
    Address,
    Signer,
    Vector(Box<TypeTagRef>),
    Struct(Box<StructTagRef>),
}

#[derive(Serialize)]
struct ModuleIdRef {
    address: [u8; 32],
    name: String,
}

#[derive(Serialize)]
struct EntryFunctionRef {
    module: ModuleIdRef,
    function: String,
    ty_args: Vec<TypeTagRef>,
    args: Vec<Vec<u8>>,
}

#[derive(Serialize)]
#[allow(dead_code)]
enum PayloadRef {
    Script(()),
    ModuleBundle(Vec<Vec<u8>>),
    EntryFunction(EntryFunctionRef),
}

#[derive(Serialize)]
struct RawTransactionRef {
    sender: [u8; 32],
    sequence_number: u64,
    payload: PayloadRef,
    max_gas_amount: u64,
    gas_unit_price: u64,
    expiration_timestamp_secs: u64,
    chain_id: u8,
}

fn type_tag_ref(tag: &TypeTag) -> TypeTagRef {
    match tag {
        TypeTag::Bool => TypeTagRef::Bool,
        TypeTag::U8 => TypeTagRef::U8,
        TypeTag::U64 => TypeTagRef::U64,
        TypeTag::U128 => TypeTagRef::U128,
        TypeTag::Address => TypeTagRef::Address,
        TypeTag::Signer => TypeTagRef::Signer,
        TypeTag::Vector(inner) => TypeTagRef::Vector(Box::new(type_tag_ref(inner))),
        // only AptosCoin is generated
        TypeTag::Struct(_) => TypeTagRef::Struct(Box::new(StructTagRef {
            address: AccountAddress::one().into_bytes(),
            module: "aptos_coin".to_string(),
            name: "AptosCoin".to_string(),
            type_args: vec![],
        })),
    }
}

fn raw_txn_ref(raw: &RawTransaction) -> RawTransactionRef {
    let TransactionPayload::EntryFunction(call) = &raw.payload else {
        panic!("only entry functions are generated");
    };
    RawTransactionRef {
        sender: raw.sender.into_bytes(),
        sequence_number: raw.sequence_number,
        payload: PayloadRef::EntryFunction(EntryFunctionRef {
            module: ModuleIdRef {
                address: call.module.address.into_bytes(),
                name: call.module.name.clone(),
            },
            function: call.function.clone(),
            ty_args: call.type_args.iter().map(type_tag_ref).collect(),
            args: call.args.clone(),
        }),
        max_gas_amount: raw.max_gas_amount,
        gas_unit_price: raw.gas_unit_price,
        expiration_timestamp_secs: raw.expiration_timestamp_secs,
        chain_id: raw.chain_id,
    }
}

proptest! {
    #[test]
    fn raw_transactions_roundtrip(raw in any_raw_txn()) {
        let encoded = raw.to_bcs_bytes();
        prop_assert_eq!(RawTransaction::from_bcs_bytes(&encoded).unwrap(), raw);
    }

    #[test]
    fn raw_transaction_encoding_matches_reference_codec(raw in any_raw_txn()) {
        let reference = bcs::to_bytes(&raw_txn_ref(&raw)).unwrap();
        prop_assert_eq!(raw.to_bcs_bytes(), reference);
    }

    #[test]
    fn truncated_raw_transactions_are_rejected(raw in any_raw_txn(), cut in 1usize..16) {
        let encoded = raw.to_bcs_bytes();
        let cut = cut.min(encoded.len());
        prop_assert!(RawTransaction::from_bcs_bytes(&encoded[..encoded.len() - cut]).is_err());
    }

    #[test]
    fn signing_messages_dispatch_to_transactions(raw in any_raw_txn()) {
        let payload = PendingPayload::classify(&raw.signing_message()).unwrap();
        prop_assert_eq!(payload, PendingPayload::Transaction(raw));
    }

    #[test]
    fn tagged_messages_dispatch_by_type_info(message in any_creation_message()) {
        let migration = MigrationProofMessage::new(message.clone()).encode();
        let creation = AccountCreationMessage::new(message.clone()).encode();
        prop_assert_ne!(&migration, &creation);

        match PendingPayload::classify(&migration).unwrap() {
            PendingPayload::MigrationProof(decoded) => prop_assert_eq!(decoded.inner, message.clone()),
            other => prop_assert!(false, "migration proof classified as {}", other.kind()),
        }
        match PendingPayload::classify(&creation).unwrap() {
            PendingPayload::AccountCreation(decoded) => prop_assert_eq!(decoded.inner, message),
            other => prop_assert!(false, "account creation classified as {}", other.kind()),
        }
        prop_assert!(MigrationProofMessage::decode(&creation).is_err());
    }

    #[test]
    fn multisig_derivation_is_deterministic(owners in any_owners(), nonce in 0u64..1000) {
        let threshold = owners.len() as u8;
        let first = derive_multisig(&owners, threshold, nonce).unwrap();
        let second = derive_multisig(&owners, threshold, nonce).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.public_key.public_keys().len(), owners.len() + 1);

        let other = derive_multisig(&owners, threshold, nonce + 1).unwrap();
        prop_assert_ne!(first.address, other.address);
    }

    #[test]
    fn imported_wallets_use_the_owner_keys_only(owners in any_owners()) {
        let threshold = owners.len() as u8;
        let derived = derive_multisig(&owners, threshold, IMPORT_NONCE).unwrap();
        let plain = MultiEd25519PublicKey::new(owners.clone(), threshold).unwrap();

        prop_assert_eq!(derived.public_key.public_keys(), owners.as_slice());
        prop_assert_eq!(derived.address, plain.address());
        prop_assert_eq!(MultiEd25519PublicKey::from_bytes(&plain.to_bytes()).unwrap(), plain);
    }

    #[test]
    fn threshold_above_key_count_is_rejected(owners in any_owners(), extra in 1u8..4) {
        // the nonce key counts towards the key total
        let threshold = owners.len() as u8 + 1 + extra;
        prop_assert!(derive_multisig(&owners, threshold, 0).is_err());
    }

    #[test]
    fn comma_strings_roundtrip(data in prop::collection::vec(any::<u8>(), 0..64)) {
        let encoded = bytes::to_comma_string(&data);
        prop_assert_eq!(bytes::from_comma_string(&encoded).unwrap(), data.clone());
        prop_assert_eq!(bytes::from_array(&bytes::to_array(&data)).unwrap(), data);
    }

    #[test]
    fn uleb128_lengths_match_reference_codec(data in prop::collection::vec(any::<u8>(), 0..300)) {
        prop_assert_eq!(data.to_bcs_bytes(), bcs::to_bytes(&data).unwrap());
        prop_assert_eq!(Vec::<u8>::from_bcs_bytes(&data.to_bcs_bytes()).unwrap(), data);
    }
}
