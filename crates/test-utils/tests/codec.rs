//! The codec must reproduce, byte for byte, the canonical encoding of every
//! supported transaction, whatever notation the feed used for its numbers.

use alloy::{
    consensus::{SignableTransaction, TxLegacy},
    primitives::{Address, Bytes, TxKind, U256},
};
use relay_codec::{decode_mempool_record, LegacyTransaction, MempoolRecord, Transaction};
use relay_test_utils::{
    specs::{
        eip1559_call_with_access_list, eip1559_record, legacy_record, make_wallet, raw,
        simple_eip1559, simple_legacy, sign_tx, NumberStyle,
    },
    users::{TEST_CHAIN_ID, TEST_CONTRACT, TEST_SIGNERS},
};

const RECIPIENT: Address = Address::repeat_byte(0x35);
const STYLES: [NumberStyle; 3] = [NumberStyle::Hex, NumberStyle::Decimal, NumberStyle::Json];

#[test]
fn legacy_matches_reference() {
    let signed = sign_tx(
        &TEST_SIGNERS[0],
        simple_legacy(RECIPIENT, U256::from(10).pow(U256::from(18)), 9, Some(TEST_CHAIN_ID)),
    );
    let hash = *signed.hash();
    let record = legacy_record(&signed, NumberStyle::Hex);
    let expected = raw(signed);

    let tx = decode_mempool_record(&record).unwrap();
    assert_eq!(tx.tx_type(), 0);
    assert_eq!(tx.encoded(), expected);
    assert_eq!(tx.hash(), hash);
}

#[test]
fn unprotected_legacy_matches_reference() {
    let signed = sign_tx(&TEST_SIGNERS[1], simple_legacy(RECIPIENT, U256::from(1), 0, None));
    let record = legacy_record(&signed, NumberStyle::Decimal);
    let expected = raw(signed);

    let tx = decode_mempool_record(&record).unwrap();
    assert_eq!(tx.encoded(), expected);
    let Transaction::Legacy(legacy) = tx else { panic!("expected legacy") };
    assert_eq!(legacy.chain_id(), None);
    assert!(legacy.v == 27 || legacy.v == 28);
}

#[test]
fn eip1559_matches_reference() {
    let signed = sign_tx(&TEST_SIGNERS[2], simple_eip1559(RECIPIENT, U256::from(12345), 3, 1));
    let hash = *signed.hash();
    let record = eip1559_record(&signed, NumberStyle::Hex);
    let expected = raw(signed);

    let tx = decode_mempool_record(&record).unwrap();
    assert_eq!(tx.tx_type(), 2);
    assert_eq!(tx.encoded()[0], 0x02);
    assert_eq!(tx.encoded(), expected);
    assert_eq!(tx.hash(), hash);
}

#[test]
fn eip1559_access_list_matches_reference() {
    let signed = sign_tx(&TEST_SIGNERS[3], eip1559_call_with_access_list(TEST_CONTRACT, 77, 5));
    let record = eip1559_record(&signed, NumberStyle::Decimal);
    let expected = raw(signed);

    let tx = decode_mempool_record(&record).unwrap();
    assert_eq!(tx.encoded(), expected);
    let Transaction::Eip1559(typed) = tx else { panic!("expected type 2") };
    assert_eq!(typed.access_list.len(), 2);
    assert_eq!(typed.access_list[0].storage_keys.len(), 2);
    assert!(typed.access_list[1].storage_keys.is_empty());
}

#[test]
fn contract_creation_matches_reference() {
    let tx = TxLegacy {
        to: TxKind::Create,
        input: Bytes::from_static(&[0x60, 0x80, 0x60, 0x40, 0x52]),
        gas_limit: 200_000,
        ..simple_legacy(RECIPIENT, U256::ZERO, 1, Some(TEST_CHAIN_ID))
    };
    let signed = sign_tx(&TEST_SIGNERS[0], tx);
    let record = legacy_record(&signed, NumberStyle::Json);
    assert!(record.to.is_none());
    let expected = raw(signed);

    assert_eq!(decode_mempool_record(&record).unwrap().encoded(), expected);
}

#[test]
fn number_notation_does_not_change_encoding() {
    let legacy = sign_tx(&make_wallet(9), simple_legacy(RECIPIENT, U256::MAX >> 1, 400, Some(1)));
    let typed = sign_tx(&make_wallet(9), eip1559_call_with_access_list(RECIPIENT, 400, 1));

    let legacy_encodings: Vec<_> = STYLES
        .iter()
        .map(|style| decode_mempool_record(&legacy_record(&legacy, *style)).unwrap().encoded())
        .collect();
    let typed_encodings: Vec<_> = STYLES
        .iter()
        .map(|style| decode_mempool_record(&eip1559_record(&typed, *style)).unwrap().encoded())
        .collect();

    assert!(legacy_encodings.windows(2).all(|pair| pair[0] == pair[1]));
    assert!(typed_encodings.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(legacy_encodings[0], raw(legacy));
    assert_eq!(typed_encodings[0], raw(typed));
}

#[test]
fn decode_raw_reverses_reference_encoding() {
    let legacy = raw(sign_tx(&TEST_SIGNERS[0], simple_legacy(RECIPIENT, U256::ONE, 2, Some(1))));
    let typed = raw(sign_tx(&TEST_SIGNERS[0], eip1559_call_with_access_list(RECIPIENT, 2, 1)));

    for bytes in [legacy, typed] {
        assert_eq!(Transaction::decode_raw(&bytes).unwrap().encoded(), bytes);
    }
}

#[test]
fn own_signed_legacy_matches_reference() {
    let wallet = &TEST_SIGNERS[1];
    let input = Bytes::from_static(&[0x12, 0x34, 0x56, 0x78]);
    let reference = TxLegacy {
        chain_id: Some(TEST_CHAIN_ID),
        nonce: 42,
        gas_price: 3_000_000_000,
        gas_limit: 90_000,
        to: TxKind::Call(TEST_CONTRACT),
        value: U256::ZERO,
        input: input.clone(),
    };

    let ours = LegacyTransaction::unsigned(
        42,
        3_000_000_000,
        90_000,
        TxKind::Call(TEST_CONTRACT),
        U256::ZERO,
        input,
    );
    assert_eq!(ours.signature_hash(Some(TEST_CHAIN_ID)), reference.signature_hash());

    let signed = sign_tx(wallet, reference);
    let ours = ours.into_signed(signed.signature(), Some(TEST_CHAIN_ID)).unwrap();
    assert_eq!(ours.encoded(), raw(signed));
}

#[test]
fn wide_json_numbers_survive_the_feed() {
    let twenty_eth = U256::from(20u64) * U256::from(10u64).pow(U256::from(18u64));
    let signed = sign_tx(&TEST_SIGNERS[2], simple_eip1559(RECIPIENT, twenty_eth, 8, TEST_CHAIN_ID));
    let json = serde_json::to_string(&eip1559_record(&signed, NumberStyle::Json)).unwrap();
    assert!(json.contains(r#""value":20000000000000000000"#), "{json}");

    let record: MempoolRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(decode_mempool_record(&record).unwrap().encoded(), raw(signed));
}
