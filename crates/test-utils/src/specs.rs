//! Signed fixture transactions and the mempool records describing them.
//!
//! Fixtures are built and signed with alloy's consensus types, which serve
//! as an independent reference for the codec's encodings.

use alloy::{
    consensus::{
        constants::GWEI_TO_WEI, SignableTransaction, Signed, TxEip1559, TxEnvelope, TxLegacy,
    },
    eips::{
        eip2718::Encodable2718,
        eip2930::{AccessList, AccessListItem},
    },
    hex,
    primitives::{Address, Bytes, Signature, TxKind, B256, U256},
    signers::{local::PrivateKeySigner, SignerSync},
};
use relay_codec::{FieldValue, MempoolRecord, RecordAccessListEntry};

/// How numeric fields of a fixture record are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberStyle {
    /// `0x`-prefixed hex text.
    Hex,
    /// Decimal text.
    Decimal,
    /// JSON numbers, at any width.
    Json,
}

impl NumberStyle {
    fn small(self, value: u64) -> FieldValue {
        match self {
            Self::Hex => format!("0x{value:x}").into(),
            Self::Decimal => value.to_string().into(),
            Self::Json => value.into(),
        }
    }

    fn wide(self, value: U256) -> FieldValue {
        match (self, u64::try_from(value)) {
            (Self::Json, Ok(value)) => value.into(),
            (Self::Json, Err(_)) => FieldValue::BigNumber(value.to_string()),
            (Self::Hex, _) => format!("0x{value:x}").into(),
            (Self::Decimal, _) => value.to_string().into(),
        }
    }
}

/// Make a wallet with a deterministic keypair.
pub fn make_wallet(i: u8) -> PrivateKeySigner {
    PrivateKeySigner::from_bytes(&B256::repeat_byte(i)).unwrap()
}

/// Make a simple legacy send. Replay protected when `chain_id` is set.
pub fn simple_legacy(to: Address, amount: U256, nonce: u64, chain_id: Option<u64>) -> TxLegacy {
    TxLegacy {
        chain_id,
        nonce,
        gas_price: GWEI_TO_WEI as u128 * 20,
        gas_limit: 21_000,
        to: TxKind::Call(to),
        value: amount,
        input: Bytes::new(),
    }
}

/// Make a simple EIP-1559 send.
pub fn simple_eip1559(to: Address, amount: U256, nonce: u64, chain_id: u64) -> TxEip1559 {
    TxEip1559 {
        chain_id,
        nonce,
        gas_limit: 21_000,
        max_fee_per_gas: GWEI_TO_WEI as u128 * 100,
        max_priority_fee_per_gas: GWEI_TO_WEI as u128,
        to: TxKind::Call(to),
        value: amount,
        access_list: AccessList::default(),
        input: Bytes::new(),
    }
}

/// Make an EIP-1559 contract call carrying calldata and an access list.
pub fn eip1559_call_with_access_list(to: Address, nonce: u64, chain_id: u64) -> TxEip1559 {
    TxEip1559 {
        gas_limit: 120_000,
        input: Bytes::from_static(&[0xa9, 0x05, 0x9c, 0xbb, 0x00, 0x01]),
        access_list: AccessList(vec![
            AccessListItem {
                address: to,
                storage_keys: vec![B256::ZERO, B256::with_last_byte(1)],
            },
            AccessListItem { address: Address::repeat_byte(0x42), storage_keys: vec![] },
        ]),
        ..simple_eip1559(to, U256::ZERO, nonce, chain_id)
    }
}

/// Sign a transaction with a wallet.
pub fn sign_tx<T: SignableTransaction<Signature>>(
    wallet: &PrivateKeySigner,
    tx: T,
) -> Signed<T> {
    let signature = wallet.sign_hash_sync(&tx.signature_hash()).unwrap();
    tx.into_signed(signature)
}

/// The canonical encoding of a signed transaction, as a node reports it.
pub fn raw<T>(signed: Signed<T>) -> Bytes
where
    TxEnvelope: From<Signed<T>>,
{
    TxEnvelope::from(signed).encoded_2718().into()
}

/// The record a mempool feed would deliver for a signed legacy transaction.
pub fn legacy_record(signed: &Signed<TxLegacy>, style: NumberStyle) -> MempoolRecord {
    let tx = signed.tx();
    let parity = signed.signature().v() as u64;
    let v = tx.chain_id.map_or(27 + parity, |chain_id| chain_id * 2 + 35 + parity);

    MempoolRecord {
        hash: Some(hex::encode_prefixed(signed.hash())),
        tx_type: Some(style.small(0)),
        chain_id: tx.chain_id.map(|chain_id| style.small(chain_id)),
        nonce: Some(style.small(tx.nonce)),
        gas: Some(style.small(tx.gas_limit)),
        gas_price: Some(style.wide(U256::from(tx.gas_price))),
        to: tx.to.to().map(hex::encode_prefixed),
        value: Some(style.wide(tx.value)),
        input: Some(hex::encode_prefixed(&tx.input)),
        v: Some(style.small(v)),
        r: Some(style.wide(signed.signature().r())),
        s: Some(style.wide(signed.signature().s())),
        ..Default::default()
    }
}

/// The record a mempool feed would deliver for a signed EIP-1559
/// transaction.
pub fn eip1559_record(signed: &Signed<TxEip1559>, style: NumberStyle) -> MempoolRecord {
    let tx = signed.tx();
    let access_list = tx
        .access_list
        .iter()
        .map(|item| RecordAccessListEntry {
            address: hex::encode_prefixed(item.address),
            storage_keys: item.storage_keys.iter().map(hex::encode_prefixed).collect(),
        })
        .collect();

    MempoolRecord {
        hash: Some(hex::encode_prefixed(signed.hash())),
        tx_type: Some(style.small(2)),
        chain_id: Some(style.small(tx.chain_id)),
        nonce: Some(style.small(tx.nonce)),
        gas: Some(style.small(tx.gas_limit)),
        max_fee_per_gas: Some(style.wide(U256::from(tx.max_fee_per_gas))),
        max_priority_fee_per_gas: Some(style.wide(U256::from(tx.max_priority_fee_per_gas))),
        to: tx.to.to().map(hex::encode_prefixed),
        value: Some(style.wide(tx.value)),
        input: Some(hex::encode_prefixed(&tx.input)),
        access_list: Some(access_list),
        v: Some(style.small(signed.signature().v() as u64)),
        r: Some(style.wide(signed.signature().r())),
        s: Some(style.wide(signed.signature().s())),
        ..Default::default()
    }
}
