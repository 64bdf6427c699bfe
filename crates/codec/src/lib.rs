//! Transaction codec.
//!
//! Reconstructs the canonical (RLP) encoding of pending transactions from
//! loosely-typed mempool records, so that the encoding can be checked
//! byte-for-byte against what the node reports.
//!
//! Two formats are supported:
//! - [`LegacyTransaction`], the original 9-field format.
//! - [`TypedTransaction`], the EIP-1559 format, serialized as `0x02 || rlp`.
//!
//! Any other type tag is rejected with [`UnsupportedTypeError`] rather than
//! silently mis-encoded.

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod envelope;
pub use envelope::Transaction;

mod error;
pub use error::{ChainIdOverflow, DecodeError, UnsupportedTypeError};

mod legacy;
pub use legacy::LegacyTransaction;

mod record;
pub use record::{FieldValue, MempoolRecord, RecordAccessListEntry};

mod typed;
pub use typed::{AccessListEntry, TypedTransaction, EIP1559_TX_TYPE};

use alloy::primitives::Bytes;

/// Encode a legacy transaction as the RLP list
/// `[nonce, gasPrice, gas, to, value, data, v, r, s]`.
pub fn encode_legacy(tx: &LegacyTransaction) -> Bytes {
    tx.encoded()
}

/// Encode a type-2 transaction as `0x02 || rlp([chainId, nonce,
/// maxPriorityFeePerGas, maxFeePerGas, gas, to, value, data, accessList, v, r,
/// s])`.
pub fn encode_typed(tx: &TypedTransaction) -> Bytes {
    tx.encoded()
}

/// Decode a mempool record into a [`Transaction`].
///
/// Numeric fields may be JSON numbers, `0x`-prefixed hex text or decimal
/// text. Records denoting the same integers decode to identical values, and
/// therefore encode to identical bytes.
pub fn decode_mempool_record(record: &MempoolRecord) -> Result<Transaction, DecodeError> {
    Transaction::try_from(record)
}
