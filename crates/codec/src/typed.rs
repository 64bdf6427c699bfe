use alloy::primitives::{keccak256, Address, Bytes, TxKind, B256, U256};
use alloy_rlp::{Encodable, RlpDecodable, RlpEncodable};

/// The EIP-2718 type byte of EIP-1559 transactions.
pub const EIP1559_TX_TYPE: u8 = 0x02;

/// An access list entry: an address and the storage keys it touches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, RlpEncodable, RlpDecodable)]
pub struct AccessListEntry {
    /// The accessed account.
    pub address: Address,
    /// The accessed storage keys, in declaration order.
    pub storage_keys: Vec<B256>,
}

/// A signed EIP-1559 (type 2) transaction.
///
/// Field order matches the canonical encoding
/// `[chainId, nonce, maxPriorityFeePerGas, maxFeePerGas, gas, to, value, data,
/// accessList, v, r, s]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, RlpEncodable, RlpDecodable)]
pub struct TypedTransaction {
    /// Chain id.
    pub chain_id: u64,
    /// Sender nonce.
    pub nonce: u64,
    /// Priority fee per gas, in wei.
    pub max_priority_fee_per_gas: u128,
    /// Maximum total fee per gas, in wei.
    pub max_fee_per_gas: u128,
    /// Gas limit.
    pub gas_limit: u64,
    /// Recipient, or [`TxKind::Create`] for contract creation.
    pub to: TxKind,
    /// Value transferred, in wei.
    pub value: U256,
    /// Call data.
    pub input: Bytes,
    /// Declared access list.
    pub access_list: Vec<AccessListEntry>,
    /// Signature y-parity, `0` or `1`.
    pub v: u64,
    /// Signature `r`.
    pub r: U256,
    /// Signature `s`.
    pub s: U256,
}

impl TypedTransaction {
    /// The canonical encoding, `0x02 || rlp(fields)`.
    pub fn encoded(&self) -> Bytes {
        let mut out = Vec::with_capacity(1 + self.length());
        out.push(EIP1559_TX_TYPE);
        self.encode(&mut out);
        out.into()
    }

    /// The transaction hash, `keccak256` of the canonical encoding.
    pub fn hash(&self) -> B256 {
        keccak256(self.encoded())
    }
}
