use crate::ChainIdOverflow;
use alloy::primitives::{keccak256, Bytes, Signature, TxKind, B256, U256};
use alloy_rlp::{RlpDecodable, RlpEncodable};

/// A legacy (untyped) signed transaction.
///
/// Field order matches the canonical encoding
/// `[nonce, gasPrice, gas, to, value, data, v, r, s]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, RlpEncodable, RlpDecodable)]
pub struct LegacyTransaction {
    /// Sender nonce.
    pub nonce: u64,
    /// Gas price, in wei.
    pub gas_price: u128,
    /// Gas limit.
    pub gas_limit: u64,
    /// Recipient, or [`TxKind::Create`] for contract creation.
    pub to: TxKind,
    /// Value transferred, in wei.
    pub value: U256,
    /// Call data.
    pub input: Bytes,
    /// Signature `v`. Either `27`/`28`, or `chain_id * 2 + 35 + parity` for
    /// EIP-155 transactions.
    pub v: u64,
    /// Signature `r`.
    pub r: U256,
    /// Signature `s`.
    pub s: U256,
}

/// EIP-155 signing preimage: the six payload fields followed by
/// `[chain_id, 0, 0]`.
#[derive(RlpEncodable)]
struct ProtectedPreimage {
    nonce: u64,
    gas_price: u128,
    gas_limit: u64,
    to: TxKind,
    value: U256,
    input: Bytes,
    chain_id: u64,
    zero_r: u8,
    zero_s: u8,
}

/// Pre-EIP-155 signing preimage.
#[derive(RlpEncodable)]
struct UnprotectedPreimage {
    nonce: u64,
    gas_price: u128,
    gas_limit: u64,
    to: TxKind,
    value: U256,
    input: Bytes,
}

impl LegacyTransaction {
    /// Create an unsigned transaction. Signature fields are zero until
    /// [`Self::into_signed`] is called.
    pub const fn unsigned(
        nonce: u64,
        gas_price: u128,
        gas_limit: u64,
        to: TxKind,
        value: U256,
        input: Bytes,
    ) -> Self {
        Self { nonce, gas_price, gas_limit, to, value, input, v: 0, r: U256::ZERO, s: U256::ZERO }
    }

    /// The canonical encoding of this transaction.
    pub fn encoded(&self) -> Bytes {
        alloy_rlp::encode(self).into()
    }

    /// The transaction hash, `keccak256` of the canonical encoding.
    pub fn hash(&self) -> B256 {
        keccak256(self.encoded())
    }

    /// The chain id this transaction is replay-protected for, if any.
    pub const fn chain_id(&self) -> Option<u64> {
        match self.v {
            v if v >= 35 => Some((v - 35) / 2),
            _ => None,
        }
    }

    /// The bytes that are hashed and signed. With a chain id this is the
    /// EIP-155 preimage, otherwise the original six-field list.
    pub fn signature_preimage(&self, chain_id: Option<u64>) -> Bytes {
        let encoded = match chain_id {
            Some(chain_id) => alloy_rlp::encode(ProtectedPreimage {
                nonce: self.nonce,
                gas_price: self.gas_price,
                gas_limit: self.gas_limit,
                to: self.to,
                value: self.value,
                input: self.input.clone(),
                chain_id,
                zero_r: 0,
                zero_s: 0,
            }),
            None => alloy_rlp::encode(UnprotectedPreimage {
                nonce: self.nonce,
                gas_price: self.gas_price,
                gas_limit: self.gas_limit,
                to: self.to,
                value: self.value,
                input: self.input.clone(),
            }),
        };
        encoded.into()
    }

    /// The hash that is signed to authorize this transaction.
    pub fn signature_hash(&self, chain_id: Option<u64>) -> B256 {
        keccak256(self.signature_preimage(chain_id))
    }

    /// Attach a signature, deriving `v` from the recovery parity and the
    /// chain id. Fails if `v` would overflow a `u64`.
    pub fn into_signed(
        mut self,
        signature: &Signature,
        chain_id: Option<u64>,
    ) -> Result<Self, ChainIdOverflow> {
        let parity = signature.v() as u64;
        self.v = match chain_id {
            Some(chain_id) => chain_id
                .checked_mul(2)
                .and_then(|v| v.checked_add(35 + parity))
                .ok_or(ChainIdOverflow(chain_id))?,
            None => 27 + parity,
        };
        self.r = signature.r();
        self.s = signature.s();
        Ok(self)
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use alloy::primitives::{address, hex, uint};
    use alloy_rlp::Decodable;

    /// The reference transaction from EIP-155.
    pub(crate) fn eip155_example() -> LegacyTransaction {
        LegacyTransaction {
            nonce: 9,
            gas_price: 20_000_000_000,
            gas_limit: 21_000,
            to: TxKind::Call(address!("0x3535353535353535353535353535353535353535")),
            value: uint!(1_000_000_000_000_000_000_U256),
            input: Bytes::new(),
            v: 37,
            r: uint!(0x28ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276_U256),
            s: uint!(0x67cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83_U256),
        }
    }

    pub(crate) const EIP155_RAW: &str = "f86c098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a76400008025a028ef61340bd939bc2195fe537567866003e1a15d3c71ff63e1590620aa636276a067cbe9d8997f761aecb703304b3800ccf555c9f3dc64214b297fb1966a3b6d83";

    #[test]
    fn encodes_eip155_example() {
        let tx = eip155_example();
        assert_eq!(tx.encoded(), Bytes::from(hex::decode(EIP155_RAW).unwrap()));
        assert_eq!(tx.hash(), keccak256(hex::decode(EIP155_RAW).unwrap()));
        assert_eq!(tx.chain_id(), Some(1));
    }

    #[test]
    fn eip155_signing_preimage() {
        let tx = eip155_example();
        assert_eq!(
            tx.signature_preimage(Some(1)),
            Bytes::from(
                hex::decode(
                    "ec098504a817c800825208943535353535353535353535353535353535353535880de0b6b3a764000080018080"
                )
                .unwrap()
            )
        );
    }

    #[test]
    fn zero_fields_encode_as_empty_strings() {
        let tx = LegacyTransaction::unsigned(0, 0, 0, TxKind::Create, U256::ZERO, Bytes::new());
        let encoded = tx.encoded();
        // nine empty strings in a nine-byte list
        assert_eq!(encoded.as_ref(), &[0xc9, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80]);
        assert!(!encoded[1..].contains(&0x00));
    }

    #[test]
    fn decodes_own_encoding() {
        let raw = hex::decode(EIP155_RAW).unwrap();
        let decoded = LegacyTransaction::decode(&mut raw.as_slice()).unwrap();
        assert_eq!(decoded, eip155_example());
    }

    #[test]
    fn into_signed_sets_v() {
        let sig = Signature::new(U256::from(1), U256::from(2), true);
        let tx =
            LegacyTransaction::unsigned(0, 1, 21_000, TxKind::Create, U256::ZERO, Bytes::new());
        assert_eq!(tx.clone().into_signed(&sig, Some(1)).unwrap().v, 38);
        assert_eq!(tx.clone().into_signed(&sig, None).unwrap().v, 28);

        let largest = (u64::MAX - 36) / 2;
        assert_eq!(tx.clone().into_signed(&sig, Some(largest)).unwrap().v, u64::MAX - 1);
        let overflow = tx.clone().into_signed(&sig, Some(largest + 1));
        assert_eq!(overflow, Err(ChainIdOverflow(largest + 1)));
        assert_eq!(tx.into_signed(&sig, Some(u64::MAX)), Err(ChainIdOverflow(u64::MAX)));
    }
}
