use crate::{
    DecodeError, LegacyTransaction, TypedTransaction, UnsupportedTypeError, EIP1559_TX_TYPE,
};
use alloy::primitives::{Bytes, TxKind, B256};
use alloy_rlp::{Decodable, EMPTY_LIST_CODE};

/// A transaction in one of the supported formats.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Transaction {
    /// A legacy transaction.
    Legacy(LegacyTransaction),
    /// An EIP-1559 transaction.
    Eip1559(TypedTransaction),
}

impl From<LegacyTransaction> for Transaction {
    fn from(tx: LegacyTransaction) -> Self {
        Self::Legacy(tx)
    }
}

impl From<TypedTransaction> for Transaction {
    fn from(tx: TypedTransaction) -> Self {
        Self::Eip1559(tx)
    }
}

impl Transaction {
    /// The EIP-2718 type tag, `0` for legacy.
    pub const fn tx_type(&self) -> u8 {
        match self {
            Self::Legacy(_) => 0,
            Self::Eip1559(_) => EIP1559_TX_TYPE,
        }
    }

    /// The sender nonce.
    pub const fn nonce(&self) -> u64 {
        match self {
            Self::Legacy(tx) => tx.nonce,
            Self::Eip1559(tx) => tx.nonce,
        }
    }

    /// The recipient.
    pub const fn to(&self) -> TxKind {
        match self {
            Self::Legacy(tx) => tx.to,
            Self::Eip1559(tx) => tx.to,
        }
    }

    /// The canonical encoding. Typed transactions carry their type byte.
    pub fn encoded(&self) -> Bytes {
        match self {
            Self::Legacy(tx) => tx.encoded(),
            Self::Eip1559(tx) => tx.encoded(),
        }
    }

    /// The transaction hash, `keccak256` of the canonical encoding.
    pub fn hash(&self) -> B256 {
        match self {
            Self::Legacy(tx) => tx.hash(),
            Self::Eip1559(tx) => tx.hash(),
        }
    }

    /// Decode a transaction from its canonical encoding.
    ///
    /// A leading byte at or above `0xc0` starts a legacy RLP list. Otherwise
    /// the leading byte is the type tag, and only `0x02` is accepted.
    pub fn decode_raw(raw: &[u8]) -> Result<Self, DecodeError> {
        let Some(&first) = raw.first() else {
            return Err(alloy_rlp::Error::InputTooShort.into());
        };

        let mut buf = raw;
        let tx = if first >= EMPTY_LIST_CODE {
            LegacyTransaction::decode(&mut buf).map(Self::Legacy)?
        } else if first == EIP1559_TX_TYPE {
            buf = &buf[1..];
            TypedTransaction::decode(&mut buf).map(Self::Eip1559)?
        } else {
            return Err(UnsupportedTypeError(first as u64).into());
        };

        if !buf.is_empty() {
            return Err(DecodeError::TrailingBytes(buf.len()));
        }
        Ok(tx)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::legacy::test::{eip155_example, EIP155_RAW};
    use alloy::primitives::hex;

    #[test]
    fn decode_raw_legacy() {
        let raw = hex::decode(EIP155_RAW).unwrap();
        let tx = Transaction::decode_raw(&raw).unwrap();
        assert_eq!(tx, Transaction::Legacy(eip155_example()));
        assert_eq!(tx.tx_type(), 0);
        assert_eq!(tx.nonce(), 9);
    }

    #[test]
    fn decode_raw_rejects_other_types() {
        let err = Transaction::decode_raw(&[0x03, 0xc0]).unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedType(UnsupportedTypeError(3))));
        let err = Transaction::decode_raw(&[0x01, 0xc0]).unwrap_err();
        assert!(err.is_unsupported_type());
    }

    #[test]
    fn decode_raw_rejects_trailing_bytes() {
        let mut raw = hex::decode(EIP155_RAW).unwrap();
        raw.push(0x00);
        assert!(matches!(Transaction::decode_raw(&raw), Err(DecodeError::TrailingBytes(1))));
    }

    #[test]
    fn decode_raw_rejects_empty() {
        assert!(matches!(Transaction::decode_raw(&[]), Err(DecodeError::Rlp(_))));
    }
}
