/// A transaction type tag that the codec does not know how to encode.
///
/// Only legacy (absent or `0`) and EIP-1559 (`2`) transactions are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unsupported transaction type {0}")]
pub struct UnsupportedTypeError(pub u64);

/// A chain id too large to fold into a legacy `v` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("chain id {0} does not fit in a legacy signature")]
pub struct ChainIdOverflow(pub u64);

/// Errors produced while decoding a mempool record or raw transaction bytes.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A required field is absent from the record.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    /// A byte field is not valid hex (odd length or invalid digit).
    #[error("invalid hex in field `{field}`: {source}")]
    InvalidHex {
        /// The offending field.
        field: &'static str,
        /// The underlying hex error.
        #[source]
        source: hex::FromHexError,
    },
    /// A numeric field is neither a hex nor a decimal integer.
    #[error("invalid integer in field `{field}`: {value:?}")]
    InvalidQuantity {
        /// The offending field.
        field: &'static str,
        /// The text that failed to parse.
        value: String,
    },
    /// A numeric field does not fit the width of its transaction field.
    #[error("integer in field `{0}` is too large")]
    Overflow(&'static str),
    /// A fixed-width byte field has the wrong length.
    #[error("field `{field}` must be {expected} bytes, got {actual}")]
    InvalidLength {
        /// The offending field.
        field: &'static str,
        /// The required length.
        expected: usize,
        /// The length found.
        actual: usize,
    },
    /// The transaction type is not supported.
    #[error(transparent)]
    UnsupportedType(#[from] UnsupportedTypeError),
    /// The raw bytes are not valid RLP for the transaction format.
    #[error("invalid rlp: {0}")]
    Rlp(#[from] alloy_rlp::Error),
    /// Bytes remain after a complete transaction was decoded.
    #[error("{0} trailing bytes after transaction")]
    TrailingBytes(usize),
}

impl DecodeError {
    /// True if the error is an [`UnsupportedTypeError`].
    pub const fn is_unsupported_type(&self) -> bool {
        matches!(self, Self::UnsupportedType(_))
    }
}
