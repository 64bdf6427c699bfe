use crate::{
    AccessListEntry, DecodeError, LegacyTransaction, Transaction, TypedTransaction,
    UnsupportedTypeError,
};
use alloy::primitives::{Address, Bytes, TxKind, B256, U256};
use serde::{
    de::{self, Unexpected},
    ser, Deserialize, Deserializer, Serialize, Serializer,
};
use serde_json::value::RawValue;

/// A numeric record field, as delivered by a mempool feed.
///
/// Feeds are inconsistent: the same field may arrive as a JSON number, as
/// `0x`-prefixed hex text, or as decimal text. JSON numbers wider than `u64`
/// (values, fees, signature scalars) are kept exactly as written, so that
/// they can be parsed at full width.
///
/// Deserialization reads the raw JSON token and therefore requires a
/// `serde_json` deserializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A JSON number that fits in a `u64`.
    Number(u64),
    /// Any other JSON number, as written.
    BigNumber(String),
    /// Hex (`0x` prefix) or decimal text.
    Text(String),
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        let token = raw.get();

        if token.starts_with('"') {
            return serde_json::from_str(token).map(Self::Text).map_err(de::Error::custom);
        }
        if token.starts_with(|c: char| c == '-' || c.is_ascii_digit()) {
            return Ok(match token.parse() {
                Ok(n) => Self::Number(n),
                Err(_) => Self::BigNumber(token.to_owned()),
            });
        }
        Err(de::Error::invalid_type(Unexpected::Other(token), &"a JSON number or string"))
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(n) => serializer.serialize_u64(*n),
            Self::BigNumber(n) => {
                RawValue::from_string(n.clone()).map_err(ser::Error::custom)?.serialize(serializer)
            }
            Self::Text(text) => serializer.serialize_str(text),
        }
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl FieldValue {
    /// Parse the value as an unsigned 256-bit integer.
    pub fn to_u256(&self, field: &'static str) -> Result<U256, DecodeError> {
        let text = match self {
            Self::Number(n) => return Ok(U256::from(*n)),
            Self::BigNumber(text) | Self::Text(text) => text.trim(),
        };

        let invalid = || DecodeError::InvalidQuantity { field, value: text.to_owned() };

        let (digits, radix) = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            Some(digits) => (digits, 16),
            None => (text, 10),
        };
        if digits.is_empty() {
            return Err(invalid());
        }

        U256::from_str_radix(digits, radix).map_err(|_| invalid())
    }

    /// Parse the value and narrow it to the width of the target field.
    pub fn to_int<T: TryFrom<U256>>(&self, field: &'static str) -> Result<T, DecodeError> {
        T::try_from(self.to_u256(field)?).map_err(|_| DecodeError::Overflow(field))
    }
}

/// An access list entry as it appears in a mempool record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordAccessListEntry {
    /// Hex address.
    pub address: String,
    /// Hex storage keys.
    #[serde(default)]
    pub storage_keys: Vec<String>,
}

impl TryFrom<&RecordAccessListEntry> for AccessListEntry {
    type Error = DecodeError;

    fn try_from(entry: &RecordAccessListEntry) -> Result<Self, Self::Error> {
        let address =
            Address::from_slice(&fixed_bytes::<20>("accessList.address", &entry.address)?);
        let storage_keys = entry
            .storage_keys
            .iter()
            .map(|key| fixed_bytes::<32>("accessList.storageKeys", key).map(B256::from))
            .collect::<Result<_, _>>()?;
        Ok(Self { address, storage_keys })
    }
}

/// A pending-transaction record from a mempool event feed.
///
/// All fields are optional at the serde level, so that a missing field is
/// reported as a [`DecodeError::MissingField`] naming it, rather than as an
/// opaque deserialization failure. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MempoolRecord {
    /// Transaction hash, as reported by the feed.
    pub hash: Option<String>,
    /// Transaction type tag. Absent means legacy.
    #[serde(rename = "type")]
    pub tx_type: Option<FieldValue>,
    /// Chain id (type 2 only).
    pub chain_id: Option<FieldValue>,
    /// Sender nonce.
    pub nonce: Option<FieldValue>,
    /// Gas limit.
    pub gas: Option<FieldValue>,
    /// Gas price (legacy only).
    pub gas_price: Option<FieldValue>,
    /// Maximum fee per gas (type 2 only).
    pub max_fee_per_gas: Option<FieldValue>,
    /// Priority fee per gas (type 2 only).
    pub max_priority_fee_per_gas: Option<FieldValue>,
    /// Recipient. Absent, null or empty means contract creation.
    pub to: Option<String>,
    /// Value transferred.
    pub value: Option<FieldValue>,
    /// Hex call data.
    pub input: Option<String>,
    /// Access list (type 2 only). Absent means empty.
    pub access_list: Option<Vec<RecordAccessListEntry>>,
    /// Signature `v`.
    pub v: Option<FieldValue>,
    /// Signature `r`.
    pub r: Option<FieldValue>,
    /// Signature `s`.
    pub s: Option<FieldValue>,
}

impl MempoolRecord {
    /// Fill in the chain id if the record does not carry one.
    pub fn with_default_chain_id(mut self, chain_id: u64) -> Self {
        if self.chain_id.is_none() {
            self.chain_id = Some(FieldValue::from(chain_id));
        }
        self
    }

    /// The transaction type tag. Absent means legacy (`0`).
    pub fn tx_type(&self) -> Result<u64, DecodeError> {
        self.tx_type.as_ref().map_or(Ok(0), |ty| ty.to_int("type"))
    }

    /// The transaction hash reported by the feed.
    pub fn tx_hash(&self) -> Result<B256, DecodeError> {
        let hash = self.hash.as_deref().ok_or(DecodeError::MissingField("hash"))?;
        fixed_bytes::<32>("hash", hash).map(B256::from)
    }

    fn int<T: TryFrom<U256>>(
        field: &Option<FieldValue>,
        name: &'static str,
    ) -> Result<T, DecodeError> {
        field.as_ref().ok_or(DecodeError::MissingField(name))?.to_int(name)
    }

    fn to_kind(&self) -> Result<TxKind, DecodeError> {
        match self.to.as_deref().map(str::trim) {
            None | Some("") | Some("0x") => Ok(TxKind::Create),
            Some(to) => Ok(TxKind::Call(Address::from_slice(&fixed_bytes::<20>("to", to)?))),
        }
    }

    fn input(&self) -> Result<Bytes, DecodeError> {
        let input = self.input.as_deref().ok_or(DecodeError::MissingField("input"))?;
        hex_bytes("input", input).map(Into::into)
    }

    fn access_list(&self) -> Result<Vec<AccessListEntry>, DecodeError> {
        self.access_list
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(AccessListEntry::try_from)
            .collect()
    }
}

impl TryFrom<&MempoolRecord> for LegacyTransaction {
    type Error = DecodeError;

    fn try_from(record: &MempoolRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            nonce: MempoolRecord::int(&record.nonce, "nonce")?,
            gas_price: MempoolRecord::int(&record.gas_price, "gasPrice")?,
            gas_limit: MempoolRecord::int(&record.gas, "gas")?,
            to: record.to_kind()?,
            value: MempoolRecord::int(&record.value, "value")?,
            input: record.input()?,
            v: MempoolRecord::int(&record.v, "v")?,
            r: MempoolRecord::int(&record.r, "r")?,
            s: MempoolRecord::int(&record.s, "s")?,
        })
    }
}

impl TryFrom<&MempoolRecord> for TypedTransaction {
    type Error = DecodeError;

    fn try_from(record: &MempoolRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            chain_id: MempoolRecord::int(&record.chain_id, "chainId")?,
            nonce: MempoolRecord::int(&record.nonce, "nonce")?,
            max_priority_fee_per_gas: MempoolRecord::int(
                &record.max_priority_fee_per_gas,
                "maxPriorityFeePerGas",
            )?,
            max_fee_per_gas: MempoolRecord::int(&record.max_fee_per_gas, "maxFeePerGas")?,
            gas_limit: MempoolRecord::int(&record.gas, "gas")?,
            to: record.to_kind()?,
            value: MempoolRecord::int(&record.value, "value")?,
            input: record.input()?,
            access_list: record.access_list()?,
            v: MempoolRecord::int(&record.v, "v")?,
            r: MempoolRecord::int(&record.r, "r")?,
            s: MempoolRecord::int(&record.s, "s")?,
        })
    }
}

impl TryFrom<&MempoolRecord> for Transaction {
    type Error = DecodeError;

    fn try_from(record: &MempoolRecord) -> Result<Self, Self::Error> {
        match record.tx_type()? {
            0 => LegacyTransaction::try_from(record).map(Self::Legacy),
            2 => TypedTransaction::try_from(record).map(Self::Eip1559),
            other => Err(UnsupportedTypeError(other).into()),
        }
    }
}

fn hex_bytes(field: &'static str, text: &str) -> Result<Vec<u8>, DecodeError> {
    hex::decode(text.trim()).map_err(|source| DecodeError::InvalidHex { field, source })
}

fn fixed_bytes<const N: usize>(field: &'static str, text: &str) -> Result<[u8; N], DecodeError> {
    let bytes = hex_bytes(field, text)?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| DecodeError::InvalidLength {
        field,
        expected: N,
        actual: bytes.len(),
    })
}
