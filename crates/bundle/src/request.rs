use crate::ParseMethodError;
use alloy::{
    eips::BlockNumberOrTag,
    primitives::{Bytes, U64},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The JSON-RPC version of every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// The id of every request. Responses must echo it.
pub const REQUEST_ID: u64 = 1;

/// The bundle methods understood by the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BundleMethod {
    /// `eth_callBundle`: simulate the bundle against a state block.
    #[serde(rename = "eth_callBundle")]
    CallBundle,
    /// `eth_sendBundle`: submit the bundle for inclusion.
    #[serde(rename = "eth_sendBundle")]
    SendBundle,
}

impl BundleMethod {
    /// The wire name of the method.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CallBundle => "eth_callBundle",
            Self::SendBundle => "eth_sendBundle",
        }
    }

    /// The builder for this method.
    pub fn builder(self) -> fn(Vec<Bytes>, u64) -> BundleRequest {
        match self {
            Self::CallBundle => build_call_bundle_request,
            Self::SendBundle => build_send_bundle_request,
        }
    }

    /// Build a request for this method.
    pub fn build(self, txs: Vec<Bytes>, target_block: u64) -> BundleRequest {
        self.builder()(txs, target_block)
    }
}

impl fmt::Display for BundleMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BundleMethod {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eth_callBundle" => Ok(Self::CallBundle),
            "eth_sendBundle" => Ok(Self::SendBundle),
            _ => Err(ParseMethodError(s.to_owned())),
        }
    }
}

/// The single parameter object of a bundle request.
///
/// Field order is part of the signed bytes and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleParams {
    /// The raw signed transactions, in bundle order.
    pub txs: Vec<Bytes>,
    /// The target block number, as a hex quantity.
    pub block_number: U64,
    /// The state block to simulate on top of. Only set for
    /// [`BundleMethod::CallBundle`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_block_number: Option<BlockNumberOrTag>,
}

/// A JSON-RPC bundle request body.
///
/// This is based on the flashbots `eth_callBundle` and `eth_sendBundle`
/// requests. See [their docs].
///
/// The relay authenticates the exact serialized bytes, so the body is
/// serialized once by [`BundleRequest::serialized`] and those bytes are both
/// signed and sent.
///
/// [their docs]: https://docs.flashbots.net/flashbots-auction/advanced/rpc-endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleRequest {
    jsonrpc: String,
    id: u64,
    method: BundleMethod,
    params: [BundleParams; 1],
}

impl BundleRequest {
    /// Create a new request.
    pub fn new(method: BundleMethod, params: BundleParams) -> Self {
        Self { jsonrpc: JSONRPC_VERSION.to_owned(), id: REQUEST_ID, method, params: [params] }
    }

    /// Get the request id.
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Get the method.
    pub const fn method(&self) -> BundleMethod {
        self.method
    }

    /// Get the bundle parameters.
    pub const fn params(&self) -> &BundleParams {
        &self.params[0]
    }

    /// Returns the transactions in this bundle.
    pub fn txs(&self) -> &[Bytes] {
        &self.params().txs
    }

    /// Returns the target block number for this bundle.
    pub fn block_number(&self) -> u64 {
        self.params().block_number.to()
    }

    /// Serialize the body to its canonical bytes.
    pub fn serialized(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

/// Build an `eth_callBundle` request simulating `txs` at `target_block` on
/// top of the latest state.
pub fn build_call_bundle_request(txs: Vec<Bytes>, target_block: u64) -> BundleRequest {
    BundleRequest::new(
        BundleMethod::CallBundle,
        BundleParams {
            txs,
            block_number: U64::from(target_block),
            state_block_number: Some(BlockNumberOrTag::Latest),
        },
    )
}

/// Build an `eth_sendBundle` request targeting `target_block`.
pub fn build_send_bundle_request(txs: Vec<Bytes>, target_block: u64) -> BundleRequest {
    BundleRequest::new(
        BundleMethod::SendBundle,
        BundleParams { txs, block_number: U64::from(target_block), state_block_number: None },
    )
}
