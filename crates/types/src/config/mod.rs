mod error;
pub use error::ConfigError;

pub mod env_utils;
use env_utils::{
    load_address_opt, load_millis_or, load_string, load_target_or, load_u64_or, load_url,
};

use crate::BlockTarget;
use alloy::{primitives::Address, signers::local::PrivateKeySigner};
use std::time::Duration;
use url::Url;

/// Environment variable holding the relay endpoint.
pub const RELAY_URL: &str = "RELAY_URL";
/// Environment variable holding the node RPC endpoint.
pub const RPC_PROVIDER: &str = "RPC_PROVIDER";
/// Environment variable holding the hex-encoded signing key.
pub const PRIVATE_KEY: &str = "PRIVATE_KEY";
/// Environment variable holding the expected signer address.
pub const EOA_ADDRESS: &str = "EOA_ADDRESS";
/// Environment variable holding the contract targeted by our own transactions.
pub const CONTRACT_ADDRESS: &str = "CONTRACT_ADDRESS";
/// Environment variable holding the default chain id.
pub const CHAIN_ID: &str = "CHAIN_ID";
/// Environment variable holding the bundle block target.
pub const BUNDLE_TARGET: &str = "BUNDLE_TARGET";
/// Environment variable holding the dispatcher settle delay, in milliseconds.
pub const SETTLE_DELAY_MS: &str = "SETTLE_DELAY_MS";

/// Default chain id, Ethereum mainnet.
pub const DEFAULT_CHAIN_ID: u64 = 1;

/// Relay SDK configuration.
///
/// Built once at startup and handed to every component that needs it. The
/// signing key is parsed eagerly, so an absent or malformed key fails here
/// rather than at first use.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// The relay endpoint bundles are posted to.
    relay_url: Url,
    /// The node RPC endpoint.
    node_url: Url,
    /// The key used to sign requests and our own transactions.
    signer: PrivateKeySigner,
    /// The contract our own transactions are sent to, if any.
    contract_address: Option<Address>,
    /// Chain id used when a record does not carry one.
    chain_id: u64,
    /// Which block bundles target, relative to the current head.
    target: BlockTarget,
    /// Delay before asking the node for a transaction's raw bytes.
    settle_delay: Duration,
}

impl RelayConfig {
    /// Create a new configuration with default chain id, target, and no
    /// settle delay.
    pub const fn new(relay_url: Url, node_url: Url, signer: PrivateKeySigner) -> Self {
        Self {
            relay_url,
            node_url,
            signer,
            contract_address: None,
            chain_id: DEFAULT_CHAIN_ID,
            target: BlockTarget::Head,
            settle_delay: Duration::ZERO,
        }
    }

    /// Load the configuration from the environment.
    ///
    /// Reads [`RELAY_URL`], [`RPC_PROVIDER`], [`PRIVATE_KEY`] and the optional
    /// [`EOA_ADDRESS`], [`CONTRACT_ADDRESS`], [`CHAIN_ID`], [`BUNDLE_TARGET`] and
    /// [`SETTLE_DELAY_MS`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let signer = parse_signer(&load_string(PRIVATE_KEY)?)?;

        if let Some(expected) = load_address_opt(EOA_ADDRESS)? {
            if expected != signer.address() {
                return Err(ConfigError::AddressMismatch { expected, actual: signer.address() });
            }
        }

        Ok(Self {
            relay_url: load_url(RELAY_URL)?,
            node_url: load_url(RPC_PROVIDER)?,
            signer,
            contract_address: load_address_opt(CONTRACT_ADDRESS)?,
            chain_id: load_u64_or(CHAIN_ID, DEFAULT_CHAIN_ID)?,
            target: load_target_or(BUNDLE_TARGET, BlockTarget::Head)?,
            settle_delay: load_millis_or(SETTLE_DELAY_MS, Duration::ZERO)?,
        })
    }

    /// Set the contract address.
    pub const fn with_contract_address(mut self, contract_address: Address) -> Self {
        self.contract_address = Some(contract_address);
        self
    }

    /// Set the default chain id.
    pub const fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Set the block target.
    pub const fn with_target(mut self, target: BlockTarget) -> Self {
        self.target = target;
        self
    }

    /// Set the settle delay.
    pub const fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    /// Get the relay URL.
    pub const fn relay_url(&self) -> &Url {
        &self.relay_url
    }

    /// Get the node URL.
    pub const fn node_url(&self) -> &Url {
        &self.node_url
    }

    /// Get the signer.
    pub const fn signer(&self) -> &PrivateKeySigner {
        &self.signer
    }

    /// Get the address of the signing key.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Get the contract address.
    pub const fn contract_address(&self) -> Option<Address> {
        self.contract_address
    }

    /// Get the default chain id.
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Get the block target.
    pub const fn target(&self) -> BlockTarget {
        self.target
    }

    /// Get the settle delay.
    pub const fn settle_delay(&self) -> Duration {
        self.settle_delay
    }
}

/// Parse a hex private key, with or without `0x` prefix.
pub(crate) fn parse_signer(key: &str) -> Result<PrivateKeySigner, ConfigError> {
    key.trim().parse().map_err(ConfigError::InvalidKey)
}
