use crate::NodeClient;
use alloy::{
    primitives::{Address, Bytes, B256},
    providers::{Provider, RootProvider},
    transports::{TransportError, TransportResult},
};
use relay_types::RelayConfig;

/// A [`NodeClient`] backed by an alloy [`Provider`].
#[derive(Debug, Clone)]
pub struct ProviderNode<P> {
    provider: P,
}

/// A [`ProviderNode`] talking to the node over HTTP.
pub type HttpNode = ProviderNode<RootProvider>;

impl<P> ProviderNode<P> {
    /// Wrap a provider.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Get a reference to the provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }
}

impl HttpNode {
    /// Connect to the node in the configuration over HTTP.
    pub fn from_config(config: &RelayConfig) -> Self {
        Self::new(RootProvider::new_http(config.node_url().clone()))
    }
}

impl<P> NodeClient for ProviderNode<P>
where
    P: Provider + Send + Sync,
{
    type Error = TransportError;

    async fn current_block_number(&self) -> TransportResult<u64> {
        self.provider.get_block_number().await
    }

    async fn nonce_of(&self, address: Address) -> TransportResult<u64> {
        self.provider.get_transaction_count(address).await
    }

    async fn raw_transaction_bytes(&self, hash: B256) -> TransportResult<Option<Bytes>> {
        self.provider.get_raw_transaction_by_hash(hash).await
    }
}
