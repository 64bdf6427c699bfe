use crate::NodeClient;
use alloy::{
    primitives::{Address, Bytes, TxKind, U256},
    signers::{local::PrivateKeySigner, Signer},
};
use relay_bundle::{BundleMethod, RequestSigner, SignedRequest, SigningError};
use relay_client::{RelayClient, RelayError, RelayResponse};
use relay_codec::{ChainIdOverflow, LegacyTransaction};
use relay_types::{BlockTarget, RelayConfig, DEFAULT_CHAIN_ID};
use tracing::{info, instrument};

/// Errors returned by [`BundleSubmitter`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SubmitError {
    /// The node query failed.
    #[error("node query failed: {0}")]
    Node(#[source] Box<dyn core::error::Error + Send + Sync>),
    /// Signing the request or transaction failed.
    #[error("signing error: {0}")]
    Signing(#[from] SigningError),
    /// The relay could not be reached or answered malformed JSON-RPC.
    #[error("relay error: {0}")]
    Relay(#[from] RelayError),
    /// No contract address is configured for our own transactions.
    #[error("no contract address configured")]
    MissingContract,
    /// The chain id cannot be encoded in a legacy signature.
    #[error(transparent)]
    ChainId(#[from] ChainIdOverflow),
}

impl SubmitError {
    fn node(err: impl core::error::Error + Send + Sync + 'static) -> Self {
        Self::Node(Box::new(err))
    }
}

/// Builds, signs and submits bundles.
///
/// The head block and the account nonce are queried from the node on every
/// call. A submission is a single attempt: nothing is retried, since a bundle
/// for a block that has passed is worthless.
///
/// `BundleSubmitter` is generic over:
/// - `N`: A [`NodeClient`] for head and nonce queries
/// - `S`: A [`Signer`] holding the single signing key
#[derive(Debug, Clone)]
pub struct BundleSubmitter<N, S = PrivateKeySigner> {
    node: N,
    signer: RequestSigner<S>,
    relay: RelayClient,
    target: BlockTarget,
    chain_id: u64,
    contract: Option<Address>,
}

impl<N, S> BundleSubmitter<N, S> {
    /// Create a new submitter targeting the current head on the default chain.
    pub const fn new(node: N, signer: RequestSigner<S>, relay: RelayClient) -> Self {
        Self {
            node,
            signer,
            relay,
            target: BlockTarget::Head,
            chain_id: DEFAULT_CHAIN_ID,
            contract: None,
        }
    }

    /// Set the block target.
    pub const fn with_target(mut self, target: BlockTarget) -> Self {
        self.target = target;
        self
    }

    /// Set the chain id our own transactions are signed for.
    pub const fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Set the contract our own transactions are sent to.
    pub const fn with_contract(mut self, contract: Address) -> Self {
        self.contract = Some(contract);
        self
    }

    /// Get a reference to the node client.
    pub const fn node(&self) -> &N {
        &self.node
    }

    /// Get a reference to the request signer.
    pub const fn signer(&self) -> &RequestSigner<S> {
        &self.signer
    }

    /// Get a reference to the relay client.
    pub const fn relay(&self) -> &RelayClient {
        &self.relay
    }

    /// Get the block target.
    pub const fn target(&self) -> BlockTarget {
        self.target
    }

    /// Get the chain id our own transactions are signed for.
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Get the contract our own transactions are sent to, if configured.
    pub const fn contract(&self) -> Option<Address> {
        self.contract
    }
}

impl<N> BundleSubmitter<N, PrivateKeySigner> {
    /// Create a submitter from the configuration.
    pub fn from_config(node: N, config: &RelayConfig) -> Self {
        let signer = RequestSigner::new(config.signer().clone());
        let submitter = Self::new(node, signer, RelayClient::from_config(config))
            .with_target(config.target())
            .with_chain_id(config.chain_id());

        match config.contract_address() {
            Some(contract) => submitter.with_contract(contract),
            None => submitter,
        }
    }
}

impl<N, S> BundleSubmitter<N, S>
where
    N: NodeClient + Sync,
    S: Signer + Send + Sync,
{
    /// Query the head and resolve the target block.
    pub async fn target_block(&self) -> Result<u64, SubmitError> {
        let head = self.node.current_block_number().await.map_err(SubmitError::node)?;
        Ok(self.target.resolve(head))
    }

    /// Build and sign a request for the freshly resolved target block.
    pub async fn prepare(
        &self,
        method: BundleMethod,
        txs: Vec<Bytes>,
    ) -> Result<SignedRequest, SubmitError> {
        let block = self.target_block().await?;
        self.signer.sign(method.build(txs, block)).await.map_err(Into::into)
    }

    /// Build, sign and submit a bundle.
    #[instrument(skip_all, fields(%method, txs = txs.len()))]
    pub async fn submit(
        &self,
        method: BundleMethod,
        txs: Vec<Bytes>,
    ) -> Result<RelayResponse, SubmitError> {
        let request = self.prepare(method, txs).await?;
        let response = self.relay.submit(&request).await?;
        info!(
            block = request.body().block_number(),
            success = response.is_success(),
            "bundle submitted"
        );
        Ok(response)
    }

    /// Simulate a bundle with `eth_callBundle`.
    pub async fn call_bundle(&self, txs: Vec<Bytes>) -> Result<RelayResponse, SubmitError> {
        self.submit(BundleMethod::CallBundle, txs).await
    }

    /// Submit a bundle with `eth_sendBundle`.
    pub async fn send_bundle(&self, txs: Vec<Bytes>) -> Result<RelayResponse, SubmitError> {
        self.submit(BundleMethod::SendBundle, txs).await
    }

    /// Build and sign a legacy transaction calling the configured contract
    /// with `input`, using the signing key's current nonce. Returns the raw
    /// signed transaction, ready to be placed in a bundle.
    #[instrument(skip(self, input))]
    pub async fn sign_own_transaction(
        &self,
        input: Bytes,
        gas_limit: u64,
        gas_price: u128,
    ) -> Result<Bytes, SubmitError> {
        let contract = self.contract.ok_or(SubmitError::MissingContract)?;
        let nonce =
            self.node.nonce_of(self.signer.address()).await.map_err(SubmitError::node)?;

        let tx = LegacyTransaction::unsigned(
            nonce,
            gas_price,
            gas_limit,
            TxKind::Call(contract),
            U256::ZERO,
            input,
        );
        let signature = self
            .signer
            .signer()
            .sign_hash(&tx.signature_hash(Some(self.chain_id)))
            .await
            .map_err(SigningError::from)?;

        Ok(tx.into_signed(&signature, Some(self.chain_id))?.encoded())
    }
}
