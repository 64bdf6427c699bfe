use crate::NodeClient;
use alloy::primitives::{keccak256, Bytes, B256};
use futures_util::{Stream, StreamExt};
use relay_codec::{decode_mempool_record, DecodeError, MempoolRecord, Transaction};
use relay_types::{RelayConfig, DEFAULT_CHAIN_ID};
use std::{pin::pin, time::Duration};
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

/// Errors for a single record, returned by [`Dispatcher::check`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DispatchError {
    /// The record could not be decoded, or has an unsupported type.
    #[error("failed to decode record: {0}")]
    Decode(#[from] DecodeError),
    /// The node query failed.
    #[error("node query failed: {0}")]
    Node(#[source] Box<dyn core::error::Error + Send + Sync>),
    /// The node does not know the transaction.
    #[error("node has no transaction {0}")]
    NotFound(B256),
}

/// What to do when a record fails to decode or cannot be checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Log the failure and move on to the next record.
    #[default]
    SkipAndLog,
    /// Stop processing and return the failure.
    Abort,
}

/// Options for configuring the [`Dispatcher`].
#[derive(Debug, Clone, Copy)]
pub struct DispatcherOptions {
    /// Chain id assumed for type-2 records that do not carry one.
    pub chain_id: u64,
    /// Delay before asking the node for the raw transaction.
    pub settle_delay: Duration,
    /// Maximum number of records checked concurrently by [`Dispatcher::run`].
    pub concurrency: usize,
    /// Per-record failure handling in [`Dispatcher::run`].
    pub policy: ErrorPolicy,
}

impl Default for DispatcherOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatcherOptions {
    /// Create a new [`DispatcherOptions`] with default values.
    pub const fn new() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID,
            settle_delay: Duration::ZERO,
            concurrency: 16,
            policy: ErrorPolicy::SkipAndLog,
        }
    }

    /// Take the chain id and settle delay from the configuration.
    pub const fn from_config(config: &RelayConfig) -> Self {
        Self::new().with_chain_id(config.chain_id()).with_settle_delay(config.settle_delay())
    }

    /// Set the default chain id.
    pub const fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Set the settle delay.
    pub const fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    /// Set the concurrency limit. Zero is treated as one.
    pub const fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the error policy.
    pub const fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// The result of checking one record against the node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    hash: B256,
    encoded: Bytes,
    node: Bytes,
}

impl CheckOutcome {
    /// The hash reported by the feed.
    pub const fn hash(&self) -> B256 {
        self.hash
    }

    /// Our canonical encoding of the record.
    pub const fn encoded(&self) -> &Bytes {
        &self.encoded
    }

    /// The raw bytes reported by the node.
    pub const fn node(&self) -> &Bytes {
        &self.node
    }

    /// True if our encoding is byte-identical to the node's.
    pub fn matched(&self) -> bool {
        self.encoded == self.node
    }

    /// True if our encoding hashes to the hash reported by the feed.
    pub fn hash_matches(&self) -> bool {
        keccak256(&self.encoded) == self.hash
    }
}

/// Counts of records processed by [`Dispatcher::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Records whose encoding matched the node.
    pub matched: usize,
    /// Records whose encoding differed from the node.
    pub mismatched: usize,
    /// Records skipped after a failure.
    pub skipped: usize,
}

impl DispatchSummary {
    /// Total number of records seen.
    pub const fn total(&self) -> usize {
        self.matched + self.mismatched + self.skipped
    }
}

/// Reacts to mempool records by decoding, re-encoding and comparing them
/// against the node's raw bytes.
///
/// The match signal is the codec's correctness probe: for every transaction
/// the node has seen, the re-encoding must be byte-identical.
#[derive(Debug, Clone)]
pub struct Dispatcher<N> {
    node: N,
    options: DispatcherOptions,
}

impl<N> Dispatcher<N> {
    /// Create a new dispatcher.
    pub const fn new(node: N, options: DispatcherOptions) -> Self {
        Self { node, options }
    }

    /// Get a reference to the node client.
    pub const fn node(&self) -> &N {
        &self.node
    }

    /// Get the options.
    pub const fn options(&self) -> &DispatcherOptions {
        &self.options
    }
}

impl<N> Dispatcher<N>
where
    N: NodeClient + Sync,
{
    /// Check a single record against the node.
    #[instrument(skip_all, fields(hash = record.hash.as_deref().unwrap_or_default()))]
    pub async fn check(&self, record: MempoolRecord) -> Result<CheckOutcome, DispatchError> {
        let record = record.with_default_chain_id(self.options.chain_id);
        let hash = record.tx_hash()?;
        let encoded = decode_mempool_record(&record)?.encoded();

        if !self.options.settle_delay.is_zero() {
            sleep(self.options.settle_delay).await;
        }

        let node = self
            .node
            .raw_transaction_bytes(hash)
            .await
            .map_err(|err| DispatchError::Node(Box::new(err)))?
            .ok_or(DispatchError::NotFound(hash))?;

        let outcome = CheckOutcome { hash, encoded, node };
        if outcome.matched() {
            debug!(%hash, "re-encoding matches node");
        } else {
            warn!(
                %hash,
                hash_matches = outcome.hash_matches(),
                ours = ?Transaction::decode_raw(&outcome.encoded).ok(),
                theirs = ?Transaction::decode_raw(&outcome.node),
                "re-encoding differs from node"
            );
        }
        Ok(outcome)
    }

    /// Check every record of a stream, up to the configured number
    /// concurrently. Records are independent and complete in any order.
    pub async fn run<S>(&self, records: S) -> Result<DispatchSummary, DispatchError>
    where
        S: Stream<Item = MempoolRecord>,
    {
        let mut outcomes = pin!(records
            .map(|record| self.check(record))
            .buffer_unordered(self.options.concurrency.max(1)));

        let mut summary = DispatchSummary::default();
        while let Some(outcome) = outcomes.next().await {
            match outcome {
                Ok(outcome) if outcome.matched() => summary.matched += 1,
                Ok(_) => summary.mismatched += 1,
                Err(error) => match self.options.policy {
                    ErrorPolicy::SkipAndLog => {
                        warn!(%error, "skipping record");
                        summary.skipped += 1;
                    }
                    ErrorPolicy::Abort => return Err(error),
                },
            }
        }

        info!(
            matched = summary.matched,
            mismatched = summary.mismatched,
            skipped = summary.skipped,
            "mempool stream finished"
        );
        Ok(summary)
    }
}
