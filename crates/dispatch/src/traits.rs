use alloy::primitives::{Address, Bytes, B256};
use core::future::Future;

/// A trait for the node queries the dispatcher and submitter rely on.
///
/// Implementors must query the node on every call. Head and nonce values are
/// never cached, so that a bundle is never built against a stale block or
/// nonce.
pub trait NodeClient {
    /// The error type returned by node queries.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Get the current head block number.
    fn current_block_number(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send;

    /// Get the transaction count of an account.
    fn nonce_of(&self, address: Address) -> impl Future<Output = Result<u64, Self::Error>> + Send;

    /// Get the canonical encoding of a transaction, if the node knows it.
    fn raw_transaction_bytes(
        &self,
        hash: B256,
    ) -> impl Future<Output = Result<Option<Bytes>, Self::Error>> + Send;
}
