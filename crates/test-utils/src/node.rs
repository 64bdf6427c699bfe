//! An in-memory [`NodeClient`].

use alloy::primitives::{keccak256, Address, Bytes, B256};
use relay_dispatch::NodeClient;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

/// Error returned by a [`MockNode`] that has been taken offline.
#[derive(Debug, Clone, Copy, thiserror::Error)]
#[error("mock node is offline")]
pub struct NodeOffline;

#[derive(Debug, Default)]
struct NodeState {
    head: u64,
    nonces: HashMap<Address, u64>,
    txs: HashMap<B256, Bytes>,
    offline: bool,
    raw_queries: usize,
}

/// A node whose state is held in memory and shared between clones.
///
/// Every query reads the current state, so a test may advance the head or
/// add transactions between calls.
#[derive(Debug, Clone, Default)]
pub struct MockNode {
    state: Arc<Mutex<NodeState>>,
}

impl MockNode {
    /// Create an empty node at block 0.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, NodeState> {
        // A panic while holding the lock only happens in a failing test.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Set the head block number.
    pub fn set_head(&self, head: u64) {
        self.state().head = head;
    }

    /// Set the transaction count of an account.
    pub fn set_nonce(&self, address: Address, nonce: u64) {
        self.state().nonces.insert(address, nonce);
    }

    /// Store a raw transaction under its hash. Returns the hash.
    pub fn insert_raw(&self, raw: Bytes) -> B256 {
        let hash = keccak256(&raw);
        self.state().txs.insert(hash, raw);
        hash
    }

    /// Store raw bytes under an arbitrary hash.
    pub fn insert_raw_at(&self, hash: B256, raw: Bytes) {
        self.state().txs.insert(hash, raw);
    }

    /// Take the node offline, or bring it back.
    pub fn set_offline(&self, offline: bool) {
        self.state().offline = offline;
    }

    /// Number of raw transaction queries served so far.
    pub fn raw_queries(&self) -> usize {
        self.state().raw_queries
    }

    fn online(&self) -> Result<MutexGuard<'_, NodeState>, NodeOffline> {
        let state = self.state();
        if state.offline {
            return Err(NodeOffline);
        }
        Ok(state)
    }
}

impl NodeClient for MockNode {
    type Error = NodeOffline;

    async fn current_block_number(&self) -> Result<u64, Self::Error> {
        self.online().map(|state| state.head)
    }

    async fn nonce_of(&self, address: Address) -> Result<u64, Self::Error> {
        self.online().map(|state| state.nonces.get(&address).copied().unwrap_or_default())
    }

    async fn raw_transaction_bytes(&self, hash: B256) -> Result<Option<Bytes>, Self::Error> {
        let mut state = self.online()?;
        state.raw_queries += 1;
        Ok(state.txs.get(&hash).cloned())
    }
}
