//! Common utilities for testing relay components: an in-memory node,
//! signed fixture transactions, and the mempool records a feed would
//! deliver for them.

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod node;
pub mod specs;

pub use relay_types::test_utils as users;

use tracing_subscriber::EnvFilter;

/// Install a test tracing subscriber, filtered by `RUST_LOG`. Safe to call
/// from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
