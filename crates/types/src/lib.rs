//! Shared configuration and types used throughout the relay SDK.

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod config;
pub use config::{
    env_utils, ConfigError, RelayConfig, BUNDLE_TARGET, CHAIN_ID, CONTRACT_ADDRESS,
    DEFAULT_CHAIN_ID, EOA_ADDRESS, PRIVATE_KEY, RELAY_URL, RPC_PROVIDER, SETTLE_DELAY_MS,
};

mod target;
pub use target::{BlockTarget, ParseTargetError};

/// Utilities for testing.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
