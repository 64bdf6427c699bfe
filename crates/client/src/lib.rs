//! Relay client and response types.

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
#![cfg_attr(docsrs, feature(doc_cfg))]

/// The [`RelayClient`].
pub mod client;
pub use client::RelayClient;

mod error;
pub use error::{MalformedResponse, RelayError, Result};

/// Response types for the [`RelayClient`].
pub mod types;
pub use types::{RelayPayload, RelayResponse, RpcErrorObject};
