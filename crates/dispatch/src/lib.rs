//! Relay Dispatch Library
//!
//! Contains the [`Dispatcher`], which checks the codec against the node for
//! every observed mempool record, and the [`BundleSubmitter`], which resolves
//! a target block, builds, signs and submits bundles.

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

mod dispatcher;
pub use dispatcher::{
    CheckOutcome, DispatchError, DispatchSummary, Dispatcher, DispatcherOptions, ErrorPolicy,
};

mod impls;
pub use impls::{HttpNode, ProviderNode};

mod submitter;
pub use submitter::{BundleSubmitter, SubmitError};

mod traits;
pub use traits::NodeClient;
