//! Relay Bundle Library
//!
//! Contains the [`BundleRequest`] type, the builders for the two bundle
//! methods, and the [`RequestSigner`] producing the `x-auction-signature`
//! header that authenticates a request to the relay.

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

mod error;
pub use error::{ParseMethodError, SigningError};

mod request;
pub use request::{
    build_call_bundle_request, build_send_bundle_request, BundleMethod, BundleParams,
    BundleRequest, JSONRPC_VERSION, REQUEST_ID,
};

mod signer;
pub use signer::{RequestSigner, SignedRequest, SIGNATURE_HEADER};
