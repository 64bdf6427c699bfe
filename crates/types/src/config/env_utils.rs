//! Helpers for loading configuration values from the process environment.
//!
//! These are only called while constructing a [`RelayConfig`]. No other
//! component reads the environment.
//!
//! [`RelayConfig`]: crate::RelayConfig

use crate::{BlockTarget, ConfigError};
use alloy::primitives::Address;
use std::{env, time::Duration};
use url::Url;

/// Load a variable from the environment. Empty counts as missing.
pub fn load_string(key: &str) -> Result<String, ConfigError> {
    load_string_opt(key).ok_or_else(|| ConfigError::missing(key))
}

/// Load a variable from the environment, if set and non-empty
pub fn load_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|val| !val.is_empty())
}

/// Load a variable from the environment
pub fn load_u64_or(key: &str, default: u64) -> Result<u64, ConfigError> {
    load_string_opt(key).map_or(Ok(default), |val| val.parse::<u64>().map_err(Into::into))
}

/// Load a variable from the environment
pub fn load_url(key: &str) -> Result<Url, ConfigError> {
    load_string(key)?.parse().map_err(Into::into)
}

/// Load a variable from the environment
pub fn load_address_opt(key: &str) -> Result<Option<Address>, ConfigError> {
    load_string_opt(key).map(|val| val.parse()).transpose().map_err(Into::into)
}

/// Load a variable from the environment
pub fn load_target_or(key: &str, default: BlockTarget) -> Result<BlockTarget, ConfigError> {
    load_string_opt(key).map_or(Ok(default), |val| val.parse().map_err(Into::into))
}

/// Load a millisecond duration from the environment
pub fn load_millis_or(key: &str, default: Duration) -> Result<Duration, ConfigError> {
    load_string_opt(key).map_or(Ok(default), |val| {
        val.parse::<u64>().map(Duration::from_millis).map_err(Into::into)
    })
}
