use alloy::primitives::Address;

/// Error type for [`crate::RelayConfig`]. Captures errors related to loading
/// configuration from the environment or other sources.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error loading from environment variable
    #[error("missing or non-unicode environment variable: {0}")]
    Var(String),
    /// Error parsing environment variable
    #[error("failed to parse environment variable: {0}")]
    Parse(#[from] std::num::ParseIntError),
    /// Error parsing hex from environment variable
    #[error("failed to parse hex: {0}")]
    Hex(#[from] hex::FromHexError),
    /// Error parsing a URL from environment variable
    #[error("failed to parse url: {0}")]
    Url(#[from] url::ParseError),
    /// Error parsing the block target
    #[error(transparent)]
    Target(#[from] crate::ParseTargetError),
    /// The signing key could not be parsed.
    #[error("invalid signing key: {0}")]
    InvalidKey(#[source] alloy::signers::local::LocalSignerError),
    /// The configured account does not belong to the signing key.
    #[error("signing key controls {actual}, but {expected} was configured")]
    AddressMismatch {
        /// The address from the configuration.
        expected: Address,
        /// The address derived from the signing key.
        actual: Address,
    },
}

impl ConfigError {
    /// Missing or non-unicode env var.
    pub fn missing(s: &str) -> Self {
        ConfigError::Var(s.to_string())
    }
}
