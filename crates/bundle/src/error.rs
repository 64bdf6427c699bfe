/// An error that can occur when signing a bundle request.
///
/// An absent or malformed key is a startup-time failure and is never retried.
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    /// No signing key was provided.
    #[error("signing key is missing")]
    MissingKey,
    /// The signing key could not be parsed.
    #[error("invalid signing key: {0}")]
    InvalidKey(#[from] alloy::signers::local::LocalSignerError),
    /// The request body could not be serialized.
    #[error("failed to serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),
    /// Error signing the request digest.
    #[error(transparent)]
    Signer(#[from] alloy::signers::Error),
}

/// Unknown bundle method name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown bundle method {0:?}")]
pub struct ParseMethodError(pub String);
