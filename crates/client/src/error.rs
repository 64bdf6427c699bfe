/// Result type for [`RelayClient`] operations.
///
/// [`RelayClient`]: crate::client::RelayClient
pub type Result<T> = std::result::Result<T, RelayError>;

/// Ways a relay response can violate JSON-RPC.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedResponse {
    /// The response is not a JSON object.
    #[error("response is not a JSON object")]
    NotAnObject,
    /// The response id does not echo the request id.
    #[error("response id {actual} does not match request id {expected}")]
    IdMismatch {
        /// The request id.
        expected: String,
        /// The id found in the response.
        actual: String,
    },
    /// Neither `result` nor `error` is present.
    #[error("response has neither result nor error")]
    MissingPayload,
    /// Both `result` and `error` are present.
    #[error("response has both result and error")]
    AmbiguousPayload,
    /// The `error` member is not a JSON-RPC error object.
    #[error("invalid error object: {0}")]
    InvalidError(String),
}

/// Errors returned by the [`RelayClient`].
///
/// Nothing is retried: a bundle targets a specific block, and a retry after
/// that block has passed is worthless.
///
/// [`RelayClient`]: crate::client::RelayClient
#[derive(thiserror::Error, Debug)]
pub enum RelayError {
    /// An error occurred while parsing the URL.
    #[error(transparent)]
    Url(#[from] url::ParseError),

    /// The relay could not be reached, or answered with a non-2xx status.
    #[error("error contacting relay: {0}")]
    Network(#[from] reqwest::Error),

    /// The relay answered with something that is not valid JSON.
    #[error("relay response is not JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The relay answered with JSON that violates JSON-RPC.
    #[error("malformed relay response: {0}")]
    Malformed(#[from] MalformedResponse),
}

impl RelayError {
    /// The HTTP status, if the relay answered with a non-2xx status.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Network(err) => err.status(),
            _ => None,
        }
    }
}
