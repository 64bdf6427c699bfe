//! JSON-RPC response types returned by the relay.
use crate::MalformedResponse;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcErrorObject {
    /// The error code.
    pub code: i64,
    /// The error message.
    pub message: String,
    /// Additional error data, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl core::fmt::Display for RpcErrorObject {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "relay error {}: {}", self.code, self.message)
    }
}

impl core::error::Error for RpcErrorObject {}

/// The payload of a well-formed JSON-RPC response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayPayload {
    /// The `result` member.
    Success(Value),
    /// The `error` member. The relay answered, but rejected the request.
    Failure(RpcErrorObject),
}

/// A validated JSON-RPC response from the relay.
///
/// Validation only covers the envelope: the id echoes the request id and
/// exactly one of `result` and `error` is present. The `result` itself is
/// passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayResponse {
    id: u64,
    payload: RelayPayload,
}

impl RelayResponse {
    /// Validate a response body against the id of the request it answers.
    pub fn from_value(value: Value, expected_id: u64) -> Result<Self, MalformedResponse> {
        let Value::Object(mut object) = value else {
            return Err(MalformedResponse::NotAnObject);
        };

        check_id(&object, expected_id)?;

        let payload = match (object.remove("result"), object.remove("error")) {
            (Some(result), None) => RelayPayload::Success(result),
            (None, Some(error)) => RelayPayload::Failure(
                serde_json::from_value(error)
                    .map_err(|e| MalformedResponse::InvalidError(e.to_string()))?,
            ),
            (None, None) => return Err(MalformedResponse::MissingPayload),
            (Some(_), Some(_)) => return Err(MalformedResponse::AmbiguousPayload),
        };

        Ok(Self { id: expected_id, payload })
    }

    /// Parse and validate a raw response body.
    pub fn from_slice(body: &[u8], expected_id: u64) -> crate::Result<Self> {
        let value = serde_json::from_slice(body)?;
        Self::from_value(value, expected_id).map_err(Into::into)
    }

    /// The response id.
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// The response payload.
    pub const fn payload(&self) -> &RelayPayload {
        &self.payload
    }

    /// True if the relay accepted the request.
    pub const fn is_success(&self) -> bool {
        matches!(self.payload, RelayPayload::Success(_))
    }

    /// The `result` member, if the relay accepted the request.
    pub const fn result(&self) -> Option<&Value> {
        match &self.payload {
            RelayPayload::Success(result) => Some(result),
            RelayPayload::Failure(_) => None,
        }
    }

    /// The `error` member, if the relay rejected the request.
    pub const fn error(&self) -> Option<&RpcErrorObject> {
        match &self.payload {
            RelayPayload::Success(_) => None,
            RelayPayload::Failure(error) => Some(error),
        }
    }

    /// Convert into a [`Result`] over the payload.
    pub fn into_result(self) -> Result<Value, RpcErrorObject> {
        match self.payload {
            RelayPayload::Success(result) => Ok(result),
            RelayPayload::Failure(error) => Err(error),
        }
    }
}

fn check_id(object: &Map<String, Value>, expected: u64) -> Result<(), MalformedResponse> {
    match object.get("id") {
        Some(id) if *id == Value::from(expected) => Ok(()),
        other => Err(MalformedResponse::IdMismatch {
            expected: expected.to_string(),
            actual: other.map_or_else(|| "none".to_owned(), Value::to_string),
        }),
    }
}
