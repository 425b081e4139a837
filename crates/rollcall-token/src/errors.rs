use rollcall_claims::ValidationError;
use thiserror::Error;

/// Errors that can occur while encoding a session token.
#[derive(Debug, Clone, Error)]
pub enum EncodeError {
    /// JSON serialization of the payload failed.
    #[error("failed to serialize session payload: {0}")]
    Serialize(String),
}

impl From<serde_json::Error> for EncodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialize(err.to_string())
    }
}

/// Errors that can occur while decoding a scanned transport string.
#[derive(Debug, Clone, Error)]
pub enum DecodeError {
    /// The payload is not syntactically valid JSON.
    #[error("payload is not valid JSON: {0}")]
    Syntax(String),
    /// The payload parsed but is not a JSON object.
    #[error("payload is not a JSON object")]
    NotAnObject,
    /// A required top-level field is absent.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    /// A field is present but has the wrong shape.
    #[error("field `{field}` is malformed: {reason}")]
    MalformedField {
        /// Field that failed to decode.
        field: &'static str,
        /// Reason for the failure.
        reason: String,
    },
    /// The location claim decoded structurally but failed validation.
    #[error("invalid location claim: {0}")]
    InvalidClaim(#[from] ValidationError),
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Syntax(err.to_string())
    }
}
