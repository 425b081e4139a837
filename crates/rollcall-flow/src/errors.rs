use crate::capability::SensorError;
use rollcall_claims::ValidationError;
use rollcall_token::{DecodeError, EncodeError};
use thiserror::Error;

/// Errors surfaced by the flow.
///
/// Every variant is non-fatal: the flow stays in a retryable state and
/// keeps at most one of these as its transient message, cleared on the
/// next successful action or transition. Retries are always
/// user-initiated.
#[derive(Debug, Clone, Error)]
pub enum FlowError {
    /// The platform has no location capability; manual entry remains.
    #[error("location sensor is not available on this device")]
    SensorUnavailable,
    /// A sensor read failed (timeout, permission, positioning).
    #[error("location sensor failed: {0}")]
    Sensor(String),
    /// A required text input was empty or whitespace-only.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A scanned payload was not a valid transport string.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// Serializing a freshly issued session failed.
    #[error(transparent)]
    Issue(#[from] EncodeError),
}

impl From<SensorError> for FlowError {
    fn from(err: SensorError) -> Self {
        match err {
            SensorError::Unavailable => Self::SensorUnavailable,
            SensorError::Failed(reason) => Self::Sensor(reason),
        }
    }
}
