//! Contracts for the external collaborators the flow depends on.
//!
//! The core implements none of these: camera capture, QR pixel decoding,
//! code rasterization, and the location sensor are platform adapters.

use crate::state::ScanTicket;
use std::time::Duration;
use thiserror::Error;

/// Timeout adapters should apply to a single sensor read.
pub const RECOMMENDED_SENSOR_TIMEOUT: Duration = Duration::from_secs(10);

/// One position fix from the device location sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Accuracy radius in meters.
    pub accuracy: f64,
}

/// Why a sensor read produced no fix.
#[derive(Debug, Clone, Error)]
pub enum SensorError {
    /// The platform has no location capability; switch to manual entry.
    #[error("location sensor is not available on this device")]
    Unavailable,
    /// Timeout, permission denial, or positioning failure; retryable.
    #[error("{0}")]
    Failed(String),
}

/// Device location sensor: single-shot, resolves exactly once per
/// activation with a fix or an error.
///
/// Implementations are expected to bound the read with a fixed timeout
/// ([`RECOMMENDED_SENSOR_TIMEOUT`]) and surface expiry as
/// [`SensorError::Failed`].
pub trait SensorCapability {
    /// Requests one position fix.
    fn request(&mut self) -> Result<SensorReading, SensorError>;
}

/// Handle to an active capture acquisition.
///
/// `release` must be idempotent: calling it repeatedly, or after the
/// underlying capture already stopped, is safe.
pub trait CaptureHandle {
    /// Tears the capture down.
    fn release(&mut self);
}

/// Camera-based decode-to-string capture.
///
/// Activated only while a student scan is in progress. Decoded strings
/// are delivered back to the flow tagged with the activation's
/// [`ScanTicket`]; deliveries after release are discarded by the flow.
pub trait CaptureCapability {
    /// Starts capturing; returns the handle used to release it.
    fn activate(&mut self, ticket: ScanTicket) -> Box<dyn CaptureHandle>;
}

/// Turns a transport payload into a displayable code artifact.
pub trait CodeRenderer {
    /// The displayable artifact type.
    type Artifact;

    /// Renders the payload; pure and infallible.
    fn render(&self, payload: &str) -> Self::Artifact;
}
