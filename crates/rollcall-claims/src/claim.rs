use crate::identifiers::Timestamp;
use crate::validation::{require_finite, require_nonblank, ValidationError};
use serde::{Deserialize, Serialize};

/// A sensor-derived position claim in decimal degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorClaim {
    latitude: f64,
    longitude: f64,
    accuracy: f64,
    captured_at: Timestamp,
}

impl SensorClaim {
    /// Builds a sensor claim from an already-captured reading.
    ///
    /// Coordinates and accuracy must be finite; accuracy must not be
    /// negative.
    pub fn new(
        latitude: f64,
        longitude: f64,
        accuracy: f64,
        captured_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        let latitude = require_finite("latitude", latitude)?;
        let longitude = require_finite("longitude", longitude)?;
        let accuracy = require_finite("accuracy", accuracy)?;
        if accuracy < 0.0 {
            return Err(ValidationError::OutOfBounds {
                field: "accuracy",
                value: accuracy.to_string(),
            });
        }
        Ok(Self {
            latitude,
            longitude,
            accuracy,
            captured_at,
        })
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Reported accuracy radius in meters.
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// When the reading was captured.
    pub fn captured_at(&self) -> &Timestamp {
        &self.captured_at
    }
}

/// A manually entered network-address claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualClaim {
    address: String,
    captured_at: Timestamp,
}

impl ManualClaim {
    /// Builds a manual claim; the address is trimmed and must not be blank.
    pub fn new(address: &str, captured_at: Timestamp) -> Result<Self, ValidationError> {
        let address = require_nonblank("address", address)?;
        Ok(Self {
            address,
            captured_at,
        })
    }

    /// The entered network address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// When the address was entered.
    pub fn captured_at(&self) -> &Timestamp {
        &self.captured_at
    }
}

/// An unverified assertion of where the issuing device was located.
///
/// Exactly one variant is active and a claim never changes after
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LocationClaim {
    /// Position obtained from the device location sensor.
    Sensor(SensorClaim),
    /// Network address entered by hand.
    Manual(ManualClaim),
}

impl LocationClaim {
    /// Builds a sensor claim from a live reading, stamping the capture time.
    pub fn from_sensor_reading(
        latitude: f64,
        longitude: f64,
        accuracy: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self::Sensor(SensorClaim::new(
            latitude,
            longitude,
            accuracy,
            Timestamp::now(),
        )?))
    }

    /// Builds a manual claim from an entered address, stamping the capture time.
    pub fn from_manual_address(address: &str) -> Result<Self, ValidationError> {
        Ok(Self::Manual(ManualClaim::new(address, Timestamp::now())?))
    }

    /// When the claim was captured.
    pub fn captured_at(&self) -> &Timestamp {
        match self {
            Self::Sensor(claim) => claim.captured_at(),
            Self::Manual(claim) => claim.captured_at(),
        }
    }

    /// Whether this claim was entered by hand.
    pub fn is_manual(&self) -> bool {
        matches!(self, Self::Manual(_))
    }
}
