//! Wire format for session transport strings.
//!
//! A transport string is the lossless JSON serialization of
//! `{ location, generatedAt, sessionId }`, where `location` is either
//! `{latitude, longitude, accuracy, timestamp}` for sensor claims or
//! `{ip, timestamp, manual: true}` for manual claims. This is the only
//! wire contract in the system; independently built encoders and decoders
//! interoperate on this shape.

use crate::errors::DecodeError;
use crate::token::SessionToken;
use rollcall_claims::{LocationClaim, ManualClaim, SensorClaim, SessionId, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
struct WirePayload<L: Serialize> {
    location: L,
    #[serde(rename = "generatedAt")]
    generated_at: String,
    #[serde(rename = "sessionId")]
    session_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireSensorLocation {
    latitude: f64,
    longitude: f64,
    accuracy: f64,
    timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireManualLocation {
    ip: String,
    timestamp: String,
    // Marker written by every encoder; tolerated absent on decode since
    // the `ip` member already discriminates.
    #[serde(default)]
    #[allow(dead_code)]
    manual: bool,
}

/// Encodes a session token into its transport string.
pub fn encode(token: &SessionToken) -> Result<String, crate::errors::EncodeError> {
    let generated_at = token.issued_at.as_ref().to_string();
    let session_id = token.session_id.as_ref().to_string();
    let json = match &token.claim {
        LocationClaim::Sensor(claim) => serde_json::to_string(&WirePayload {
            location: WireSensorLocation {
                latitude: claim.latitude(),
                longitude: claim.longitude(),
                accuracy: claim.accuracy(),
                timestamp: claim.captured_at().as_ref().to_string(),
            },
            generated_at,
            session_id,
        })?,
        LocationClaim::Manual(claim) => serde_json::to_string(&WirePayload {
            location: WireManualLocation {
                ip: claim.address().to_string(),
                timestamp: claim.captured_at().as_ref().to_string(),
                manual: true,
            },
            generated_at,
            session_id,
        })?,
    };
    Ok(json)
}

/// Decodes a scanned transport string back into a session token.
///
/// Fails with [`DecodeError`] when the string is not well-formed JSON or
/// when `location`, `generatedAt`, or `sessionId` are absent or of the
/// wrong shape. Performs no staleness or signature check.
pub fn decode(payload: &str) -> Result<SessionToken, DecodeError> {
    let value: Value = serde_json::from_str(payload)?;
    let object = value.as_object().ok_or(DecodeError::NotAnObject)?;

    let location = object
        .get("location")
        .ok_or(DecodeError::MissingField("location"))?;
    let claim = decode_location(location)?;

    let issued_at = parse_timestamp("generatedAt", require_str(object, "generatedAt")?)?;

    let session_id = require_str(object, "sessionId")?;
    if session_id.is_empty() {
        return Err(DecodeError::MalformedField {
            field: "sessionId",
            reason: "empty string".to_string(),
        });
    }
    // Accept foreign id conventions; locally minted ids are stricter.
    let session_id = SessionId::new(session_id.to_string());

    Ok(SessionToken::new(claim, issued_at, session_id))
}

/// Decodes the `location` member into the matching claim variant.
///
/// The manual shape is selected by `manual: true` or the presence of
/// `ip`; everything else must decode as a sensor reading.
fn decode_location(location: &Value) -> Result<LocationClaim, DecodeError> {
    let object = location
        .as_object()
        .ok_or_else(|| DecodeError::MalformedField {
            field: "location",
            reason: "not a JSON object".to_string(),
        })?;

    let is_manual = object
        .get("manual")
        .and_then(Value::as_bool)
        .unwrap_or(false)
        || object.contains_key("ip");

    if is_manual {
        let wire: WireManualLocation =
            serde_json::from_value(location.clone()).map_err(|err| DecodeError::MalformedField {
                field: "location",
                reason: err.to_string(),
            })?;
        let captured_at = parse_timestamp("location.timestamp", &wire.timestamp)?;
        Ok(LocationClaim::Manual(ManualClaim::new(
            &wire.ip,
            captured_at,
        )?))
    } else {
        let wire: WireSensorLocation =
            serde_json::from_value(location.clone()).map_err(|err| DecodeError::MalformedField {
                field: "location",
                reason: err.to_string(),
            })?;
        let captured_at = parse_timestamp("location.timestamp", &wire.timestamp)?;
        Ok(LocationClaim::Sensor(SensorClaim::new(
            wire.latitude,
            wire.longitude,
            wire.accuracy,
            captured_at,
        )?))
    }
}

fn require_str<'a>(
    object: &'a serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, DecodeError> {
    let value = object.get(field).ok_or(DecodeError::MissingField(field))?;
    value.as_str().ok_or_else(|| DecodeError::MalformedField {
        field,
        reason: "not a string".to_string(),
    })
}

fn parse_timestamp(field: &'static str, raw: &str) -> Result<Timestamp, DecodeError> {
    Timestamp::parse(raw).map_err(|_| DecodeError::MalformedField {
        field,
        reason: format!("'{raw}' is not an RFC3339 UTC timestamp"),
    })
}
