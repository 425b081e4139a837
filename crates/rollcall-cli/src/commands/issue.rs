//! Issue command implementation.

use crate::output;
use rollcall_claims::LocationClaim;
use rollcall_token::TokenIssuer;
use serde_json::json;

pub fn run(
    latitude: Option<f64>,
    longitude: Option<f64>,
    accuracy: Option<f64>,
    address: Option<String>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let claim = match (&address, latitude, longitude) {
        (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
            return Err("provide either --address or coordinates, not both".into());
        }
        (Some(address), None, None) => LocationClaim::from_manual_address(address)?,
        (None, Some(latitude), Some(longitude)) => {
            LocationClaim::from_sensor_reading(latitude, longitude, accuracy.unwrap_or(0.0))?
        }
        _ => {
            return Err("provide --address, or --latitude and --longitude".into());
        }
    };

    let mut issuer = TokenIssuer::new();
    let issued = issuer.issue(claim)?;

    if json_output {
        let doc = json!({
            "payload": issued.transport,
            "sessionId": issued.token.session_id,
            "issuedAt": issued.token.issued_at,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("{}", output::token_summary(&issued.token));
        println!("payload:   {}", issued.transport);
    }

    Ok(())
}
