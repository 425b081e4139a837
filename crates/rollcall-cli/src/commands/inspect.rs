//! Inspect command implementation.

use crate::output;
use rollcall_token::{decode, encode};
use serde_json::Value;

pub fn run(payload: &str, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let token = decode(payload)?;

    if json_output {
        // Re-encode to print the normalized wire shape.
        let value: Value = serde_json::from_str(&encode(&token)?)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", output::token_summary(&token));
    }

    Ok(())
}
