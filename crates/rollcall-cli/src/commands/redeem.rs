//! Redeem command implementation.

use crate::output;
use rollcall_ledger::{AttendanceLedger, RedemptionRecord};
use rollcall_token::decode;

pub fn run(payload: &str, name: &str, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let token = decode(payload)?;
    let record = RedemptionRecord::new(name, token.claim, token.session_id)?;

    let mut ledger = AttendanceLedger::new();
    ledger.append(record);
    let record = &ledger.records()[0];

    if json_output {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        println!("attendance recorded");
        println!("student:   {}", record.student_name());
        println!("session:   {}", record.session_id());
        println!("redeemed:  {}", record.redeemed_at());
        println!("location:\n{}", output::claim_summary(record.redeemed_claim()));
    }

    Ok(())
}
