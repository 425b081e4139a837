//! Output formatting utilities.

use rollcall_claims::LocationClaim;
use rollcall_ledger::RedemptionRecord;
use rollcall_token::SessionToken;

/// Formats a claim as indented summary lines.
pub fn claim_summary(claim: &LocationClaim) -> String {
    match claim {
        LocationClaim::Sensor(sensor) => format!(
            "  latitude:  {:.6}\n  longitude: {:.6}\n  accuracy:  {:.2}m\n  captured:  {}",
            sensor.latitude(),
            sensor.longitude(),
            sensor.accuracy(),
            sensor.captured_at()
        ),
        LocationClaim::Manual(manual) => format!(
            "  address:   {}\n  captured:  {}\n  mode:      manual entry",
            manual.address(),
            manual.captured_at()
        ),
    }
}

/// Formats a decoded token as summary lines.
pub fn token_summary(token: &SessionToken) -> String {
    format!(
        "session:   {}\nissued:    {}\nlocation:\n{}",
        token.session_id,
        token.issued_at,
        claim_summary(&token.claim)
    )
}

/// Formats a redemption record as a table row.
pub fn record_row(record: &RedemptionRecord) -> String {
    let place = match record.redeemed_claim() {
        LocationClaim::Sensor(sensor) => {
            format!("{:.4}, {:.4}", sensor.latitude(), sensor.longitude())
        }
        LocationClaim::Manual(manual) => manual.address().to_string(),
    };
    format!(
        "{:<20} {:<10} {:<26} {}",
        truncate(record.student_name(), 20),
        record.session_id(),
        record.redeemed_at(),
        place
    )
}

/// Prints the record table header.
pub fn print_record_header() {
    println!(
        "{:<20} {:<10} {:<26} {}",
        "STUDENT", "SESSION", "REDEEMED_AT", "LOCATION"
    );
    println!("{}", "-".repeat(75));
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}
