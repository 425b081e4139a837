use rollcall_claims::{LocationClaim, SessionId, Timestamp};
use serde::{Deserialize, Serialize};

/// The structured payload minted when an admin opens a check-in session.
///
/// Held in memory for the lifetime of the admin view and discarded on
/// reset; tokens are never archived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionToken {
    /// Location claim embedded in the session.
    pub claim: LocationClaim,
    /// When the token was issued.
    pub issued_at: Timestamp,
    /// Session identifier, fresh per issuance within a running process.
    pub session_id: SessionId,
}

impl SessionToken {
    /// Assembles a token from its parts.
    pub fn new(claim: LocationClaim, issued_at: Timestamp, session_id: SessionId) -> Self {
        Self {
            claim,
            issued_at,
            session_id,
        }
    }
}

/// A freshly issued token paired with its encoded transport string.
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedSession {
    /// The structured token.
    pub token: SessionToken,
    /// The transport string rendered into the scannable code.
    pub transport: String,
}
