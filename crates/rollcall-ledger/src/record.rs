use rollcall_claims::{LocationClaim, SessionId, Timestamp, ValidationError};
use rollcall_claims::validation::require_nonblank;
use serde::{Deserialize, Serialize};

/// One successful redemption: a student name paired with the claim and
/// session it was redeemed against.
///
/// Created exactly once per successful scan-plus-name pairing and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedemptionRecord {
    student_name: String,
    redeemed_claim: LocationClaim,
    session_id: SessionId,
    redeemed_at: Timestamp,
}

impl RedemptionRecord {
    /// Builds a record, trimming the student name and rejecting blanks;
    /// stamps the redemption time.
    pub fn new(
        student_name: &str,
        redeemed_claim: LocationClaim,
        session_id: SessionId,
    ) -> Result<Self, ValidationError> {
        let student_name = require_nonblank("student name", student_name)?;
        Ok(Self {
            student_name,
            redeemed_claim,
            session_id,
            redeemed_at: Timestamp::now(),
        })
    }

    /// The redeeming student's name, as entered (trimmed).
    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    /// The location claim carried by the redeemed token.
    pub fn redeemed_claim(&self) -> &LocationClaim {
        &self.redeemed_claim
    }

    /// Session the redemption was recorded against.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// When the redemption happened.
    pub fn redeemed_at(&self) -> &Timestamp {
        &self.redeemed_at
    }
}
