//! Location claim primitives for rollcall check-in sessions.
//!
//! A location claim is an unverified assertion of where (and how) an
//! admin's position was determined when a check-in session was opened.
//! Every field that travels inside a session payload lives in this crate.
//!
#![deny(missing_docs)]

/// The location claim sum type and its builders.
pub mod claim;
/// Validated string newtypes used across the workspace.
pub mod identifiers;
/// Validation helpers shared by claims and records.
pub mod validation;

pub use claim::{LocationClaim, ManualClaim, SensorClaim};
pub use identifiers::{SessionId, Timestamp};
pub use validation::ValidationError;
