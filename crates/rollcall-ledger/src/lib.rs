//! Append-only attendance ledger for rollcall redemptions.
//!
//! Each successful redemption produces one [`RedemptionRecord`]; the
//! [`AttendanceLedger`] holds them in redemption order for the lifetime
//! of the process. Nothing removes, reorders, or deduplicates entries;
//! the same student name may appear any number of times.
//!
#![deny(missing_docs)]

/// The in-memory ledger.
pub mod ledger;
/// Redemption record type.
pub mod record;

pub use ledger::AttendanceLedger;
pub use record::RedemptionRecord;
