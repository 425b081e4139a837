use crate::record::RedemptionRecord;
use serde::Serialize;

/// Ordered, append-only sequence of redemption records.
///
/// Insertion order is redemption order. There is no removal, reordering,
/// or deduplication API; navigation and session resets never clear the
/// ledger. Contents live only as long as the process.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct AttendanceLedger {
    records: Vec<RedemptionRecord>,
}

impl AttendanceLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record. Never fails; the record's own invariants are the
    /// only validation.
    pub fn append(&mut self, record: RedemptionRecord) {
        self.records.push(record);
    }

    /// Current number of records.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Whether any redemption has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Read-only snapshot of all records in redemption order.
    pub fn records(&self) -> &[RedemptionRecord] {
        &self.records
    }

    /// Iterates records in redemption order.
    pub fn iter(&self) -> impl Iterator<Item = &RedemptionRecord> {
        self.records.iter()
    }
}
