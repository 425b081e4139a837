//! The check-in state machine.

use crate::capability::{CaptureCapability, CaptureHandle, SensorCapability, SensorError, SensorReading};
use crate::errors::FlowError;
use crate::state::{FlowState, ScanTicket, SensorTicket};
use rollcall_claims::{LocationClaim, ValidationError};
use rollcall_ledger::{AttendanceLedger, RedemptionRecord};
use rollcall_token::{decode, IssuedSession, TokenIssuer};
use tracing::{debug, warn};

struct ActiveScan {
    ticket: ScanTicket,
    handle: Box<dyn CaptureHandle>,
}

/// The single state machine behind both check-in roles.
///
/// User actions are methods; capability results enter through the
/// `*_resolved` / `scan_decoded` methods, correlated by the ticket the
/// activation produced. A resolution with a stale ticket is ignored, so
/// callbacks that race a navigation or a release can never mutate the
/// ledger.
///
/// The flow owns the [`AttendanceLedger`]; no transition clears it.
pub struct CheckinFlow {
    state: FlowState,
    generation: u64,
    issuer: TokenIssuer,
    pending_sensor: Option<SensorTicket>,
    session: Option<IssuedSession>,
    student_name: String,
    active_scan: Option<ActiveScan>,
    last_redemption: Option<RedemptionRecord>,
    last_error: Option<FlowError>,
    ledger: AttendanceLedger,
}

impl CheckinFlow {
    /// Creates a flow at `Home` with an empty ledger.
    pub fn new() -> Self {
        Self::with_issuer(TokenIssuer::new())
    }

    /// Creates a flow using a preconfigured token issuer.
    pub fn with_issuer(issuer: TokenIssuer) -> Self {
        Self {
            state: FlowState::Home,
            generation: 0,
            issuer,
            pending_sensor: None,
            session: None,
            student_name: String::new(),
            active_scan: None,
            last_redemption: None,
            last_error: None,
            ledger: AttendanceLedger::new(),
        }
    }

    /// Current interaction state.
    pub fn state(&self) -> FlowState {
        self.state
    }

    /// The attendance ledger accumulated so far.
    pub fn ledger(&self) -> &AttendanceLedger {
        &self.ledger
    }

    /// The open session, if the admin has issued one.
    pub fn session(&self) -> Option<&IssuedSession> {
        self.session.as_ref()
    }

    /// The student name as currently entered.
    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    /// The record produced by the most recent redemption, until
    /// `scan_another` or navigation clears it.
    pub fn last_redemption(&self) -> Option<&RedemptionRecord> {
        self.last_redemption.as_ref()
    }

    /// The transient error tied to the current state, if any.
    pub fn last_error(&self) -> Option<&FlowError> {
        self.last_error.as_ref()
    }

    /// Dismisses the transient error without changing state.
    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Whether a sensor read is in flight.
    pub fn sensor_pending(&self) -> bool {
        self.pending_sensor.is_some()
    }

    /// `Home` → `AdminAwaitingLocation`.
    pub fn open_admin(&mut self) {
        if self.state != FlowState::Home {
            debug!(state = ?self.state, "open_admin ignored");
            return;
        }
        self.last_error = None;
        self.transition(FlowState::AdminAwaitingLocation);
    }

    /// `Home` → `StudentAwaitingName`.
    pub fn open_student(&mut self) {
        if self.state != FlowState::Home {
            debug!(state = ?self.state, "open_student ignored");
            return;
        }
        self.last_error = None;
        self.transition(FlowState::StudentAwaitingName);
    }

    /// Returns to `Home` from any state.
    ///
    /// Role-local transient state (pending sensor read, open session,
    /// entered name, active scan, last redemption, error) is discarded
    /// and the capture handle is released. The ledger is retained.
    pub fn go_home(&mut self) {
        self.release_scan();
        self.pending_sensor = None;
        self.session = None;
        self.student_name.clear();
        self.last_redemption = None;
        self.last_error = None;
        self.transition(FlowState::Home);
    }

    /// Starts a sensor read, returning the ticket its resolution must
    /// carry.
    ///
    /// Returns `None` outside `AdminAwaitingLocation` or while a read is
    /// already pending; at most one read is in flight at a time.
    pub fn begin_sensor_read(&mut self) -> Option<SensorTicket> {
        if self.state != FlowState::AdminAwaitingLocation {
            debug!(state = ?self.state, "begin_sensor_read ignored");
            return None;
        }
        if self.pending_sensor.is_some() {
            debug!("sensor read already pending");
            return None;
        }
        self.last_error = None;
        let ticket = SensorTicket(self.next_generation());
        self.pending_sensor = Some(ticket);
        Some(ticket)
    }

    /// Delivers the outcome of a sensor read.
    ///
    /// On success the claim is built and a session issued
    /// (`AdminAwaitingLocation` → `AdminSessionOpen`); on failure the
    /// state is kept and the error surfaced for a retry. A resolution
    /// whose ticket is stale (the admin navigated away or already opened
    /// a session) is ignored.
    pub fn sensor_resolved(
        &mut self,
        ticket: SensorTicket,
        outcome: Result<SensorReading, SensorError>,
    ) -> Result<(), FlowError> {
        if self.state != FlowState::AdminAwaitingLocation || self.pending_sensor != Some(ticket) {
            warn!(?ticket, "ignoring stale sensor resolution");
            return Ok(());
        }
        self.pending_sensor = None;
        let reading = match outcome {
            Ok(reading) => reading,
            Err(err) => return self.fail(err.into()),
        };
        match LocationClaim::from_sensor_reading(
            reading.latitude,
            reading.longitude,
            reading.accuracy,
        ) {
            Ok(claim) => self.open_session(claim),
            Err(err) => self.fail(err.into()),
        }
    }

    /// Runs a full sensor read against a synchronous adapter:
    /// `begin_sensor_read`, one `request`, then `sensor_resolved`.
    pub fn read_sensor(&mut self, sensor: &mut dyn SensorCapability) -> Result<(), FlowError> {
        let Some(ticket) = self.begin_sensor_read() else {
            return Ok(());
        };
        let outcome = sensor.request();
        self.sensor_resolved(ticket, outcome)
    }

    /// Opens a session from a manually entered address
    /// (`AdminAwaitingLocation` → `AdminSessionOpen`).
    ///
    /// A blank address surfaces a validation error and keeps the state.
    pub fn submit_manual_address(&mut self, address: &str) -> Result<(), FlowError> {
        if self.state != FlowState::AdminAwaitingLocation {
            debug!(state = ?self.state, "submit_manual_address ignored");
            return Ok(());
        }
        match LocationClaim::from_manual_address(address) {
            Ok(claim) => self.open_session(claim),
            Err(err) => self.fail(err.into()),
        }
    }

    /// Discards the open session and returns to location capture
    /// (`AdminSessionOpen` → `AdminAwaitingLocation`). The ledger is
    /// retained.
    pub fn new_code(&mut self) {
        if self.state != FlowState::AdminSessionOpen {
            debug!(state = ?self.state, "new_code ignored");
            return;
        }
        self.session = None;
        self.last_error = None;
        self.transition(FlowState::AdminAwaitingLocation);
    }

    /// Updates the entered student name.
    ///
    /// Editable while awaiting a name and while scanning; the name gate
    /// is re-checked when a scan decodes.
    pub fn set_student_name(&mut self, name: &str) {
        if !matches!(
            self.state,
            FlowState::StudentAwaitingName | FlowState::StudentScanning
        ) {
            debug!(state = ?self.state, "set_student_name ignored");
            return;
        }
        self.student_name = name.to_string();
    }

    /// Whether the scanner may be engaged right now.
    pub fn can_start_scanning(&self) -> bool {
        self.state == FlowState::StudentAwaitingName && !self.student_name.trim().is_empty()
    }

    /// Acquires the capture capability and enters `StudentScanning`.
    ///
    /// Refused (returning `None`, with a validation error surfaced)
    /// while the trimmed name is empty; the capture capability is not
    /// engaged until the gate passes.
    pub fn start_scanning(&mut self, capture: &mut dyn CaptureCapability) -> Option<ScanTicket> {
        if self.state != FlowState::StudentAwaitingName {
            debug!(state = ?self.state, "start_scanning ignored");
            return None;
        }
        if self.student_name.trim().is_empty() {
            self.last_error = Some(FlowError::Validation(ValidationError::Blank {
                field: "student name",
            }));
            return None;
        }
        let ticket = ScanTicket(self.next_generation());
        let handle = capture.activate(ticket);
        self.active_scan = Some(ActiveScan { ticket, handle });
        self.last_error = None;
        self.transition(FlowState::StudentScanning);
        Some(ticket)
    }

    /// Delivers a decoded string from the capture capability.
    ///
    /// A valid payload with a usable name records the redemption,
    /// releases the scanner, and enters `StudentRedeemed`. An invalid
    /// payload surfaces the decode error and leaves the scanner active.
    /// A delivery whose ticket is stale (the scanner was released or
    /// replaced) is ignored and mutates nothing.
    pub fn scan_decoded(&mut self, ticket: ScanTicket, payload: &str) -> Result<(), FlowError> {
        let current = self.active_scan.as_ref().map(|scan| scan.ticket);
        if self.state != FlowState::StudentScanning || current != Some(ticket) {
            warn!(?ticket, "ignoring decode from released scanner");
            return Ok(());
        }
        let token = match decode(payload) {
            Ok(token) => token,
            Err(err) => return self.fail(err.into()),
        };
        let record =
            match RedemptionRecord::new(&self.student_name, token.claim, token.session_id) {
                Ok(record) => record,
                Err(err) => return self.fail(err.into()),
            };
        self.ledger.append(record.clone());
        self.last_redemption = Some(record);
        self.release_scan();
        self.last_error = None;
        self.transition(FlowState::StudentRedeemed);
        Ok(())
    }

    /// Reports a frame-level capture error. Scanning continues; these
    /// are not surfaced.
    pub fn scan_failed(&mut self, ticket: ScanTicket, reason: &str) {
        debug!(?ticket, reason, "scan attempt failed");
    }

    /// Clears the result and name for the next student
    /// (`StudentRedeemed` → `StudentAwaitingName`). The ledger is
    /// retained.
    pub fn scan_another(&mut self) {
        if self.state != FlowState::StudentRedeemed {
            debug!(state = ?self.state, "scan_another ignored");
            return;
        }
        self.student_name.clear();
        self.last_redemption = None;
        self.last_error = None;
        self.transition(FlowState::StudentAwaitingName);
    }

    fn open_session(&mut self, claim: LocationClaim) -> Result<(), FlowError> {
        let issued = match self.issuer.issue(claim) {
            Ok(issued) => issued,
            Err(err) => return self.fail(err.into()),
        };
        debug!(session_id = %issued.token.session_id, "session opened");
        self.session = Some(issued);
        self.pending_sensor = None;
        self.last_error = None;
        self.transition(FlowState::AdminSessionOpen);
        Ok(())
    }

    fn fail(&mut self, err: FlowError) -> Result<(), FlowError> {
        debug!(%err, "flow error surfaced");
        self.last_error = Some(err.clone());
        Err(err)
    }

    fn transition(&mut self, next: FlowState) {
        debug!(from = ?self.state, to = ?next, "transition");
        self.state = next;
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    fn release_scan(&mut self) {
        if let Some(mut scan) = self.active_scan.take() {
            scan.handle.release();
        }
    }
}

impl Default for CheckinFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CheckinFlow {
    fn drop(&mut self) {
        // Teardown counts as an exit from scanning.
        self.release_scan();
    }
}
