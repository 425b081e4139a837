use rollcall_claims::LocationClaim;
use rollcall_flow::{
    CaptureCapability, CaptureHandle, CheckinFlow, FlowError, FlowState, ScanTicket,
    SensorCapability, SensorError, SensorReading,
};
use std::cell::Cell;
use std::rc::Rc;

struct FixedSensor(Result<SensorReading, SensorError>);

impl SensorCapability for FixedSensor {
    fn request(&mut self) -> Result<SensorReading, SensorError> {
        self.0.clone()
    }
}

#[derive(Default)]
struct MockCapture {
    activations: Rc<Cell<usize>>,
    releases: Rc<Cell<usize>>,
}

struct MockHandle {
    releases: Rc<Cell<usize>>,
}

impl CaptureCapability for MockCapture {
    fn activate(&mut self, _ticket: ScanTicket) -> Box<dyn CaptureHandle> {
        self.activations.set(self.activations.get() + 1);
        Box::new(MockHandle {
            releases: Rc::clone(&self.releases),
        })
    }
}

impl CaptureHandle for MockHandle {
    fn release(&mut self) {
        self.releases.set(self.releases.get() + 1);
    }
}

fn issued_payload(flow: &mut CheckinFlow, address: &str) -> String {
    flow.open_admin();
    flow.submit_manual_address(address).unwrap();
    let payload = flow.session().unwrap().transport.clone();
    flow.go_home();
    payload
}

#[test]
fn sensor_success_opens_session() {
    let mut flow = CheckinFlow::new();
    let mut sensor = FixedSensor(Ok(SensorReading {
        latitude: 12.9716,
        longitude: 77.5946,
        accuracy: 15.0,
    }));

    flow.open_admin();
    assert_eq!(flow.state(), FlowState::AdminAwaitingLocation);

    flow.read_sensor(&mut sensor).unwrap();
    assert_eq!(flow.state(), FlowState::AdminSessionOpen);

    let session = flow.session().unwrap();
    match &session.token.claim {
        LocationClaim::Sensor(claim) => {
            assert_eq!(claim.latitude(), 12.9716);
            assert_eq!(claim.longitude(), 77.5946);
            assert_eq!(claim.accuracy(), 15.0);
        }
        LocationClaim::Manual(_) => panic!("expected sensor claim"),
    }
}

#[test]
fn sensor_failure_keeps_state_and_allows_manual_fallback() {
    let mut flow = CheckinFlow::new();
    let mut sensor = FixedSensor(Err(SensorError::Failed("timeout expired".into())));

    flow.open_admin();
    let err = flow.read_sensor(&mut sensor).unwrap_err();
    assert!(matches!(err, FlowError::Sensor(_)));
    assert_eq!(flow.state(), FlowState::AdminAwaitingLocation);
    assert!(flow.last_error().is_some());

    // Manual entry remains available and clears the error.
    flow.submit_manual_address("192.168.1.10").unwrap();
    assert_eq!(flow.state(), FlowState::AdminSessionOpen);
    assert!(flow.last_error().is_none());
}

#[test]
fn sensor_unavailable_is_its_own_error() {
    let mut flow = CheckinFlow::new();
    let mut sensor = FixedSensor(Err(SensorError::Unavailable));

    flow.open_admin();
    let err = flow.read_sensor(&mut sensor).unwrap_err();
    assert!(matches!(err, FlowError::SensorUnavailable));
}

#[test]
fn manual_entry_opens_session_without_sensor() {
    let mut flow = CheckinFlow::new();
    flow.open_admin();
    flow.submit_manual_address("192.168.1.10").unwrap();
    assert_eq!(flow.state(), FlowState::AdminSessionOpen);

    let session = flow.session().unwrap();
    match &session.token.claim {
        LocationClaim::Manual(claim) => assert_eq!(claim.address(), "192.168.1.10"),
        LocationClaim::Sensor(_) => panic!("expected manual claim"),
    }
}

#[test]
fn blank_manual_address_is_rejected_and_retryable() {
    let mut flow = CheckinFlow::new();
    flow.open_admin();
    let err = flow.submit_manual_address("   ").unwrap_err();
    assert!(matches!(err, FlowError::Validation(_)));
    assert_eq!(flow.state(), FlowState::AdminAwaitingLocation);

    flow.dismiss_error();
    assert!(flow.last_error().is_none());
    assert_eq!(flow.state(), FlowState::AdminAwaitingLocation);
}

#[test]
fn only_one_sensor_read_pending_at_a_time() {
    let mut flow = CheckinFlow::new();
    flow.open_admin();
    let first = flow.begin_sensor_read();
    assert!(first.is_some());
    assert!(flow.begin_sensor_read().is_none());
    assert!(flow.sensor_pending());
}

#[test]
fn stale_sensor_resolution_is_ignored() {
    let mut flow = CheckinFlow::new();
    flow.open_admin();
    let ticket = flow.begin_sensor_read().unwrap();
    flow.go_home();

    flow.sensor_resolved(
        ticket,
        Ok(SensorReading {
            latitude: 1.0,
            longitude: 2.0,
            accuracy: 3.0,
        }),
    )
    .unwrap();
    assert_eq!(flow.state(), FlowState::Home);
    assert!(flow.session().is_none());
}

#[test]
fn sensor_resolution_after_manual_session_does_not_replace_it() {
    let mut flow = CheckinFlow::new();
    flow.open_admin();
    let ticket = flow.begin_sensor_read().unwrap();
    flow.submit_manual_address("10.0.0.1").unwrap();
    let opened = flow.session().unwrap().token.session_id.clone();

    flow.sensor_resolved(
        ticket,
        Ok(SensorReading {
            latitude: 1.0,
            longitude: 2.0,
            accuracy: 3.0,
        }),
    )
    .unwrap();
    assert_eq!(flow.session().unwrap().token.session_id, opened);
    assert!(flow.session().unwrap().token.claim.is_manual());
}

#[test]
fn new_code_discards_session_and_returns_to_location_capture() {
    let mut flow = CheckinFlow::new();
    flow.open_admin();
    flow.submit_manual_address("10.0.0.1").unwrap();
    flow.new_code();
    assert_eq!(flow.state(), FlowState::AdminAwaitingLocation);
    assert!(flow.session().is_none());
}

#[test]
fn scanning_is_gated_on_a_nonblank_name() {
    let mut flow = CheckinFlow::new();
    let mut capture = MockCapture::default();

    flow.open_student();
    assert!(!flow.can_start_scanning());
    assert!(flow.start_scanning(&mut capture).is_none());
    assert_eq!(flow.state(), FlowState::StudentAwaitingName);
    assert!(matches!(flow.last_error(), Some(FlowError::Validation(_))));
    assert_eq!(capture.activations.get(), 0);

    flow.set_student_name("   ");
    assert!(!flow.can_start_scanning());

    flow.set_student_name("Asha");
    assert!(flow.can_start_scanning());
    assert!(flow.start_scanning(&mut capture).is_some());
    assert_eq!(flow.state(), FlowState::StudentScanning);
    assert_eq!(capture.activations.get(), 1);
    assert!(flow.last_error().is_none());
}

#[test]
fn full_redemption_appends_one_record() {
    let mut flow = CheckinFlow::new();
    let mut capture = MockCapture::default();
    let payload = issued_payload(&mut flow, "192.168.1.10");

    flow.open_student();
    flow.set_student_name("Asha");
    let ticket = flow.start_scanning(&mut capture).unwrap();
    flow.scan_decoded(ticket, &payload).unwrap();

    assert_eq!(flow.state(), FlowState::StudentRedeemed);
    assert_eq!(flow.ledger().count(), 1);
    assert_eq!(capture.releases.get(), 1);

    let record = flow.last_redemption().unwrap();
    assert_eq!(record.student_name(), "Asha");
    assert!(record.redeemed_claim().is_manual());
}

#[test]
fn malformed_scan_keeps_scanner_active() {
    let mut flow = CheckinFlow::new();
    let mut capture = MockCapture::default();
    let payload = issued_payload(&mut flow, "192.168.1.10");

    flow.open_student();
    flow.set_student_name("Asha");
    let ticket = flow.start_scanning(&mut capture).unwrap();

    let err = flow.scan_decoded(ticket, "not json").unwrap_err();
    assert!(matches!(err, FlowError::Decode(_)));
    assert_eq!(flow.state(), FlowState::StudentScanning);
    assert_eq!(flow.ledger().count(), 0);
    assert_eq!(capture.releases.get(), 0);

    // The same activation can still redeem.
    flow.scan_decoded(ticket, &payload).unwrap();
    assert_eq!(flow.state(), FlowState::StudentRedeemed);
    assert_eq!(flow.ledger().count(), 1);
}

#[test]
fn frame_level_scan_errors_are_not_surfaced() {
    let mut flow = CheckinFlow::new();
    let mut capture = MockCapture::default();

    flow.open_student();
    flow.set_student_name("Asha");
    let ticket = flow.start_scanning(&mut capture).unwrap();

    flow.scan_failed(ticket, "no code in frame");
    assert_eq!(flow.state(), FlowState::StudentScanning);
    assert!(flow.last_error().is_none());
    assert_eq!(capture.releases.get(), 0);
}

#[test]
fn name_blanked_while_scanning_blocks_redemption() {
    let mut flow = CheckinFlow::new();
    let mut capture = MockCapture::default();
    let payload = issued_payload(&mut flow, "192.168.1.10");

    flow.open_student();
    flow.set_student_name("Asha");
    let ticket = flow.start_scanning(&mut capture).unwrap();
    flow.set_student_name("  ");

    let err = flow.scan_decoded(ticket, &payload).unwrap_err();
    assert!(matches!(err, FlowError::Validation(_)));
    assert_eq!(flow.state(), FlowState::StudentScanning);
    assert_eq!(flow.ledger().count(), 0);
    assert_eq!(capture.releases.get(), 0);
}

#[test]
fn navigating_home_releases_capture_and_ignores_late_decode() {
    let mut flow = CheckinFlow::new();
    let mut capture = MockCapture::default();
    let payload = issued_payload(&mut flow, "192.168.1.10");

    flow.open_student();
    flow.set_student_name("Asha");
    let ticket = flow.start_scanning(&mut capture).unwrap();
    flow.go_home();
    assert_eq!(capture.releases.get(), 1);

    // A decode that was in flight when the scanner was torn down.
    flow.scan_decoded(ticket, &payload).unwrap();
    assert_eq!(flow.state(), FlowState::Home);
    assert_eq!(flow.ledger().count(), 0);
}

#[test]
fn decode_after_redemption_is_ignored() {
    let mut flow = CheckinFlow::new();
    let mut capture = MockCapture::default();
    let payload = issued_payload(&mut flow, "192.168.1.10");

    flow.open_student();
    flow.set_student_name("Asha");
    let ticket = flow.start_scanning(&mut capture).unwrap();
    flow.scan_decoded(ticket, &payload).unwrap();

    // A second frame decoded before the camera actually stopped.
    flow.scan_decoded(ticket, &payload).unwrap();
    assert_eq!(flow.ledger().count(), 1);
}

#[test]
fn stale_ticket_from_previous_activation_is_ignored() {
    let mut flow = CheckinFlow::new();
    let mut capture = MockCapture::default();
    let payload = issued_payload(&mut flow, "192.168.1.10");

    flow.open_student();
    flow.set_student_name("Asha");
    let old_ticket = flow.start_scanning(&mut capture).unwrap();
    flow.go_home();

    flow.open_student();
    flow.set_student_name("Bilal");
    let new_ticket = flow.start_scanning(&mut capture).unwrap();
    assert_ne!(old_ticket, new_ticket);

    // The first activation's late decode must not redeem for Bilal.
    flow.scan_decoded(old_ticket, &payload).unwrap();
    assert_eq!(flow.ledger().count(), 0);
    assert_eq!(flow.state(), FlowState::StudentScanning);
}

#[test]
fn dropping_the_flow_releases_an_active_scan() {
    let mut capture = MockCapture::default();
    let releases = Rc::clone(&capture.releases);
    {
        let mut flow = CheckinFlow::new();
        flow.open_student();
        flow.set_student_name("Asha");
        flow.start_scanning(&mut capture).unwrap();
    }
    assert_eq!(releases.get(), 1);
}

#[test]
fn ledger_survives_navigation_and_new_sessions() {
    let mut flow = CheckinFlow::new();
    let mut capture = MockCapture::default();
    let payload = issued_payload(&mut flow, "192.168.1.10");

    for name in ["Asha", "Bilal"] {
        flow.open_student();
        flow.set_student_name(name);
        let ticket = flow.start_scanning(&mut capture).unwrap();
        flow.scan_decoded(ticket, &payload).unwrap();
        flow.go_home();
    }

    // Opening a fresh admin session does not touch the ledger either.
    flow.open_admin();
    flow.submit_manual_address("10.9.8.7").unwrap();
    flow.go_home();

    assert_eq!(flow.ledger().count(), 2);
    let names: Vec<_> = flow.ledger().iter().map(|r| r.student_name()).collect();
    assert_eq!(names, ["Asha", "Bilal"]);
}

#[test]
fn scan_another_clears_name_and_result_but_not_ledger() {
    let mut flow = CheckinFlow::new();
    let mut capture = MockCapture::default();
    let payload = issued_payload(&mut flow, "192.168.1.10");

    flow.open_student();
    flow.set_student_name("Asha");
    let ticket = flow.start_scanning(&mut capture).unwrap();
    flow.scan_decoded(ticket, &payload).unwrap();

    flow.scan_another();
    assert_eq!(flow.state(), FlowState::StudentAwaitingName);
    assert_eq!(flow.student_name(), "");
    assert!(flow.last_redemption().is_none());
    assert_eq!(flow.ledger().count(), 1);
}
