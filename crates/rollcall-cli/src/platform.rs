//! Terminal-backed capability adapters for the kiosk.

use rollcall_flow::{
    CaptureCapability, CaptureHandle, CodeRenderer, ScanTicket, SensorCapability, SensorError,
    SensorReading,
};
use std::cell::Cell;
use std::rc::Rc;

/// Simulated location sensor reporting a fixed position.
///
/// With no configured position it behaves like a platform without
/// geolocation support, forcing the manual-entry path.
pub struct StaticSensor {
    reading: Option<SensorReading>,
}

impl StaticSensor {
    pub fn new(latitude: Option<f64>, longitude: Option<f64>, accuracy: f64) -> Self {
        let reading = match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(SensorReading {
                latitude,
                longitude,
                accuracy,
            }),
            _ => None,
        };
        Self { reading }
    }
}

impl SensorCapability for StaticSensor {
    fn request(&mut self) -> Result<SensorReading, SensorError> {
        self.reading.ok_or(SensorError::Unavailable)
    }
}

/// Paste-a-payload "scanner": while active, lines typed at the prompt
/// stand in for decoded camera frames.
#[derive(Default)]
pub struct TerminalScanner {
    active: Rc<Cell<bool>>,
}

impl TerminalScanner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CaptureCapability for TerminalScanner {
    fn activate(&mut self, _ticket: ScanTicket) -> Box<dyn CaptureHandle> {
        self.active.set(true);
        Box::new(TerminalScannerHandle {
            active: Rc::clone(&self.active),
        })
    }
}

struct TerminalScannerHandle {
    active: Rc<Cell<bool>>,
}

impl CaptureHandle for TerminalScannerHandle {
    fn release(&mut self) {
        self.active.set(false);
    }
}

/// Renders a payload as a framed block standing in for the scannable
/// code raster.
pub struct TextCodeRenderer;

impl CodeRenderer for TextCodeRenderer {
    type Artifact = String;

    fn render(&self, payload: &str) -> String {
        let width = payload.len().min(60);
        let border = "#".repeat(width + 4);
        let mut out = String::new();
        out.push_str(&border);
        out.push('\n');
        for chunk in payload.as_bytes().chunks(width.max(1)) {
            // Payloads are JSON, so chunk boundaries stay on char boundaries.
            let line = String::from_utf8_lossy(chunk);
            out.push_str(&format!("# {:<width$} #\n", line, width = width));
        }
        out.push_str(&border);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_sensor_without_position_is_unavailable() {
        let mut sensor = StaticSensor::new(None, None, 20.0);
        assert!(matches!(sensor.request(), Err(SensorError::Unavailable)));
    }

    #[test]
    fn static_sensor_reports_configured_position() {
        let mut sensor = StaticSensor::new(Some(12.9716), Some(77.5946), 15.0);
        let reading = sensor.request().unwrap();
        assert_eq!(reading.latitude, 12.9716);
        assert_eq!(reading.accuracy, 15.0);
    }

    #[test]
    fn scanner_tracks_activation_through_the_flow() {
        let mut flow = rollcall_flow::CheckinFlow::new();
        let mut scanner = TerminalScanner::new();
        flow.open_student();
        flow.set_student_name("Asha");
        flow.start_scanning(&mut scanner).unwrap();
        assert!(scanner.active.get());
        flow.go_home();
        assert!(!scanner.active.get());
    }

    #[test]
    fn scanner_release_is_idempotent() {
        let mut handle = TerminalScannerHandle {
            active: Rc::new(Cell::new(true)),
        };
        handle.release();
        handle.release();
        assert!(!handle.active.get());
    }

    #[test]
    fn renderer_frames_the_payload() {
        let art = TextCodeRenderer.render("{\"x\":1}");
        assert!(art.starts_with('#'));
        assert!(art.contains("{\"x\":1}"));
    }
}
