//! Interaction state machine for rollcall check-ins.
//!
//! This crate provides:
//! - [`CheckinFlow`] - the single state machine behind both the admin
//!   (issue a session) and student (redeem a session) roles
//! - Capability contracts for the external collaborators: location
//!   sensor, camera capture, and code rendering
//! - Ticket-correlated resolution of asynchronous capability results,
//!   so callbacks that fire after a scanner was released are ignored
//!
//! ## Quick Start
//!
//! ```rust
//! use rollcall_flow::{CheckinFlow, FlowState};
//!
//! let mut flow = CheckinFlow::new();
//! flow.open_admin();
//! flow.submit_manual_address("192.168.1.10")?;
//! assert_eq!(flow.state(), FlowState::AdminSessionOpen);
//!
//! let payload = flow.session().map(|s| s.transport.clone());
//! # let _ = payload;
//! # Ok::<(), rollcall_flow::FlowError>(())
//! ```
//!
//! The flow owns the attendance ledger; navigation never clears it.

#![deny(missing_docs)]

/// External capability contracts.
pub mod capability;
/// Flow error taxonomy.
pub mod errors;
/// The state machine.
pub mod flow;
/// States and resolution tickets.
pub mod state;

pub use capability::{
    CaptureCapability, CaptureHandle, CodeRenderer, SensorCapability, SensorError, SensorReading,
    RECOMMENDED_SENSOR_TIMEOUT,
};
pub use errors::FlowError;
pub use flow::CheckinFlow;
pub use state::{FlowState, ScanTicket, SensorTicket};
