/// The interaction states a running flow moves through.
///
/// `Home` is the initial state. Admin states cover session issuance,
/// student states cover redemption; the two roles never share transient
/// working state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// Role selection; nothing in progress.
    Home,
    /// Admin panel open, no session yet; a sensor read may be pending.
    AdminAwaitingLocation,
    /// A session token is issued and displayable.
    AdminSessionOpen,
    /// Student panel open, waiting for a usable name.
    StudentAwaitingName,
    /// Capture capability active, waiting for a decoded payload.
    StudentScanning,
    /// A redemption was recorded for the entered name.
    StudentRedeemed,
}

/// Correlates one sensor activation with its single resolution.
///
/// A resolution carrying a ticket that is no longer current is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorTicket(pub(crate) u64);

/// Correlates one capture activation with its decode callbacks.
///
/// Callbacks carrying a ticket that is no longer current (the scanner
/// was released or replaced) are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanTicket(pub(crate) u64);
