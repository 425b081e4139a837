//! Session token issuance and the transport-payload codec.
//!
//! This crate provides:
//! - [`SessionToken`] - the structured payload minted when a session opens
//! - [`TokenIssuer`] - fresh session-id minting with in-process uniqueness
//! - [`encode`] / [`decode`] - the lossless JSON wire codec
//!
//! ## Quick Start
//!
//! ```rust
//! use rollcall_claims::LocationClaim;
//! use rollcall_token::{decode, TokenIssuer};
//!
//! let claim = LocationClaim::from_manual_address("192.168.1.10")?;
//! let mut issuer = TokenIssuer::new();
//! let issued = issuer.issue(claim)?;
//!
//! // The transport string is what gets rendered as a scannable code.
//! let token = decode(&issued.transport)?;
//! assert_eq!(token.claim, issued.token.claim);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Decoding performs no freshness or signature check: any holder of a
//! transport string can redeem it, repeatedly. The session id is a
//! display/traceability handle, not a credential.

#![deny(missing_docs)]

/// Error types for encoding and decoding.
pub mod errors;
/// Session id minting.
pub mod issuer;
/// Session token types.
pub mod token;
/// Wire format serialization.
pub mod wire;

pub use errors::{DecodeError, EncodeError};
pub use issuer::{IssueOptions, TokenIssuer, SESSION_ID_ALPHABET};
pub use token::{IssuedSession, SessionToken};
pub use wire::{decode, encode};
