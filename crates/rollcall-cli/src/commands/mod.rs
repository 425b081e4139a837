//! Subcommand implementations.

pub mod inspect;
pub mod issue;
pub mod kiosk;
pub mod redeem;
