//! Foundation utilities shared by the gateswitch crates

pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod types;
