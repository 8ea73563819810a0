//! Feature gate registry
//!
//! Stores gate definitions, their maturity stage and current enabled state.
//! Gates are looked up and mutated by identifier, and enumerated in
//! identifier order.

pub mod builtin;
pub mod error;
pub mod gate;
pub mod registry;

// Re-exports for convenience
pub use builtin::register_builtin;
pub use error::GateError;
pub use gate::{Gate, GateDef, GateInfo, Stage};
pub use registry::{Registry, is_valid_id};
