//! Feature gate flag value
//!
//! Adapts a compact textual flag value such as `alpha,-beta,+gamma` to a
//! sequence of enable/disable requests against a gate registry, and renders
//! the registry's current state back into the same syntax.
//!
//! ```rust
//! use gateswitch_flag::GateSwitch;
//! use gateswitch_registry::{GateDef, Registry, Stage};
//!
//! let registry = Registry::new();
//! registry.must_register(GateDef::new("alpha", Stage::Alpha));
//! registry.must_register(GateDef::new("beta", Stage::Beta));
//!
//! let switch = GateSwitch::new(&registry);
//! switch.set("alpha,-beta").unwrap();
//! assert_eq!(switch.render(), "alpha,-beta");
//!
//! let err = switch.set("-alpha,ghost").unwrap_err();
//! assert_eq!(err.identifiers().collect::<Vec<_>>(), ["ghost"]);
//! assert!(!registry.is_enabled("alpha"));
//! ```

pub mod error;
pub mod switch;
pub mod token;

pub use error::{AggregateError, GateFailure};
pub use switch::{FlagValue, GateRegistry, GateSwitch, TYPE_NAME};
pub use token::GateToken;
