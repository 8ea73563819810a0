//! gateswitch - enable and disable named feature gates from one flag
//!
//! A single `--feature-gates` value such as `alpha,-beta,+gamma` enables
//! `alpha` and `gamma` and disables `beta`. Every token is applied even when a
//! sibling is rejected, and all rejections are reported together.
//!
//! gateswitch can be used in two ways:
//! - **CLI**: the `gateswitch` binary lists, renders and checks the builtin gates
//! - **Library**: bind a [`GateSwitch`] to your own [`Registry`] and feed it
//!   the flag value your argument parser collected
//!
//! # Quick Start (Library)
//!
//! ```rust
//! use gateswitch::{GateDef, GateSwitch, Registry, Stage};
//!
//! let registry = Registry::new();
//! registry.must_register(GateDef::new("exporter.retry", Stage::Alpha));
//!
//! let switch = GateSwitch::new(&registry);
//! switch.set("+exporter.retry").unwrap();
//! assert!(registry.is_enabled("exporter.retry"));
//! assert_eq!(switch.to_string(), "exporter.retry");
//! ```
//!
//! # Configuration
//!
//! Flag values are layered: `.gateswitch/config.toml`, then
//! `GATESWITCH_FEATURE_GATES`, then each `--feature-gates` occurrence. See
//! [`Config`].

pub mod cli;
pub mod error;

pub use error::GateSwitchError;
pub use gateswitch_config::{CliArgs, Config};
pub use gateswitch_flag::{
    AggregateError, FlagValue, GateFailure, GateRegistry, GateSwitch, GateToken, TYPE_NAME,
};
pub use gateswitch_registry::{Gate, GateDef, GateError, GateInfo, Registry, Stage};
pub use gateswitch_utils::exit_codes::ExitCode;
