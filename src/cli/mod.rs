//! Command-line interface for gateswitch
//!
//! ## Module Structure
//!
//! - `args`: CLI argument definitions and parsing structures (clap)
//! - `run`: Main entry point and command dispatch
//! - `commands`: Command implementations
//! - `tests`: Test module (cfg(test) only)

pub mod args;
mod commands;
mod run;


// Re-export argument types
pub use args::{Cli, Commands, build_cli, parse_from};

// Re-export run functions
pub use run::{run, run_from};
