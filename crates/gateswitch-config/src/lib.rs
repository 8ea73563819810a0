//! Configuration for gateswitch
//!
//! Gate settings come from several layers that are applied in order, later
//! layers winning:
//!
//! 1. registry defaults (each gate's stage)
//! 2. the `[gates]` table of `.gateswitch/config.toml`
//! 3. the `feature_gates` string of the same file
//! 4. the `GATESWITCH_FEATURE_GATES` environment variable
//! 5. every `--feature-gates` flag, in command-line order

mod apply;
mod discovery;
mod model;
mod sources;

pub use model::{
    CONFIG_DIR, CONFIG_FILE, CliArgs, Config, ENV_FEATURE_GATES, GateLayer, TomlConfig,
};
