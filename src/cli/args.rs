//! CLI argument definitions and parsing structures
//!
//! This module defines the command-line interface using clap, including the
//! main `Cli` struct and the subcommand enum.

use clap::{ArgAction, Command, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::path::PathBuf;

use gateswitch_flag::{FlagValue, TYPE_NAME};

/// gateswitch - toggle named feature gates from one flag
#[derive(Parser, Debug)]
#[command(name = "gateswitch")]
#[command(about = "Enable and disable named feature gates from a single command-line flag")]
#[command(long_about = r#"
gateswitch applies a comma-separated list of feature gate tokens to the gate
registry. A bare or `+`-prefixed identifier enables a gate, a `-`-prefixed
identifier disables it. Every token is applied even if another one is
rejected; all rejections are reported together.

EXAMPLES:
  # Show every gate with its stage and state
  gateswitch --feature-gates exporter.persistent_queue,-pipeline.batching list

  # Print the canonical flag value for the current state
  gateswitch --feature-gates +telemetry.self_metrics render

  # Exit 0 if a gate ends up enabled, 1 otherwise
  gateswitch check processor.adaptive_sampling

CONFIGURATION:
  Gate values are applied in order, later values winning:
  .gateswitch/config.toml ([gates] table, then feature_gates string),
  GATESWITCH_FEATURE_GATES, then each --feature-gates flag.
  The config file is discovered by searching upward from the current directory.
"#)]
#[command(version)]
pub struct Cli {
    /// Comma-separated gate tokens: `id` or `+id` enables, `-id` disables (repeatable)
    #[arg(
        long = "feature-gates",
        global = true,
        value_name = TYPE_NAME,
        action = ArgAction::Append,
        allow_hyphen_values = true
    )]
    pub feature_gates: Vec<String>,

    /// Path to configuration file (overrides discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Warn about rejected gates instead of failing
    #[arg(long, global = true)]
    pub lenient: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List every registered gate with its stage and state
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the canonical flag value for the current gate state
    Render,

    /// Exit 0 if the gate is enabled, 1 if it is disabled
    Check {
        /// Gate identifier
        id: String,
    },

    /// Show the effective configuration and gate layers
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Short name used in logs and error reports
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::List { .. } => "list",
            Self::Render => "render",
            Self::Check { .. } => "check",
            Self::Config { .. } => "config",
        }
    }
}

/// Build the clap command, showing the registry's defaults in `--feature-gates` help.
pub fn build_cli<F>(flag: &F) -> Command
where
    F: FlagValue,
{
    let defaults = flag.render();
    Cli::command().mut_arg("feature_gates", |arg| {
        arg.long_help(format!(
            "Comma-separated gate tokens: `id` or `+id` enables, `-id` disables. \
             May be repeated; later values win.\n\n[{}: {}]",
            flag.type_name(),
            if defaults.is_empty() { "none" } else { defaults.as_str() }
        ))
    })
}

/// Parse `args` against the command built for `flag`.
pub fn parse_from<F, I, T>(flag: &F, args: I) -> Result<Cli, clap::Error>
where
    F: FlagValue,
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let mut command = build_cli(flag);
    let matches = command.try_get_matches_from_mut(args)?;
    Cli::from_arg_matches(&matches).map_err(|err| err.format(&mut command))
}
