//! CLI entry point and dispatch logic
//!
//! This module owns the `run()` function which:
//! - Registers the builtin gates
//! - Parses CLI arguments against them
//! - Discovers Config and applies every gate layer
//! - Dispatches to command handlers
//! - Handles all error output

use std::ffi::OsString;
use std::io::Write;
use tracing::{debug, info_span, warn};

use gateswitch_registry::{Registry, register_builtin};
use gateswitch_utils::error::UserFriendlyError;
use gateswitch_utils::logging::init_tracing;

use super::args::parse_from;
use super::commands;
use crate::{CliArgs, Config, ExitCode, GateSwitch, GateSwitchError};

/// Main CLI execution function.
///
/// Handles ALL output including errors. On error, prints a user-facing report
/// and returns the exit code; main.rs only maps it to the process exit.
pub fn run() -> Result<(), ExitCode> {
    let stdout = std::io::stdout();
    run_from(std::env::args_os(), &mut stdout.lock())
}

/// [`run`] with explicit arguments and output, for embedding and tests.
pub fn run_from<I, T>(args: I, out: &mut dyn Write) -> Result<(), ExitCode>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let registry = Registry::new();
    if let Err(err) = register_builtin(&registry) {
        report(&GateSwitchError::from(err));
        return Err(ExitCode::INTERNAL);
    }
    let switch = GateSwitch::new(&registry);

    let cli = match parse_from(&switch, args) {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version come through here too
            let failed = err.use_stderr();
            if let Err(print_err) = err.print() {
                eprintln!("✗ Failed to print usage: {print_err}");
            }
            return if failed { Err(ExitCode::CLI_ARGS) } else { Ok(()) };
        }
    };

    let cli_args = CliArgs {
        config_path: cli.config.clone(),
        feature_gates: cli.feature_gates.clone(),
        lenient: cli.lenient,
        verbose: cli.verbose,
    };

    let config = match Config::discover(&cli_args) {
        Ok(config) => config,
        Err(err) => {
            let err = GateSwitchError::from(err);
            report(&err);
            return Err(err.to_exit_code());
        }
    };

    if let Err(err) = init_tracing(config.verbose) {
        debug!(error = %err, "Tracing subscriber already installed");
    }

    let span = info_span!("gateswitch", command = cli.command.name());
    let _guard = span.enter();

    match config.apply(&switch) {
        Ok(()) => {}
        Err(rejected) if !config.strict => {
            for failure in rejected.failures() {
                warn!(
                    segment = %failure.segment,
                    error = %failure.source,
                    "Ignoring rejected feature gate"
                );
            }
        }
        Err(rejected) => {
            let err = GateSwitchError::from(rejected);
            report(&err);
            return Err(err.to_exit_code());
        }
    }
    debug!(feature_gates = %switch, "Feature gates applied");

    match commands::execute(&cli.command, &registry, &config, out) {
        Ok(code) if code == ExitCode::SUCCESS => Ok(()),
        Ok(code) => Err(code),
        Err(err) => {
            report(&err);
            Err(err.to_exit_code())
        }
    }
}

fn report(err: &GateSwitchError) {
    eprintln!("{}", err.display_for_user());
}
