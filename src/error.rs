use thiserror::Error;

use gateswitch_flag::AggregateError;
use gateswitch_registry::GateError;
use gateswitch_utils::error::{ConfigError, ErrorCategory, UserFriendlyError};
use gateswitch_utils::exit_codes::ExitCode;

/// Top-level error for the `gateswitch` binary and library entry points.
///
/// # Exit Code Mapping
///
/// | Exit Code | Error Type |
/// |-----------|------------|
/// | 2 | Configuration errors, unknown gate passed to `check` |
/// | 3 | Rejected `--feature-gates` tokens |
/// | 1 | Other errors |
#[derive(Error, Debug)]
pub enum GateSwitchError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Gates(#[from] AggregateError),

    #[error("Feature gate error: {0}")]
    Gate(#[from] GateError),

    #[error("Failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0:#}")]
    Other(anyhow::Error),
}

impl From<anyhow::Error> for GateSwitchError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ConfigError>() {
            Ok(config) => Self::Config(config),
            Err(other) => Self::Other(other),
        }
    }
}

impl GateSwitchError {
    /// Map the error to the documented exit code
    #[must_use]
    pub fn to_exit_code(&self) -> ExitCode {
        match self {
            Self::Config(_) | Self::Gate(_) | Self::Other(_) => ExitCode::CLI_ARGS,
            Self::Gates(_) => ExitCode::GATE_REJECTED,
            Self::Json(_) | Self::Io(_) => ExitCode::INTERNAL,
        }
    }
}

impl UserFriendlyError for GateSwitchError {
    fn user_message(&self) -> String {
        match self {
            Self::Config(err) => err.user_message(),
            Self::Gates(agg) => {
                let mut msg = format!("{} feature gate token(s) rejected:", agg.len());
                for failure in agg.failures() {
                    msg.push_str(&format!("\n  - {failure}"));
                }
                msg
            }
            other => other.to_string(),
        }
    }

    fn context(&self) -> Option<String> {
        match self {
            Self::Config(err) => err.context(),
            Self::Gates(_) | Self::Gate(_) => Some(
                "Gates are enabled with `id` or `+id` and disabled with `-id`. Stable gates cannot be disabled and deprecated gates cannot be enabled."
                    .to_string(),
            ),
            _ => None,
        }
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Config(err) => err.suggestions(),
            Self::Gates(_) | Self::Gate(_) => vec![
                "Run `gateswitch list` to see registered gates and their stages".to_string(),
                "Pass --lenient to warn about rejected gates instead of failing".to_string(),
            ],
            _ => vec!["Run with --verbose for more detailed output".to_string()],
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Config(_) | Self::Other(_) => ErrorCategory::Configuration,
            Self::Gates(_) | Self::Gate(_) => ErrorCategory::FeatureGate,
            Self::Io(_) => ErrorCategory::FileSystem,
            Self::Json(_) => ErrorCategory::Internal,
        }
    }
}
