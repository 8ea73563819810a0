use std::fmt;
use thiserror::Error;

/// Errors that know how to explain themselves on stderr.
pub trait UserFriendlyError {
    /// One-line description of what went wrong
    fn user_message(&self) -> String;

    /// Background the user needs to fix it, if any
    fn context(&self) -> Option<String>;

    /// Concrete next steps
    fn suggestions(&self) -> Vec<String>;

    fn category(&self) -> ErrorCategory;

    /// Message, context and suggestions as one stderr block
    fn display_for_user(&self) -> String {
        let mut out = format!("✗ {}: {}", self.category(), self.user_message());
        if let Some(context) = self.context() {
            out.push_str("\n\n  ");
            out.push_str(&context);
        }
        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\n\nSuggestions:");
            for suggestion in suggestions {
                out.push_str("\n  • ");
                out.push_str(&suggestion);
            }
        }
        out
    }
}

/// Heading printed in front of a user-facing error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    FeatureGate,
    FileSystem,
    Internal,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Configuration => "Configuration",
            Self::FeatureGate => "Feature Gate",
            Self::FileSystem => "File System",
            Self::Internal => "Internal",
        })
    }
}

/// Failure to locate or read `.gateswitch/config.toml`
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration file {path}: {reason}")]
    InvalidFile { path: String, reason: String },

    #[error("Configuration file not found at {path}")]
    NotFound { path: String },
}

impl UserFriendlyError for ConfigError {
    fn user_message(&self) -> String {
        match self {
            Self::InvalidFile { path, reason } => format!("Cannot read {path}: {reason}"),
            Self::NotFound { path } => format!("No configuration file at {path}"),
        }
    }

    fn context(&self) -> Option<String> {
        Some(match self {
            Self::InvalidFile { .. } => {
                "The file must be TOML with optional `strict`, `verbose` and `feature_gates` keys and a [gates] table of booleans.".to_string()
            }
            Self::NotFound { .. } => {
                "--config must point at an existing file; without it gateswitch searches upward for .gateswitch/config.toml.".to_string()
            }
        })
    }

    fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidFile { .. } => vec![
                "Quote gate identifiers containing '.' in [gates], e.g. \"pipeline.batching\" = false".to_string(),
                "Remove keys gateswitch does not know".to_string(),
            ],
            Self::NotFound { .. } => vec![
                "Check the path passed to --config".to_string(),
                "Omit --config to use discovery".to_string(),
            ],
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Configuration
    }
}
