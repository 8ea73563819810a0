//! Shared value types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source of a configuration value.
///
/// Indicates where a value originated from in the precedence chain:
/// CLI arguments > environment > config file > built-in defaults.
///
/// # Serialization
///
/// Serializes to lowercase strings: `"cli"`, `"env"`, `"config"`, `"default"`.
///
/// # Example
///
/// ```rust
/// use gateswitch_utils::types::ConfigSource;
///
/// let source = ConfigSource::Cli;
/// let json = serde_json::to_string(&source).unwrap();
/// assert_eq!(json, r#""cli""#);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    /// Built-in default value (lowest precedence).
    Default,
    /// Value loaded from the configuration file.
    Config,
    /// Value read from an environment variable.
    Env,
    /// Value provided via CLI argument (highest precedence).
    Cli,
}

impl ConfigSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Config => "config",
            Self::Env => "env",
            Self::Cli => "cli",
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_source_serialization() {
        assert_eq!(serde_json::to_string(&ConfigSource::Env).unwrap(), r#""env""#);
        assert_eq!(
            serde_json::from_str::<ConfigSource>(r#""config""#).unwrap(),
            ConfigSource::Config
        );
    }

    #[test]
    fn test_config_source_precedence_order() {
        assert!(ConfigSource::Cli > ConfigSource::Env);
        assert!(ConfigSource::Env > ConfigSource::Config);
        assert!(ConfigSource::Config > ConfigSource::Default);
    }
}
