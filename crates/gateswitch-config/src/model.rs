use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use gateswitch_flag::GateToken;
use gateswitch_utils::types::ConfigSource;

/// Directory searched for upward from the working directory
pub const CONFIG_DIR: &str = ".gateswitch";

/// File name inside [`CONFIG_DIR`]
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable holding a flag value
pub const ENV_FEATURE_GATES: &str = "GATESWITCH_FEATURE_GATES";

/// Command-line inputs relevant to configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Explicit config file (skips discovery)
    pub config_path: Option<PathBuf>,
    /// Raw `--feature-gates` values, in command-line order
    pub feature_gates: Vec<String>,
    /// Warn about rejected gates instead of failing
    pub lenient: bool,
    /// Verbose logging
    pub verbose: bool,
}

/// TOML configuration file structure
///
/// ```toml
/// strict = true
/// feature_gates = "exporter.persistent_queue,-pipeline.batching"
///
/// [gates]
/// "processor.adaptive_sampling" = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub strict: Option<bool>,
    #[serde(default)]
    pub verbose: Option<bool>,
    #[serde(default)]
    pub feature_gates: Option<String>,
    #[serde(default)]
    pub gates: BTreeMap<String, bool>,
}

/// One set of gate requests together with where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateLayer {
    pub source: ConfigSource,
    /// Human-readable form of the layer, as shown by `gateswitch config`
    pub value: String,
    tokens: Vec<(String, GateToken)>,
}

impl GateLayer {
    /// Layer from a flag value such as `a,-b`.
    pub fn new(source: ConfigSource, value: impl Into<String>) -> Self {
        let value = value.into();
        let tokens = GateToken::split(&value)
            .map(|(segment, token)| (segment.to_string(), token))
            .collect();
        Self {
            source,
            value,
            tokens,
        }
    }

    /// Layer from a `[gates]` table.
    ///
    /// Keys are taken as identifiers exactly as written: a key such as
    /// `"-a"` or `"a,b"` names one (unknown) gate.
    pub fn from_table(source: ConfigSource, gates: &BTreeMap<String, bool>) -> Self {
        let value = gates
            .iter()
            .map(|(id, enabled)| format!("{id} = {enabled}"))
            .collect::<Vec<_>>()
            .join(", ");
        let tokens = gates
            .iter()
            .map(|(id, &enabled)| (id.clone(), GateToken::new(id.as_str(), enabled)))
            .collect();
        Self {
            source,
            value,
            tokens,
        }
    }

    /// `(segment, token)` pairs in application order
    pub fn tokens(&self) -> impl Iterator<Item = (&str, GateToken)> {
        self.tokens
            .iter()
            .map(|(segment, token)| (segment.as_str(), token.clone()))
    }
}

/// Effective configuration.
///
/// Built by [`Config::discover()`] with precedence CLI > environment >
/// config file > built-in defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Fail when any gate token is rejected (default: true)
    pub strict: bool,
    /// Verbose logging
    pub verbose: bool,
    /// Config file that was loaded, if any
    pub config_path: Option<PathBuf>,
    /// Gate flag values in application order
    pub layers: Vec<GateLayer>,
    /// Source of each scalar setting
    pub source_attribution: HashMap<String, ConfigSource>,
}

impl Default for Config {
    fn default() -> Self {
        let source_attribution = HashMap::from([
            ("strict".to_string(), ConfigSource::Default),
            ("verbose".to_string(), ConfigSource::Default),
        ]);
        Self {
            strict: true,
            verbose: false,
            config_path: None,
            layers: Vec::new(),
            source_attribution,
        }
    }
}
