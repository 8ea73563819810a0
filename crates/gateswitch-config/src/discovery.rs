use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use gateswitch_utils::error::ConfigError;
use gateswitch_utils::types::ConfigSource;

use crate::model::{CONFIG_DIR, CONFIG_FILE, CliArgs, Config, ENV_FEATURE_GATES, GateLayer, TomlConfig};

impl Config {
    /// Discover and load configuration with precedence: CLI > env > file > defaults
    ///
    /// Uses the current working directory for config file discovery when no
    /// explicit path is provided in `cli_args`.
    pub fn discover(cli_args: &CliArgs) -> Result<Self> {
        let start_dir = std::env::current_dir().context("Failed to get current directory")?;
        Self::discover_from(&start_dir, cli_args)
    }

    /// Discover and load configuration starting from a specific directory
    pub fn discover_from(start_dir: &Path, cli_args: &CliArgs) -> Result<Self> {
        let env_gates = match std::env::var(ENV_FEATURE_GATES) {
            Ok(value) => Some(value),
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                warn!(var = ENV_FEATURE_GATES, "Ignoring non-UTF-8 environment variable");
                None
            }
        };
        Self::discover_with_env(start_dir, cli_args, env_gates.as_deref())
    }

    /// Path- and environment-driven variant used by tests to avoid process-global state.
    pub fn discover_with_env(
        start_dir: &Path,
        cli_args: &CliArgs,
        env_gates: Option<&str>,
    ) -> Result<Self> {
        let mut config = Config::default();

        let config_path = match &cli_args.config_path {
            Some(explicit) => {
                if !explicit.is_file() {
                    return Err(ConfigError::NotFound {
                        path: explicit.display().to_string(),
                    }
                    .into());
                }
                Some(explicit.clone())
            }
            None => Self::discover_config_file_from(start_dir),
        };

        if let Some(path) = &config_path {
            let file_config = Self::load_config_file(path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))?;
            debug!(path = %path.display(), "Loaded config file");
            config.apply_file(file_config);
            config.config_path = Some(path.clone());
            let source = if cli_args.config_path.is_some() {
                ConfigSource::Cli
            } else {
                ConfigSource::Config
            };
            config
                .source_attribution
                .insert("config_path".to_string(), source);
        }

        if let Some(value) = env_gates.filter(|value| !value.is_empty()) {
            config.layers.push(GateLayer::new(ConfigSource::Env, value));
        }

        for value in &cli_args.feature_gates {
            config.layers.push(GateLayer::new(ConfigSource::Cli, value.as_str()));
        }

        if cli_args.lenient {
            config.strict = false;
            config.source_attribution.insert("strict".to_string(), ConfigSource::Cli);
        }
        if cli_args.verbose {
            config.verbose = true;
            config.source_attribution.insert("verbose".to_string(), ConfigSource::Cli);
        }

        Ok(config)
    }

    /// Search upward from `start_dir` for `.gateswitch/config.toml`.
    ///
    /// Stops at the filesystem root or at a repository root (`.git`, `.hg`, `.svn`).
    pub fn discover_config_file_from(start_dir: &Path) -> Option<PathBuf> {
        for dir in start_dir.ancestors() {
            let candidate = dir.join(CONFIG_DIR).join(CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }
            if [".git", ".hg", ".svn"].iter().any(|marker| dir.join(marker).exists()) {
                break;
            }
        }
        None
    }

    /// Load configuration from a TOML file
    pub fn load_config_file(path: &Path) -> Result<TomlConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::NotFound {
                path: path.display().to_string(),
            },
            _ => ConfigError::InvalidFile {
                path: path.display().to_string(),
                reason: e.to_string(),
            },
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::InvalidFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn apply_file(&mut self, file: TomlConfig) {
        if let Some(strict) = file.strict {
            self.strict = strict;
            self.source_attribution.insert("strict".to_string(), ConfigSource::Config);
        }
        if let Some(verbose) = file.verbose {
            self.verbose = verbose;
            self.source_attribution.insert("verbose".to_string(), ConfigSource::Config);
        }
        if !file.gates.is_empty() {
            self.layers
                .push(GateLayer::from_table(ConfigSource::Config, &file.gates));
        }
        if let Some(value) = file.feature_gates.filter(|value| !value.is_empty()) {
            self.layers.push(GateLayer::new(ConfigSource::Config, value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateswitch_flag::GateToken;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let config_dir = dir.join(CONFIG_DIR);
        fs::create_dir_all(&config_dir).unwrap();
        let path = config_dir.join(CONFIG_FILE);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_any_source() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        let config = Config::discover_with_env(temp.path(), &CliArgs::default(), None).unwrap();
        assert!(config.strict);
        assert!(!config.verbose);
        assert!(config.layers.is_empty());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_layers_in_precedence_order() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            r#"
feature_gates = "b"

[gates]
a = true
c = false
"#,
        );
        let cli = CliArgs {
            feature_gates: vec!["-a".to_string(), "d".to_string()],
            ..Default::default()
        };
        let config = Config::discover_with_env(temp.path(), &cli, Some("-b")).unwrap();
        assert_eq!(
            config.layers,
            [
                GateLayer::from_table(
                    ConfigSource::Config,
                    &BTreeMap::from([("a".to_string(), true), ("c".to_string(), false)])
                ),
                GateLayer::new(ConfigSource::Config, "b"),
                GateLayer::new(ConfigSource::Env, "-b"),
                GateLayer::new(ConfigSource::Cli, "-a"),
                GateLayer::new(ConfigSource::Cli, "d"),
            ]
        );
    }

    #[test]
    fn test_discovery_walks_upward() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), "strict = false\n");
        let nested = temp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(Config::discover_config_file_from(&nested), Some(path.clone()));
        let config = Config::discover_with_env(&nested, &CliArgs::default(), None).unwrap();
        assert!(!config.strict);
        assert_eq!(config.config_path, Some(path));
        assert_eq!(config.source_attribution["strict"], ConfigSource::Config);
        assert_eq!(config.source_of("config_path"), ConfigSource::Config);
    }

    #[test]
    fn test_explicit_config_path_is_attributed_to_cli() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), "");
        let cli = CliArgs {
            config_path: Some(path),
            ..Default::default()
        };
        let config = Config::discover_with_env(temp.path(), &cli, None).unwrap();
        assert_eq!(config.source_of("config_path"), ConfigSource::Cli);
    }

    #[test]
    fn test_gates_table_keys_are_not_reparsed() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            "[gates]\n\"-alpha\" = true\n\"beta,gamma\" = true\n",
        );
        let config = Config::discover_with_env(temp.path(), &CliArgs::default(), None).unwrap();
        let tokens: Vec<_> = config.layers[0].tokens().map(|(_, t)| t).collect();
        assert_eq!(
            tokens,
            [
                GateToken::new("-alpha", true),
                GateToken::new("beta,gamma", true),
            ]
        );
    }

    #[test]
    fn test_discovery_stops_at_repo_root() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "strict = false\n");
        let repo = temp.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();
        assert_eq!(Config::discover_config_file_from(&repo), None);
    }

    #[test]
    fn test_cli_overrides_file_strictness() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "strict = true\nverbose = false\n");
        let cli = CliArgs {
            lenient: true,
            verbose: true,
            ..Default::default()
        };
        let config = Config::discover_with_env(temp.path(), &cli, None).unwrap();
        assert!(!config.strict);
        assert!(config.verbose);
        assert_eq!(config.source_attribution["strict"], ConfigSource::Cli);
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        let temp = TempDir::new().unwrap();
        let cli = CliArgs {
            config_path: Some(temp.path().join("nope.toml")),
            ..Default::default()
        };
        let err = Config::discover_with_env(temp.path(), &cli, None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::NotFound { .. })
        ));
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), "[gates]\nalpha = \"yes\"\n");
        let err = Config::load_config_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFile { .. }));

        let path = write_config(temp.path(), "unknown_key = 1\n");
        assert!(Config::load_config_file(&path).is_err());
    }

    #[test]
    fn test_empty_values_add_no_layers() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "feature_gates = \"\"\n");
        let config = Config::discover_with_env(temp.path(), &CliArgs::default(), Some("")).unwrap();
        assert!(config.layers.is_empty());
    }
}
