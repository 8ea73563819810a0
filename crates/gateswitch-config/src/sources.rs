use std::collections::BTreeMap;

use gateswitch_utils::types::ConfigSource;

use super::Config;

impl Config {
    /// Which layer last mentioned each gate identifier.
    ///
    /// Gates absent from the map keep their registry default.
    #[must_use]
    pub fn gate_sources(&self) -> BTreeMap<String, ConfigSource> {
        let mut sources = BTreeMap::new();
        for layer in &self.layers {
            for (_, token) in layer.tokens() {
                sources.insert(token.identifier, layer.source);
            }
        }
        sources
    }

    /// Source of a scalar setting, `default` when never set
    #[must_use]
    pub fn source_of(&self, key: &str) -> ConfigSource {
        self.source_attribution
            .get(key)
            .copied()
            .unwrap_or(ConfigSource::Default)
    }

    /// Effective scalar settings as `key -> (value, source)`
    #[must_use]
    pub fn effective_config(&self) -> BTreeMap<String, (String, ConfigSource)> {
        let mut config = BTreeMap::new();
        config.insert(
            "strict".to_string(),
            (self.strict.to_string(), self.source_of("strict")),
        );
        config.insert(
            "verbose".to_string(),
            (self.verbose.to_string(), self.source_of("verbose")),
        );
        if let Some(path) = &self.config_path {
            config.insert(
                "config_path".to_string(),
                (path.display().to_string(), self.source_of("config_path")),
            );
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GateLayer;

    #[test]
    fn test_gate_sources_track_last_layer() {
        let config = Config {
            layers: vec![
                GateLayer::new(ConfigSource::Config, "a,-b"),
                GateLayer::new(ConfigSource::Env, "b"),
                GateLayer::new(ConfigSource::Cli, "-c"),
            ],
            ..Default::default()
        };
        let sources = config.gate_sources();
        assert_eq!(sources["a"], ConfigSource::Config);
        assert_eq!(sources["b"], ConfigSource::Env);
        assert_eq!(sources["c"], ConfigSource::Cli);
        assert!(!sources.contains_key("d"));
    }

    #[test]
    fn test_effective_config_defaults() {
        let effective = Config::default().effective_config();
        assert_eq!(
            effective["strict"],
            ("true".to_string(), ConfigSource::Default)
        );
        assert!(!effective.contains_key("config_path"));
    }
}
