//! Configuration I/O (YAML)

use super::engine_config::{EngineConfig, RecognizerToggles};
use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use super::validation::Validatable;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    #[serde(default)]
    pub version: Option<u32>,

    /// Base preset
    pub preset: String,

    /// Fine-grained overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<EngineOverrides>,
}

/// Per-field overrides on top of the preset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_visits_per_method: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_worklist_iterations: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interprocedural: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_callees: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recognizers: Option<RecognizerToggles>,
}

impl EngineOverrides {
    fn apply(self, mut config: EngineConfig) -> EngineConfig {
        if let Some(v) = self.max_visits_per_method {
            config.max_visits_per_method = v;
        }
        if let Some(v) = self.max_worklist_iterations {
            config.max_worklist_iterations = v;
        }
        if let Some(v) = self.interprocedural {
            config.interprocedural = v;
        }
        if let Some(v) = self.follow_callees {
            config.follow_callees = v;
        }
        if let Some(v) = self.recognizers {
            config.recognizers = v;
        }
        config
    }
}

impl EngineConfig {
    /// Parses a v1 YAML document and validates the result
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        ConfigError::check_version(export.version)?;
        let preset: Preset = export.preset.parse()?;

        let config = EngineConfig::preset(preset);
        let config = match export.overrides {
            Some(overrides) => overrides.apply(config),
            None => config,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Exports as v1 YAML with every field written as an override
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: Some(1),
            preset: self.preset.to_string(),
            overrides: Some(EngineOverrides {
                max_visits_per_method: Some(self.max_visits_per_method),
                max_worklist_iterations: Some(self.max_worklist_iterations),
                interprocedural: Some(self.interprocedural),
                follow_callees: Some(self.follow_callees),
                recognizers: Some(self.recognizers),
            }),
        };

        serde_yaml::to_string(&export).map_err(ConfigError::Yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_yaml_roundtrip() {
        let config = EngineConfig::preset(Preset::Thorough).max_visits_per_method(80);

        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("preset: thorough"));
        assert!(yaml.contains("max_visits_per_method: 80"));

        let back = EngineConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_yaml_loading() {
        let yaml_content = r#"
version: 1
preset: fast
overrides:
  max_worklist_iterations: 500
  recognizers:
    sms: false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml_content.as_bytes()).unwrap();

        let config = EngineConfig::from_yaml_file(temp_file.path()).unwrap();
        assert_eq!(config.preset, Preset::Fast);
        assert_eq!(config.max_visits_per_method, 3);
        assert_eq!(config.max_worklist_iterations, 500);
        assert!(!config.recognizers.sms);
        assert!(config.recognizers.string);
    }

    #[test]
    fn test_yaml_missing_version() {
        let result = EngineConfig::from_yaml_str("preset: fast\n");
        assert!(matches!(result, Err(ConfigError::MissingVersion)));
    }

    #[test]
    fn test_yaml_unsupported_version() {
        let result = EngineConfig::from_yaml_str("version: 2\npreset: fast\n");
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn test_yaml_unknown_fields_rejected() {
        let yaml = "version: 1\npreset: fast\noverrides:\n  max_depth: 3\n";
        assert!(matches!(
            EngineConfig::from_yaml_str(yaml),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_yaml_override_is_validated() {
        let yaml = "version: 1\npreset: balanced\noverrides:\n  max_visits_per_method: 0\n";
        assert!(matches!(
            EngineConfig::from_yaml_str(yaml),
            Err(ConfigError::Range { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = EngineConfig::from_yaml_file("/nonexistent/engine.yaml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
