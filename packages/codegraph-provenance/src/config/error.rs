//! Errors raised while loading or validating an [`EngineConfig`](super::EngineConfig)

use std::ops::RangeInclusive;
use thiserror::Error;

/// Config versions this build can read
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A budget outside its accepted bounds
    #[error("{field} = {value} is outside {min}..={max} ({hint})")]
    Range {
        field: String,
        value: usize,
        min: usize,
        max: usize,
        hint: &'static str,
    },

    #[error("engine config has no 'version' key; start the document with 'version: 1'")]
    MissingVersion,

    #[error("engine config version {found} is not readable by this build (readable: {})", list(supported))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    #[error("'{0}' is not a preset; pick one of fast, balanced, thorough, custom")]
    UnknownPreset(String),

    /// Two options that cannot be combined
    #[error("'{option}' only works with '{requires}' turned on")]
    Conflict {
        option: &'static str,
        requires: &'static str,
    },

    #[error("cannot read engine config: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed engine config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

fn list(versions: &[u32]) -> String {
    versions
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ConfigError {
    /// Checks `value` against `bounds`, naming the offending field on failure
    pub fn check_range(
        field: &str,
        value: usize,
        bounds: RangeInclusive<usize>,
        hint: &'static str,
    ) -> ConfigResult<()> {
        if bounds.contains(&value) {
            return Ok(());
        }
        Err(Self::Range {
            field: field.to_string(),
            value,
            min: *bounds.start(),
            max: *bounds.end(),
            hint,
        })
    }

    /// Rejects versions outside [`SUPPORTED_VERSIONS`]
    pub fn check_version(version: Option<u32>) -> ConfigResult<()> {
        match version {
            None => Err(Self::MissingVersion),
            Some(found) if SUPPORTED_VERSIONS.contains(&found) => Ok(()),
            Some(found) => Err(Self::UnsupportedVersion {
                found,
                supported: SUPPORTED_VERSIONS.to_vec(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_check_names_field_and_bounds() {
        assert!(ConfigError::check_range("max_visits_per_method", 10, 1..=1000, "at least once").is_ok());

        let msg = ConfigError::check_range("max_visits_per_method", 0, 1..=1000, "at least once")
            .unwrap_err()
            .to_string();
        assert_eq!(msg, "max_visits_per_method = 0 is outside 1..=1000 (at least once)");
    }

    #[test]
    fn test_version_check() {
        assert!(ConfigError::check_version(Some(1)).is_ok());
        assert!(matches!(
            ConfigError::check_version(None),
            Err(ConfigError::MissingVersion)
        ));

        let err = ConfigError::check_version(Some(2)).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedVersion { found: 2, .. }));
        assert!(err.to_string().contains("(readable: 1)"));
        assert!(ConfigError::MissingVersion.to_string().contains("version: 1"));
    }

    #[test]
    fn test_conflict_message() {
        let err = ConfigError::Conflict {
            option: "follow_callees",
            requires: "interprocedural",
        };
        assert_eq!(
            err.to_string(),
            "'follow_callees' only works with 'interprocedural' turned on"
        );
    }
}
