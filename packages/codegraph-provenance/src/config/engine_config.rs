//! Engine configuration

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use super::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Recognizer families to enable
///
/// A disabled family's types fall through to the object handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecognizerToggles {
    #[serde(default = "default_true")]
    pub string: bool,
    #[serde(default = "default_true")]
    pub numeric: bool,
    #[serde(default = "default_true")]
    pub boolean: bool,
    #[serde(default = "default_true")]
    pub date_time: bool,
    #[serde(default = "default_true")]
    pub location: bool,
    #[serde(default = "default_true")]
    pub sms: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RecognizerToggles {
    fn default() -> Self {
        Self {
            string: true,
            numeric: true,
            boolean: true,
            date_time: true,
            location: true,
            sms: true,
        }
    }
}

impl RecognizerToggles {
    /// Every family off: only the object handler remains
    pub fn none() -> Self {
        Self {
            string: false,
            numeric: false,
            boolean: false,
            date_time: false,
            location: false,
            sms: false,
        }
    }
}

/// Symbolic execution settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Preset the budgets came from
    #[serde(default)]
    pub preset: Preset,

    /// Visits of one method before it is abandoned (1..=1000)
    pub max_visits_per_method: usize,

    /// Total worklist pops before the run stops (1..=10_000_000)
    pub max_worklist_iterations: usize,

    /// Resolve parameters through call sites and use return summaries
    pub interprocedural: bool,

    /// Enqueue callees with a body when a call to them is analysed
    pub follow_callees: bool,

    #[serde(default)]
    pub recognizers: RecognizerToggles,
}

impl EngineConfig {
    pub fn preset(preset: Preset) -> Self {
        let (max_visits_per_method, max_worklist_iterations) = preset.budgets();
        Self {
            preset,
            max_visits_per_method,
            max_worklist_iterations,
            interprocedural: true,
            follow_callees: true,
            recognizers: RecognizerToggles::default(),
        }
    }

    /// Builder: Set max_visits_per_method
    pub fn max_visits_per_method(mut self, v: usize) -> Self {
        self.max_visits_per_method = v;
        self
    }

    /// Builder: Set max_worklist_iterations
    pub fn max_worklist_iterations(mut self, v: usize) -> Self {
        self.max_worklist_iterations = v;
        self
    }

    /// Builder: Set interprocedural
    pub fn interprocedural(mut self, v: bool) -> Self {
        self.interprocedural = v;
        self
    }

    /// Builder: Set follow_callees
    pub fn follow_callees(mut self, v: bool) -> Self {
        self.follow_callees = v;
        self
    }

    /// Builder: adjust recognizer families
    pub fn recognizers(mut self, f: impl FnOnce(RecognizerToggles) -> RecognizerToggles) -> Self {
        self.recognizers = f(self.recognizers);
        self
    }

    /// Validates and returns the config
    pub fn build(self) -> ConfigResult<Self> {
        self.validate()?;
        Ok(self)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}

impl Validatable for EngineConfig {
    fn validate(&self) -> ConfigResult<()> {
        ConfigError::check_range(
            "max_visits_per_method",
            self.max_visits_per_method,
            1..=1000,
            "each reachable method needs one visit",
        )?;
        ConfigError::check_range(
            "max_worklist_iterations",
            self.max_worklist_iterations,
            1..=10_000_000,
            "the worklist must be able to drain",
        )?;

        if self.follow_callees && !self.interprocedural {
            return Err(ConfigError::Conflict {
                option: "follow_callees",
                requires: "interprocedural",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        for preset in [Preset::Fast, Preset::Balanced, Preset::Thorough, Preset::Custom] {
            assert!(EngineConfig::preset(preset).validate().is_ok(), "{}", preset);
        }
    }

    #[test]
    fn test_builder_overrides() {
        let config = EngineConfig::preset(Preset::Fast)
            .max_visits_per_method(7)
            .recognizers(|r| RecognizerToggles { sms: false, ..r })
            .build()
            .unwrap();
        assert_eq!(config.max_visits_per_method, 7);
        assert_eq!(config.max_worklist_iterations, 10_000);
        assert!(!config.recognizers.sms);
        assert!(config.recognizers.location);
    }

    #[test]
    fn test_range_errors() {
        let err = EngineConfig::default().max_visits_per_method(0).build().unwrap_err();
        assert!(matches!(err, ConfigError::Range { ref field, .. } if field == "max_visits_per_method"));

        let err = EngineConfig::default()
            .max_worklist_iterations(10_000_001)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("max_worklist_iterations"));
    }

    #[test]
    fn test_follow_callees_needs_interprocedural() {
        let err = EngineConfig::default().interprocedural(false).build().unwrap_err();
        assert!(matches!(err, ConfigError::Conflict { option: "follow_callees", .. }));
        assert!(EngineConfig::default()
            .interprocedural(false)
            .follow_callees(false)
            .build()
            .is_ok());
    }
}
