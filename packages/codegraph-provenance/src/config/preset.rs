//! Budget presets
//!
//! Presets only differ in analysis budgets; every preset is interprocedural
//! with all recognizer families enabled.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// CI: 3 visits per method, 10_000 worklist iterations
    Fast,

    /// 10 visits per method, 100_000 worklist iterations
    #[default]
    Balanced,

    /// Audits of large apps with deep call chains
    ///
    /// 50 visits per method, 1_000_000 worklist iterations.
    Thorough,

    /// Hand-tuned in YAML, starts from balanced budgets
    Custom,
}

const NAMES: [(Preset, &str); 4] = [
    (Preset::Fast, "fast"),
    (Preset::Balanced, "balanced"),
    (Preset::Thorough, "thorough"),
    (Preset::Custom, "custom"),
];

impl Preset {
    /// `(max_visits_per_method, max_worklist_iterations)`
    pub fn budgets(&self) -> (usize, usize) {
        match self {
            Self::Fast => (3, 10_000),
            Self::Balanced | Self::Custom => (10, 100_000),
            Self::Thorough => (50, 1_000_000),
        }
    }

    pub fn name(&self) -> &'static str {
        NAMES
            .iter()
            .find(|(preset, _)| preset == self)
            .map_or("custom", |(_, name)| name)
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    /// Case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NAMES
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(s.trim()))
            .map(|(preset, _)| *preset)
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_roundtrip() {
        for (preset, name) in NAMES {
            assert_eq!(preset.to_string(), name);
            assert_eq!(name.parse::<Preset>().unwrap(), preset);
        }
        assert_eq!("Thorough".parse::<Preset>().unwrap(), Preset::Thorough);
    }

    #[test]
    fn test_unknown_name() {
        let err = "exhaustive".parse::<Preset>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPreset(ref name) if name == "exhaustive"));
        assert!(err.to_string().contains("fast, balanced, thorough"));
    }

    #[test]
    fn test_budgets_grow_with_preset() {
        let (fast_visits, fast_iters) = Preset::Fast.budgets();
        let (visits, iters) = Preset::default().budgets();
        let (deep_visits, deep_iters) = Preset::Thorough.budgets();
        assert!(fast_visits < visits && visits < deep_visits);
        assert!(fast_iters < iters && iters < deep_iters);
        assert_eq!(Preset::Custom.budgets(), Preset::Balanced.budgets());
    }
}
