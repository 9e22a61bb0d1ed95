//! Engine configuration
//!
//! Two tiers:
//! - Preset: `EngineConfig::preset(Preset::Fast)`
//! - YAML v1: `EngineConfig::from_yaml_file("engine.yaml")`, a preset plus
//!   per-field overrides
//!
//! ```rust,ignore
//! use codegraph_provenance::config::{EngineConfig, Preset};
//!
//! let config = EngineConfig::preset(Preset::Balanced)
//!     .max_visits_per_method(20)
//!     .build()?;
//! ```

pub mod engine_config;
pub mod error;
pub mod io;
pub mod preset;
pub mod validation;

pub use engine_config::{EngineConfig, RecognizerToggles};
pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigExportV1, EngineOverrides};
pub use preset::Preset;
pub use validation::Validatable;
