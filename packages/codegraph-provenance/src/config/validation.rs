//! Validation seam shared by everything the engine accepts as configuration

use super::error::ConfigResult;

/// Checked once before a run starts, so budgets never need re-checking inside
/// the worklist loop
pub trait Validatable {
    fn validate(&self) -> ConfigResult<()>;
}
