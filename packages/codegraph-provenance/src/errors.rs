//! Engine error types

use crate::config::ConfigError;
use thiserror::Error;

/// Errors surfaced by [`SymbolicExecution::analyze`](crate::SymbolicExecution::analyze)
///
/// Statement shapes no handler recognizes are never errors; they simply
/// produce no binding.
#[derive(Debug, Error)]
pub enum ProvenanceError {
    #[error("Entry method not found in ICFG: {0}")]
    EntryMethodNotFound(String),

    #[error("No entry methods given")]
    EmptyInput,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Analysis error: {0}")]
    Analysis(String),
}

impl ProvenanceError {
    pub fn analysis(msg: impl Into<String>) -> Self {
        Self::Analysis(msg.into())
    }
}

pub type ProvenanceResult<T> = Result<T, ProvenanceError>;
