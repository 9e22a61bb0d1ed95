//! Application layer: the worklist driver and its result

pub mod driver;
pub mod result;

pub use driver::SymbolicExecution;
pub use result::{AnalysisStats, ConvergenceDiagnostic, ConvergenceReason, SymbolicExecutionResult};
