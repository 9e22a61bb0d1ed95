/*
 * Codegraph Provenance - Value Provenance Engine
 *
 * Interprocedural symbolic execution over an app IR. For every program value
 * the engine records how it was produced (literal, field read, object, call
 * result, operator) and which semantic tags it carries (#now, #here, #sms,
 * comparison markers, ...), so a downstream detector can tell whether a
 * sensitive call is gated by a recognizable runtime condition.
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : IR data model (methods, program values, statements)
 * - features/    : symbolic_execution (domain, ports, infrastructure, application)
 * - config/      : presets, validation, YAML
 * - errors       : crate error type
 */

#![allow(clippy::type_complexity)] // Edge fingerprint maps
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::module_inception)] // Module naming intentional

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// IR data model consumed by the engine
pub mod shared;

/// Feature modules
pub mod features;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{EngineConfig, Preset, RecognizerToggles};
pub use errors::{ProvenanceError, ProvenanceResult};
pub use features::symbolic_execution::{
    tags, AnalysisStats, ConvergenceDiagnostic, ConvergenceReason, IcfgProvider, InMemoryIcfg,
    SymbolicExecution, SymbolicExecutionResult, SymbolicValue, SymbolicValueId, SymbolicValueKind,
};
pub use shared::models::{
    Expr, FieldRef, InvokeExpr, InvokeKind, Literal, MethodBody, MethodSignature, ProgramPoint,
    ProgramValue, Stmt,
};
