// Symbolic execution / value provenance
//
// Hexagonal Architecture:
// - domain: symbolic values, tags, per-value histories, value context
// - ports: the ICFG protocol the engine consumes
// - infrastructure: in-memory ICFG, resolution context, recognizers, handlers
// - application: worklist driver and result

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-export application layer (primary interface)
pub use application::{
    AnalysisStats, ConvergenceDiagnostic, ConvergenceReason, SymbolicExecution,
    SymbolicExecutionResult,
};

pub use domain::{
    tags, Binding, ContextualValues, HistoryEntry, SymbolicValue, SymbolicValueId,
    SymbolicValueKind, ValueContext,
};
pub use infrastructure::{
    HandlerChain, InMemoryIcfg, MethodRecognizer, RecognizerChain, ResolutionContext,
    TypeHandler,
};
pub use ports::IcfgProvider;
