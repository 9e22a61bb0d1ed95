//! Analysis result: the final value context plus run diagnostics

use crate::errors::ProvenanceResult;
use crate::features::symbolic_execution::domain::{
    HistoryEntry, SymbolicValue, SymbolicValueId, ValueContext,
};
use crate::features::symbolic_execution::infrastructure::ReturnSummaries;
use crate::shared::models::{MethodSignature, ProgramValue};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// Why a method (or the whole run) stopped short of a fixpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvergenceReason {
    /// The method was re-queued after using up `max_visits_per_method`
    VisitBudgetExhausted,

    /// The run stopped after `max_worklist_iterations` pops
    IterationBudgetExhausted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvergenceDiagnostic {
    pub method: MethodSignature,
    /// Visits completed when the budget hit
    pub visits: usize,
    pub reason: ConvergenceReason,
}

/// Run counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisStats {
    pub worklist_iterations: usize,
    pub statements_processed: usize,
    pub bindings_recorded: usize,
    pub methods_visited: usize,
    pub symbolic_values: usize,
    /// Visits per method, keyed by the rendered signature
    pub visits: BTreeMap<String, usize>,
    /// Re-queues per method (callee return changes and new call edges)
    pub requeues: BTreeMap<String, usize>,
    /// Call cycles among analysed methods
    pub recursive_components: Vec<Vec<MethodSignature>>,
}

impl AnalysisStats {
    pub fn visits_of(&self, method: &MethodSignature) -> usize {
        self.visits.get(&method.to_string()).copied().unwrap_or(0)
    }

    pub fn requeues_of(&self, method: &MethodSignature) -> usize {
        self.requeues.get(&method.to_string()).copied().unwrap_or(0)
    }

    pub fn total_requeues(&self) -> usize {
        self.requeues.values().sum()
    }
}

/// Outcome of [`SymbolicExecution::analyze`](super::SymbolicExecution::analyze)
#[derive(Debug)]
pub struct SymbolicExecutionResult {
    values: ValueContext,
    returns: ReturnSummaries,
    diagnostics: Vec<ConvergenceDiagnostic>,
    stats: AnalysisStats,
}

impl SymbolicExecutionResult {
    pub(crate) fn new(
        values: ValueContext,
        returns: ReturnSummaries,
        diagnostics: Vec<ConvergenceDiagnostic>,
        stats: AnalysisStats,
    ) -> Self {
        Self {
            values,
            returns,
            diagnostics,
            stats,
        }
    }

    /// Every value ever bound to `value`, in recording order
    pub fn values_of(&self, value: &ProgramValue) -> Vec<&SymbolicValue> {
        self.values
            .last_coherent_values(value, None)
            .into_iter()
            .filter_map(|id| self.values.get(id))
            .collect()
    }

    /// Values of the most recently recorded binding of `value`
    pub fn last_values_of(&self, value: &ProgramValue) -> Vec<&SymbolicValue> {
        self.values
            .contextual_values(value)
            .map(|cv| cv.last_values())
            .unwrap_or(&[])
            .iter()
            .filter_map(|id| self.values.get(*id))
            .collect()
    }

    pub fn history(&self, value: &ProgramValue) -> &[HistoryEntry] {
        self.values
            .contextual_values(value)
            .map(|cv| cv.history())
            .unwrap_or(&[])
    }

    /// Program value -> every symbolic value bound to it
    pub fn bindings(&self) -> FxHashMap<ProgramValue, Vec<SymbolicValueId>> {
        self.values
            .histories()
            .map(|cv| (cv.program_value().clone(), cv.all_values()))
            .collect()
    }

    pub fn value(&self, id: SymbolicValueId) -> Option<&SymbolicValue> {
        self.values.get(id)
    }

    pub fn values(&self) -> impl Iterator<Item = &SymbolicValue> {
        self.values.values()
    }

    /// Union of the values `method` returned
    pub fn return_values(&self, method: &MethodSignature) -> Vec<&SymbolicValue> {
        self.returns
            .get(method)
            .map(|ids| ids.iter().filter_map(|id| self.values.get(*id)).collect())
            .unwrap_or_default()
    }

    pub fn values_with_tag(&self, tag: &str) -> Vec<&SymbolicValue> {
        self.values.values().filter(|v| v.has_tag(tag)).collect()
    }

    pub fn diagnostics(&self) -> &[ConvergenceDiagnostic] {
        &self.diagnostics
    }

    pub fn stats(&self) -> &AnalysisStats {
        &self.stats
    }

    /// True when no budget was hit
    pub fn converged(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn value_context(&self) -> &ValueContext {
        &self.values
    }

    /// JSON export: values, histories, return summaries, diagnostics and stats
    ///
    /// Histories and summaries are sorted so the output is stable across runs.
    pub fn to_json(&self) -> ProvenanceResult<String> {
        let mut histories: Vec<HistoryExport<'_>> = self
            .values
            .histories()
            .map(|cv| HistoryExport {
                value: cv.program_value(),
                history: cv.history(),
            })
            .collect();
        histories.sort_by_cached_key(|h| {
            let method = h.value.method().map(|m| m.to_string()).unwrap_or_default();
            (method, h.value.to_string())
        });

        let mut returns: Vec<ReturnExport<'_>> = self
            .returns
            .iter()
            .map(|(method, values)| ReturnExport { method, values })
            .collect();
        returns.sort_by(|a, b| a.method.cmp(b.method));

        let export = ResultExport {
            values: self.values.values().collect(),
            histories,
            returns,
            diagnostics: &self.diagnostics,
            stats: &self.stats,
        };
        Ok(serde_json::to_string_pretty(&export)?)
    }
}

#[derive(Serialize)]
struct ResultExport<'a> {
    values: Vec<&'a SymbolicValue>,
    histories: Vec<HistoryExport<'a>>,
    returns: Vec<ReturnExport<'a>>,
    diagnostics: &'a [ConvergenceDiagnostic],
    stats: &'a AnalysisStats,
}

#[derive(Serialize)]
struct HistoryExport<'a> {
    value: &'a ProgramValue,
    history: &'a [HistoryEntry],
}

#[derive(Serialize)]
struct ReturnExport<'a> {
    method: &'a MethodSignature,
    values: &'a [SymbolicValueId],
}
