/*
 * Symbolic Execution Driver
 *
 * Worklist fixpoint over the methods reachable from the entry points.
 *
 * Algorithm:
 * - FIFO worklist of methods, seeded with the entries
 * - Each visit walks the body in definition order and hands every statement
 *   to the handler chain; bindings land in the value context
 * - Calls to methods with a body enqueue the callee (or re-queue it when the
 *   argument values at that call site changed)
 * - Return statements grow the method's return summary; on growth every call
 *   site is re-bound and already-visited callers are re-queued
 *
 * Termination: values are interned per (statement, shape) so summaries are
 * bounded, and every method has a visit budget on top of a global iteration
 * budget. Hitting a budget is reported, never an error.
 */

use ahash::AHashMap as FastHashMap;
use rustc_hash::FxHashSet;
use std::collections::{BTreeMap, VecDeque};
use tracing::{debug, info, warn};

#[cfg(feature = "trace")]
use tracing::trace;

use super::result::{AnalysisStats, ConvergenceDiagnostic, ConvergenceReason, SymbolicExecutionResult};
use crate::config::{EngineConfig, Validatable};
use crate::errors::{ProvenanceError, ProvenanceResult};
use crate::features::symbolic_execution::domain::{Binding, SymbolicValueId, ValueContext};
use crate::features::symbolic_execution::infrastructure::resolution::{cycle_index, CycleIndex};
use crate::features::symbolic_execution::infrastructure::{
    HandlerChain, ResolutionContext, ReturnSummaries,
};
use crate::features::symbolic_execution::ports::IcfgProvider;
use crate::shared::models::{InvokeExpr, MethodSignature, ProgramPoint, ProgramValue, Stmt};

/// Interprocedural symbolic execution engine
///
/// ```rust,ignore
/// let icfg = InMemoryIcfg::from_json(&program)?;
/// let engine = SymbolicExecution::new(&icfg, EngineConfig::default());
/// let result = engine.analyze(&[entry])?;
/// for value in result.values_of(&target) {
///     println!("{} {:?}", value, value.tags());
/// }
/// ```
pub struct SymbolicExecution<'a, I: IcfgProvider> {
    icfg: &'a I,
    config: EngineConfig,
    handlers: HandlerChain,
}

impl<'a, I: IcfgProvider> SymbolicExecution<'a, I> {
    /// Engine with the standard handler chain for `config.recognizers`
    pub fn new(icfg: &'a I, config: EngineConfig) -> Self {
        let handlers = HandlerChain::standard(&config.recognizers);
        Self {
            icfg,
            config,
            handlers,
        }
    }

    /// Replaces the handler chain
    pub fn with_handlers(mut self, handlers: HandlerChain) -> Self {
        self.handlers = handlers;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn handlers(&self) -> &HandlerChain {
        &self.handlers
    }

    /// Runs the fixpoint from `entries`
    ///
    /// # Errors
    /// - `EmptyInput` when `entries` is empty
    /// - `EntryMethodNotFound` when an entry has no body in the ICFG
    /// - `Config` when the configuration is out of range
    pub fn analyze(&self, entries: &[MethodSignature]) -> ProvenanceResult<SymbolicExecutionResult> {
        self.config.validate()?;
        if entries.is_empty() {
            return Err(ProvenanceError::EmptyInput);
        }
        if let Some(missing) = entries.iter().find(|e| !self.icfg.contains_method(e)) {
            return Err(ProvenanceError::EntryMethodNotFound(missing.to_string()));
        }

        info!(
            entries = entries.len(),
            methods = self.icfg.num_methods(),
            handlers = self.handlers.len(),
            interprocedural = self.config.interprocedural,
            "Starting symbolic execution"
        );

        let mut run = Run::new(self.icfg, &self.config, &self.handlers);
        for entry in entries {
            run.enqueue(entry.clone());
        }
        run.execute();
        let result = run.finish();

        info!(
            iterations = result.stats().worklist_iterations,
            methods_visited = result.stats().methods_visited,
            statements = result.stats().statements_processed,
            values = result.stats().symbolic_values,
            converged = result.converged(),
            "Symbolic execution finished"
        );
        Ok(result)
    }
}

/// Resolved receiver and argument values at one call site
type ArgumentFingerprint = Vec<Vec<SymbolicValueId>>;

/// Mutable state of one `analyze` call
struct Run<'a> {
    icfg: &'a dyn IcfgProvider,
    config: &'a EngineConfig,
    handlers: &'a HandlerChain,

    values: ValueContext,
    returns: ReturnSummaries,

    recursive_components: Vec<Vec<MethodSignature>>,
    cycles: CycleIndex,

    /// FIFO for deterministic processing order
    worklist: VecDeque<MethodSignature>,
    queued: FxHashSet<MethodSignature>,

    /// Completed visits; presence means visited
    visits: FastHashMap<MethodSignature, usize>,
    requeues: FastHashMap<MethodSignature, usize>,
    exhausted: FxHashSet<MethodSignature>,

    /// Argument values last seen on each (call site, callee) edge
    edge_args: FastHashMap<(ProgramPoint, MethodSignature), ArgumentFingerprint>,

    diagnostics: Vec<ConvergenceDiagnostic>,
    iterations: usize,
    statements_processed: usize,
    bindings_recorded: usize,
}

impl<'a> Run<'a> {
    fn new(icfg: &'a dyn IcfgProvider, config: &'a EngineConfig, handlers: &'a HandlerChain) -> Self {
        let recursive_components = icfg.recursive_components();
        if !recursive_components.is_empty() {
            debug!(components = recursive_components.len(), "Call graph has cycles");
        }
        let cycles = cycle_index(&recursive_components);
        Self {
            icfg,
            config,
            handlers,
            values: ValueContext::new(),
            returns: ReturnSummaries::default(),
            recursive_components,
            cycles,
            worklist: VecDeque::new(),
            queued: FxHashSet::default(),
            visits: FastHashMap::new(),
            requeues: FastHashMap::new(),
            exhausted: FxHashSet::default(),
            edge_args: FastHashMap::new(),
            diagnostics: Vec::new(),
            iterations: 0,
            statements_processed: 0,
            bindings_recorded: 0,
        }
    }

    /// Returns true if the method was not already pending
    fn enqueue(&mut self, method: MethodSignature) -> bool {
        if !self.queued.insert(method.clone()) {
            return false;
        }
        self.worklist.push_back(method);
        true
    }

    /// Schedules another visit of an already visited method
    fn requeue(&mut self, method: &MethodSignature, reason: &'static str) {
        if !self.visits.contains_key(method) {
            return;
        }
        if self.enqueue(method.clone()) {
            *self.requeues.entry(method.clone()).or_default() += 1;
            debug!(method = %method, reason, "Re-queued method");
        }
    }

    fn visit_count(&self, method: &MethodSignature) -> usize {
        self.visits.get(method).copied().unwrap_or(0)
    }

    fn execute(&mut self) {
        while let Some(method) = self.worklist.pop_front() {
            self.queued.remove(&method);

            if self.iterations >= self.config.max_worklist_iterations {
                let visits = self.visit_count(&method);
                warn!(
                    method = %method,
                    iterations = self.iterations,
                    pending = self.worklist.len() + 1,
                    "Worklist iteration budget exhausted, stopping"
                );
                self.diagnostics.push(ConvergenceDiagnostic {
                    method,
                    visits,
                    reason: ConvergenceReason::IterationBudgetExhausted,
                });
                break;
            }
            self.iterations += 1;

            let visits = self.visit_count(&method);
            if visits >= self.config.max_visits_per_method {
                if self.exhausted.insert(method.clone()) {
                    warn!(method = %method, visits, "Visit budget exhausted, method result may be incomplete");
                    self.diagnostics.push(ConvergenceDiagnostic {
                        method,
                        visits,
                        reason: ConvergenceReason::VisitBudgetExhausted,
                    });
                }
                continue;
            }

            *self.visits.entry(method.clone()).or_default() += 1;
            self.visit(&method, visits + 1);
        }
    }

    fn visit(&mut self, method: &MethodSignature, visit: usize) {
        let icfg = self.icfg;
        let Some(body) = icfg.method_body(method) else {
            return;
        };
        debug!(method = %method, visit, statements = body.len(), "Visiting method");

        for (index, stmt) in body.statements.iter().enumerate() {
            let point = ProgramPoint::new(method.clone(), index);
            self.process(stmt, &point);
        }
    }

    fn process(&mut self, stmt: &Stmt, point: &ProgramPoint) {
        self.statements_processed += 1;

        let handlers = self.handlers;
        let resolved = {
            let mut ctx = ResolutionContext::new(&mut self.values, self.icfg, &self.returns, point)
                .with_interprocedural(self.config.interprocedural)
                .with_cycles(&self.cycles);
            handlers.process(stmt, &mut ctx)
        };

        match resolved {
            Some(bindings) => self.bind(stmt, point, bindings),
            None => {
                #[cfg(feature = "trace")]
                trace!(point = %point, "Statement left unresolved");
            }
        }

        if self.config.interprocedural && self.config.follow_callees {
            if let Some(invoke) = stmt.invoke_expr() {
                self.follow_call(point, invoke);
            }
        }
    }

    /// Records a statement's bindings; a return also feeds the method's summary
    fn bind(&mut self, stmt: &Stmt, point: &ProgramPoint, bindings: Vec<Binding>) {
        let returned: Vec<SymbolicValueId> = match stmt {
            Stmt::Return { value: Some(value) } => bindings
                .iter()
                .filter(|b| &b.value == value)
                .map(|b| b.symbolic)
                .collect(),
            _ => Vec::new(),
        };
        self.record(point, bindings);
        if !returned.is_empty() {
            self.grow_return_summary(&point.method, returned);
        }
    }

    /// Writes bindings; instance field writes also land under the field's
    /// base-insensitive summary key
    fn record(&mut self, point: &ProgramPoint, mut bindings: Vec<Binding>) {
        let summaries: Vec<Binding> = bindings
            .iter()
            .filter_map(|b| b.value.field_summary().map(|key| Binding::new(key, b.symbolic)))
            .collect();
        bindings.extend(summaries);

        #[cfg(feature = "trace")]
        for binding in &bindings {
            trace!(point = %point, value = %binding.value, symbolic = %binding.symbolic, "bind");
        }

        self.bindings_recorded += bindings.len();
        self.values.record_bindings(point, bindings);
    }

    fn grow_return_summary(&mut self, method: &MethodSignature, ids: Vec<SymbolicValueId>) {
        let summary = self.returns.entry(method.clone()).or_default();
        let before = summary.len();
        for id in ids {
            if !summary.contains(&id) {
                summary.push(id);
            }
        }
        if summary.len() == before {
            return;
        }
        let summary = summary.clone();
        debug!(method = %method, values = summary.len(), "Return summary grew");

        if !self.config.interprocedural {
            return;
        }
        let icfg = self.icfg;
        for site in icfg.callers_of(method) {
            if let Some(target) = icfg.statement(&site).and_then(Stmt::call_target) {
                self.record(&site, Binding::all(target, summary.iter().copied()));
            }
            self.requeue(&site.method, "callee return changed");
        }
    }

    /// Enqueues unvisited callees; re-queues visited ones whose arguments at
    /// this call site resolve differently than last time
    fn follow_call(&mut self, point: &ProgramPoint, invoke: &InvokeExpr) {
        let callees = self.icfg.callees_of(point);
        if callees.is_empty() {
            return;
        }
        let fingerprint = self.fingerprint(point, invoke);

        for callee in callees {
            let key = (point.clone(), callee.clone());
            let changed = self.edge_args.get(&key) != Some(&fingerprint);
            if changed {
                self.edge_args.insert(key, fingerprint.clone());
            }

            if !self.visits.contains_key(&callee) {
                self.enqueue(callee);
            } else if changed {
                self.requeue(&callee, "call site arguments changed");
            }
        }
    }

    fn fingerprint(&self, point: &ProgramPoint, invoke: &InvokeExpr) -> ArgumentFingerprint {
        invoke
            .receiver
            .iter()
            .chain(invoke.args.iter())
            .map(|value: &ProgramValue| {
                if value.is_constant() {
                    Vec::new()
                } else {
                    self.values.last_coherent_values(value, Some(point))
                }
            })
            .collect()
    }

    fn finish(self) -> SymbolicExecutionResult {
        let by_name = |counts: FastHashMap<MethodSignature, usize>| -> BTreeMap<String, usize> {
            counts.into_iter().map(|(m, n)| (m.to_string(), n)).collect()
        };

        let stats = AnalysisStats {
            worklist_iterations: self.iterations,
            statements_processed: self.statements_processed,
            bindings_recorded: self.bindings_recorded,
            methods_visited: self.visits.len(),
            symbolic_values: self.values.len(),
            visits: by_name(self.visits),
            requeues: by_name(self.requeues),
            recursive_components: self.recursive_components,
        };
        SymbolicExecutionResult::new(self.values, self.returns, self.diagnostics, stats)
    }
}
