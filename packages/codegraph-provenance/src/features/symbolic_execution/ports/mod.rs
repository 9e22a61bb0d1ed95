//! Ports: what the engine needs from the IR / call graph front end

use crate::shared::models::{MethodBody, MethodSignature, ProgramPoint, Stmt};
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;

/// Interprocedural control-flow graph protocol
///
/// Any front end must provide:
/// - method bodies (statement stream in definition order)
/// - call sites of a method (reverse call graph)
///
/// The remaining queries have default implementations derived from those two.
pub trait IcfgProvider {
    /// Body of `method`, or `None` for library methods without IR
    fn method_body(&self, method: &MethodSignature) -> Option<&MethodBody>;

    /// All methods that have a body
    fn methods(&self) -> Vec<MethodSignature>;

    /// Call sites of `method`
    ///
    /// Returns the program points of every statement invoking `method`.
    fn callers_of(&self, method: &MethodSignature) -> Vec<ProgramPoint>;

    /// Method owning the statement at `point`
    fn method_of(&self, point: &ProgramPoint) -> Option<MethodSignature> {
        self.method_body(&point.method)
            .filter(|body| point.index < body.statements.len())
            .map(|body| body.signature.clone())
    }

    /// Statement at `point`
    fn statement(&self, point: &ProgramPoint) -> Option<&Stmt> {
        self.method_body(&point.method)
            .and_then(|body| body.statements.get(point.index))
    }

    /// Callees with a body invoked at `point`
    ///
    /// Default: static dispatch on the exact invoked signature.
    fn callees_of(&self, point: &ProgramPoint) -> Vec<MethodSignature> {
        self.statement(point)
            .and_then(|stmt| stmt.invoke_expr())
            .filter(|invoke| self.contains_method(&invoke.method))
            .map(|invoke| vec![invoke.method.clone()])
            .unwrap_or_default()
    }

    fn contains_method(&self, method: &MethodSignature) -> bool {
        self.method_body(method).is_some()
    }

    /// Number of methods with a body
    fn num_methods(&self) -> usize {
        self.methods().len()
    }

    /// Call cycles among methods with bodies
    ///
    /// Returns every strongly connected component of size > 1, plus directly
    /// self-recursive methods. Members of a component are sorted.
    fn recursive_components(&self) -> Vec<Vec<MethodSignature>> {
        let methods = self.methods();
        let mut graph: DiGraph<&MethodSignature, ()> = DiGraph::new();
        let mut nodes: FxHashMap<&MethodSignature, NodeIndex> = FxHashMap::default();
        for sig in &methods {
            nodes.insert(sig, graph.add_node(sig));
        }

        let mut self_loops = Vec::new();
        for callee in &methods {
            let Some(&to) = nodes.get(callee) else {
                continue;
            };
            for site in self.callers_of(callee) {
                if let Some(&from) = nodes.get(&site.method) {
                    graph.update_edge(from, to, ());
                    if from == to && !self_loops.contains(&from) {
                        self_loops.push(from);
                    }
                }
            }
        }

        tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || self_loops.contains(&scc[0]))
            .map(|scc| {
                let mut members: Vec<MethodSignature> =
                    scc.into_iter().map(|n| graph[n].clone()).collect();
                members.sort();
                members
            })
            .collect()
    }
}
