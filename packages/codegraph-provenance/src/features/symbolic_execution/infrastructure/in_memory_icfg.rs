//! In-memory ICFG
//!
//! HashMap-based [`IcfgProvider`] for front ends that hand over a whole
//! program at once (or a JSON dump of it), and for tests.

use crate::features::symbolic_execution::ports::IcfgProvider;
use crate::shared::models::{MethodBody, MethodSignature, ProgramPoint};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// JSON document shape: `{ "methods": [ ... ] }`
#[derive(Debug, Serialize, Deserialize)]
struct IcfgDocument {
    methods: Vec<MethodBody>,
}

/// Simple ICFG with static dispatch by exact signature
#[derive(Debug, Clone, Default)]
pub struct InMemoryIcfg {
    bodies: FxHashMap<MethodSignature, MethodBody>,

    /// Insertion order, for deterministic `methods()`
    order: Vec<MethodSignature>,

    /// Callee signature -> call sites (callee may have no body)
    callers: FxHashMap<MethodSignature, Vec<ProgramPoint>>,
}

impl InMemoryIcfg {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a method body and indexes its call sites
    pub fn add_method(&mut self, body: MethodBody) {
        let signature = body.signature.clone();
        if self.bodies.contains_key(&signature) {
            for sites in self.callers.values_mut() {
                sites.retain(|p| p.method != signature);
            }
        } else {
            self.order.push(signature.clone());
        }

        for (index, stmt) in body.statements.iter().enumerate() {
            if let Some(invoke) = stmt.invoke_expr() {
                self.callers
                    .entry(invoke.method.clone())
                    .or_default()
                    .push(ProgramPoint::new(signature.clone(), index));
            }
        }
        self.bodies.insert(signature, body);
    }

    pub fn with_method(mut self, body: MethodBody) -> Self {
        self.add_method(body);
        self
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let document: IcfgDocument = serde_json::from_str(json)?;
        let mut icfg = Self::new();
        for body in document.methods {
            icfg.add_method(body);
        }
        Ok(icfg)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        let document = IcfgDocument {
            methods: self
                .order
                .iter()
                .filter_map(|sig| self.bodies.get(sig).cloned())
                .collect(),
        };
        serde_json::to_string_pretty(&document)
    }
}

impl IcfgProvider for InMemoryIcfg {
    fn method_body(&self, method: &MethodSignature) -> Option<&MethodBody> {
        self.bodies.get(method)
    }

    fn methods(&self) -> Vec<MethodSignature> {
        self.order.clone()
    }

    fn callers_of(&self, method: &MethodSignature) -> Vec<ProgramPoint> {
        self.callers.get(method).cloned().unwrap_or_default()
    }

    fn num_methods(&self) -> usize {
        self.order.len()
    }
}
