//! Request-scoped resolution context
//!
//! Every handler and recognizer receives the value context explicitly through
//! a [`ResolutionContext`] built by the driver for one statement.

use crate::features::symbolic_execution::domain::{
    Binding, SymbolicValueId, SymbolicValueKind, ValueContext,
};
use crate::features::symbolic_execution::ports::IcfgProvider;
use crate::shared::models::{Literal, MethodSignature, ProgramPoint, ProgramValue};
use rustc_hash::FxHashMap;

/// Method -> symbolic values its return statements produced so far
pub type ReturnSummaries = FxHashMap<MethodSignature, Vec<SymbolicValueId>>;

/// Method -> index of the call cycle it belongs to
pub type CycleIndex = FxHashMap<MethodSignature, usize>;

/// Indexes `IcfgProvider::recursive_components` by member
pub fn cycle_index(components: &[Vec<MethodSignature>]) -> CycleIndex {
    components
        .iter()
        .enumerate()
        .flat_map(|(i, members)| members.iter().map(move |m| (m.clone(), i)))
        .collect()
}

/// Everything a handler may read or write while resolving one statement
pub struct ResolutionContext<'a> {
    pub values: &'a mut ValueContext,
    pub icfg: &'a dyn IcfgProvider,
    pub returns: &'a ReturnSummaries,
    /// Statement being resolved
    pub point: &'a ProgramPoint,
    /// Resolve parameters through call sites and use callee return summaries
    pub interprocedural: bool,
    pub cycles: Option<&'a CycleIndex>,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(
        values: &'a mut ValueContext,
        icfg: &'a dyn IcfgProvider,
        returns: &'a ReturnSummaries,
        point: &'a ProgramPoint,
    ) -> Self {
        Self {
            values,
            icfg,
            returns,
            point,
            interprocedural: true,
            cycles: None,
        }
    }

    pub fn with_interprocedural(mut self, interprocedural: bool) -> Self {
        self.interprocedural = interprocedural;
        self
    }

    pub fn with_cycles(mut self, cycles: &'a CycleIndex) -> Self {
        self.cycles = Some(cycles);
        self
    }

    /// True when `callee` sits on a call cycle through the current method
    pub fn shares_cycle_with(&self, callee: &MethodSignature) -> bool {
        let Some(cycles) = self.cycles else {
            return false;
        };
        match (cycles.get(self.method()), cycles.get(callee)) {
            (Some(here), Some(there)) => here == there,
            _ => false,
        }
    }

    pub fn method(&self) -> &MethodSignature {
        &self.point.method
    }

    /// Interns a value created by the current statement
    pub fn intern(&mut self, kind: SymbolicValueKind) -> SymbolicValueId {
        self.values.intern(self.point, kind)
    }

    pub fn constant(&mut self, literal: &Literal) -> SymbolicValueId {
        self.intern(SymbolicValueKind::Constant {
            literal: literal.clone(),
        })
    }

    pub fn unknown(&mut self, label: impl Into<String>) -> SymbolicValueId {
        self.intern(SymbolicValueKind::Unknown {
            label: label.into(),
        })
    }

    /// Values of `value` just before the current statement
    pub fn resolve(&mut self, value: &ProgramValue) -> Vec<SymbolicValueId> {
        let point = self.point;
        self.resolve_at(value, point)
    }

    /// Values of `value` just before `point`
    ///
    /// Literals resolve to a constant created at `point`.
    pub fn resolve_at(&mut self, value: &ProgramValue, point: &ProgramPoint) -> Vec<SymbolicValueId> {
        match value.as_literal() {
            Some(literal) => vec![self.values.intern(
                point,
                SymbolicValueKind::Constant {
                    literal: literal.clone(),
                },
            )],
            None => self.values.last_coherent_values(value, Some(point)),
        }
    }

    /// Resolves an operand, binding an alias when it has no value yet
    ///
    /// The alias (a `SingleVariable`) gives tags a place to live; its binding
    /// is pushed onto `bindings` so the driver records it with the statement.
    pub fn operand(&mut self, value: &ProgramValue, bindings: &mut Vec<Binding>) -> Vec<SymbolicValueId> {
        let ids = self.resolve(value);
        if !ids.is_empty() {
            return ids;
        }
        let alias = self.intern(SymbolicValueKind::SingleVariable {
            value: value.clone(),
        });
        bindings.push(Binding::new(value.clone(), alias));
        vec![alias]
    }

    /// Literal behind `value`, directly or through its current binding
    pub fn literal_of(&mut self, value: &ProgramValue) -> Option<Literal> {
        if let Some(literal) = value.as_literal() {
            return Some(literal.clone());
        }
        let ids = self.resolve(value);
        match ids.as_slice() {
            [single] => self
                .values
                .get(*single)
                .and_then(|sv| sv.as_constant())
                .cloned(),
            _ => None,
        }
    }

    /// Return summary of `method` when it is non-empty
    pub fn return_values(&self, method: &MethodSignature) -> Option<&[SymbolicValueId]> {
        self.returns
            .get(method)
            .filter(|ids| !ids.is_empty())
            .map(|ids| ids.as_slice())
    }
}
