//! Global value context: symbolic value arena + per-value histories
//!
//! The context is the engine's only shared mutable structure. It is written
//! once per resolved statement and read during resolution.

use super::contextual_values::ContextualValues;
use super::symbolic_value::{SymbolicValue, SymbolicValueId, SymbolicValueKind};
use crate::shared::models::{ProgramPoint, ProgramValue};
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

/// `(program value → symbolic value)` pair produced by a handler
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Binding {
    pub value: ProgramValue,
    pub symbolic: SymbolicValueId,
}

impl Binding {
    pub fn new(value: ProgramValue, symbolic: SymbolicValueId) -> Self {
        Self { value, symbolic }
    }

    /// One binding per id, all to the same program value
    pub fn all(value: &ProgramValue, ids: impl IntoIterator<Item = SymbolicValueId>) -> Vec<Binding> {
        ids.into_iter()
            .map(|id| Binding::new(value.clone(), id))
            .collect()
    }
}

/// Symbolic value arena plus binding store
#[derive(Debug, Default)]
pub struct ValueContext {
    values: Vec<SymbolicValue>,

    /// Re-analysing a statement yields the same value for the same shape
    interned: FxHashMap<(ProgramPoint, SymbolicValueKind), SymbolicValueId>,

    store: FxHashMap<ProgramValue, ContextualValues>,
}

impl ValueContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of `kind` created at `point`, creating it if needed
    pub fn intern(&mut self, point: &ProgramPoint, kind: SymbolicValueKind) -> SymbolicValueId {
        let key = (point.clone(), kind);
        if let Some(id) = self.interned.get(&key) {
            return *id;
        }
        let id = SymbolicValueId(self.values.len());
        self.values
            .push(SymbolicValue::new(id, key.1.clone(), point.clone()));
        self.interned.insert(key, id);
        id
    }

    pub fn get(&self, id: SymbolicValueId) -> Option<&SymbolicValue> {
        self.values.get(id.0)
    }

    pub fn tags(&self, id: SymbolicValueId) -> BTreeSet<String> {
        self.get(id).map(|v| v.tags().clone()).unwrap_or_default()
    }

    pub fn has_tag(&self, id: SymbolicValueId, tag: &str) -> bool {
        self.get(id).is_some_and(|v| v.has_tag(tag))
    }

    /// Returns true if the tag was new
    pub fn add_tag(&mut self, id: SymbolicValueId, tag: impl Into<String>) -> bool {
        match self.values.get_mut(id.0) {
            Some(value) => value.add_tag(tag),
            None => false,
        }
    }

    /// Returns true if any tag was new
    pub fn add_tags<I, S>(&mut self, id: SymbolicValueId, tags: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.values.get_mut(id.0) {
            Some(value) => value.add_tags(tags),
            None => false,
        }
    }

    /// Writes one statement's bindings into the store
    ///
    /// Bindings for the same program value are merged into a single history
    /// entry at `point`. Returns the number of histories that changed.
    pub fn record_bindings(&mut self, point: &ProgramPoint, bindings: Vec<Binding>) -> usize {
        let mut grouped: Vec<(ProgramValue, Vec<SymbolicValueId>)> = Vec::new();
        for binding in bindings {
            match grouped.iter_mut().find(|(pv, _)| *pv == binding.value) {
                Some((_, ids)) => ids.push(binding.symbolic),
                None => grouped.push((binding.value, vec![binding.symbolic])),
            }
        }

        let mut changed = 0;
        for (value, ids) in grouped {
            let history = self
                .store
                .entry(value.clone())
                .or_insert_with(|| ContextualValues::new(value));
            if history.record(point.clone(), ids) {
                changed += 1;
            }
        }
        changed
    }

    pub fn contextual_values(&self, value: &ProgramValue) -> Option<&ContextualValues> {
        self.store.get(value)
    }

    /// See [`ContextualValues::last_coherent_values`]
    pub fn last_coherent_values(
        &self,
        value: &ProgramValue,
        before: Option<&ProgramPoint>,
    ) -> Vec<SymbolicValueId> {
        self.store
            .get(value)
            .map(|cv| cv.last_coherent_values(before))
            .unwrap_or_default()
    }

    pub fn program_values(&self) -> impl Iterator<Item = &ProgramValue> {
        self.store.keys()
    }

    pub fn histories(&self) -> impl Iterator<Item = &ContextualValues> {
        self.store.values()
    }

    pub fn values(&self) -> impl Iterator<Item = &SymbolicValue> {
        self.values.iter()
    }

    /// Number of symbolic values in the arena
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
