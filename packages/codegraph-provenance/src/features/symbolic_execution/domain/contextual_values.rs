//! Per-value binding history
//!
//! A [`ContextualValues`] records, for one program value, every symbolic value
//! bound to it together with the statement that bound it. Queries are made
//! relative to a program point, which is what makes field and parameter reads
//! context sensitive.

use super::symbolic_value::SymbolicValueId;
use crate::shared::models::{ProgramPoint, ProgramValue};
use serde::Serialize;

/// Values bound at one statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub point: ProgramPoint,
    pub values: Vec<SymbolicValueId>,
}

/// Ordered binding history of a single program value
#[derive(Debug, Clone, Serialize)]
pub struct ContextualValues {
    value: ProgramValue,
    /// Oldest first. At most one entry per program point.
    history: Vec<HistoryEntry>,
}

impl ContextualValues {
    pub fn new(value: ProgramValue) -> Self {
        Self {
            value,
            history: Vec::new(),
        }
    }

    pub fn program_value(&self) -> &ProgramValue {
        &self.value
    }

    /// Records the values bound at `point`
    ///
    /// A statement that is analysed again overwrites its earlier entry, and
    /// the entry becomes the most recent one. Returns true when the history
    /// changed.
    pub fn record(&mut self, point: ProgramPoint, values: Vec<SymbolicValueId>) -> bool {
        let mut deduped: Vec<SymbolicValueId> = Vec::with_capacity(values.len());
        for id in values {
            if !deduped.contains(&id) {
                deduped.push(id);
            }
        }
        if deduped.is_empty() {
            return false;
        }

        if let Some(pos) = self.history.iter().position(|e| e.point == point) {
            let unchanged = self.history[pos].values == deduped;
            if unchanged && pos + 1 == self.history.len() {
                return false;
            }
            self.history.remove(pos);
            self.history.push(HistoryEntry {
                point,
                values: deduped,
            });
            return !unchanged;
        }

        self.history.push(HistoryEntry {
            point,
            values: deduped,
        });
        true
    }

    /// Most recent values bound strictly before `before`
    ///
    /// Within `before`'s method, the entry with the greatest statement index
    /// below `before.index` wins. When the method has no such entry, the most
    /// recently recorded entry from any other method is used. With no point
    /// every value ever recorded is returned, deduplicated in recording order.
    pub fn last_coherent_values(&self, before: Option<&ProgramPoint>) -> Vec<SymbolicValueId> {
        let Some(before) = before else {
            return self.all_values();
        };

        let same_method = self
            .history
            .iter()
            .filter(|e| e.point.precedes(before))
            .max_by_key(|e| e.point.index);
        if let Some(entry) = same_method {
            return entry.values.clone();
        }

        self.history
            .iter()
            .rev()
            .find(|e| !e.point.same_method(before))
            .map(|e| e.values.clone())
            .unwrap_or_default()
    }

    /// Every value ever bound, deduplicated in recording order
    pub fn all_values(&self) -> Vec<SymbolicValueId> {
        let mut out = Vec::new();
        for entry in &self.history {
            for id in &entry.values {
                if !out.contains(id) {
                    out.push(*id);
                }
            }
        }
        out
    }

    /// Values of the most recently recorded entry
    pub fn last_values(&self) -> &[SymbolicValueId] {
        self.history
            .last()
            .map(|e| e.values.as_slice())
            .unwrap_or(&[])
    }

    pub fn values_at(&self, point: &ProgramPoint) -> Option<&[SymbolicValueId]> {
        self.history
            .iter()
            .find(|e| &e.point == point)
            .map(|e| e.values.as_slice())
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn points(&self) -> impl Iterator<Item = &ProgramPoint> {
        self.history.iter().map(|e| &e.point)
    }

    /// Number of program points with a binding
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
