//! Symbolic value algebra
//!
//! A symbolic value describes how a runtime value was produced. Values are
//! owned by the [`ValueContext`](super::ValueContext) arena and referred to
//! by [`SymbolicValueId`]. Each value carries a tag set that only grows.

use crate::shared::models::{FieldRef, Literal, MethodSignature, ProgramPoint, ProgramValue};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Arena index of a symbolic value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SymbolicValueId(pub(crate) usize);

impl SymbolicValueId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for SymbolicValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sv{}", self.0)
    }
}

/// Provenance of a value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SymbolicValueKind {
    /// Literal from the IR
    Constant { literal: Literal },

    /// Read from a field (`base` is `None` for static fields)
    Field {
        base: Option<ProgramValue>,
        field: FieldRef,
    },

    /// New instance of `ty`, with constructor arguments when known
    Object {
        ty: String,
        args: Option<Vec<ProgramValue>>,
    },

    /// Opaque call result: no shape recognizer matched
    MethodRepresentation {
        receiver: Option<ProgramValue>,
        args: Vec<ProgramValue>,
        method: MethodSignature,
    },

    /// Computed by `op` from two operands
    BinOp {
        op: String,
        lhs: ProgramValue,
        rhs: ProgramValue,
    },

    /// Aliases another value whose provenance is not resolved
    SingleVariable { value: ProgramValue },

    /// No provenance could be determined
    Unknown { label: String },
}

impl fmt::Display for SymbolicValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolicValueKind::Constant { literal } => write!(f, "{}", literal),
            SymbolicValueKind::Field { base, field } => match base {
                Some(base) => write!(f, "{}.{}", base, field.name),
                None => write!(f, "{}.{}", field.declaring_type, field.name),
            },
            SymbolicValueKind::Object { ty, args } => match args {
                Some(args) => write!(f, "new {}({})", ty, join(args)),
                None => write!(f, "new {}", ty),
            },
            SymbolicValueKind::MethodRepresentation {
                receiver,
                args,
                method,
            } => match receiver {
                Some(receiver) => write!(f, "{}.{}({})", receiver, method.name, join(args)),
                None => write!(f, "{}.{}({})", method.declaring_type, method.name, join(args)),
            },
            SymbolicValueKind::BinOp { op, lhs, rhs } => write!(f, "{} {} {}", lhs, op, rhs),
            SymbolicValueKind::SingleVariable { value } => write!(f, "{}", value),
            SymbolicValueKind::Unknown { label } => write!(f, "UNKNOWN({})", label),
        }
    }
}

fn join(values: &[ProgramValue]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Symbolic value with its semantic tags
#[derive(Debug, Clone, Serialize)]
pub struct SymbolicValue {
    id: SymbolicValueId,
    kind: SymbolicValueKind,
    /// Statement that created the value
    origin: ProgramPoint,
    tags: BTreeSet<String>,
}

impl SymbolicValue {
    pub(crate) fn new(id: SymbolicValueId, kind: SymbolicValueKind, origin: ProgramPoint) -> Self {
        Self {
            id,
            kind,
            origin,
            tags: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> SymbolicValueId {
        self.id
    }

    pub fn kind(&self) -> &SymbolicValueKind {
        &self.kind
    }

    pub fn origin(&self) -> &ProgramPoint {
        &self.origin
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Adds a tag; returns true if it was new
    pub(crate) fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        self.tags.insert(tag.into())
    }

    /// Adds every tag; returns true if any was new
    pub(crate) fn add_tags<I, S>(&mut self, tags: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let before = self.tags.len();
        self.tags.extend(tags.into_iter().map(Into::into));
        self.tags.len() != before
    }

    pub fn as_constant(&self) -> Option<&Literal> {
        match &self.kind {
            SymbolicValueKind::Constant { literal } => Some(literal),
            _ => None,
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self.kind, SymbolicValueKind::Constant { .. })
    }

    /// Anything that is not a literal
    pub fn is_symbolic(&self) -> bool {
        !self.is_constant()
    }

    pub fn is_field(&self) -> bool {
        matches!(self.kind, SymbolicValueKind::Field { .. })
    }

    pub fn is_object(&self) -> bool {
        matches!(self.kind, SymbolicValueKind::Object { .. })
    }

    pub fn is_method_representation(&self) -> bool {
        matches!(self.kind, SymbolicValueKind::MethodRepresentation { .. })
    }

    pub fn is_bin_op(&self) -> bool {
        matches!(self.kind, SymbolicValueKind::BinOp { .. })
    }

    pub fn is_single_variable(&self) -> bool {
        matches!(self.kind, SymbolicValueKind::SingleVariable { .. })
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self.kind, SymbolicValueKind::Unknown { .. })
    }
}

impl fmt::Display for SymbolicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.tags.is_empty() {
            let tags = self.tags.iter().cloned().collect::<Vec<_>>().join(", ");
            write!(f, " [{}]", tags)?;
        }
        Ok(())
    }
}
