//! Program values: opaque handles to IR locations
//!
//! A [`ProgramValue`] names a location the IR reads or writes (local, formal
//! parameter, field, literal). Identity is structural so the same syntactic
//! value always maps to the same key in the value context.

use super::method::MethodSignature;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Exact static type names used by literals
pub mod type_names {
    pub const STRING: &str = "java.lang.String";
    pub const INT: &str = "int";
    pub const LONG: &str = "long";
    pub const FLOAT: &str = "float";
    pub const DOUBLE: &str = "double";
    pub const BOOLEAN: &str = "boolean";
    pub const NULL: &str = "null_type";
    pub const CLASS: &str = "java.lang.Class";
}

/// IR literal
///
/// Floating point literals compare and hash by bit pattern so literals can be
/// used as map keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Literal {
    String(String),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    Null,
    Class(String),
}

impl Literal {
    /// Exact static type name of the literal
    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::String(_) => type_names::STRING,
            Literal::Int(_) => type_names::INT,
            Literal::Long(_) => type_names::LONG,
            Literal::Float(_) => type_names::FLOAT,
            Literal::Double(_) => type_names::DOUBLE,
            Literal::Boolean(_) => type_names::BOOLEAN,
            Literal::Null => type_names::NULL,
            Literal::Class(_) => type_names::CLASS,
        }
    }

    /// Unquoted text of the literal (used when rendering tags)
    pub fn as_text(&self) -> String {
        match self {
            Literal::String(s) => s.clone(),
            Literal::Int(v) => v.to_string(),
            Literal::Long(v) => v.to_string(),
            Literal::Float(v) => v.to_string(),
            Literal::Double(v) => v.to_string(),
            Literal::Boolean(v) => v.to_string(),
            Literal::Null => "null".to_string(),
            Literal::Class(c) => c.clone(),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Literal::Int(v) => Some(*v as i64),
            Literal::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::String(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Literal::String(a), Literal::String(b)) => a == b,
            (Literal::Int(a), Literal::Int(b)) => a == b,
            (Literal::Long(a), Literal::Long(b)) => a == b,
            (Literal::Float(a), Literal::Float(b)) => a.to_bits() == b.to_bits(),
            (Literal::Double(a), Literal::Double(b)) => a.to_bits() == b.to_bits(),
            (Literal::Boolean(a), Literal::Boolean(b)) => a == b,
            (Literal::Null, Literal::Null) => true,
            (Literal::Class(a), Literal::Class(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Literal::String(s) | Literal::Class(s) => s.hash(state),
            Literal::Int(v) => v.hash(state),
            Literal::Long(v) => v.hash(state),
            Literal::Float(v) => v.to_bits().hash(state),
            Literal::Double(v) => v.to_bits().hash(state),
            Literal::Boolean(v) => v.hash(state),
            Literal::Null => {}
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "\"{}\"", s),
            Literal::Long(v) => write!(f, "{}L", v),
            Literal::Float(v) => write!(f, "{}F", v),
            Literal::Class(c) => write!(f, "class \"{}\"", c),
            other => write!(f, "{}", other.as_text()),
        }
    }
}

/// Field reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldRef {
    pub declaring_type: String,
    pub name: String,
    pub field_type: String,
}

impl FieldRef {
    pub fn new(
        declaring_type: impl Into<String>,
        name: impl Into<String>,
        field_type: impl Into<String>,
    ) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            name: name.into(),
            field_type: field_type.into(),
        }
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}: {} {}>", self.declaring_type, self.field_type, self.name)
    }
}

/// Handle to a location in the IR
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProgramValue {
    /// Method-local variable
    Local {
        method: MethodSignature,
        name: String,
        ty: String,
    },

    /// Formal parameter of a method
    Parameter {
        method: MethodSignature,
        index: usize,
        ty: String,
    },

    /// Receiver of an instance method
    This { method: MethodSignature, ty: String },

    /// Instance field read through a base value
    InstanceField {
        base: Box<ProgramValue>,
        field: FieldRef,
    },

    /// Static field
    StaticField { field: FieldRef },

    /// Literal constant
    Constant { literal: Literal },
}

impl ProgramValue {
    pub fn local(method: &MethodSignature, name: impl Into<String>, ty: impl Into<String>) -> Self {
        ProgramValue::Local {
            method: method.clone(),
            name: name.into(),
            ty: ty.into(),
        }
    }

    pub fn parameter(method: &MethodSignature, index: usize, ty: impl Into<String>) -> Self {
        ProgramValue::Parameter {
            method: method.clone(),
            index,
            ty: ty.into(),
        }
    }

    pub fn this(method: &MethodSignature) -> Self {
        ProgramValue::This {
            method: method.clone(),
            ty: method.declaring_type.clone(),
        }
    }

    pub fn instance_field(base: ProgramValue, field: FieldRef) -> Self {
        ProgramValue::InstanceField {
            base: Box::new(base),
            field,
        }
    }

    pub fn static_field(field: FieldRef) -> Self {
        ProgramValue::StaticField { field }
    }

    pub fn constant(literal: Literal) -> Self {
        ProgramValue::Constant { literal }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::constant(Literal::String(value.into()))
    }

    pub fn int(value: i32) -> Self {
        Self::constant(Literal::Int(value))
    }

    /// Exact static type name as reported by the IR
    pub fn ty(&self) -> &str {
        match self {
            ProgramValue::Local { ty, .. }
            | ProgramValue::Parameter { ty, .. }
            | ProgramValue::This { ty, .. } => ty,
            ProgramValue::InstanceField { field, .. } | ProgramValue::StaticField { field } => {
                &field.field_type
            }
            ProgramValue::Constant { literal } => literal.type_name(),
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            ProgramValue::Constant { literal } => Some(literal),
            _ => None,
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, ProgramValue::Constant { .. })
    }

    pub fn is_field(&self) -> bool {
        matches!(
            self,
            ProgramValue::InstanceField { .. } | ProgramValue::StaticField { .. }
        )
    }

    /// Base-insensitive key for an instance field
    ///
    /// Writes through any base are also recorded under this key, so a read
    /// through a different base (or from another method) still sees them.
    pub fn field_summary(&self) -> Option<ProgramValue> {
        match self {
            ProgramValue::InstanceField { field, .. } => Some(ProgramValue::StaticField {
                field: field.clone(),
            }),
            _ => None,
        }
    }

    /// Method owning the value, if it is method-scoped
    pub fn method(&self) -> Option<&MethodSignature> {
        match self {
            ProgramValue::Local { method, .. }
            | ProgramValue::Parameter { method, .. }
            | ProgramValue::This { method, .. } => Some(method),
            ProgramValue::InstanceField { base, .. } => base.method(),
            ProgramValue::StaticField { .. } | ProgramValue::Constant { .. } => None,
        }
    }
}

impl fmt::Display for ProgramValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramValue::Local { name, .. } => write!(f, "{}", name),
            ProgramValue::Parameter { index, .. } => write!(f, "@parameter{}", index),
            ProgramValue::This { .. } => write!(f, "this"),
            ProgramValue::InstanceField { base, field } => write!(f, "{}.{}", base, field.name),
            ProgramValue::StaticField { field } => {
                write!(f, "{}.{}", field.declaring_type, field.name)
            }
            ProgramValue::Constant { literal } => write!(f, "{}", literal),
        }
    }
}
