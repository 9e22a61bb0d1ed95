//! Method signatures and program points

use serde::{Deserialize, Serialize};
use std::fmt;

/// Constructor method name in the IR
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Static initializer method name in the IR
pub const STATIC_INITIALIZER_NAME: &str = "<clinit>";

/// Fully qualified method signature
///
/// Identity is structural: two signatures with the same declaring type, name,
/// parameter types and return type denote the same method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodSignature {
    /// Declaring type, e.g. `java.util.Calendar`
    pub declaring_type: String,

    /// Simple method name, e.g. `getInstance`
    pub name: String,

    /// Exact parameter type names
    #[serde(default)]
    pub parameter_types: Vec<String>,

    /// Exact return type name (`void` for none)
    pub return_type: String,
}

impl MethodSignature {
    pub fn new(
        declaring_type: impl Into<String>,
        name: impl Into<String>,
        parameter_types: Vec<String>,
        return_type: impl Into<String>,
    ) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            name: name.into(),
            parameter_types,
            return_type: return_type.into(),
        }
    }

    /// Shorthand for tests and recognizer tables: parameter types as `&str`
    pub fn of(declaring_type: &str, name: &str, parameter_types: &[&str], return_type: &str) -> Self {
        Self::new(
            declaring_type,
            name,
            parameter_types.iter().map(|p| p.to_string()).collect(),
            return_type,
        )
    }

    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }

    pub fn is_static_initializer(&self) -> bool {
        self.name == STATIC_INITIALIZER_NAME
    }

    pub fn returns_void(&self) -> bool {
        self.return_type == "void"
    }

    /// Shape key ignoring overloads: `declaring_type.name`
    pub fn shape(&self) -> String {
        format!("{}.{}", self.declaring_type, self.name)
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{}: {} {}({})>",
            self.declaring_type,
            self.return_type,
            self.name,
            self.parameter_types.join(",")
        )
    }
}

/// Location of a statement: statement `index` in `method`'s body
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProgramPoint {
    pub method: MethodSignature,
    pub index: usize,
}

impl ProgramPoint {
    pub fn new(method: MethodSignature, index: usize) -> Self {
        Self { method, index }
    }

    /// True when both points belong to the same method and `self` comes first
    pub fn precedes(&self, other: &ProgramPoint) -> bool {
        self.method == other.method && self.index < other.index
    }

    pub fn same_method(&self, other: &ProgramPoint) -> bool {
        self.method == other.method
    }
}

impl fmt::Display for ProgramPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.method, self.index)
    }
}
