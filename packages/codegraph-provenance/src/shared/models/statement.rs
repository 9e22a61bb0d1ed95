//! Statement-level IR consumed by the engine
//!
//! Statements come in three analysed categories (definition, invocation,
//! return). Anything else is carried as [`Stmt::Nop`] and skipped.

use super::method::MethodSignature;
use super::program_value::ProgramValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dispatch kind of an invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvokeKind {
    Static,
    Virtual,
    Special,
    Interface,
}

/// Invocation expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvokeExpr {
    pub kind: InvokeKind,
    pub method: MethodSignature,
    /// Receiver for instance calls
    #[serde(default)]
    pub receiver: Option<ProgramValue>,
    #[serde(default)]
    pub args: Vec<ProgramValue>,
}

impl InvokeExpr {
    pub fn new_static(method: MethodSignature, args: Vec<ProgramValue>) -> Self {
        Self {
            kind: InvokeKind::Static,
            method,
            receiver: None,
            args,
        }
    }

    pub fn new_virtual(method: MethodSignature, receiver: ProgramValue, args: Vec<ProgramValue>) -> Self {
        Self {
            kind: InvokeKind::Virtual,
            method,
            receiver: Some(receiver),
            args,
        }
    }

    pub fn new_special(method: MethodSignature, receiver: ProgramValue, args: Vec<ProgramValue>) -> Self {
        Self {
            kind: InvokeKind::Special,
            method,
            receiver: Some(receiver),
            args,
        }
    }

    pub fn is_static(&self) -> bool {
        self.kind == InvokeKind::Static || self.receiver.is_none()
    }

    pub fn is_constructor(&self) -> bool {
        self.method.is_constructor()
    }

    pub fn arg(&self, index: usize) -> Option<&ProgramValue> {
        self.args.get(index)
    }

    /// Type used for handler dispatch: the receiver's static type, or the
    /// declaring type for static calls
    pub fn dispatch_type(&self) -> &str {
        match &self.receiver {
            Some(receiver) => receiver.ty(),
            None => &self.method.declaring_type,
        }
    }
}

impl fmt::Display for InvokeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args = self
            .args
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        match &self.receiver {
            Some(receiver) => write!(f, "{}.{}({})", receiver, self.method.name, args),
            None => write!(
                f,
                "{}.{}({})",
                self.method.declaring_type, self.method.name, args
            ),
        }
    }
}

/// Right-hand side of a definition statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "expr", rename_all = "snake_case")]
pub enum Expr {
    /// Plain use of a value (local copy, field read, literal)
    Use { value: ProgramValue },

    /// Binary operator application
    BinOp {
        op: String,
        lhs: ProgramValue,
        rhs: ProgramValue,
    },

    /// Method call whose result is assigned
    Invoke { invoke: InvokeExpr },

    /// Allocation `new T`; the constructor call follows as its own statement
    New { ty: String },

    /// `(ty) value`
    Cast { ty: String, value: ProgramValue },

    /// `base[index]`
    ArrayElement {
        base: ProgramValue,
        index: ProgramValue,
    },

    /// `@parameterN: ty` identity reference
    ParameterRef { index: usize, ty: String },

    /// `@this: ty` identity reference
    ThisRef { ty: String },
}

impl Expr {
    pub fn as_invoke(&self) -> Option<&InvokeExpr> {
        match self {
            Expr::Invoke { invoke } => Some(invoke),
            _ => None,
        }
    }
}

/// IR statement
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "stmt", rename_all = "snake_case")]
pub enum Stmt {
    /// Definition `target = rhs` (identity statements included)
    Assign { target: ProgramValue, rhs: Expr },

    /// Invocation whose result, if any, is discarded
    Invoke { invoke: InvokeExpr },

    /// `return` / `return value`
    Return {
        #[serde(default)]
        value: Option<ProgramValue>,
    },

    /// Any statement the engine does not analyse
    Nop,
}

impl Stmt {
    pub fn assign(target: ProgramValue, rhs: Expr) -> Self {
        Stmt::Assign { target, rhs }
    }

    pub fn invoke(invoke: InvokeExpr) -> Self {
        Stmt::Invoke { invoke }
    }

    pub fn ret(value: Option<ProgramValue>) -> Self {
        Stmt::Return { value }
    }

    /// Invocation carried by the statement, assigned or not
    pub fn invoke_expr(&self) -> Option<&InvokeExpr> {
        match self {
            Stmt::Assign { rhs, .. } => rhs.as_invoke(),
            Stmt::Invoke { invoke } => Some(invoke),
            _ => None,
        }
    }

    pub fn is_return(&self) -> bool {
        matches!(self, Stmt::Return { .. })
    }

    /// Value receiving the result of a call on this statement
    pub fn call_target(&self) -> Option<&ProgramValue> {
        match self {
            Stmt::Assign { target, rhs: Expr::Invoke { .. } } => Some(target),
            _ => None,
        }
    }
}

/// Statements of one method in definition order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodBody {
    pub signature: MethodSignature,
    pub statements: Vec<Stmt>,
}

impl MethodBody {
    pub fn new(signature: MethodSignature, statements: Vec<Stmt>) -> Self {
        Self {
            signature,
            statements,
        }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
