//! IR data model
//!
//! The engine never produces IR; these types describe what an external front
//! end hands it. Everything derives serde so a program can be loaded from JSON.

pub mod method;
pub mod program_value;
pub mod statement;

pub use method::{MethodSignature, ProgramPoint, CONSTRUCTOR_NAME, STATIC_INITIALIZER_NAME};
pub use program_value::{type_names, FieldRef, Literal, ProgramValue};
pub use statement::{Expr, InvokeExpr, InvokeKind, MethodBody, Stmt};
