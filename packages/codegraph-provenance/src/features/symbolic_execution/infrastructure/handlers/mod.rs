//! Type-recognition handlers
//!
//! A statement is dispatched on one type name (see [`HandlerChain::process`])
//! to the handlers authorizing that type, in chain order. The first handler
//! returning `Some` wins; the object handler authorizes every type and always
//! comes last.

pub mod boolean;
pub mod date_time;
pub mod location;
pub mod numeric;
pub mod object;
pub mod policy;
pub mod sms;
pub mod string;

pub use boolean::BooleanHandler;
pub use date_time::DateTimeHandler;
pub use location::LocationHandler;
pub use numeric::NumericHandler;
pub use object::ObjectHandler;
pub use sms::SmsHandler;
pub use string::StringHandler;

use super::recognizers::RecognizerChain;
use super::resolution::ResolutionContext;
use crate::config::RecognizerToggles;
use crate::features::symbolic_execution::domain::Binding;
use crate::shared::models::{Expr, InvokeExpr, ProgramValue, Stmt};

/// Resolves statements whose dispatch type it authorizes
///
/// Every hook returns `None` when the handler has nothing to say, letting the
/// next authorizing handler try. Defaults implement the shared policy in
/// [`policy`]; handlers override only what is type specific.
pub trait TypeHandler: Send + Sync {
    fn name(&self) -> &'static str;

    /// Exact type-name match; no subtyping
    fn authorizes(&self, ty: &str) -> bool;

    fn recognizers(&self) -> &RecognizerChain;

    fn process_definition(
        &self,
        target: &ProgramValue,
        rhs: &Expr,
        ctx: &mut ResolutionContext<'_>,
    ) -> Option<Vec<Binding>> {
        policy::definition(self, target, rhs, ctx)
    }

    fn process_invoke(&self, invoke: &InvokeExpr, ctx: &mut ResolutionContext<'_>) -> Option<Vec<Binding>> {
        policy::invocation(self, invoke, ctx)
    }

    fn process_return(&self, value: &ProgramValue, ctx: &mut ResolutionContext<'_>) -> Option<Vec<Binding>> {
        policy::returned(value, ctx)
    }

    /// `receiver.<init>(args)`
    fn construct(
        &self,
        receiver: &ProgramValue,
        invoke: &InvokeExpr,
        ctx: &mut ResolutionContext<'_>,
    ) -> Option<Vec<Binding>> {
        Some(policy::construct_object(receiver, invoke, ctx))
    }
}

/// Ordered handlers
#[derive(Default)]
pub struct HandlerChain {
    handlers: Vec<Box<dyn TypeHandler>>,
}

impl HandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, handler: impl TypeHandler + 'static) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    /// String, numeric, boolean, date/time, location, SMS, then object
    ///
    /// A disabled family is left out, so its types fall through to the
    /// object handler.
    pub fn standard(toggles: &RecognizerToggles) -> Self {
        let mut chain = Self::new();
        if toggles.string {
            chain = chain.with(if toggles.boolean {
                StringHandler::new()
            } else {
                StringHandler::without_comparisons()
            });
        }
        if toggles.numeric {
            chain = chain.with(NumericHandler::new());
        }
        if toggles.boolean {
            chain = chain.with(BooleanHandler::new());
        }
        if toggles.date_time {
            chain = chain.with(if toggles.boolean {
                DateTimeHandler::new()
            } else {
                DateTimeHandler::without_comparisons()
            });
        }
        if toggles.location {
            chain = chain.with(LocationHandler::new());
        }
        if toggles.sms {
            chain = chain.with(SmsHandler::new());
        }
        chain.with(ObjectHandler::new())
    }

    /// Dispatches one statement
    ///
    /// - definition: the target's type
    /// - invocation: the receiver's type, or the declaring type for static calls
    /// - return: the returned value's type
    pub fn process(&self, stmt: &Stmt, ctx: &mut ResolutionContext<'_>) -> Option<Vec<Binding>> {
        match stmt {
            Stmt::Assign { target, rhs } => {
                self.first(target.ty(), |h| h.process_definition(target, rhs, ctx))
            }
            Stmt::Invoke { invoke } => {
                self.first(invoke.dispatch_type(), |h| h.process_invoke(invoke, ctx))
            }
            Stmt::Return { value: Some(value) } => {
                self.first(value.ty(), |h| h.process_return(value, ctx))
            }
            Stmt::Return { value: None } | Stmt::Nop => None,
        }
    }

    fn first(
        &self,
        ty: &str,
        mut hook: impl FnMut(&dyn TypeHandler) -> Option<Vec<Binding>>,
    ) -> Option<Vec<Binding>> {
        self.handlers
            .iter()
            .filter(|h| h.authorizes(ty))
            .find_map(|h| hook(h.as_ref()))
    }

    /// Names of the handlers authorizing `ty`, in dispatch order
    pub fn handlers_for(&self, ty: &str) -> Vec<&'static str> {
        self.handlers
            .iter()
            .filter(|h| h.authorizes(ty))
            .map(|h| h.name())
            .collect()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
