//! Resolution policy shared by every type handler
//!
//! Handlers differ only in which invocations they recognize and how they
//! construct objects; literals, fields, operators, copies, parameters and
//! opaque calls resolve the same way for all types.

use super::TypeHandler;
use crate::features::symbolic_execution::domain::{Binding, SymbolicValueId, SymbolicValueKind};
use crate::features::symbolic_execution::infrastructure::recognizers::CallShape;
use crate::features::symbolic_execution::infrastructure::resolution::ResolutionContext;
use crate::features::symbolic_execution::infrastructure::tag_propagation::{propagate_mutually, propagate_tags};
use crate::shared::models::{Expr, InvokeExpr, ProgramValue, Stmt};

/// `target = rhs`
pub fn definition<H: TypeHandler + ?Sized>(
    handler: &H,
    target: &ProgramValue,
    rhs: &Expr,
    ctx: &mut ResolutionContext<'_>,
) -> Option<Vec<Binding>> {
    let bindings = match rhs {
        Expr::Use { value } => use_value(target, value, ctx),
        Expr::BinOp { op, lhs, rhs } => bin_op(target, op, lhs, rhs, ctx),
        Expr::Invoke { invoke } => call_result(handler, target, invoke, ctx),
        Expr::New { ty } => new_object(target, ty, ctx),
        Expr::Cast { value, .. } => use_value(target, value, ctx),
        Expr::ArrayElement { base, .. } => use_value(target, base, ctx),
        Expr::ParameterRef { index, .. } => parameter(target, *index, ctx),
        Expr::ThisRef { .. } => this_ref(target, ctx),
    };
    Some(bindings)
}

/// Invocation statement whose result, if any, is discarded
pub fn invocation<H: TypeHandler + ?Sized>(
    handler: &H,
    invoke: &InvokeExpr,
    ctx: &mut ResolutionContext<'_>,
) -> Option<Vec<Binding>> {
    if invoke.is_constructor() {
        let receiver = invoke.receiver.as_ref()?;
        // super(...) / this(...) chaining inside a constructor
        if matches!(receiver, ProgramValue::This { .. }) {
            return None;
        }
        return handler.construct(receiver, invoke, ctx);
    }
    let point = ctx.point;
    handler
        .recognizers()
        .recognize(&CallShape::new(invoke, None, point), ctx)
}

/// `return value`
pub fn returned(value: &ProgramValue, ctx: &mut ResolutionContext<'_>) -> Option<Vec<Binding>> {
    let mut aliases = Vec::new();
    let ids = ctx.operand(value, &mut aliases);
    Some(Binding::all(value, ids))
}

/// Literal, field read or local copy
pub fn use_value(target: &ProgramValue, value: &ProgramValue, ctx: &mut ResolutionContext<'_>) -> Vec<Binding> {
    if let Some(literal) = value.as_literal() {
        let id = ctx.constant(literal);
        return vec![Binding::new(target.clone(), id)];
    }
    if value.is_field() {
        return field_read(target, value, ctx);
    }
    local_copy(target, value, ctx)
}

/// `target = source`: target aliases source's values
pub fn local_copy(target: &ProgramValue, source: &ProgramValue, ctx: &mut ResolutionContext<'_>) -> Vec<Binding> {
    let mut bindings = Vec::new();
    let ids = ctx.operand(source, &mut bindings);
    bindings.extend(Binding::all(target, ids));
    bindings
}

/// `target = base.f` / `target = T.f`
///
/// The read yields a field value carrying the tags of whatever was last
/// written to the field.
pub fn field_read(target: &ProgramValue, field: &ProgramValue, ctx: &mut ResolutionContext<'_>) -> Vec<Binding> {
    let kind = match field {
        ProgramValue::InstanceField { base, field } => SymbolicValueKind::Field {
            base: Some(base.as_ref().clone()),
            field: field.clone(),
        },
        ProgramValue::StaticField { field } => SymbolicValueKind::Field {
            base: None,
            field: field.clone(),
        },
        other => return local_copy(target, other, ctx),
    };
    let id = ctx.intern(kind);

    let mut written = ctx.resolve(field);
    if let Some(summary) = field.field_summary() {
        written.extend(ctx.resolve(&summary));
    }
    propagate_tags(ctx.values, &written, &[id]);
    vec![Binding::new(target.clone(), id)]
}

/// `target = lhs op rhs`: operands and result end with identical tags
pub fn bin_op(
    target: &ProgramValue,
    op: &str,
    lhs: &ProgramValue,
    rhs: &ProgramValue,
    ctx: &mut ResolutionContext<'_>,
) -> Vec<Binding> {
    let mut bindings = Vec::new();
    let mut ids = ctx.operand(lhs, &mut bindings);
    ids.extend(ctx.operand(rhs, &mut bindings));

    let result = ctx.intern(SymbolicValueKind::BinOp {
        op: op.to_string(),
        lhs: lhs.clone(),
        rhs: rhs.clone(),
    });
    ids.push(result);
    propagate_mutually(ctx.values, &ids);

    bindings.push(Binding::new(target.clone(), result));
    bindings
}

/// `target = new T`
pub fn new_object(target: &ProgramValue, ty: &str, ctx: &mut ResolutionContext<'_>) -> Vec<Binding> {
    let id = ctx.intern(SymbolicValueKind::Object {
        ty: ty.to_string(),
        args: None,
    });
    vec![Binding::new(target.clone(), id)]
}

/// `receiver.<init>(args)`: an object carrying the arguments' tags
pub fn construct_object(receiver: &ProgramValue, invoke: &InvokeExpr, ctx: &mut ResolutionContext<'_>) -> Vec<Binding> {
    let id = ctx.intern(SymbolicValueKind::Object {
        ty: invoke.method.declaring_type.clone(),
        args: Some(invoke.args.clone()),
    });
    let mut sources = Vec::new();
    for arg in &invoke.args {
        sources.extend(ctx.resolve(arg));
    }
    propagate_tags(ctx.values, &sources, &[id]);
    vec![Binding::new(receiver.clone(), id)]
}

/// Assigned call: recognizers first, then the callee summary or an opaque value
pub fn call_result<H: TypeHandler + ?Sized>(
    handler: &H,
    target: &ProgramValue,
    invoke: &InvokeExpr,
    ctx: &mut ResolutionContext<'_>,
) -> Vec<Binding> {
    let point = ctx.point;
    if let Some(bindings) = handler
        .recognizers()
        .recognize(&CallShape::new(invoke, Some(target), point), ctx)
    {
        return bindings;
    }
    opaque_call(target, invoke, ctx)
}

/// Callee return summary when available, else a method representation
///
/// A callee on the current method's call cycle without a summary yet resolves
/// to an unknown: nothing can return from the cycle before one of its members
/// returns something else.
pub fn opaque_call(target: &ProgramValue, invoke: &InvokeExpr, ctx: &mut ResolutionContext<'_>) -> Vec<Binding> {
    if ctx.interprocedural {
        let callees = ctx.icfg.callees_of(ctx.point);
        let ids: Vec<SymbolicValueId> = callees
            .iter()
            .filter_map(|callee| ctx.return_values(callee))
            .flatten()
            .copied()
            .collect();
        if !ids.is_empty() {
            return Binding::all(target, ids);
        }
        if let Some(callee) = callees.iter().find(|callee| ctx.shares_cycle_with(callee)) {
            let id = ctx.unknown(format!("recursive:{}", callee));
            return vec![Binding::new(target.clone(), id)];
        }
    }
    let id = ctx.intern(SymbolicValueKind::MethodRepresentation {
        receiver: invoke.receiver.clone(),
        args: invoke.args.clone(),
        method: invoke.method.clone(),
    });
    vec![Binding::new(target.clone(), id)]
}

/// `target = @parameterN`: the argument values at every call site
pub fn parameter(target: &ProgramValue, index: usize, ctx: &mut ResolutionContext<'_>) -> Vec<Binding> {
    let method = ctx.method().clone();
    let formal = ProgramValue::parameter(&method, index, target.ty());
    let ids = from_call_sites(ctx, |invoke| invoke.arg(index).cloned())
        .unwrap_or_else(|| vec![ctx.unknown(format!("{}@parameter{}", method, index))]);

    let mut bindings = Binding::all(target, ids.iter().copied());
    bindings.extend(Binding::all(&formal, ids));
    bindings
}

/// `target = @this`: the receivers at every call site
pub fn this_ref(target: &ProgramValue, ctx: &mut ResolutionContext<'_>) -> Vec<Binding> {
    let method = ctx.method().clone();
    let formal = ProgramValue::this(&method);
    let ids = from_call_sites(ctx, |invoke| invoke.receiver.clone())
        .unwrap_or_else(|| vec![ctx.unknown(format!("{}@this", method))]);

    let mut bindings = Binding::all(target, ids.iter().copied());
    bindings.extend(Binding::all(&formal, ids));
    bindings
}

/// Resolves `pick(call)` at each call site of the current method
///
/// An actual without values yet is represented by an alias of it. Returns
/// `None` when there is no call site to resolve from.
fn from_call_sites(
    ctx: &mut ResolutionContext<'_>,
    pick: impl Fn(&InvokeExpr) -> Option<ProgramValue>,
) -> Option<Vec<SymbolicValueId>> {
    if !ctx.interprocedural {
        return None;
    }
    let icfg = ctx.icfg;
    let mut ids = Vec::new();
    for site in icfg.callers_of(ctx.method()) {
        let Some(actual) = icfg.statement(&site).and_then(Stmt::invoke_expr).and_then(&pick) else {
            continue;
        };
        let resolved = ctx.resolve_at(&actual, &site);
        if resolved.is_empty() {
            ids.push(ctx.intern(SymbolicValueKind::SingleVariable { value: actual }));
        } else {
            ids.extend(resolved);
        }
    }
    (!ids.is_empty()).then_some(ids)
}
