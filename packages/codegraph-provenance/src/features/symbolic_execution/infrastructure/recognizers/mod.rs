//! Method-shape recognizers
//!
//! A recognizer matches an invocation by declaring type and method name (any
//! overload) and produces bindings for it. Recognizers of one family form an
//! ordered [`RecognizerChain`]; the first recognizer returning `Some` wins.

pub mod boolean;
pub mod date_time;
pub mod location;
pub mod numeric;
pub mod sms;
pub mod string;

pub use numeric::NumericKind;

use super::resolution::ResolutionContext;
use super::tag_propagation::{propagate_tags, tag_all};
use crate::features::symbolic_execution::domain::{Binding, SymbolicValueId, SymbolicValueKind};
use crate::shared::models::{InvokeExpr, MethodSignature, ProgramPoint, ProgramValue};

/// Invocation being recognized
#[derive(Debug, Clone, Copy)]
pub struct CallShape<'a> {
    pub invoke: &'a InvokeExpr,
    /// Value receiving the result (`None` for invoke statements)
    pub target: Option<&'a ProgramValue>,
    pub point: &'a ProgramPoint,
}

impl<'a> CallShape<'a> {
    pub fn new(invoke: &'a InvokeExpr, target: Option<&'a ProgramValue>, point: &'a ProgramPoint) -> Self {
        Self {
            invoke,
            target,
            point,
        }
    }

    pub fn method(&self) -> &'a MethodSignature {
        &self.invoke.method
    }

    pub fn name(&self) -> &'a str {
        &self.invoke.method.name
    }

    pub fn receiver(&self) -> Option<&'a ProgramValue> {
        self.invoke.receiver.as_ref()
    }

    pub fn arg(&self, index: usize) -> Option<&'a ProgramValue> {
        self.invoke.arg(index)
    }

    pub fn is(&self, shape: &ApiShape) -> bool {
        shape.matches(&self.invoke.method)
    }
}

/// Declaring types x method names
#[derive(Debug, Clone, Copy)]
pub struct ApiShape {
    pub declaring_types: &'static [&'static str],
    pub names: &'static [&'static str],
}

impl ApiShape {
    pub const fn new(declaring_types: &'static [&'static str], names: &'static [&'static str]) -> Self {
        Self {
            declaring_types,
            names,
        }
    }

    pub fn matches(&self, method: &MethodSignature) -> bool {
        self.declaring_types.contains(&method.declaring_type.as_str())
            && self.names.contains(&method.name.as_str())
    }
}

/// Which operands a derived value takes its tags from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inherit {
    Nothing,
    Receiver,
    Arguments,
    All,
}

/// Where a derived value is bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receives {
    /// The assignment target, if any
    Result,
    /// The receiver (the call mutates it)
    Receiver,
}

/// Recognizes one family of call shapes
pub trait MethodRecognizer: Send + Sync {
    fn name(&self) -> &'static str;

    /// `None` when the call is not this recognizer's shape
    fn recognize(&self, call: &CallShape<'_>, ctx: &mut ResolutionContext<'_>) -> Option<Vec<Binding>>;
}

/// Ordered recognizers of one family
#[derive(Default)]
pub struct RecognizerChain {
    recognizers: Vec<Box<dyn MethodRecognizer>>,
}

impl RecognizerChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, recognizer: impl MethodRecognizer + 'static) -> Self {
        self.recognizers.push(Box::new(recognizer));
        self
    }

    /// Appends every recognizer of `other` after this chain's own
    pub fn then(mut self, other: RecognizerChain) -> Self {
        self.recognizers.extend(other.recognizers);
        self
    }

    /// First match wins
    pub fn recognize(&self, call: &CallShape<'_>, ctx: &mut ResolutionContext<'_>) -> Option<Vec<Binding>> {
        self.recognizers.iter().find_map(|r| {
            let bindings = r.recognize(call, ctx)?;
            #[cfg(feature = "trace")]
            tracing::trace!(recognizer = r.name(), call = %call.invoke, "recognized");
            Some(bindings)
        })
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.recognizers.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.recognizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recognizers.is_empty()
    }
}

impl std::fmt::Debug for RecognizerChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Interns the opaque value of `call` and tags it
///
/// Inherited tags come from the operands' current values; unresolved operands
/// contribute nothing.
pub fn derived_value(
    call: &CallShape<'_>,
    ctx: &mut ResolutionContext<'_>,
    tags: &[&str],
    inherit: Inherit,
) -> SymbolicValueId {
    let id = ctx.intern(SymbolicValueKind::MethodRepresentation {
        receiver: call.invoke.receiver.clone(),
        args: call.invoke.args.clone(),
        method: call.invoke.method.clone(),
    });
    for tag in tags {
        ctx.values.add_tag(id, *tag);
    }

    let mut sources = Vec::new();
    if matches!(inherit, Inherit::Receiver | Inherit::All) {
        if let Some(receiver) = call.receiver() {
            sources.extend(ctx.resolve(receiver));
        }
    }
    if matches!(inherit, Inherit::Arguments | Inherit::All) {
        for arg in &call.invoke.args {
            sources.extend(ctx.resolve(arg));
        }
    }
    propagate_tags(ctx.values, &sources, &[id]);
    id
}

/// Binds `id` where `receives` says
pub fn bind_derived(call: &CallShape<'_>, receives: Receives, id: SymbolicValueId) -> Vec<Binding> {
    let value = match receives {
        Receives::Result => call.target,
        Receives::Receiver => call.receiver(),
    };
    value
        .map(|value| vec![Binding::new(value.clone(), id)])
        .unwrap_or_default()
}

/// Table-driven recognizer: one shape, fixed tags, inherited operand tags
#[derive(Debug, Clone)]
pub struct TaggedCallRecognizer {
    pub name: &'static str,
    pub shape: ApiShape,
    pub tags: &'static [&'static str],
    pub inherit: Inherit,
    pub receives: Receives,
}

impl TaggedCallRecognizer {
    pub const fn new(name: &'static str, shape: ApiShape, tags: &'static [&'static str]) -> Self {
        Self {
            name,
            shape,
            tags,
            inherit: Inherit::Nothing,
            receives: Receives::Result,
        }
    }

    pub const fn inheriting(mut self, inherit: Inherit) -> Self {
        self.inherit = inherit;
        self
    }

    pub const fn mutating_receiver(mut self) -> Self {
        self.receives = Receives::Receiver;
        self
    }
}

impl MethodRecognizer for TaggedCallRecognizer {
    fn name(&self) -> &'static str {
        self.name
    }

    fn recognize(&self, call: &CallShape<'_>, ctx: &mut ResolutionContext<'_>) -> Option<Vec<Binding>> {
        if !call.is(&self.shape) {
            return None;
        }
        if self.receives == Receives::Receiver && call.receiver().is_none() {
            return None;
        }
        let id = derived_value(call, ctx, self.tags, self.inherit);
        Some(bind_derived(call, self.receives, id))
    }
}

/// Tags every value in `ids` and returns whether any changed
pub(crate) fn mark(ctx: &mut ResolutionContext<'_>, ids: &[SymbolicValueId], tag: &str) -> bool {
    tag_all(ctx.values, ids, tag)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::symbolic_execution::domain::ValueContext;
    use crate::features::symbolic_execution::infrastructure::{InMemoryIcfg, ReturnSummaries};
    use crate::features::symbolic_execution::domain::tags;

    const SHAPE: ApiShape = ApiShape::new(&["java.lang.System"], &["currentTimeMillis", "nanoTime"]);

    #[test]
    fn test_api_shape_matches_any_overload() {
        assert!(SHAPE.matches(&MethodSignature::of("java.lang.System", "nanoTime", &[], "long")));
        assert!(SHAPE.matches(&MethodSignature::of("java.lang.System", "currentTimeMillis", &["int"], "long")));
        assert!(!SHAPE.matches(&MethodSignature::of("java.lang.Runtime", "nanoTime", &[], "long")));
    }

    #[test]
    fn test_chain_first_match_wins() {
        let m = MethodSignature::of("com.app.Main", "run", &[], "void");
        let target = ProgramValue::local(&m, "l0", "long");
        let invoke = InvokeExpr::new_static(
            MethodSignature::of("java.lang.System", "currentTimeMillis", &[], "long"),
            vec![],
        );
        let point = ProgramPoint::new(m, 0);

        let chain = RecognizerChain::new()
            .with(TaggedCallRecognizer::new("now", SHAPE, &[tags::NOW]))
            .with(TaggedCallRecognizer::new("shadowed", SHAPE, &[tags::HOUR]));
        assert_eq!(chain.names(), vec!["now", "shadowed"]);

        let icfg = InMemoryIcfg::new();
        let returns = ReturnSummaries::default();
        let mut values = ValueContext::new();
        let mut ctx = ResolutionContext::new(&mut values, &icfg, &returns, &point);
        let call = CallShape::new(&invoke, Some(&target), &point);

        let bindings = chain.recognize(&call, &mut ctx).unwrap();
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].value, target);
        assert!(values.has_tag(bindings[0].symbolic, tags::NOW));
        assert!(!values.has_tag(bindings[0].symbolic, tags::HOUR));
    }

    #[test]
    fn test_unmatched_shape_is_none() {
        let m = MethodSignature::of("com.app.Main", "run", &[], "void");
        let invoke = InvokeExpr::new_static(MethodSignature::of("com.app.Util", "f", &[], "long"), vec![]);
        let point = ProgramPoint::new(m, 0);
        let icfg = InMemoryIcfg::new();
        let returns = ReturnSummaries::default();
        let mut values = ValueContext::new();
        let mut ctx = ResolutionContext::new(&mut values, &icfg, &returns, &point);

        let chain = RecognizerChain::new().with(TaggedCallRecognizer::new("now", SHAPE, &[tags::NOW]));
        assert!(chain.recognize(&CallShape::new(&invoke, None, &point), &mut ctx).is_none());
        assert!(values.is_empty());
    }
}
