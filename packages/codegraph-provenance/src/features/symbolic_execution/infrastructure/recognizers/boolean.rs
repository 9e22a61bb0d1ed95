//! Boolean recognizers: string and date comparisons
//!
//! Comparisons do not compute a truth value. They mark both operands and the
//! result with a comparison marker, plus `marker:literal` when one side is a
//! known literal, so detectors can tell what a branch condition tests.

use super::{bind_derived, derived_value, mark, ApiShape, CallShape, Inherit, MethodRecognizer, Receives, RecognizerChain};
use crate::features::symbolic_execution::domain::{tags, Binding, SymbolicValueId};
use crate::features::symbolic_execution::infrastructure::resolution::ResolutionContext;
use crate::features::symbolic_execution::infrastructure::tag_propagation::{propagate_mutually, propagate_tags};

const STRING_COMPARISON: ApiShape = ApiShape::new(
    &["java.lang.String", "java.lang.CharSequence"],
    &[
        "equals",
        "equalsIgnoreCase",
        "contentEquals",
        "contains",
        "startsWith",
        "endsWith",
        "matches",
    ],
);

const DATE_COMPARISON: ApiShape = ApiShape::new(
    &[
        "java.util.Date",
        "java.util.Calendar",
        "java.util.GregorianCalendar",
        "java.time.LocalDateTime",
        "java.time.LocalDate",
        "java.time.LocalTime",
        "java.time.ZonedDateTime",
        "java.time.Instant",
    ],
    &["after", "before", "isAfter", "isBefore"],
);

fn string_marker(name: &str) -> Option<&'static str> {
    match name {
        "equals" | "equalsIgnoreCase" | "contentEquals" => Some(tags::EQUALS),
        "contains" => Some(tags::CONTAINS),
        "startsWith" => Some(tags::STARTS_WITH),
        "endsWith" => Some(tags::ENDS_WITH),
        "matches" => Some(tags::MATCHES),
        _ => None,
    }
}

fn date_marker(name: &str) -> Option<&'static str> {
    match name {
        "after" | "isAfter" => Some(tags::AFTER),
        "before" | "isBefore" => Some(tags::BEFORE),
        _ => None,
    }
}

/// Operands of a binary comparison, resolved
struct Operands {
    receiver: Vec<SymbolicValueId>,
    argument: Vec<SymbolicValueId>,
    bindings: Vec<Binding>,
}

impl Operands {
    fn resolve(call: &CallShape<'_>, ctx: &mut ResolutionContext<'_>) -> Option<Self> {
        let (receiver, argument) = (call.receiver()?, call.arg(0)?);
        let mut bindings = Vec::new();
        let receiver = ctx.operand(receiver, &mut bindings);
        let argument = ctx.operand(argument, &mut bindings);
        Some(Self {
            receiver,
            argument,
            bindings,
        })
    }

    fn all(&self) -> Vec<SymbolicValueId> {
        self.receiver.iter().chain(&self.argument).copied().collect()
    }
}

/// `equals`, `contains`, `startsWith`, ... on strings
#[derive(Debug, Clone, Copy, Default)]
pub struct StringComparisonRecognizer;

impl MethodRecognizer for StringComparisonRecognizer {
    fn name(&self) -> &'static str {
        "string_comparison"
    }

    fn recognize(&self, call: &CallShape<'_>, ctx: &mut ResolutionContext<'_>) -> Option<Vec<Binding>> {
        if !call.is(&STRING_COMPARISON) {
            return None;
        }
        let marker = string_marker(call.name())?;
        let operands = Operands::resolve(call, ctx)?;

        let receiver_literal = call.receiver().and_then(|r| ctx.literal_of(r));
        let argument_literal = call.arg(0).and_then(|a| ctx.literal_of(a));

        let result = derived_value(call, ctx, &[marker], Inherit::Nothing);
        mark(ctx, &operands.all(), marker);
        if let Some(literal) = argument_literal {
            let tag = tags::literal_tag(marker, &literal.as_text());
            mark(ctx, &operands.receiver, &tag);
        }
        if let Some(literal) = receiver_literal {
            let tag = tags::literal_tag(marker, &literal.as_text());
            mark(ctx, &operands.argument, &tag);
        }
        propagate_tags(ctx.values, &operands.all(), &[result]);

        let mut bindings = operands.bindings;
        bindings.extend(bind_derived(call, Receives::Result, result));
        Some(bindings)
    }
}

/// `after`/`before` on dates
///
/// Both dates constrain each other, so their tags are shared.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateComparisonRecognizer;

impl MethodRecognizer for DateComparisonRecognizer {
    fn name(&self) -> &'static str {
        "date_comparison"
    }

    fn recognize(&self, call: &CallShape<'_>, ctx: &mut ResolutionContext<'_>) -> Option<Vec<Binding>> {
        if !call.is(&DATE_COMPARISON) {
            return None;
        }
        let marker = date_marker(call.name())?;
        let operands = Operands::resolve(call, ctx)?;
        let both = operands.all();

        let result = derived_value(call, ctx, &[marker], Inherit::Nothing);
        mark(ctx, &both, marker);
        propagate_mutually(ctx.values, &both);
        propagate_tags(ctx.values, &both, &[result]);

        let mut bindings = operands.bindings;
        bindings.extend(bind_derived(call, Receives::Result, result));
        Some(bindings)
    }
}

/// Boolean family, in precedence order
pub fn chain() -> RecognizerChain {
    RecognizerChain::new()
        .with(StringComparisonRecognizer)
        .with(DateComparisonRecognizer)
}
