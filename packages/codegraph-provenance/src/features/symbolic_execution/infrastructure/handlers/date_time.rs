//! Date/time handler
//!
//! A no-argument construction of a date/time type denotes the current
//! instant and is tagged `#now`.

use super::{policy, TypeHandler};
use crate::features::symbolic_execution::domain::{tags, Binding, SymbolicValueKind};
use crate::features::symbolic_execution::infrastructure::recognizers::date_time::{self, DATE_TIME_TYPES};
use crate::features::symbolic_execution::infrastructure::recognizers::boolean::DateComparisonRecognizer;
use crate::features::symbolic_execution::infrastructure::recognizers::RecognizerChain;
use crate::features::symbolic_execution::infrastructure::resolution::ResolutionContext;
use crate::shared::models::{InvokeExpr, ProgramValue};

#[derive(Debug)]
pub struct DateTimeHandler {
    recognizers: RecognizerChain,
}

impl DateTimeHandler {
    /// Family recognizers, then comparisons whose result is discarded
    pub fn new() -> Self {
        Self {
            recognizers: date_time::chain().with(DateComparisonRecognizer),
        }
    }

    /// Family recognizers only, for runs with the boolean family disabled
    pub fn without_comparisons() -> Self {
        Self {
            recognizers: date_time::chain(),
        }
    }
}

impl Default for DateTimeHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeHandler for DateTimeHandler {
    fn name(&self) -> &'static str {
        "date_time"
    }

    fn authorizes(&self, ty: &str) -> bool {
        DATE_TIME_TYPES.contains(&ty)
    }

    fn recognizers(&self) -> &RecognizerChain {
        &self.recognizers
    }

    fn construct(
        &self,
        receiver: &ProgramValue,
        invoke: &InvokeExpr,
        ctx: &mut ResolutionContext<'_>,
    ) -> Option<Vec<Binding>> {
        if !invoke.args.is_empty() {
            return Some(policy::construct_object(receiver, invoke, ctx));
        }
        let id = ctx.intern(SymbolicValueKind::Object {
            ty: invoke.method.declaring_type.clone(),
            args: Some(Vec::new()),
        });
        ctx.values.add_tag(id, tags::NOW);
        Some(vec![Binding::new(receiver.clone(), id)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::symbolic_execution::domain::ValueContext;
    use crate::features::symbolic_execution::infrastructure::{InMemoryIcfg, ReturnSummaries};
    use crate::shared::models::{MethodSignature, ProgramPoint};

    const DATE: &str = "java.util.Date";

    fn method() -> MethodSignature {
        MethodSignature::of("com.app.Main", "run", &[], "void")
    }

    #[test]
    fn test_no_arg_date_is_now() {
        let icfg = InMemoryIcfg::new();
        let returns = ReturnSummaries::default();
        let mut values = ValueContext::new();
        let point = ProgramPoint::new(method(), 1);
        let d = ProgramValue::local(&method(), "r0", DATE);
        let init = InvokeExpr::new_special(MethodSignature::of(DATE, "<init>", &[], "void"), d.clone(), vec![]);

        let mut ctx = ResolutionContext::new(&mut values, &icfg, &returns, &point);
        let bindings = DateTimeHandler::new().process_invoke(&init, &mut ctx).unwrap();
        assert_eq!(bindings[0].value, d);
        let value = values.get(bindings[0].symbolic).unwrap();
        assert!(value.is_object());
        assert!(value.has_tag(tags::NOW));
    }

    #[test]
    fn test_date_from_millis_is_not_now() {
        let icfg = InMemoryIcfg::new();
        let returns = ReturnSummaries::default();
        let mut values = ValueContext::new();
        let point = ProgramPoint::new(method(), 1);
        let d = ProgramValue::local(&method(), "r0", DATE);
        let init = InvokeExpr::new_special(
            MethodSignature::of(DATE, "<init>", &["long"], "void"),
            d,
            vec![ProgramValue::constant(crate::shared::models::Literal::Long(0))],
        );

        let mut ctx = ResolutionContext::new(&mut values, &icfg, &returns, &point);
        let bindings = DateTimeHandler::new().process_invoke(&init, &mut ctx).unwrap();
        assert!(!values.has_tag(bindings[0].symbolic, tags::NOW));
    }
}
