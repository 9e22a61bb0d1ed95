//! String handler
//!
//! Besides the string recognizers, specializes construction: `new String()`
//! is the empty string and `new String(s)` / `new StringBuilder(s)` alias `s`.

use super::{policy, TypeHandler};
use crate::features::symbolic_execution::domain::Binding;
use crate::features::symbolic_execution::infrastructure::recognizers::string::{self, STRING_TYPES};
use crate::features::symbolic_execution::infrastructure::recognizers::boolean::StringComparisonRecognizer;
use crate::features::symbolic_execution::infrastructure::recognizers::RecognizerChain;
use crate::features::symbolic_execution::infrastructure::resolution::ResolutionContext;
use crate::shared::models::{InvokeExpr, Literal, ProgramValue};

/// Argument types a one-argument string constructor copies from
const COPIED_FROM: &[&str] = &[
    "java.lang.String",
    "java.lang.StringBuilder",
    "java.lang.StringBuffer",
    "java.lang.CharSequence",
    "char[]",
    "byte[]",
];

#[derive(Debug)]
pub struct StringHandler {
    recognizers: RecognizerChain,
}

impl StringHandler {
    /// Family recognizers, then comparisons whose result is discarded
    pub fn new() -> Self {
        Self {
            recognizers: string::chain().with(StringComparisonRecognizer),
        }
    }

    /// Family recognizers only, for runs with the boolean family disabled
    pub fn without_comparisons() -> Self {
        Self {
            recognizers: string::chain(),
        }
    }
}

impl Default for StringHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeHandler for StringHandler {
    fn name(&self) -> &'static str {
        "string"
    }

    fn authorizes(&self, ty: &str) -> bool {
        STRING_TYPES.contains(&ty)
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
        match invoke.args.as_slice() {
            [] => {
                let id = ctx.constant(&Literal::String(String::new()));
                Some(vec![Binding::new(receiver.clone(), id)])
            }
            [source] if COPIED_FROM.contains(&source.ty()) => {
                let mut bindings = Vec::new();
                let ids = ctx.operand(source, &mut bindings);
                bindings.extend(Binding::all(receiver, ids));
                Some(bindings)
            }
            // StringBuilder(int capacity)
            [_] => {
                let id = ctx.constant(&Literal::String(String::new()));
                Some(vec![Binding::new(receiver.clone(), id)])
            }
            _ => Some(policy::construct_object(receiver, invoke, ctx)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::symbolic_execution::domain::{SymbolicValueKind, ValueContext};
    use crate::features::symbolic_execution::infrastructure::{InMemoryIcfg, ReturnSummaries};
    use crate::shared::models::{MethodSignature, ProgramPoint};

    fn method() -> MethodSignature {
        MethodSignature::of("com.app.Main", "run", &[], "void")
    }

    fn init(ty: &str, receiver: &ProgramValue, args: Vec<ProgramValue>) -> InvokeExpr {
        let params: Vec<&str> = args.iter().map(|a| a.ty()).collect();
        InvokeExpr::new_special(
            MethodSignature::of(ty, "<init>", &params, "void"),
            receiver.clone(),
            args,
        )
    }

    #[test]
    fn test_no_arg_string_is_empty_constant() {
        let icfg = InMemoryIcfg::new();
        let returns = ReturnSummaries::default();
        let mut values = ValueContext::new();
        let point = ProgramPoint::new(method(), 1);
        let s = ProgramValue::local(&method(), "r0", "java.lang.String");

        let mut ctx = ResolutionContext::new(&mut values, &icfg, &returns, &point);
        let bindings = StringHandler::new()
            .process_invoke(&init("java.lang.String", &s, vec![]), &mut ctx)
            .unwrap();
        assert_eq!(bindings.len(), 1);
        assert_eq!(
            values.get(bindings[0].symbolic).map(|v| v.kind().clone()),
            Some(SymbolicValueKind::Constant {
                literal: Literal::String(String::new())
            })
        );
    }

    #[test]
    fn test_copy_constructor_aliases_argument() {
        let icfg = InMemoryIcfg::new();
        let returns = ReturnSummaries::default();
        let mut values = ValueContext::new();
        let point = ProgramPoint::new(method(), 1);
        let sb = ProgramValue::local(&method(), "r0", "java.lang.StringBuilder");

        let mut ctx = ResolutionContext::new(&mut values, &icfg, &returns, &point);
        let bindings = StringHandler::new()
            .process_invoke(
                &init("java.lang.StringBuilder", &sb, vec![ProgramValue::string("sms:")]),
                &mut ctx,
            )
            .unwrap();
        assert_eq!(bindings[0].value, sb);
        assert_eq!(
            values.get(bindings[0].symbolic).and_then(|v| v.as_constant()),
            Some(&Literal::String("sms:".into()))
        );
    }
}
