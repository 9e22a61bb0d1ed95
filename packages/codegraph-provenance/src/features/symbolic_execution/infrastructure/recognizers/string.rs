//! String recognizers: SMS text accessors and string transformations

use super::{
    bind_derived, derived_value, ApiShape, CallShape, Inherit, MethodRecognizer, Receives,
    RecognizerChain, TaggedCallRecognizer,
};
use crate::features::symbolic_execution::domain::{tags, Binding};
use crate::features::symbolic_execution::infrastructure::resolution::ResolutionContext;
use crate::features::symbolic_execution::infrastructure::tag_propagation::propagate_tags;

use super::sms::SMS_MESSAGE_TYPES;

/// String-like types
pub const STRING_TYPES: &[&str] = &[
    "java.lang.String",
    "java.lang.StringBuilder",
    "java.lang.StringBuffer",
    "java.lang.CharSequence",
];

const BUILDER_TYPES: &[&str] = &["java.lang.StringBuilder", "java.lang.StringBuffer"];

/// Types whose `toString`/`valueOf` yield a string view of the receiver
const STRINGIFIED_TYPES: &[&str] = &[
    "java.lang.String",
    "java.lang.StringBuilder",
    "java.lang.StringBuffer",
    "java.lang.CharSequence",
    "java.lang.Object",
    "java.lang.Integer",
    "java.lang.Long",
    "java.lang.Float",
    "java.lang.Double",
    "java.lang.Boolean",
];

const TRANSFORMATIONS: &[&str] = &[
    "toLowerCase",
    "toUpperCase",
    "trim",
    "strip",
    "substring",
    "subSequence",
    "concat",
    "replace",
    "replaceAll",
    "replaceFirst",
    "toString",
    "valueOf",
    "intern",
    "append",
    "insert",
    "reverse",
];

pub const SMS_BODY: TaggedCallRecognizer = TaggedCallRecognizer::new(
    "sms_body",
    ApiShape::new(SMS_MESSAGE_TYPES, &["getMessageBody", "getDisplayMessageBody"]),
    &[tags::SMS, tags::SMS_BODY],
)
.inheriting(Inherit::Receiver);

pub const SMS_SENDER: TaggedCallRecognizer = TaggedCallRecognizer::new(
    "sms_sender",
    ApiShape::new(
        SMS_MESSAGE_TYPES,
        &["getOriginatingAddress", "getDisplayOriginatingAddress"],
    ),
    &[tags::SMS, tags::SMS_SENDER],
)
.inheriting(Inherit::Receiver);

pub const TRANSFORMATION: TaggedCallRecognizer = TaggedCallRecognizer::new(
    "string_transformation",
    ApiShape::new(STRINGIFIED_TYPES, TRANSFORMATIONS),
    &[],
)
.inheriting(Inherit::All);

/// `StringBuilder.append/insert`
///
/// The builder is mutated in place: its new state (bound to the receiver, and
/// to the target when the result is kept) carries the tags of the builder and
/// of the appended arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppendRecognizer;

const APPEND: ApiShape = ApiShape::new(BUILDER_TYPES, &["append", "insert"]);

impl MethodRecognizer for AppendRecognizer {
    fn name(&self) -> &'static str {
        "string_builder_append"
    }

    fn recognize(&self, call: &CallShape<'_>, ctx: &mut ResolutionContext<'_>) -> Option<Vec<Binding>> {
        if !call.is(&APPEND) {
            return None;
        }
        let receiver = call.receiver()?;

        let id = derived_value(call, ctx, &[], Inherit::All);
        let previous = ctx.resolve(receiver);
        propagate_tags(ctx.values, &[id], &previous);

        let mut bindings = bind_derived(call, Receives::Receiver, id);
        bindings.extend(bind_derived(call, Receives::Result, id));
        Some(bindings)
    }
}

/// String family, in precedence order
pub fn chain() -> RecognizerChain {
    RecognizerChain::new()
        .with(SMS_BODY)
        .with(SMS_SENDER)
        .with(AppendRecognizer)
        .with(TRANSFORMATION)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Fixture;
    use super::*;
    use crate::shared::models::{InvokeExpr, MethodSignature, ProgramValue};

    const SMS_MESSAGE: &str = "android.telephony.SmsMessage";
    const STRING: &str = "java.lang.String";

    #[test]
    fn test_sms_body_and_sender() {
        let mut fx = Fixture::new();
        let msg = fx.local("r1", SMS_MESSAGE);
        fx.bind(0, &msg, &[tags::SMS]);

        let body = fx.local("r2", STRING);
        let get_body = InvokeExpr::new_virtual(
            MethodSignature::of(SMS_MESSAGE, "getMessageBody", &[], STRING),
            msg.clone(),
            vec![],
        );
        let bindings = fx.run(&chain(), 1, &get_body, Some(&body)).unwrap();
        assert!(fx.tagged(&bindings, &body, tags::SMS_BODY));
        assert!(fx.tagged(&bindings, &body, tags::SMS));

        let sender = fx.local("r3", STRING);
        let get_sender = InvokeExpr::new_virtual(
            MethodSignature::of(SMS_MESSAGE, "getOriginatingAddress", &[], STRING),
            msg,
            vec![],
        );
        let bindings = fx.run(&chain(), 2, &get_sender, Some(&sender)).unwrap();
        assert!(fx.tagged(&bindings, &sender, tags::SMS_SENDER));
        assert!(!fx.tagged(&bindings, &sender, tags::SMS_BODY));
    }

    #[test]
    fn test_transformation_keeps_receiver_tags() {
        let mut fx = Fixture::new();
        let body = fx.local("r2", STRING);
        fx.bind(0, &body, &[tags::SMS_BODY]);

        let lower = fx.local("r3", STRING);
        let call = InvokeExpr::new_virtual(
            MethodSignature::of(STRING, "toLowerCase", &[], STRING),
            body,
            vec![],
        );
        let bindings = fx.run(&chain(), 1, &call, Some(&lower)).unwrap();
        assert!(fx.tagged(&bindings, &lower, tags::SMS_BODY));
    }

    #[test]
    fn test_append_statement_mutates_builder() {
        let mut fx = Fixture::new();
        let sb = fx.local("r1", "java.lang.StringBuilder");
        let sender = fx.local("r2", STRING);
        let before = fx.bind(0, &sb, &[]);
        fx.bind(1, &sender, &[tags::SMS_SENDER]);

        let call = InvokeExpr::new_virtual(
            MethodSignature::of(
                "java.lang.StringBuilder",
                "append",
                &[STRING],
                "java.lang.StringBuilder",
            ),
            sb.clone(),
            vec![sender],
        );
        let bindings = fx.run(&chain(), 2, &call, None).unwrap();
        assert_eq!(bindings.len(), 1);
        assert!(fx.tagged(&bindings, &sb, tags::SMS_SENDER));
        assert!(fx.values.has_tag(before, tags::SMS_SENDER));
    }

    #[test]
    fn test_other_string_methods_fall_through() {
        let mut fx = Fixture::new();
        let s = fx.local("r1", STRING);
        let n = ProgramValue::local(&fx.method, "i0", "int");
        let call = InvokeExpr::new_virtual(MethodSignature::of(STRING, "length", &[], "int"), s, vec![]);
        assert!(fx.run(&chain(), 0, &call, Some(&n)).is_none());
    }
}
