//! SMS recognizers

use super::{ApiShape, RecognizerChain, TaggedCallRecognizer};
use crate::features::symbolic_execution::domain::tags;

pub const SMS_MESSAGE_TYPES: &[&str] = &["android.telephony.SmsMessage", "android.telephony.gsm.SmsMessage"];

/// Types the SMS handler is responsible for
pub const SMS_TYPES: &[&str] = &[
    "android.telephony.SmsMessage",
    "android.telephony.gsm.SmsMessage",
    "android.telephony.SmsMessage[]",
];

pub const CREATE_FROM_PDU: TaggedCallRecognizer = TaggedCallRecognizer::new(
    "sms_create_from_pdu",
    ApiShape::new(SMS_MESSAGE_TYPES, &["createFromPdu"]),
    &[tags::SMS],
);

pub const MESSAGES_FROM_INTENT: TaggedCallRecognizer = TaggedCallRecognizer::new(
    "sms_messages_from_intent",
    ApiShape::new(&["android.provider.Telephony$Sms$Intents"], &["getMessagesFromIntent"]),
    &[tags::SMS],
);

/// SMS family, in precedence order
pub fn chain() -> RecognizerChain {
    RecognizerChain::new()
        .with(CREATE_FROM_PDU)
        .with(MESSAGES_FROM_INTENT)
}
