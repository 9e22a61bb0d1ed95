use super::TypeHandler;
use crate::features::symbolic_execution::infrastructure::recognizers::sms::{self, SMS_TYPES};
use crate::features::symbolic_execution::infrastructure::recognizers::RecognizerChain;

/// SMS messages and message arrays
#[derive(Debug)]
pub struct SmsHandler {
    recognizers: RecognizerChain,
}

impl SmsHandler {
    pub fn new() -> Self {
        Self {
            recognizers: sms::chain(),
        }
    }
}

impl Default for SmsHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeHandler for SmsHandler {
    fn name(&self) -> &'static str {
        "sms"
    }

    fn authorizes(&self, ty: &str) -> bool {
        SMS_TYPES.contains(&ty)
    }

    fn recognizers(&self) -> &RecognizerChain {
        &self.recognizers
    }
}
