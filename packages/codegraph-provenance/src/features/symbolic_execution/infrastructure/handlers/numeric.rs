//! Numeric handler: primitive int/long/float/double/short/byte values

use super::TypeHandler;
use crate::features::symbolic_execution::infrastructure::recognizers::{numeric, NumericKind, RecognizerChain};

#[derive(Debug)]
pub struct NumericHandler {
    recognizers: RecognizerChain,
}

impl NumericHandler {
    pub fn new() -> Self {
        Self {
            recognizers: numeric::chain(),
        }
    }
}

impl Default for NumericHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeHandler for NumericHandler {
    fn name(&self) -> &'static str {
        "numeric"
    }

    fn authorizes(&self, ty: &str) -> bool {
        NumericKind::from_type_name(ty).is_some()
    }

    fn recognizers(&self) -> &RecognizerChain {
        &self.recognizers
    }
}
