//! Fallback handler for every type
//!
//! Recognizes no call shapes; everything it resolves comes from the shared
//! policy (literals, fields, copies, parameters, constructors, opaque calls).

use super::TypeHandler;
use crate::features::symbolic_execution::infrastructure::recognizers::RecognizerChain;

#[derive(Debug, Default)]
pub struct ObjectHandler {
    recognizers: RecognizerChain,
}

impl ObjectHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TypeHandler for ObjectHandler {
    fn name(&self) -> &'static str {
        "object"
    }

    fn authorizes(&self, _ty: &str) -> bool {
        true
    }

    fn recognizers(&self) -> &RecognizerChain {
        &self.recognizers
    }
}
