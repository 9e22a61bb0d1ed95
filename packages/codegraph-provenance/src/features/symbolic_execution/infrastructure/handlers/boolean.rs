//! Boolean handler

use super::TypeHandler;
use crate::features::symbolic_execution::infrastructure::recognizers::{boolean, RecognizerChain};
use crate::shared::models::type_names;

#[derive(Debug)]
pub struct BooleanHandler {
    recognizers: RecognizerChain,
}

impl BooleanHandler {
    pub fn new() -> Self {
        Self {
            recognizers: boolean::chain(),
        }
    }
}

impl Default for BooleanHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeHandler for BooleanHandler {
    fn name(&self) -> &'static str {
        "boolean"
    }

    fn authorizes(&self, ty: &str) -> bool {
        ty == type_names::BOOLEAN
    }

    fn recognizers(&self) -> &RecognizerChain {
        &self.recognizers
    }
}
