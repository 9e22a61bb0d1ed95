use super::TypeHandler;
use crate::features::symbolic_execution::infrastructure::recognizers::location::{self, LOCATION_TYPES};
use crate::features::symbolic_execution::infrastructure::recognizers::RecognizerChain;

/// `android.location.Location` values
#[derive(Debug)]
pub struct LocationHandler {
    recognizers: RecognizerChain,
}

impl LocationHandler {
    pub fn new() -> Self {
        Self {
            recognizers: location::chain(),
        }
    }
}

impl Default for LocationHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeHandler for LocationHandler {
    fn name(&self) -> &'static str {
        "location"
    }

    fn authorizes(&self, ty: &str) -> bool {
        LOCATION_TYPES.contains(&ty)
    }

    fn recognizers(&self) -> &RecognizerChain {
        &self.recognizers
    }
}
