//! Common test utilities for codegraph-provenance
//!
//! Program builders and assertions shared by the integration tests.

#![allow(dead_code)]

mod assertions;
mod builders;

pub use assertions::*;
pub use builders::*;
