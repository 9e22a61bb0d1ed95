//! Feature modules
//!
//! Each feature follows the hexagonal layout:
//! - domain/     - Pure model types
//! - ports/      - Interface definitions (traits)
//! - application/ - Use cases
//! - infrastructure/ - Implementations

pub mod symbolic_execution;
