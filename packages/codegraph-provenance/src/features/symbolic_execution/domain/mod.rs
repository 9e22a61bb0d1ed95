//! Domain model: symbolic values, tags and the value context

pub mod contextual_values;
pub mod symbolic_value;
pub mod tags;
pub mod value_context;

pub use contextual_values::{ContextualValues, HistoryEntry};
pub use symbolic_value::{SymbolicValue, SymbolicValueId, SymbolicValueKind};
pub use value_context::{Binding, ValueContext};
