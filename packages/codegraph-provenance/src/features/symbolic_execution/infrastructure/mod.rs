//! Infrastructure: ICFG adapter, resolution context, recognizers and handlers

pub mod handlers;
pub mod in_memory_icfg;
pub mod recognizers;
pub mod resolution;
pub mod tag_propagation;

pub use handlers::{HandlerChain, TypeHandler};
pub use in_memory_icfg::InMemoryIcfg;
pub use recognizers::{CallShape, MethodRecognizer, NumericKind, RecognizerChain};
pub use resolution::{ResolutionContext, ReturnSummaries};
pub use tag_propagation::{propagate_mutually, propagate_tags, tag_all, tags_of};
