//! Tag propagation between symbolic values

use crate::features::symbolic_execution::domain::{SymbolicValueId, ValueContext};
use std::collections::BTreeSet;

/// Union of the tags carried by `ids`
pub fn tags_of(ctx: &ValueContext, ids: &[SymbolicValueId]) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();
    for id in ids {
        tags.extend(ctx.tags(*id));
    }
    tags
}

/// Copies every tag of `from` onto each value in `to`
///
/// Returns true if any target gained a tag.
pub fn propagate_tags(ctx: &mut ValueContext, from: &[SymbolicValueId], to: &[SymbolicValueId]) -> bool {
    let tags = tags_of(ctx, from);
    if tags.is_empty() {
        return false;
    }
    let mut changed = false;
    for id in to {
        changed |= ctx.add_tags(*id, tags.iter().cloned());
    }
    changed
}

/// Makes the tag sets of all `ids` identical (their union)
pub fn propagate_mutually(ctx: &mut ValueContext, ids: &[SymbolicValueId]) -> bool {
    propagate_tags(ctx, ids, ids)
}

/// Adds `tag` to every value in `ids`
pub fn tag_all(ctx: &mut ValueContext, ids: &[SymbolicValueId], tag: &str) -> bool {
    let mut changed = false;
    for id in ids {
        changed |= ctx.add_tag(*id, tag);
    }
    changed
}
