use indexmap::IndexSet;
use crate::ty::{Type, UNTYPED};

/// Merge candidate element types into one.
///
/// - no candidates → `untyped`
/// - any `untyped` candidate → `untyped`
/// - otherwise a union of the distinct candidates, in first-seen order.
///
/// A single distinct candidate still comes back wrapped in a `Union`.
pub fn simplify(types: Vec<Type>) -> Type {
    if types.is_empty() || types.iter().any(Type::is_any) {
        return UNTYPED;
    }
    Type::Union(dedup(types))
}

/// Drop structural duplicates, keeping the first occurrence.
pub(super) fn dedup(types: Vec<Type>) -> Vec<Type> {
    types.into_iter().collect::<IndexSet<_>>().into_iter().collect()
}
