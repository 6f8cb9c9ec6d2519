use crate::ty::{Type, UNTYPED};
use super::union::dedup;

/// Element type of a range from its endpoint types.
///
/// Unknown endpoints are ignored and literals are widened to their class, so
/// `1..5` is a range of `Integer`. Endpoints that still disagree give
/// `untyped`; a range element is never a union.
pub fn unify_range(types: Vec<Type>) -> Type {
    let known = types
        .into_iter()
        .filter(|t| !t.is_any())
        .map(Type::widen)
        .collect::<Vec<_>>();

    let mut distinct = dedup(known);
    match distinct.len() {
        1 => distinct.remove(0),
        _ => UNTYPED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_class_collapses() {
        assert_eq!(unify_range(vec![Type::int_lit(1), Type::int_lit(1)]), Type::class("Integer"));
        assert_eq!(unify_range(vec![Type::int_lit(1), Type::int_lit(9)]), Type::class("Integer"));
        assert_eq!(unify_range(vec![Type::str_lit("a"), Type::string()]), Type::string());
    }

    #[test]
    fn untyped_endpoints_are_dropped() {
        assert_eq!(unify_range(vec![Type::Any, Type::int_lit(3)]), Type::class("Integer"));
        assert_eq!(unify_range(vec![Type::Any, Type::Any]), Type::Any);
        assert_eq!(unify_range(vec![]), Type::Any);
    }

    #[test]
    fn disagreement_is_untyped() {
        assert_eq!(unify_range(vec![Type::int_lit(1), Type::class("Float")]), Type::Any);
        assert_eq!(unify_range(vec![Type::Nil, Type::str_lit("z")]), Type::Any);
    }

    #[test]
    fn non_literals_pass_through() {
        assert_eq!(unify_range(vec![Type::Nil, Type::Nil]), Type::Nil);
    }
}
