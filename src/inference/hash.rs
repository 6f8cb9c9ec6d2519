use indexmap::IndexMap;
use crate::node::{Child, Node};
use crate::ty::{Type, UNTYPED};
use super::{infer_child, simplify};

/// Type of a `HASH` node.
///
/// When every key infers to a literal the hash is a record with one field per
/// key (a repeated key keeps its first position and its last value).
/// Otherwise it is `Hash[K, V]` over the unions of all key and value types.
pub fn classify_hash(node: &Node) -> Type {
    let (key_types, value_types) = pair_types(node);

    if key_types.iter().all(Type::is_literal) {
        let mut fields = IndexMap::with_capacity(key_types.len());
        for (key, value) in key_types.into_iter().zip(value_types) {
            if let Type::Literal(lit) = key {
                fields.insert(lit, value);
            }
        }
        return Type::Record(fields);
    }

    Type::hash_of(simplify(key_types), simplify(value_types))
}

/// Key and value types of the alternating list under child 0.
/// A missing list is an empty hash; a trailing key without a value maps to `untyped`.
fn pair_types(node: &Node) -> (Vec<Type>, Vec<Type>) {
    let Some(list) = node.node_at(0) else {
        return (Vec::new(), Vec::new());
    };

    let items = list.children
        .iter()
        .filter(|c| !matches!(c, Child::Nil))
        .collect::<Vec<_>>();

    let mut keys = Vec::with_capacity(items.len() / 2 + 1);
    let mut values = Vec::with_capacity(items.len() / 2 + 1);
    for pair in items.chunks(2) {
        keys.push(infer_child(pair[0]));
        values.push(pair.get(1).map_or(UNTYPED, |v| infer_child(v)));
    }
    (keys, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;
    use crate::ty::Lit;
    use serde_json::json;

    fn node(v: serde_json::Value) -> Node {
        serde_json::from_value(v).unwrap()
    }

    fn record_keys(t: &Type) -> Vec<&Lit> {
        match t {
            Type::Record(fields) => fields.keys().collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn literal_keys_make_a_record() {
        let h = Node::hash(vec![
            (Node::sym("id"), Node::int(1)),
            (Node::str("name"), Node::str("x")),
            (Node::int(3), Node::nil()),
        ]);
        assert_eq!(classify_hash(&h).to_string(), r#"{ id: 1, "name" => "x", 3 => nil }"#);
    }

    #[test]
    fn repeated_keys_overwrite_in_place() {
        let h = Node::hash(vec![
            (Node::sym("a"), Node::int(1)),
            (Node::sym("b"), Node::int(2)),
            (Node::sym("a"), Node::str("late")),
        ]);
        let t = classify_hash(&h);
        assert_eq!(t.to_string(), r#"{ a: "late", b: 2 }"#);
        assert_eq!(record_keys(&t).len(), 2);
    }

    #[test]
    fn any_non_literal_key_falls_back_to_hash() {
        let h = Node::hash(vec![
            (Node::sym("a"), Node::int(1)),
            (Node::new(NodeKind::DSym, vec![]), Node::int(1)),
        ]);
        assert_eq!(
            classify_hash(&h),
            Type::hash_of(
                Type::Union(vec![Type::sym_lit("a"), Type::symbol()]),
                Type::Union(vec![Type::int_lit(1)]),
            )
        );
    }

    #[test]
    fn untyped_key_or_value_poisons_its_side_only() {
        let h = Node::hash(vec![
            (Node::new(NodeKind::Other("VCALL".into()), vec![]), Node::int(1)),
        ]);
        assert_eq!(classify_hash(&h).to_string(), "::Hash[untyped, 1]");
    }

    #[test]
    fn empty_and_missing_lists_are_empty_records() {
        assert_eq!(classify_hash(&Node::hash(vec![])), Type::Record(IndexMap::new()));
        assert_eq!(classify_hash(&node(json!({"type": "HASH"}))), Type::Record(IndexMap::new()));
        assert_eq!(classify_hash(&node(json!({"type": "HASH", "children": ["x"]}))), Type::Record(IndexMap::new()));
    }

    #[test]
    fn unpaired_key_gets_untyped_value() {
        let h = node(json!({"type": "HASH", "children": [{"type": "LIST", "children": [
            {"type": "LIT", "children": [{"sym": "a"}]}, {"type": "LIT", "children": [1]},
            {"type": "LIT", "children": [{"sym": "b"}]}
        ]}]}));
        assert_eq!(classify_hash(&h).to_string(), "{ a: 1, b: untyped }");
    }

    #[test]
    fn nested_values_keep_their_own_shape() {
        let h = Node::hash(vec![
            (Node::sym("tags"), Node::list(vec![Node::str("a"), Node::str("b")])),
            (Node::sym("meta"), Node::hash(vec![(Node::float(1.0), Node::nil())])),
        ]);
        assert_eq!(
            classify_hash(&h).to_string(),
            r#"{ tags: ::Array["a" | "b"], meta: ::Hash[::Float, nil] }"#
        );
    }
}
