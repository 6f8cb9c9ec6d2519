//! Method prototypes from method definitions with literal bodies.
//!
//! `def ok = "ok"` becomes `def ok: () -> "ok"`. Parameters are not typed
//! here; a method that takes any becomes `(?)`.
use std::fmt;
use crate::inference::return_type_from_body;
use crate::node::{Child, Node, NodeKind, Scalar};
use crate::ty::{Type, UNTYPED};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodPrototype {
    pub name: String,
    /// `def self.name`
    pub singleton: bool,
    pub takes_params: bool,
    pub return_type: Type,
}

impl fmt::Display for MethodPrototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let recv = if self.singleton { "self." } else { "" };
        let params = if self.takes_params { "(?)" } else { "()" };
        write!(f, "def {recv}{}: {params} -> {}", self.name, self.return_type)
    }
}

/// Every `DEFN`/`DEFS` under `root` (inclusive), in source order.
pub fn extract(root: &Node) -> Vec<MethodPrototype> {
    let mut out = Vec::new();
    collect(root, &mut out);
    out
}

fn collect(node: &Node, out: &mut Vec<MethodPrototype>) {
    match node.kind {
        // DEFN [name, scope]
        NodeKind::Defn => {
            out.extend(prototype(node.scalar_at(0), node.child(1), false));
        }
        // DEFS [receiver, name, scope]
        NodeKind::Defs => {
            if let Some(Child::Node(recv)) = node.child(0) {
                collect(recv, out);
            }
            out.extend(prototype(node.scalar_at(1), node.child(2), true));
        }
        _ => {
            for child in &node.children {
                if let Child::Node(n) = child {
                    collect(n, out);
                }
            }
        }
    }
}

fn prototype(name: Option<&Scalar>, scope: Option<&Child>, singleton: bool) -> Option<MethodPrototype> {
    let Some(Scalar::Sym(name)) = name else {
        return None;
    };
    let (takes_params, return_type) = match scope {
        Some(Child::Node(scope)) => (
            matches!(scope.child(1), Some(Child::Node(_))),
            return_type_from_body(scope),
        ),
        _ => (false, UNTYPED),
    };
    Some(MethodPrototype { name: name.clone(), singleton, takes_params, return_type })
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lines(v: serde_json::Value) -> Vec<String> {
        let root: Node = serde_json::from_value(v).unwrap();
        extract(&root).iter().map(ToString::to_string).collect()
    }

    #[test]
    fn defs_in_a_class_body() {
        let got = lines(json!({"type": "CLASS", "children": [
            {"type": "COLON2", "children": [null, {"sym": "Foo"}]},
            null,
            {"type": "SCOPE", "children": [null, null, {"type": "BLOCK", "children": [
                {"type": "DEFN", "children": [{"sym": "ok"}, {"type": "SCOPE", "children": [
                    null, null, {"type": "STR", "children": ["ok"]}
                ]}]},
                {"type": "DEFN", "children": [{"sym": "nothing"}, {"type": "SCOPE", "children": [
                    null, null, null
                ]}]},
                {"type": "DEFS", "children": [{"type": "SELF"}, {"sym": "limits"}, {"type": "SCOPE", "children": [
                    null, {"type": "ARGS", "children": [1]},
                    {"type": "HASH", "children": [{"type": "LIST", "children": [
                        {"type": "LIT", "children": [{"sym": "max"}]}, {"type": "LIT", "children": [10]}, null
                    ]}]}
                ]}]}
            ]}]}
        ]}));
        assert_eq!(got, vec![
            r#"def ok: () -> "ok""#.to_string(),
            "def nothing: () -> nil".to_string(),
            "def self.limits: (?) -> { max: 10 }".to_string(),
        ]);
    }

    #[test]
    fn named_receivers_and_nesting() {
        let got = lines(json!({"type": "MODULE", "children": [
            {"type": "COLON2", "children": [null, {"sym": "Shop"}]},
            {"type": "SCOPE", "children": [null, null, {"type": "CLASS", "children": [
                {"type": "COLON2", "children": [null, {"sym": "Cart"}]},
                null,
                {"type": "SCOPE", "children": [null, null, {"type": "BLOCK", "children": [
                    {"type": "DEFS", "children": [
                        {"type": "CONST", "children": [{"sym": "Cart"}]},
                        {"sym": "empty"},
                        {"type": "SCOPE", "children": [null, null, {"type": "ZLIST"}]}
                    ]},
                    {"type": "DEFN", "children": [{"sym": "limit"}, {"type": "SCOPE", "children": [
                        null, {"type": "ARGS", "children": [2]}, {"type": "LIT", "children": [50]}
                    ]}]}
                ]}]}
            ]}]}
        ]}));
        assert_eq!(got, vec![
            "def self.empty: () -> ::Array[untyped]".to_string(),
            "def limit: (?) -> 50".to_string(),
        ]);
    }

    #[test]
    fn method_bodies_are_not_searched() {
        let got = lines(json!({"type": "DEFN", "children": [{"sym": "outer"}, {"type": "SCOPE", "children": [
            null, null, {"type": "DEFN", "children": [{"sym": "inner"}, {"type": "SCOPE", "children": [null, null, null]}]}
        ]}]}));
        assert_eq!(got, vec!["def outer: () -> untyped".to_string()]);
    }

    #[test]
    fn non_literal_bodies_are_untyped() {
        let got = lines(json!({"type": "DEFN", "children": [{"sym": "calc"}, {"type": "SCOPE", "children": [
            null, null, {"type": "CALL", "children": []}
        ]}]}));
        assert_eq!(got, vec!["def calc: () -> untyped".to_string()]);
    }

    #[test]
    fn malformed_definitions() {
        // no name: skipped; no scope: untyped
        let got = lines(json!({"type": "BLOCK", "children": [
            {"type": "DEFN", "children": [null]},
            {"type": "DEFN", "children": [{"sym": "bare"}]}
        ]}));
        assert_eq!(got, vec!["def bare: () -> untyped".to_string()]);
    }
}
