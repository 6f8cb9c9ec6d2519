//! Node decoding with the JSON path of the offending value in errors.
use serde::de::DeserializeOwned;
use serde_json::Value;
use crate::error::LoadError;
use crate::node::Node;

/// Deserialize with JSON-path context in error messages.
pub fn from_value_with_path<T: DeserializeOwned>(value: Value, origin: &str) -> Result<T, LoadError> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(|err| {
        let path = err.path().to_string();
        LoadError::Node { origin: origin.to_string(), path, message: err.into_inner().to_string() }
    })
}

pub fn from_str_with_path<T: DeserializeOwned>(src: &str, origin: &str) -> Result<T, LoadError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| {
        let path = err.path().to_string();
        LoadError::Node { origin: origin.to_string(), path, message: err.into_inner().to_string() }
    })
}

/// Decode one node tree from an already-parsed document.
pub fn node_from_value(value: Value, origin: &str) -> Result<Node, LoadError> {
    from_value_with_path(value, origin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;
    use serde_json::json;

    #[test]
    fn decodes_a_tree() {
        let n = node_from_value(json!({"type": "ZLIST"}), "inline").unwrap();
        assert_eq!(n.kind, NodeKind::ZList);
        let n: Node = from_str_with_path(r#"{"type": "NIL", "children": []}"#, "inline").unwrap();
        assert_eq!(n, Node::nil());
    }

    #[test]
    fn error_names_the_path() {
        let err = node_from_value(json!({"type": "LIST", "children": {"oops": 1}}), "a.json").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("a.json"), "{msg}");
        assert!(msg.contains("children"), "{msg}");
    }

    #[test]
    fn nested_error_names_the_nested_path() {
        let doc = json!({"type": "LIST", "children": [
            {"type": "NIL"},
            {"type": "LIT", "children": {"oops": 1}}
        ]});
        let err = node_from_value(doc, "b.json").unwrap_err();
        let LoadError::Node { path, .. } = &err else { panic!("expected a node error, got {err}") };
        assert_eq!(path, "children[1].children");
    }

    #[test]
    fn root_must_be_a_node() {
        assert!(node_from_value(json!("just text"), "inline").is_err());
        assert!(node_from_value(json!({"children": []}), "inline").is_err());
    }
}
