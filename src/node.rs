//! Literal node tree handed over by the parser.
//!
//! A node is a kind tag plus ordered children. Children are either further
//! nodes, scalar payloads (the raw value of a `STR`/`LIT`, a method name, ...)
//! or absent slots (`nil` in the parser's output).
//!
//! The JSON encoding accepted here:
//! - node: `{"type": "LIST", "children": [...]}` (`children` may be omitted)
//! - absent slot: `null`
//! - scalar: bare string / integer / float, or tagged
//!   `{"sym": "a"}`, `{"str": "a"}`, `{"int": 1}`, `{"float": 1.5}`,
//!   `{"object": {"class": "Rational", "repr": "(1/3)"}}`
//!
//! Any object with a `type` (or `children`) key must be a well-formed node.
use std::fmt;
use ordered_float::OrderedFloat;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;

// ------------------------------- Kinds ------------------------------------ //

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum NodeKind {
    Str,
    DStr,
    XStr,
    DSym,
    DRegx,
    True,
    False,
    Nil,
    Lit,
    ZList,
    List,
    Dot2,
    Dot3,
    Hash,
    Scope,
    Defn,
    Defs,
    /// Anything the parser emits that we have no rule for.
    Other(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Str => "STR",
            NodeKind::DStr => "DSTR",
            NodeKind::XStr => "XSTR",
            NodeKind::DSym => "DSYM",
            NodeKind::DRegx => "DREGX",
            NodeKind::True => "TRUE",
            NodeKind::False => "FALSE",
            NodeKind::Nil => "NIL",
            NodeKind::Lit => "LIT",
            NodeKind::ZList => "ZLIST",
            NodeKind::List => "LIST",
            NodeKind::Dot2 => "DOT2",
            NodeKind::Dot3 => "DOT3",
            NodeKind::Hash => "HASH",
            NodeKind::Scope => "SCOPE",
            NodeKind::Defn => "DEFN",
            NodeKind::Defs => "DEFS",
            NodeKind::Other(tag) => tag,
        }
    }
}

impl From<String> for NodeKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "STR" => NodeKind::Str,
            "DSTR" => NodeKind::DStr,
            "XSTR" => NodeKind::XStr,
            "DSYM" => NodeKind::DSym,
            "DREGX" => NodeKind::DRegx,
            "TRUE" => NodeKind::True,
            "FALSE" => NodeKind::False,
            "NIL" => NodeKind::Nil,
            "LIT" => NodeKind::Lit,
            // older parsers spell the list kinds ARRAY/ZARRAY
            "ZLIST" | "ZARRAY" => NodeKind::ZList,
            "LIST" | "ARRAY" => NodeKind::List,
            "DOT2" => NodeKind::Dot2,
            "DOT3" => NodeKind::Dot3,
            "HASH" => NodeKind::Hash,
            "SCOPE" => NodeKind::Scope,
            "DEFN" => NodeKind::Defn,
            "DEFS" => NodeKind::Defs,
            _ => NodeKind::Other(tag),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ------------------------------- Scalars ---------------------------------- //

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Scalar {
    Str(String),
    Sym(String),
    Int(i128),
    Float(OrderedFloat<f64>),
    /// Any other runtime value, known only by its class (e.g. `Rational`).
    Other { class: String, repr: String },
}

impl Scalar {
    /// Name of the runtime class the value is an instance of.
    pub fn class_name(&self) -> &str {
        match self {
            Scalar::Str(_) => "String",
            Scalar::Sym(_) => "Symbol",
            Scalar::Int(_) => "Integer",
            Scalar::Float(_) => "Float",
            Scalar::Other { class, .. } => class,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum TaggedScalar {
    Str(String),
    Sym(String),
    Int(i64),
    Float(f64),
    Object {
        class: String,
        #[serde(default)]
        repr: String,
    },
}

impl From<TaggedScalar> for Scalar {
    fn from(tagged: TaggedScalar) -> Self {
        match tagged {
            TaggedScalar::Str(s) => Scalar::Str(s),
            TaggedScalar::Sym(s) => Scalar::Sym(s),
            TaggedScalar::Int(i) => Scalar::Int(i as i128),
            TaggedScalar::Float(f) => Scalar::Float(OrderedFloat(f)),
            TaggedScalar::Object { class, repr } => Scalar::Other { class, repr },
        }
    }
}

/// A payload we have no tag for, classed by its JSON shape.
fn opaque(value: Value) -> Scalar {
    let class = match &value {
        Value::Bool(true) => "TrueClass",
        Value::Bool(false) => "FalseClass",
        Value::Array(_) => "Array",
        Value::Object(_) => "Hash",
        _ => "Object",
    };
    Scalar::Other { class: class.to_string(), repr: value.to_string() }
}

fn scalar_from_object(fields: serde_json::Map<String, Value>) -> Scalar {
    let value = Value::Object(fields);
    match TaggedScalar::deserialize(&value) {
        Ok(tagged) => tagged.into(),
        Err(_) => opaque(value),
    }
}

// ------------------------------- Tree ------------------------------------- //

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Child {
    Node(Node),
    Nil,
    Scalar(Scalar),
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub children: Vec<Child>,
}

/// An object with a `type` or `children` key is a node and decodes strictly,
/// so a broken nested node is an error at its own path. Other objects are
/// tagged scalars, or opaque payloads when the tag is unknown.
impl<'de> Deserialize<'de> for Child {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ChildVisitor)
    }
}

struct ChildVisitor;

impl<'de> Visitor<'de> for ChildVisitor {
    type Value = Child;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a node, a scalar payload or null")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Child, E> { Ok(Child::Nil) }
    fn visit_none<E: de::Error>(self) -> Result<Child, E> { Ok(Child::Nil) }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Child, E> {
        Ok(opaque(Value::Bool(b)).into())
    }

    fn visit_i64<E: de::Error>(self, i: i64) -> Result<Child, E> { Ok(Scalar::Int(i as i128).into()) }
    fn visit_u64<E: de::Error>(self, u: u64) -> Result<Child, E> { Ok(Scalar::Int(u as i128).into()) }
    fn visit_f64<E: de::Error>(self, f: f64) -> Result<Child, E> { Ok(Scalar::Float(OrderedFloat(f)).into()) }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Child, E> { Ok(Scalar::Str(s.to_string()).into()) }
    fn visit_string<E: de::Error>(self, s: String) -> Result<Child, E> { Ok(Scalar::Str(s).into()) }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Child, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element::<Value>()? {
            items.push(item);
        }
        Ok(opaque(Value::Array(items)).into())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Child, A::Error> {
        let mut kind: Option<NodeKind> = None;
        let mut children: Option<Vec<Child>> = None;
        let mut rest = serde_json::Map::new();
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "type" => kind = Some(map.next_value()?),
                "children" => children = Some(map.next_value()?),
                _ => {
                    let value = map.next_value::<Value>()?;
                    rest.insert(key, value);
                }
            }
        }
        match (kind, children) {
            (Some(kind), children) => Ok(Child::Node(Node { kind, children: children.unwrap_or_default() })),
            (None, Some(_)) => Err(de::Error::missing_field("type")),
            (None, None) => Ok(scalar_from_object(rest).into()),
        }
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self { Child::Node(node) }
}

impl From<Scalar> for Child {
    fn from(scalar: Scalar) -> Self { Child::Scalar(scalar) }
}

impl Node {
    pub fn new(kind: NodeKind, children: Vec<Child>) -> Self { Self { kind, children } }

    pub fn leaf(kind: NodeKind) -> Self { Self::new(kind, Vec::new()) }

    pub fn child(&self, index: usize) -> Option<&Child> { self.children.get(index) }

    /// The child at `index` when it is a node.
    pub fn node_at(&self, index: usize) -> Option<&Node> {
        match self.children.get(index) {
            Some(Child::Node(node)) => Some(node),
            _ => None,
        }
    }

    /// The child at `index` when it is a scalar payload.
    pub fn scalar_at(&self, index: usize) -> Option<&Scalar> {
        match self.children.get(index) {
            Some(Child::Scalar(scalar)) => Some(scalar),
            _ => None,
        }
    }

    // Shorthands for building literal trees by hand.

    pub fn str(value: impl Into<String>) -> Self {
        Self::new(NodeKind::Str, vec![Scalar::Str(value.into()).into()])
    }

    pub fn sym(value: impl Into<String>) -> Self {
        Self::new(NodeKind::Lit, vec![Scalar::Sym(value.into()).into()])
    }

    pub fn int(value: i128) -> Self {
        Self::new(NodeKind::Lit, vec![Scalar::Int(value).into()])
    }

    pub fn float(value: f64) -> Self {
        Self::new(NodeKind::Lit, vec![Scalar::Float(OrderedFloat(value)).into()])
    }

    pub fn nil() -> Self { Self::leaf(NodeKind::Nil) }

    pub fn list(items: Vec<Node>) -> Self {
        if items.is_empty() {
            return Self::leaf(NodeKind::ZList);
        }
        Self::new(NodeKind::List, items.into_iter().map(Child::Node).collect())
    }

    pub fn range(low: Node, high: Node, exclusive: bool) -> Self {
        let kind = if exclusive { NodeKind::Dot3 } else { NodeKind::Dot2 };
        Self::new(kind, vec![low.into(), high.into()])
    }

    /// `HASH` over a `LIST` of alternating keys and values, `nil`-terminated
    /// the way the parser emits it.
    pub fn hash(pairs: Vec<(Node, Node)>) -> Self {
        if pairs.is_empty() {
            return Self::new(NodeKind::Hash, vec![Child::Nil]);
        }
        let mut items = Vec::with_capacity(pairs.len() * 2 + 1);
        for (k, v) in pairs {
            items.push(Child::Node(k));
            items.push(Child::Node(v));
        }
        items.push(Child::Nil);
        Self::new(NodeKind::Hash, vec![Self::new(NodeKind::List, items).into()])
    }
}

// ------------------------------- Tests ------------------------------------ //
