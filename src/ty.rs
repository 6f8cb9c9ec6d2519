//! The inferred type language.
//!
//! A small closed union: `untyped`, `nil`, exact literals, class instances
//! (with type arguments for the built-in generics), unions and literal-keyed
//! records. `Display` renders declaration syntax, e.g. `::Array[1 | 2]`.
use std::fmt;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use indexmap::IndexMap;

/// The shared top type. Every other `Type` is built fresh per inference call.
pub const UNTYPED: Type = Type::Any;

// ------------------------------- Literals --------------------------------- //

/// A scalar value kept verbatim in a `Literal` type or as a record key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Lit {
    Str(String),
    Sym(String),
    Int(i128),
}

impl Lit {
    pub fn class_name(&self) -> &'static str {
        match self {
            Lit::Str(_) => "String",
            Lit::Sym(_) => "Symbol",
            Lit::Int(_) => "Integer",
        }
    }
}

// ------------------------------- Types ------------------------------------ //

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
    Any,
    Nil,
    Literal(Lit),
    ClassInstance { name: String, args: Vec<Type> },
    /// Distinct members, never `Any`. A single member is still a union.
    Union(Vec<Type>),
    /// Field order is first-insertion order; equality ignores order.
    Record(IndexMap<Lit, Type>),
}

pub mod builtin {
    pub const STRING: &str = "String";
    pub const SYMBOL: &str = "Symbol";
    pub const REGEXP: &str = "Regexp";
    pub const TRUE_CLASS: &str = "TrueClass";
    pub const FALSE_CLASS: &str = "FalseClass";
    pub const ARRAY: &str = "Array";
    pub const HASH: &str = "Hash";
    pub const RANGE: &str = "Range";
}

impl Type {
    pub fn class(name: impl Into<String>) -> Type {
        Type::ClassInstance { name: name.into(), args: Vec::new() }
    }

    pub fn generic(name: impl Into<String>, args: Vec<Type>) -> Type {
        Type::ClassInstance { name: name.into(), args }
    }

    pub fn string() -> Type { Type::class(builtin::STRING) }
    pub fn symbol() -> Type { Type::class(builtin::SYMBOL) }

    pub fn array_of(item: Type) -> Type { Type::generic(builtin::ARRAY, vec![item]) }
    pub fn hash_of(key: Type, value: Type) -> Type { Type::generic(builtin::HASH, vec![key, value]) }
    pub fn range_of(item: Type) -> Type { Type::generic(builtin::RANGE, vec![item]) }

    pub fn str_lit(s: impl Into<String>) -> Type { Type::Literal(Lit::Str(s.into())) }
    pub fn sym_lit(s: impl Into<String>) -> Type { Type::Literal(Lit::Sym(s.into())) }
    pub fn int_lit(i: i128) -> Type { Type::Literal(Lit::Int(i)) }

    pub fn is_any(&self) -> bool { matches!(self, Type::Any) }
    pub fn is_literal(&self) -> bool { matches!(self, Type::Literal(_)) }

    /// `Literal(v)` becomes the class of `v`; everything else is returned as is.
    pub fn widen(self) -> Type {
        match self {
            Type::Literal(lit) => Type::class(lit.class_name()),
            other => other,
        }
    }
}

// Consistent with `Eq`: record equality ignores field order, so record fields
// are hashed one by one and combined with a commutative sum.
impl Hash for Type {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Type::Any | Type::Nil => {}
            Type::Literal(lit) => lit.hash(state),
            Type::ClassInstance { name, args } => {
                name.hash(state);
                args.hash(state);
            }
            Type::Union(members) => members.hash(state),
            Type::Record(fields) => {
                let mut sum = 0u64;
                for (key, ty) in fields {
                    let mut h = DefaultHasher::new();
                    key.hash(&mut h);
                    ty.hash(&mut h);
                    sum = sum.wrapping_add(h.finish());
                }
                fields.len().hash(state);
                sum.hash(state);
            }
        }
    }
}

// ------------------------------- Printing --------------------------------- //

fn is_plain_symbol(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else { return false };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    let body = name.trim_end_matches(['?', '!', '=']);
    // at most one trailing suffix char
    if name.len() - body.len() > 1 {
        return false;
    }
    body.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lit::Str(s) => write_quoted(f, s),
            Lit::Sym(s) if is_plain_symbol(s) => write!(f, ":{s}"),
            Lit::Sym(s) => {
                f.write_str(":")?;
                write_quoted(f, s)
            }
            Lit::Int(i) => write!(f, "{i}"),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Any => f.write_str("untyped"),
            Type::Nil => f.write_str("nil"),
            Type::Literal(lit) => write!(f, "{lit}"),
            Type::ClassInstance { name, args } => {
                write!(f, "::{name}")?;
                if !args.is_empty() {
                    f.write_str("[")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 { f.write_str(", ")?; }
                        write!(f, "{arg}")?;
                    }
                    f.write_str("]")?;
                }
                Ok(())
            }
            Type::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 { f.write_str(" | ")?; }
                    match member {
                        Type::Union(_) => write!(f, "({member})")?,
                        _ => write!(f, "{member}")?,
                    }
                }
                Ok(())
            }
            Type::Record(fields) => {
                if fields.is_empty() {
                    return f.write_str("{ }");
                }
                f.write_str("{ ")?;
                for (i, (key, ty)) in fields.iter().enumerate() {
                    if i > 0 { f.write_str(", ")?; }
                    match key {
                        Lit::Sym(s) if is_plain_symbol(s) => write!(f, "{s}: {ty}")?,
                        _ => write!(f, "{key} => {ty}")?,
                    }
                }
                f.write_str(" }")
            }
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
