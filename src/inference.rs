//! Literal type inference.
//!
//! Walk a literal node tree and produce the most useful static type for it:
//! exact literals where the value is printable, class instances otherwise,
//! element unions for lists, a single widened element type for ranges, and
//! records for hashes whose keys are all literals.
//!
//! Design goals:
//! - Total: every node yields a type; unknown shapes degrade to `untyped`.
//! - Pure: no state between calls besides the `UNTYPED` constant.
//! - Recursion depth equals input tree depth, nothing more.
pub mod lit;
pub mod union;
pub mod range;
pub mod hash;

use crate::node::{Child, Node, NodeKind, Scalar};
use crate::ty::{builtin, Lit, Type, UNTYPED};

pub use lit::is_safe_literal;
pub use union::simplify;
pub use range::unify_range;
pub use hash::classify_hash;

// -------------------------------- Infer ----------------------------------- //

pub fn infer(node: &Node) -> Type {
    match &node.kind {
        NodeKind::Str => match node.scalar_at(0) {
            Some(Scalar::Str(s)) => exact_or(Lit::Str(s.clone()), Type::string()),
            _ => UNTYPED,
        },
        NodeKind::DStr | NodeKind::XStr => Type::string(),
        NodeKind::DSym => Type::symbol(),
        NodeKind::DRegx => Type::class(builtin::REGEXP),
        NodeKind::True => Type::class(builtin::TRUE_CLASS),
        NodeKind::False => Type::class(builtin::FALSE_CLASS),
        NodeKind::Nil => Type::Nil,
        NodeKind::Lit => match node.scalar_at(0) {
            Some(scalar) => infer_payload(scalar),
            None => UNTYPED,
        },
        NodeKind::ZList => Type::array_of(UNTYPED),
        NodeKind::List => {
            let elems = node.children
                .iter()
                .filter(|c| !matches!(c, Child::Nil))
                .map(infer_child)
                .collect::<Vec<_>>();
            Type::array_of(simplify(elems))
        }
        NodeKind::Dot2 | NodeKind::Dot3 => {
            let ends = node.children.iter().map(infer_child).collect::<Vec<_>>();
            Type::range_of(unify_range(ends))
        }
        NodeKind::Hash => classify_hash(node),
        NodeKind::Scope
        | NodeKind::Defn
        | NodeKind::Defs
        | NodeKind::Other(_) => UNTYPED,
    }
}

/// Infer a child slot. Only nodes carry a type; payloads and absent slots
/// in a node position are `untyped`.
pub fn infer_child(child: &Child) -> Type {
    match child {
        Child::Node(node) => infer(node),
        Child::Scalar(_) | Child::Nil => UNTYPED,
    }
}

/// Return type of a method whose scope is `[locals, args, body]`.
/// No body means the method returns `nil`.
pub fn return_type_from_body(scope: &Node) -> Type {
    if scope.kind != NodeKind::Scope {
        return UNTYPED;
    }
    match scope.child(2) {
        None | Some(Child::Nil) => Type::Nil,
        Some(body) => infer_child(body),
    }
}

fn infer_payload(scalar: &Scalar) -> Type {
    match scalar {
        Scalar::Sym(s) => exact_or(Lit::Sym(s.clone()), Type::symbol()),
        Scalar::Int(i) => Type::Literal(Lit::Int(*i)),
        other => Type::class(other.class_name()),
    }
}

fn exact_or(lit: Lit, widened: Type) -> Type {
    let safe = match &lit {
        Lit::Str(s) | Lit::Sym(s) => is_safe_literal(s),
        Lit::Int(_) => true,
    };
    if safe { Type::Literal(lit) } else { widened }
}

// ------------------------------- Tests ------------------------------------ //
