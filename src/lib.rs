pub mod node;
pub mod ty;
pub mod inference;
pub mod prototype;
pub mod emit;
pub mod error;
pub mod path_de;
pub mod jq_exec;
pub mod cli;

pub use inference::{infer, return_type_from_body};
pub use node::{Child, Node, NodeKind, Scalar};
pub use ty::{Lit, Type, UNTYPED};
