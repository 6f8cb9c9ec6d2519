//! JSON view of an inferred type, for tools that would rather not parse
//! declaration syntax.
use serde_json::{json, Value};
use crate::ty::{Lit, Type};

// ------------------------------- Emission --------------------------------- //

pub fn emit_type(t: &Type) -> Value {
    match t {
        Type::Any => json!({ "kind": "any" }),
        Type::Nil => json!({ "kind": "nil" }),
        Type::Literal(lit) => json!({
            "kind": "literal",
            "class": lit.class_name(),
            "value": emit_lit(lit),
        }),
        Type::ClassInstance { name, args } => json!({
            "kind": "class_instance",
            "name": name,
            "args": args.iter().map(emit_type).collect::<Vec<_>>(),
        }),
        Type::Union(members) => json!({
            "kind": "union",
            "members": members.iter().map(emit_type).collect::<Vec<_>>(),
        }),
        Type::Record(fields) => {
            // keys are not all strings, so fields go out as a list; a key keeps
            // its class so that `a:` and `"a" =>` stay apart
            let fields = fields
                .iter()
                .map(|(k, v)| json!({
                    "key": { "class": k.class_name(), "value": emit_lit(k) },
                    "type": emit_type(v),
                }))
                .collect::<Vec<_>>();
            json!({ "kind": "record", "fields": fields })
        }
    }
}

fn emit_lit(lit: &Lit) -> Value {
    match lit {
        Lit::Str(s) | Lit::Sym(s) => Value::from(s.clone()),
        // i128 has no JSON number; fall back to text outside the i64 range
        Lit::Int(i) => match i64::try_from(*i) {
            Ok(n) => Value::from(n),
            Err(_) => Value::from(i.to_string()),
        },
    }
}

// ------------------------------- Tests ------------------------------------ //
