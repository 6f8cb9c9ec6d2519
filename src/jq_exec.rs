//! jq pre-processing of input documents, e.g. to pull node trees out of a
//! larger parser dump (`.methods[].body`).
use jaq_core::{compile::Undefined, load, Compiler, Ctx, RcIter};
use jaq_json::Val;
use serde_json::Value;
use crate::error::LoadError;

const FILTER_ORIGIN: &str = "--jq-expr";

/// Compile `filter_src` once and run it over every `(origin, document)`.
///
/// Each jq output becomes its own document, labelled `origin#i`.
pub fn run_jaq(filter_src: &str, docs: Vec<(String, Value)>) -> Result<Vec<(String, Value)>, LoadError> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let program = load::File { code: filter_src, path: () };

    let modules = loader
        .load(&arena, program)
        .map_err(|errs| filter_error(parse_messages(errs)))?;

    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(|errs| filter_error(undefined_messages(errs)))?;

    let inputs = RcIter::new(core::iter::empty());
    let mut out = Vec::with_capacity(docs.len());
    for (origin, doc) in docs {
        let results = filter.run((Ctx::new([], &inputs), Val::from(doc)));
        for (i, item) in results.enumerate() {
            let val = item.map_err(|e| LoadError::Jq {
                origin: origin.clone(),
                message: format!("{e:?}"),
            })?;
            out.push((format!("{origin}#{i}"), Value::from(val)));
        }
    }
    Ok(out)
}

fn filter_error(messages: Vec<String>) -> LoadError {
    LoadError::Jq { origin: FILTER_ORIGIN.to_string(), message: messages.join("; ") }
}

fn parse_messages(errs: Vec<(load::File<&str, ()>, load::Error<&str>)>) -> Vec<String> {
    errs.into_iter()
        .map(|(file, err)| format!("parse error: {err:?} in `{}`", file.code))
        .collect()
}

fn undefined_messages(errs: Vec<(load::File<&str, ()>, Vec<(&str, Undefined)>)>) -> Vec<String> {
    errs.into_iter()
        .flat_map(|(file, list)| {
            list.into_iter()
                .map(move |(name, undef)| format!("undefined `{name}`: {undef:?} in `{}`", file.code))
        })
        .collect()
}
