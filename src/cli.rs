//! Minimal CLI: node trees (JSON/NDJSON) → (types | schema | prototypes)
use std::path::{Path, PathBuf};
use anyhow::Context;
use clap::{Parser, Subcommand, Args};
use colored::Colorize;
use rayon::prelude::*;
use serde_json::{json, Value};
use crate::error::LoadError;
use crate::node::Node;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// infer static types from literal node trees and print them as declarations,
/// a JSON view, or method prototypes
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// infer and print one type per document in declaration syntax
    Infer(InferOut),
    /// infer and print the JSON view of each type
    Schema(JsonSchemaOut),
    /// print `def` prototypes for every method definition found
    Prototype(PrototypeOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// treat input as newline-delimited JSON (NDJSON), one node tree per line
    #[arg(long, default_value_t = false)]
    ndjson: bool,

    /// JSON Pointer to select the node tree in each document (e.g. /body)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document; every output is one node tree
    #[arg(long)]
    jq_expr: Option<String>,

    /// worker threads for inference (rayon default if omitted)
    #[arg(long)]
    jobs: Option<usize>,

    /// report each loaded document on stderr
    #[arg(long, short, default_value_t = false)]
    verbose: bool,

    /// One or more inputs. May be literal paths or quoted glob patterns or '-' for stdin
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct InferOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct JsonSchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct PrototypeOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .rbs file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

/// One decoded node tree and where it came from.
#[derive(Debug, Clone)]
pub struct Document {
    pub origin: String,
    pub node: Node,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_documents(&self) -> Result<Vec<Document>, LoadError> {
        let mut raw = Vec::new();
        for source in resolve_file_path_patterns(&self.input)? {
            let source_str = source.to_string_lossy().to_string();
            let text = read_source(&source)?;
            if self.ndjson {
                for (i, line) in text.lines().enumerate() {
                    if line.trim().is_empty() { continue; }
                    let origin = format!("{source_str}:{}", i + 1);
                    raw.push(self.load_text(line, origin)?);
                }
            } else {
                raw.push(self.load_text(&text, source_str)?);
            }
        }
        let raw = match self.jq_expr.as_ref() {
            None => raw,
            Some(jq_expr) => crate::jq_exec::run_jaq(jq_expr, raw)?,
        };
        raw.into_iter()
            .map(|(origin, value)| self.decode(value, origin))
            .collect()
    }

    fn load_text(&self, text: &str, origin: String) -> Result<(String, Value), LoadError> {
        let value = serde_json::from_str::<Value>(text).map_err(|error| LoadError::Json {
            origin: origin.clone(),
            message: error.to_string(),
        })?;
        let value = match self.json_pointer.as_ref() {
            None => value,
            Some(pointer) => value.pointer(pointer).cloned().ok_or_else(|| LoadError::PointerMissing {
                origin: origin.clone(),
                pointer: pointer.clone(),
            })?,
        };
        Ok((origin, value))
    }

    fn decode(&self, value: Value, origin: String) -> Result<Document, LoadError> {
        let node = crate::path_de::node_from_value(value, &origin)?;
        if self.verbose {
            eprintln!("{} {origin} ({})", "loaded".green(), node.kind);
        }
        Ok(Document { origin, node })
    }

    fn configure_pool(&self) -> anyhow::Result<()> {
        if let Some(jobs) = self.jobs {
            rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
                .context("failed to configure worker threads")?;
        }
        Ok(())
    }

    fn prepare(&self) -> anyhow::Result<Vec<Document>> {
        self.configure_pool()?;
        let docs = self.load_documents().context("failed to load inputs")?;
        if docs.is_empty() {
            eprintln!("{} no documents in input", "warning:".yellow().bold());
        }
        Ok(docs)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Infer(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }

                let docs = target.input_settings.prepare()?;
                let types = docs
                    .par_iter()
                    .map(|doc| crate::inference::infer(&doc.node))
                    .collect::<Vec<_>>();

                let labelled = docs.len() > 1;
                let mut src = String::new();
                for (doc, ty) in docs.iter().zip(&types) {
                    if labelled {
                        src.push_str(&format!("{}: {ty}\n", doc.origin));
                    } else {
                        src.push_str(&format!("{ty}\n"));
                    }
                }
                write_output(target.out.as_deref(), &src)
            }
            Command::Schema(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }

                let docs = target.input_settings.prepare()?;
                let views = docs
                    .par_iter()
                    .map(|doc| json!({
                        "origin": doc.origin,
                        "type": crate::emit::emit_type(&crate::inference::infer(&doc.node)),
                    }))
                    .collect::<Vec<_>>();
                let schema_src = serde_json::to_string_pretty(&views)?;
                write_output(target.out.as_deref(), &format!("{schema_src}\n"))
            }
            Command::Prototype(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }

                let docs = target.input_settings.prepare()?;
                let protos = docs
                    .par_iter()
                    .map(|doc| crate::prototype::extract(&doc.node))
                    .collect::<Vec<_>>();

                let labelled = docs.len() > 1;
                let mut src = String::new();
                for (doc, methods) in docs.iter().zip(&protos) {
                    if labelled {
                        src.push_str(&format!("# {}\n", doc.origin));
                    }
                    for m in methods {
                        src.push_str(&format!("{m}\n"));
                    }
                }
                if protos.iter().all(Vec::is_empty) {
                    eprintln!("{} no method definitions found", "warning:".yellow().bold());
                }
                write_output(target.out.as_deref(), &src)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn read_source(path: &Path) -> Result<String, LoadError> {
    let result = if path == Path::new("-") {
        std::io::read_to_string(std::io::stdin())
    } else {
        std::fs::read_to_string(path)
    };
    result.map_err(|source| LoadError::Io { path: path.to_path_buf(), source })
}

fn write_output(out: Option<&Path>, src: &str) -> anyhow::Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, src).with_context(|| format!("failed to write {}", out.display()))?;
        }
        None => print!("{src}"),
    }
    Ok(())
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, LoadError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                return Err(LoadError::GlobNoMatch(pattern.to_string()));
            }
        } else {
            // literal path, or '-' for stdin
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    fn settings(input: Vec<String>) -> InputSettings {
        InputSettings { ndjson: false, json_pointer: None, jq_expr: None, jobs: None, verbose: false, input }
    }

    fn scratch(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lit-proto-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn parses_subcommands() {
        let cli = CommandLineInterface::try_parse_from([
            "lit-proto", "schema", "--ndjson", "-i", "a.json", "b/*.json", "--jobs", "2",
        ]).unwrap();
        let Command::Schema(target) = cli.cmd else { panic!("expected schema") };
        assert!(target.input_settings.ndjson);
        assert_eq!(target.input_settings.input, vec!["a.json", "b/*.json"]);
        assert_eq!(target.input_settings.jobs, Some(2));
        assert!(CommandLineInterface::try_parse_from(["lit-proto", "infer"]).is_err());
    }

    #[test]
    fn loads_ndjson_lines_with_pointer() {
        let path = scratch("lines.ndjson", concat!(
            r#"{"body": {"type": "NIL"}}"#, "\n",
            "\n",
            r#"{"body": {"type": "ZLIST"}}"#, "\n",
        ));
        let mut s = settings(vec![path.to_string_lossy().to_string()]);
        s.ndjson = true;
        s.json_pointer = Some("/body".into());
        let docs = s.load_documents().unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].node.kind, NodeKind::Nil);
        assert!(docs[1].origin.ends_with(":3"), "{}", docs[1].origin);
    }

    #[test]
    fn missing_pointer_and_bad_json_are_errors() {
        let path = scratch("plain.json", r#"{"type": "NIL"}"#);
        let mut s = settings(vec![path.to_string_lossy().to_string()]);
        s.json_pointer = Some("/nope".into());
        assert!(matches!(s.load_documents(), Err(LoadError::PointerMissing { .. })));

        let path = scratch("broken.json", "{");
        let s = settings(vec![path.to_string_lossy().to_string()]);
        assert!(matches!(s.load_documents(), Err(LoadError::Json { .. })));

        let s = settings(vec!["/definitely/not/here/*.json".into()]);
        assert!(matches!(s.load_documents(), Err(LoadError::GlobNoMatch(_))));
    }

    #[test]
    fn jq_fans_out_documents() {
        let path = scratch("dump.json", r#"{"defs": [{"type": "TRUE"}, {"type": "FALSE"}]}"#);
        let mut s = settings(vec![path.to_string_lossy().to_string()]);
        s.jq_expr = Some(".defs[]".into());
        let docs = s.load_documents().unwrap();
        let kinds = docs.iter().map(|d| d.node.kind.clone()).collect::<Vec<_>>();
        assert_eq!(kinds, vec![NodeKind::True, NodeKind::False]);
        assert!(docs[1].origin.ends_with("#1"));
    }

    #[test]
    fn jq_filter_errors_are_load_errors() {
        let path = scratch("jq-bad.json", r#"{"type": "NIL"}"#);
        let mut s = settings(vec![path.to_string_lossy().to_string()]);
        s.jq_expr = Some(".[".into());
        assert!(matches!(s.load_documents(), Err(LoadError::Jq { .. })));
    }
}
