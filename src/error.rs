use std::path::PathBuf;
use thiserror::Error;

/// Failures while turning input files into node trees.
///
/// Inference itself never fails; only reading and decoding inputs can.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {origin}: {message}")]
    Json { origin: String, message: String },
    #[error("invalid node tree in {origin} at path {path}: {message}")]
    Node { origin: String, path: String, message: String },
    #[error("bad glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("glob entry: {0}")]
    Glob(#[from] glob::GlobError),
    #[error("glob pattern matched no files: {0}")]
    GlobNoMatch(String),
    #[error("JSON pointer {pointer} not found in {origin}")]
    PointerMissing { origin: String, pointer: String },
    #[error("jq filter failed on {origin}: {message}")]
    Jq { origin: String, message: String },
}
