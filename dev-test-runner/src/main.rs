//! Run fixture files against the inferencer.
//!
//! Usage: `dev-test-runner [fixture-dir] [name-regex]`
//!
//! Each `*.json` file in the directory holds a list of cases:
//! `{"name": "...", "node": <node tree>, "expect": "<declaration>"}` and/or
//! `"prototypes": ["def ...", ...]` for method definition trees.
use std::path::{Path, PathBuf};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use lit_proto::{infer, prototype, Node};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    node: Node,
    #[serde(default)]
    expect: Option<String>,
    #[serde(default)]
    prototypes: Option<Vec<String>>,
}

fn normalize(s: &str) -> String {
    WHITESPACE.replace_all(s.trim(), " ").into_owned()
}

fn load_cases(path: &Path) -> Result<Vec<Case>, String> {
    let src = std::fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()))?;
    let de = &mut serde_json::Deserializer::from_str(&src);
    serde_path_to_error::deserialize::<_, Vec<Case>>(de).map_err(|err| {
        let at = err.path().to_string();
        format!("{} at JSON path {at} → {}", path.display(), err.into_inner())
    })
}

fn check(case: &Case) -> Vec<String> {
    let mut problems = Vec::new();
    if let Some(expect) = &case.expect {
        let got = infer(&case.node).to_string();
        if normalize(&got) != normalize(expect) {
            problems.push(format!("expected `{expect}`, got `{got}`"));
        }
    }
    if let Some(expect) = &case.prototypes {
        let got = prototype::extract(&case.node)
            .iter()
            .map(|m| normalize(&m.to_string()))
            .collect::<Vec<_>>();
        let want = expect.iter().map(|s| normalize(s)).collect::<Vec<_>>();
        if got != want {
            problems.push(format!("expected prototypes {want:?}, got {got:?}"));
        }
    }
    if case.expect.is_none() && case.prototypes.is_none() {
        problems.push("case has neither `expect` nor `prototypes`".to_string());
    }
    problems
}

fn main() {
    let mut args = std::env::args().skip(1);
    let dir = PathBuf::from(args.next().unwrap_or_else(|| "tests/fixtures".to_string()));
    let filter = match args.next().map(|p| Regex::new(&p)) {
        None => None,
        Some(Ok(rx)) => Some(rx),
        Some(Err(error)) => {
            eprintln!("❌ bad name filter: {error}");
            std::process::exit(2);
        }
    };

    let mut files = match std::fs::read_dir(&dir) {
        Ok(entries) => entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|x| x == "json"))
            .collect::<Vec<_>>(),
        Err(error) => {
            eprintln!("❌ cannot read {}: {error}", dir.display());
            std::process::exit(2);
        }
    };
    files.sort();

    let (mut passed, mut failed) = (0usize, 0usize);
    for file in &files {
        let cases = match load_cases(file) {
            Ok(cases) => cases,
            Err(error) => {
                eprintln!("❌ {error}");
                failed += 1;
                continue;
            }
        };
        for case in cases {
            if filter.as_ref().is_some_and(|rx| !rx.is_match(&case.name)) {
                continue;
            }
            let problems = check(&case);
            if problems.is_empty() {
                passed += 1;
                eprintln!("✅ {}", case.name);
            } else {
                failed += 1;
                for p in problems {
                    eprintln!("❌ {}: {p}", case.name);
                }
            }
        }
    }

    eprintln!("—— {passed} passed, {failed} failed ——");
    if failed > 0 {
        std::process::exit(1);
    }
}
