//! Which scalar values may be kept verbatim as literal types.
use once_cell::sync::Lazy;
use regex::Regex;

// ------------------------------- Policy ---------------------------------- //

/// Printable ASCII (space through tilde), at least one character.
const SAFE_LITERAL_PATTERN: &str = r"\A[ -~]+\z";

static SAFE_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(SAFE_LITERAL_PATTERN).unwrap()
});

/// True when a string or symbol can be printed as an exact literal type.
/// Empty values, control characters and anything outside ASCII are not safe.
pub fn is_safe_literal(s: &str) -> bool {
    SAFE_LITERAL.is_match(s)
}
