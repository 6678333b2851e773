use once_cell::sync::Lazy;
use regex::Regex;

// Sentence and clause boundaries, plus " - " / " * " bullet markers.
static BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.;\n]|(?:\s-\s)|(?:\s\*\s)").expect("valid regex"));

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

static STATEMENT_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[:=\-]>?|\breturns?\b|\binclude\b").expect("valid regex")
});

/// Collapses every whitespace run to one space and trims the ends.
pub(crate) fn collapse_whitespace(raw: &str) -> String {
    WHITESPACE_RUN.replace_all(raw, " ").trim().to_string()
}

/// Splits cleaned text into non-empty fragments, stripped of surrounding
/// spaces and bullet characters.
pub(crate) fn split_segments(text: &str) -> Vec<&str> {
    BOUNDARY
        .split(text)
        .map(|candidate| candidate.trim_matches(|c: char| c == ' ' || c == '-' || c == '*'))
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Structural shape of a fragment, decided in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape<'a> {
    KeyValue(&'a str, &'a str),
    Flow(&'a str, &'a str),
    Assign(&'a str, &'a str),
    MarkedStatement,
    Statement,
}

pub(crate) fn classify(segment: &str) -> Shape<'_> {
    if let Some((left, right)) = segment.split_once(':') {
        return Shape::KeyValue(left, right);
    }
    if let Some((left, right)) = segment.split_once("->") {
        return Shape::Flow(left, right);
    }
    if let Some((left, right)) = segment.split_once('=') {
        return Shape::Assign(left, right);
    }
    if STATEMENT_MARKER.is_match(segment) {
        Shape::MarkedStatement
    } else {
        Shape::Statement
    }
}
