//! Typed line matchers for the Stacks log markers.
//!
//! Each matcher inspects a single line and reports what it found as a tagged
//! value instead of a raw regex capture, so callers handle the missing and
//! malformed cases explicitly.

use std::sync::LazyLock;

use regex::Regex;

use crate::parsing::CoverageField;

/// `Sample 3 of 12 'name'` with the name captured verbatim
static SAMPLE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Sample \d+ of \d+ '([^']+)'").expect("static regex must compile")
});

/// Any line the tool prints as a sample header, quoted name or not
static SAMPLE_START_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Sample \d+ of \d+").expect("static regex must compile"));

/// Numeric value of the first `mean=` assignment on a line
static MEAN_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"mean=([0-9]+(?:\.[0-9]+)?(?:[eE][-+]?[0-9]+)?)")
        .expect("static regex must compile")
});

/// Substring printed by denovo_map when a sample's `ustacks` run finishes
pub const SAMPLE_END_MARKER: &str = "ustacks is done";

/// Result of applying a typed matcher to a line
#[derive(Debug, Clone, PartialEq)]
pub enum FieldMatch<T> {
    Matched(T),
    NotFound,
    /// The line looks like the target but its payload is unusable
    Malformed(String),
}

/// Classification of a denovo_map line for block segmentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockMarker<'a> {
    Start(&'a str),
    End,
}

/// Classify a line as a block start or end marker.
#[must_use]
pub fn match_block_marker(line: &str) -> FieldMatch<BlockMarker<'_>> {
    if let Some(caps) = SAMPLE_START.captures(line) {
        if let Some(name) = caps.get(1) {
            return FieldMatch::Matched(BlockMarker::Start(name.as_str()));
        }
    }
    if SAMPLE_START_PREFIX.is_match(line) {
        return FieldMatch::Malformed(line.to_string());
    }
    if line.contains(SAMPLE_END_MARKER) {
        return FieldMatch::Matched(BlockMarker::End);
    }
    FieldMatch::NotFound
}

/// Extract the `mean=` value from a line that starts with the field's prefix.
#[must_use]
pub fn match_coverage(line: &str, field: CoverageField) -> FieldMatch<f64> {
    if !line.starts_with(field.line_prefix()) {
        return FieldMatch::NotFound;
    }

    let value = MEAN_VALUE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite());

    match value {
        Some(v) => FieldMatch::Matched(v),
        None => FieldMatch::Malformed(line.to_string()),
    }
}
