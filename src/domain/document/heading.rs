//! Heading line classification and title normalization.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches "# Title": exactly one leading hash, then a space.
static TOP_LEVEL_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t]*# [ \t]*(\S.*?)\s*$").expect("top-level heading pattern is valid")
});

/// Matches "## Title": exactly two leading hashes, then a space.
static SECOND_LEVEL_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t]*## [ \t]*(\S.*?)\s*$").expect("second-level heading pattern is valid")
});

/// Matches an optional closing hash sequence: "Title ##".
static CLOSING_HASHES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+#+$").expect("closing hash pattern is valid"));

/// What a single line of the document is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// A top-level heading, carrying its normalized title.
    Heading(String),
    /// A second-level heading, carrying its normalized title.
    SubHeading(String),
    /// Anything else, including deeper headings.
    Body,
}

impl LineKind {
    /// Classifies one line (with or without its trailing newline).
    ///
    /// A heading whose title normalizes to nothing (e.g. `# **`) is body text.
    pub fn classify(line: &str) -> Self {
        let line = line.strip_suffix('\n').unwrap_or(line);

        if let Some(title) = capture_title(&TOP_LEVEL_HEADING, line) {
            return LineKind::Heading(title);
        }
        if let Some(title) = capture_title(&SECOND_LEVEL_HEADING, line) {
            return LineKind::SubHeading(title);
        }
        LineKind::Body
    }

    /// Returns true for top-level headings.
    pub fn is_heading(&self) -> bool {
        matches!(self, LineKind::Heading(_))
    }
}

fn capture_title(pattern: &Regex, line: &str) -> Option<String> {
    let raw = pattern.captures(line)?.get(1)?.as_str();
    let title = normalize_title(raw);
    (!title.is_empty()).then_some(title)
}

/// Normalizes heading text for display and duplicate detection.
///
/// Strips emphasis asterisks, wrapping underscores or backticks, and an
/// optional closing hash sequence, then trims whitespace.
pub fn normalize_title(raw: &str) -> String {
    let without_emphasis: String = raw.chars().filter(|c| *c != '*').collect();
    let without_closing = CLOSING_HASHES.replace(without_emphasis.trim(), "");
    without_closing
        .trim()
        .trim_matches(|c| c == '_' || c == '`')
        .trim()
        .to_string()
}
