//! Section parser - turns a full document buffer into ordered sections.
//!
//! The parser is a pure function of its input: it is re-run over the whole
//! buffer after every fragment and never updates a previous result.
//!
//! # Duplicate suppression
//!
//! Streaming generators sometimes loop and restate a section they already
//! produced. Once a top-level title repeats, that heading and every line up
//! to the next *novel* top-level heading are dropped. A document that
//! legitimately reuses a chapter title loses the second chapter's body.

use std::borrow::Cow;
use std::collections::HashSet;

use tracing::debug;

use super::heading::{normalize_title, LineKind};
use super::section::Section;
use crate::domain::foundation::SectionId;

/// Title given to text that precedes the first top-level heading.
pub const DEFAULT_INTRO_TITLE: &str = "Project Overview";

/// Parses document text into [`Section`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionParser {
    intro_title: String,
}

impl Default for SectionParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionParser {
    /// Creates a parser with the default intro title.
    pub fn new() -> Self {
        Self::with_intro_title(DEFAULT_INTRO_TITLE)
    }

    /// Creates a parser that names the synthetic intro section `intro_title`.
    pub fn with_intro_title(intro_title: impl Into<String>) -> Self {
        Self {
            intro_title: intro_title.into(),
        }
    }

    /// Returns the title used for the synthetic intro section.
    pub fn intro_title(&self) -> &str {
        &self.intro_title
    }

    /// Parses the full document text.
    ///
    /// Never fails: text without headings becomes a single intro section and
    /// empty text yields no sections.
    pub fn parse(&self, text: &str) -> Vec<Section> {
        let mut scan = Scan::new(&self.intro_title);
        for line in terminated_lines(text) {
            scan.feed(&line);
        }
        scan.finish()
    }
}

/// Parses `text` with the default parser.
pub fn parse_sections(text: &str) -> Vec<Section> {
    SectionParser::new().parse(text)
}

/// Splits text into lines that keep their `\n`; a trailing partial line gets
/// one appended so every section ends up newline-terminated.
fn terminated_lines(text: &str) -> impl Iterator<Item = Cow<'_, str>> {
    text.split_inclusive('\n').map(|line| {
        if line.ends_with('\n') {
            Cow::Borrowed(line)
        } else {
            Cow::Owned(format!("{}\n", line))
        }
    })
}

/// Mutable state of one parse pass.
struct Scan<'a> {
    intro_title: &'a str,
    seen_titles: HashSet<String>,
    current: Option<Section>,
    intro_buffer: String,
    skipping_duplicate_block: bool,
    sections: Vec<Section>,
}

impl<'a> Scan<'a> {
    fn new(intro_title: &'a str) -> Self {
        Self {
            intro_title,
            seen_titles: HashSet::new(),
            current: None,
            intro_buffer: String::new(),
            skipping_duplicate_block: false,
            sections: Vec::new(),
        }
    }

    fn feed(&mut self, line: &str) {
        match LineKind::classify(line) {
            LineKind::Heading(title) => self.heading(line, title),
            _ if self.skipping_duplicate_block => {}
            LineKind::SubHeading(title) => match self.current.as_mut() {
                Some(section) => section.push_sub_heading(line, title),
                None => self.intro_buffer.push_str(line),
            },
            LineKind::Body => match self.current.as_mut() {
                Some(section) => section.push_line(line),
                None => self.intro_buffer.push_str(line),
            },
        }
    }

    fn heading(&mut self, line: &str, title: String) {
        if self.current.is_none() {
            self.flush_intro();
        }
        self.intro_buffer.clear();

        if self.seen_titles.contains(&title) {
            debug!(title = %title, "Suppressing duplicate section block");
            self.commit_current();
            self.skipping_duplicate_block = true;
            return;
        }

        self.skipping_duplicate_block = false;
        self.seen_titles.insert(title.clone());

        self.commit_current();

        let id = SectionId::at_index(self.sections.len());
        self.current = Some(Section::open(id, title, line));
    }

    fn commit_current(&mut self) {
        if let Some(section) = self.current.take() {
            self.sections.push(section);
        }
    }

    /// The intro claims its title, so a later heading with that title is a
    /// duplicate block like any other.
    fn flush_intro(&mut self) {
        if !self.intro_buffer.trim().is_empty() {
            let body = std::mem::take(&mut self.intro_buffer);
            self.seen_titles.insert(normalize_title(self.intro_title));
            self.sections.push(Section::intro(self.intro_title, body));
        }
    }

    fn finish(mut self) -> Vec<Section> {
        self.commit_current();
        if self.sections.is_empty() {
            self.flush_intro();
        }
        self.sections
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
