//! DocumentState - the full text buffer and the sections derived from it.

use serde::{Deserialize, Serialize};

use super::parser::SectionParser;
use super::section::Section;

/// The current document: raw text plus its parsed sections.
///
/// `sections` is always the parser output for `full_text`; it is recomputed
/// on every change and never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentState {
    full_text: String,
    sections: Vec<Section>,
    active_section_index: usize,
}

impl DocumentState {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document from existing text.
    pub fn from_text(parser: &SectionParser, text: impl Into<String>) -> Self {
        let mut state = Self::new();
        state.replace_text(parser, text);
        state
    }

    // ════════════════════════════════════════════════════════════════════════════════
    // Accessors
    // ════════════════════════════════════════════════════════════════════════════════

    /// Returns the full raw text.
    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    /// Returns the parsed sections.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Returns the section at `index`.
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Returns the number of parsed sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Returns the index of the section the user is looking at.
    pub fn active_section_index(&self) -> usize {
        self.active_section_index
    }

    /// Returns the active section, if the document has any.
    pub fn active_section(&self) -> Option<&Section> {
        self.sections.get(self.active_section_index)
    }

    /// Returns true if no text has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.full_text.is_empty()
    }

    // ════════════════════════════════════════════════════════════════════════════════
    // Mutations
    // ════════════════════════════════════════════════════════════════════════════════

    /// Clears text and sections for a new generation run.
    pub fn reset(&mut self) {
        self.full_text.clear();
        self.sections.clear();
        self.active_section_index = 0;
    }

    /// Appends one streamed fragment and re-parses.
    ///
    /// Returns false (and leaves the state untouched) for an empty fragment.
    pub fn append_fragment(&mut self, parser: &SectionParser, fragment: &str) -> bool {
        if fragment.is_empty() {
            return false;
        }
        self.full_text.push_str(fragment);
        self.reparse(parser);
        true
    }

    /// Replaces the whole text and re-parses.
    pub fn replace_text(&mut self, parser: &SectionParser, text: impl Into<String>) {
        self.full_text = text.into();
        self.reparse(parser);
    }

    /// Sets the active index. Callers are responsible for bounds checks.
    pub(crate) fn set_active_section_index(&mut self, index: usize) {
        self.active_section_index = index;
    }

    fn reparse(&mut self, parser: &SectionParser) {
        self.sections = parser.parse(&self.full_text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> SectionParser {
        SectionParser::new()
    }

    #[test]
    fn new_document_is_empty() {
        let state = DocumentState::new();
        assert!(state.is_empty());
        assert_eq!(state.section_count(), 0);
        assert_eq!(state.active_section_index(), 0);
        assert!(state.active_section().is_none());
    }

    #[test]
    fn fragments_accumulate_in_order() {
        let parser = parser();
        let mut state = DocumentState::new();

        for fragment in ["# Sc", "ope\nWe ", "deliver\n# Bud", "get\n"] {
            assert!(state.append_fragment(&parser, fragment));
        }

        assert_eq!(state.full_text(), "# Scope\nWe deliver\n# Budget\n");
        let titles: Vec<&str> = state.sections().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Scope", "Budget"]);
    }

    #[test]
    fn sections_track_every_fragment() {
        let parser = parser();
        let mut state = DocumentState::new();

        state.append_fragment(&parser, "# A\n");
        assert_eq!(state.section_count(), 1);
        state.append_fragment(&parser, "# B\n");
        assert_eq!(state.section_count(), 2);
    }

    #[test]
    fn empty_fragment_changes_nothing() {
        let parser = parser();
        let mut state = DocumentState::from_text(&parser, "# A\nbody\n");
        let before = state.clone();

        assert!(!state.append_fragment(&parser, ""));
        assert_eq!(state, before);
    }

    #[test]
    fn reset_clears_text_and_sections() {
        let parser = parser();
        let mut state = DocumentState::from_text(&parser, "# A\n# B\n");
        state.set_active_section_index(1);

        state.reset();

        assert!(state.is_empty());
        assert_eq!(state.section_count(), 0);
        assert_eq!(state.active_section_index(), 0);
    }

    #[test]
    fn replace_text_reparses() {
        let parser = parser();
        let mut state = DocumentState::from_text(&parser, "# A\n");

        state.replace_text(&parser, "# X\n# Y\n");

        assert_eq!(state.full_text(), "# X\n# Y\n");
        assert_eq!(state.section(1).map(|s| s.title.as_str()), Some("Y"));
    }

    #[test]
    fn sections_derive_solely_from_text() {
        let parser = parser();
        let streamed = {
            let mut state = DocumentState::new();
            for fragment in ["hel", "lo\n# A\n", "## S\nbody"] {
                state.append_fragment(&parser, fragment);
            }
            state
        };
        let direct = DocumentState::from_text(&parser, "hello\n# A\n## S\nbody");

        assert_eq!(streamed.sections(), direct.sections());
    }
}
