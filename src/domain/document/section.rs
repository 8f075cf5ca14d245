//! Section and sub-heading records produced by the parser.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SectionId, SubHeaderId};

/// A second-level heading found inside one section's body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubHeader {
    pub id: SubHeaderId,
    /// Normalized heading text.
    pub title: String,
}

/// One titled section of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    /// Normalized heading text (the intro title for the synthetic intro).
    pub title: String,
    /// Verbatim text including the heading line; always newline-terminated.
    pub content: String,
    /// `content` without the heading line.
    pub raw_body: String,
    /// Second-level headings in document order.
    pub sub_headers: Vec<SubHeader>,
}

impl Section {
    /// Starts a section from its heading line.
    pub(crate) fn open(id: SectionId, title: String, heading_line: &str) -> Self {
        Self {
            id,
            title,
            content: heading_line.to_string(),
            raw_body: String::new(),
            sub_headers: Vec::new(),
        }
    }

    /// Builds the synthetic intro section from buffered lines.
    pub(crate) fn intro(title: impl Into<String>, body: String) -> Self {
        Self {
            id: SectionId::intro(),
            title: title.into(),
            content: body.clone(),
            raw_body: body,
            sub_headers: Vec::new(),
        }
    }

    /// Appends a body line to both `content` and `raw_body`.
    pub(crate) fn push_line(&mut self, line: &str) {
        self.content.push_str(line);
        self.raw_body.push_str(line);
    }

    /// Appends a second-level heading line and records it as a sub-heading.
    pub(crate) fn push_sub_heading(&mut self, line: &str, title: String) {
        self.push_line(line);
        let id = SubHeaderId::new(&self.id, self.sub_headers.len());
        self.sub_headers.push(SubHeader { id, title });
    }

    /// Returns true for the synthetic intro section.
    pub fn is_intro(&self) -> bool {
        self.id.is_intro()
    }

    /// Returns the first sub-heading whose title contains `query`.
    pub fn find_sub_header(&self, query: &str) -> Option<&SubHeader> {
        self.sub_headers.iter().find(|s| s.title.contains(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_section_starts_with_heading_only() {
        let section = Section::open(SectionId::at_index(0), "Scope".into(), "# Scope\n");
        assert_eq!(section.content, "# Scope\n");
        assert_eq!(section.raw_body, "");
        assert!(section.sub_headers.is_empty());
        assert!(!section.is_intro());
    }

    #[test]
    fn push_line_grows_content_and_body() {
        let mut section = Section::open(SectionId::at_index(0), "Scope".into(), "# Scope\n");
        section.push_line("line one\n");

        assert_eq!(section.content, "# Scope\nline one\n");
        assert_eq!(section.raw_body, "line one\n");
    }

    #[test]
    fn sub_headings_get_ordinal_ids() {
        let mut section = Section::open(SectionId::at_index(1), "Plan".into(), "# Plan\n");
        section.push_sub_heading("## Phase 1\n", "Phase 1".into());
        section.push_sub_heading("## Phase 2\n", "Phase 2".into());

        assert_eq!(section.sub_headers[0].id.as_str(), "section-1-sub-0");
        assert_eq!(section.sub_headers[1].id.as_str(), "section-1-sub-1");
        assert_eq!(section.raw_body, "## Phase 1\n## Phase 2\n");
    }

    #[test]
    fn find_sub_header_matches_by_containment() {
        let mut section = Section::open(SectionId::at_index(0), "Plan".into(), "# Plan\n");
        section.push_sub_heading("## Phase 1: Discovery\n", "Phase 1: Discovery".into());
        section.push_sub_heading("## Phase 2: Discovery review\n", "Phase 2: Discovery review".into());

        let found = section.find_sub_header("Discovery").unwrap();
        assert_eq!(found.title, "Phase 1: Discovery");
        assert!(section.find_sub_header("Budget").is_none());
    }

    #[test]
    fn intro_has_reserved_id_and_identical_body() {
        let intro = Section::intro("Project Overview", "hello\n".to_string());
        assert!(intro.is_intro());
        assert_eq!(intro.content, intro.raw_body);
    }
}
