//! Navigation state - which section is shown and where to scroll.
//!
//! The active index itself lives on [`DocumentState`] so it travels with the
//! sections it points into; this module owns the policies that move it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::document::{normalize_title, DocumentState, SubHeader};
use crate::domain::foundation::{DomainError, ErrorCode};

/// Default number of trailing sections that keep the view following the writer.
pub const DEFAULT_FOLLOW_WINDOW: usize = 2;

/// Follow-the-writer policy plus the pending sub-heading scroll target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    follow_window: usize,
    pending_sub_heading: Option<String>,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(DEFAULT_FOLLOW_WINDOW)
    }
}

impl NavigationState {
    /// Creates navigation state; a window of zero is treated as one.
    pub fn new(follow_window: usize) -> Self {
        Self {
            follow_window: follow_window.max(1),
            pending_sub_heading: None,
        }
    }

    pub fn follow_window(&self) -> usize {
        self.follow_window
    }

    pub fn pending_sub_heading(&self) -> Option<&str> {
        self.pending_sub_heading.as_deref()
    }

    // ════════════════════════════════════════════════════════════════════════════════
    // Index policies
    // ════════════════════════════════════════════════════════════════════════════════

    /// Keeps the active index inside the section list. An empty list yields 0.
    pub fn clamp(&self, document: &mut DocumentState) {
        let len = document.section_count();
        let active = document.active_section_index();
        if len == 0 {
            document.set_active_section_index(0);
        } else if active >= len {
            document.set_active_section_index(len - 1);
        }
    }

    /// Moves the active index to the newest section if the user is already
    /// looking at one of the last `follow_window` sections.
    ///
    /// Only called while a whole-document stream is in flight.
    pub fn follow_writer(&self, document: &mut DocumentState) {
        let len = document.section_count();
        if len == 0 {
            document.set_active_section_index(0);
            return;
        }
        let active = document.active_section_index();
        if active >= len.saturating_sub(self.follow_window) && active != len - 1 {
            debug!(from = active, to = len - 1, "Following the writer");
            document.set_active_section_index(len - 1);
        } else {
            self.clamp(document);
        }
    }

    /// Selects the section at `index`.
    ///
    /// # Errors
    ///
    /// Returns `SectionNotFound` if `index` is out of range.
    pub fn select(&self, document: &mut DocumentState, index: usize) -> Result<(), DomainError> {
        let len = document.section_count();
        if index >= len {
            return Err(DomainError::section_not_found(index, len));
        }
        document.set_active_section_index(index);
        Ok(())
    }

    /// Selects the first section whose title equals the normalized `title`,
    /// returning its index.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailed` for a blank query and `SectionNotFound` if no
    /// section carries that title.
    pub fn select_by_title(
        &self,
        document: &mut DocumentState,
        title: &str,
    ) -> Result<usize, DomainError> {
        let wanted = normalize_title(title);
        if wanted.is_empty() {
            return Err(DomainError::validation("title", "Section title cannot be empty"));
        }
        let index = document
            .sections()
            .iter()
            .position(|s| s.title == wanted)
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::SectionNotFound,
                    format!("No section titled '{}'", wanted),
                )
                .with_detail("title", wanted.clone())
            })?;
        document.set_active_section_index(index);
        Ok(index)
    }

    // ════════════════════════════════════════════════════════════════════════════════
    // Sub-heading scroll target
    // ════════════════════════════════════════════════════════════════════════════════

    /// Records a request to scroll to a sub-heading of the active section.
    pub fn request_sub_heading(&mut self, query: impl Into<String>) {
        self.pending_sub_heading = Some(query.into());
    }

    /// Resolves the pending request against the active section and clears it.
    ///
    /// The request is cleared whether or not a sub-heading matched.
    pub fn take_sub_heading_target(&mut self, document: &DocumentState) -> Option<SubHeader> {
        let query = self.pending_sub_heading.take()?;
        document
            .active_section()
            .and_then(|section| section.find_sub_header(&query))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::SectionParser;

    fn doc(text: &str) -> DocumentState {
        DocumentState::from_text(&SectionParser::new(), text)
    }

    // ───────────────────────────────────────────────────────────────
    // Follow the writer
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn follows_when_near_the_end() {
        let nav = NavigationState::default();
        let parser = SectionParser::new();
        let mut document = DocumentState::new();

        for fragment in ["# A\n", "# B\n", "# C\n", "# D\n"] {
            document.append_fragment(&parser, fragment);
            nav.follow_writer(&mut document);
        }

        assert_eq!(document.active_section_index(), 3);
    }

    #[test]
    fn stays_put_when_user_scrolled_back() {
        let nav = NavigationState::default();
        let parser = SectionParser::new();
        let mut document = doc("# A\n# B\n# C\n# D\n");
        nav.select(&mut document, 0).unwrap();

        document.append_fragment(&parser, "# E\n");
        nav.follow_writer(&mut document);

        assert_eq!(document.active_section_index(), 0);
    }

    #[test]
    fn follows_from_second_to_last() {
        let nav = NavigationState::new(2);
        let parser = SectionParser::new();
        let mut document = doc("# A\n# B\n# C\n");
        nav.select(&mut document, 1).unwrap();

        document.append_fragment(&parser, "# D\n");
        nav.follow_writer(&mut document);

        assert_eq!(document.active_section_index(), 3);
    }

    #[test]
    fn zero_window_is_treated_as_one() {
        assert_eq!(NavigationState::new(0).follow_window(), 1);
    }

    // ───────────────────────────────────────────────────────────────
    // Clamping and selection
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn clamp_pulls_index_back_into_range() {
        let nav = NavigationState::default();
        let mut document = doc("# A\n# B\n# C\n");
        nav.select(&mut document, 2).unwrap();

        document.replace_text(&SectionParser::new(), "# A\n");
        nav.clamp(&mut document);

        assert_eq!(document.active_section_index(), 0);
    }

    #[test]
    fn clamp_on_empty_list_is_zero() {
        let nav = NavigationState::default();
        let mut document = doc("# A\n# B\n");
        nav.select(&mut document, 1).unwrap();

        document.reset();
        nav.clamp(&mut document);

        assert_eq!(document.active_section_index(), 0);
    }

    #[test]
    fn select_out_of_range_is_rejected() {
        let nav = NavigationState::default();
        let mut document = doc("# A\n");

        let err = nav.select(&mut document, 1).unwrap_err();
        assert_eq!(err.code, ErrorCode::SectionNotFound);
        assert_eq!(document.active_section_index(), 0);
    }

    #[test]
    fn select_by_title_normalizes_query() {
        let nav = NavigationState::default();
        let mut document = doc("# Scope\n# **Budget**\n");

        assert_eq!(nav.select_by_title(&mut document, "**Budget**").unwrap(), 1);
        assert_eq!(document.active_section_index(), 1);
        assert!(nav.select_by_title(&mut document, "Team").is_err());
    }

    #[test]
    fn blank_title_query_is_a_validation_error() {
        let nav = NavigationState::default();
        let mut document = doc("# Scope\n");

        let err = nav.select_by_title(&mut document, " ** ").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    // ───────────────────────────────────────────────────────────────
    // Sub-heading target
    // ───────────────────────────────────────────────────────────────

    #[test]
    fn sub_heading_target_matches_first_containing_title() {
        let mut nav = NavigationState::default();
        let document = doc("# Plan\n## Phase 1: Discovery\n## Phase 2: Build\n");

        nav.request_sub_heading("Phase");
        let target = nav.take_sub_heading_target(&document).unwrap();

        assert_eq!(target.title, "Phase 1: Discovery");
        assert!(nav.pending_sub_heading().is_none());
    }

    #[test]
    fn unmatched_target_is_cleared() {
        let mut nav = NavigationState::default();
        let document = doc("# Plan\n## Phase 1\n");

        nav.request_sub_heading("Budget");
        assert!(nav.take_sub_heading_target(&document).is_none());
        assert!(nav.pending_sub_heading().is_none());
    }

    #[test]
    fn no_pending_request_yields_nothing() {
        let mut nav = NavigationState::default();
        assert!(nav.take_sub_heading_target(&doc("# Plan\n## X\n")).is_none());
    }
}
