//! PatchSession - splices a streaming replacement into one section.
//!
//! The session captures the section list and the target index when the patch
//! starts. Every fragment rebuilds the whole document from the captured
//! siblings plus the replacement buffer, so siblings are reproduced byte for
//! byte no matter how far the replacement has progressed.

use super::section::Section;
use crate::domain::foundation::DomainError;

/// A section rewrite in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchSession {
    sections: Vec<Section>,
    target_index: usize,
    buffer: String,
}

impl PatchSession {
    /// Starts a patch of `sections[target_index]`.
    ///
    /// # Errors
    ///
    /// Returns `SectionNotFound` if `target_index` is out of range.
    pub fn new(sections: Vec<Section>, target_index: usize) -> Result<Self, DomainError> {
        if target_index >= sections.len() {
            return Err(DomainError::section_not_found(target_index, sections.len()));
        }
        Ok(Self {
            sections,
            target_index,
            buffer: String::new(),
        })
    }

    /// Returns the index captured when the patch started.
    pub fn target_index(&self) -> usize {
        self.target_index
    }

    /// Returns the section being replaced, as it was when the patch started.
    pub fn target(&self) -> &Section {
        &self.sections[self.target_index]
    }

    /// Returns the replacement text received so far.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Accumulates one replacement fragment.
    pub fn push_fragment(&mut self, fragment: &str) {
        self.buffer.push_str(fragment);
    }

    /// Builds the full document with the replacement in place of the target
    /// section, for display while the rewrite is still streaming.
    ///
    /// Leading blank lines of the buffer are skipped. Until the first
    /// non-blank line is terminated, the captured heading line of the target
    /// stands in for it, so a half-received heading never merges into the
    /// previous sibling. A partial last line is terminated before the next
    /// sibling so the sibling's heading stays on its own line.
    pub fn compose(&self) -> String {
        let replacement = skip_blank_lines(&self.buffer);
        if replacement.contains('\n') {
            self.compose_with(replacement)
        } else {
            self.compose_with(self.held_heading())
        }
    }

    /// Builds the document once the stream has ended.
    ///
    /// An unterminated single-line rewrite is taken as is; a rewrite with no
    /// non-blank text keeps the captured heading line.
    pub fn compose_final(&self) -> String {
        let replacement = skip_blank_lines(&self.buffer);
        if replacement.trim().is_empty() {
            self.compose_with(self.held_heading())
        } else {
            self.compose_with(replacement)
        }
    }

    /// First non-blank line of the target as captured, including its newline.
    ///
    /// For a titled section this is its heading; for the intro it is the
    /// first line of text.
    fn held_heading(&self) -> &str {
        let content = skip_blank_lines(&self.target().content);
        match content.find('\n') {
            Some(end) => &content[..=end],
            None => content,
        }
    }

    fn compose_with(&self, replacement: &str) -> String {
        let capacity = self
            .sections
            .iter()
            .map(|s| s.content.len())
            .sum::<usize>()
            + replacement.len()
            + 1;
        let mut text = String::with_capacity(capacity);

        for (index, section) in self.sections.iter().enumerate() {
            if index != self.target_index {
                text.push_str(&section.content);
                continue;
            }
            text.push_str(replacement);
            let has_following = index + 1 < self.sections.len();
            if has_following && !replacement.is_empty() && !replacement.ends_with('\n') {
                text.push('\n');
            }
        }
        text
    }
}

/// Drops whole lines that hold only whitespace from the front of `text`.
fn skip_blank_lines(text: &str) -> &str {
    let mut rest = text;
    while let Some(end) = rest.find('\n') {
        if !rest[..end].trim().is_empty() {
            break;
        }
        rest = &rest[end + 1..];
    }
    rest
}
