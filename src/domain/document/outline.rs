//! Outline view models.
//!
//! A flattened, serializable projection of the parsed sections for a
//! renderer's navigation pane.

use serde::{Deserialize, Serialize};

use super::section::Section;
use crate::domain::foundation::{SectionId, SubHeaderId};

// ════════════════════════════════════════════════════════════════════════════════
// Entries
// ════════════════════════════════════════════════════════════════════════════════

/// A sub-heading row under an outline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineSubEntry {
    pub id: SubHeaderId,
    pub title: String,
}

/// One section row in the outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub id: SectionId,
    pub title: String,
    pub sub_headers: Vec<OutlineSubEntry>,
    pub is_active: bool,
}

// ════════════════════════════════════════════════════════════════════════════════
// Outline
// ════════════════════════════════════════════════════════════════════════════════

/// The full outline, in section order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    pub entries: Vec<OutlineEntry>,
}

impl Outline {
    /// Builds the outline, marking the entry at `active_index` as active.
    pub fn from_sections(sections: &[Section], active_index: usize) -> Self {
        let entries = sections
            .iter()
            .enumerate()
            .map(|(index, section)| OutlineEntry {
                id: section.id.clone(),
                title: section.title.clone(),
                sub_headers: section
                    .sub_headers
                    .iter()
                    .map(|sub| OutlineSubEntry {
                        id: sub.id.clone(),
                        title: sub.title.clone(),
                    })
                    .collect(),
                is_active: index == active_index,
            })
            .collect();
        Self { entries }
    }

    /// Returns the active entry, if any.
    pub fn active(&self) -> Option<&OutlineEntry> {
        self.entries.iter().find(|e| e.is_active)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
