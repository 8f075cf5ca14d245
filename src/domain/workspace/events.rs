//! Workspace domain events.

use serde::{Deserialize, Serialize};

use super::StreamKind;
use crate::domain::foundation::{StreamTicket, VersionId};

/// Events raised while the document changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocumentEvent {
    /// A fragment was applied and the section list was re-parsed.
    SectionsChanged {
        ticket: StreamTicket,
        section_count: usize,
        active_section_index: usize,
    },

    /// A stream ran to completion.
    StreamCompleted { ticket: StreamTicket, kind: StreamKind },

    /// A stream failed; its partial text stays in the document.
    StreamFailed {
        ticket: StreamTicket,
        kind: StreamKind,
        reason: String,
    },

    /// A saved version replaced the document text.
    VersionRestored { version_id: VersionId },
}

impl DocumentEvent {
    /// Returns a short name for logging and routing.
    pub fn event_type(&self) -> &'static str {
        match self {
            DocumentEvent::SectionsChanged { .. } => "document.sections_changed",
            DocumentEvent::StreamCompleted { .. } => "document.stream_completed",
            DocumentEvent::StreamFailed { .. } => "document.stream_failed",
            DocumentEvent::VersionRestored { .. } => "document.version_restored",
        }
    }

    /// Returns the stream the event belongs to, if any.
    pub fn ticket(&self) -> Option<StreamTicket> {
        match self {
            DocumentEvent::SectionsChanged { ticket, .. }
            | DocumentEvent::StreamCompleted { ticket, .. }
            | DocumentEvent::StreamFailed { ticket, .. } => Some(*ticket),
            DocumentEvent::VersionRestored { .. } => None,
        }
    }
}
