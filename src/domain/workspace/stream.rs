//! Stream bookkeeping for the workspace.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::document::PatchSession;
use crate::domain::foundation::StreamTicket;

/// The two kinds of stream that can mutate the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamKind {
    /// Whole-document generation; the buffer is reset first.
    Generation,
    /// Rewrite of a single section.
    Patch,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Generation => write!(f, "generation"),
            StreamKind::Patch => write!(f, "patch"),
        }
    }
}

/// What happened to one fragment handed to the workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentOutcome {
    /// The fragment was applied and sections were re-parsed.
    Applied,
    /// The fragment was empty; nothing changed.
    Unchanged,
    /// The fragment belongs to a stream that is no longer active.
    Ignored,
}

/// The stream currently allowed to mutate the document.
#[derive(Debug, Clone)]
pub(crate) enum ActiveStream {
    Generation { ticket: StreamTicket },
    Patch { ticket: StreamTicket, session: PatchSession },
}

impl ActiveStream {
    pub(crate) fn ticket(&self) -> StreamTicket {
        match self {
            ActiveStream::Generation { ticket } | ActiveStream::Patch { ticket, .. } => *ticket,
        }
    }

    pub(crate) fn kind(&self) -> StreamKind {
        match self {
            ActiveStream::Generation { .. } => StreamKind::Generation,
            ActiveStream::Patch { .. } => StreamKind::Patch,
        }
    }
}
