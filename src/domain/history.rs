//! Version history - append-only whole-document snapshots.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::foundation::{Timestamp, VersionId};

/// An immutable full-document snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalVersion {
    id: VersionId,
    timestamp: Timestamp,
    content: String,
    label: String,
}

impl ProposalVersion {
    fn capture(content: &str, label: impl Into<String>) -> Self {
        Self {
            id: VersionId::new(),
            timestamp: Timestamp::now(),
            content: content.to_string(),
            label: label.into(),
        }
    }

    pub fn id(&self) -> VersionId {
        self.id
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Snapshots ordered newest first.
///
/// Entries are never mutated or removed; restoring a version only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionHistory {
    versions: Vec<ProposalVersion>,
}

impl VersionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures `content` under `label` and makes it the newest entry.
    ///
    /// Returns `None` without recording anything when `content` is empty.
    pub fn snapshot(&mut self, content: &str, label: impl Into<String>) -> Option<VersionId> {
        if content.is_empty() {
            return None;
        }
        let version = ProposalVersion::capture(content, label);
        let id = version.id;
        info!(version_id = %id, label = %version.label, bytes = content.len(), "Snapshot captured");
        self.versions.insert(0, version);
        Some(id)
    }

    /// Looks up a version by id.
    pub fn get(&self, id: VersionId) -> Option<&ProposalVersion> {
        self.versions.iter().find(|v| v.id == id)
    }

    /// Returns the most recent snapshot.
    pub fn latest(&self) -> Option<&ProposalVersion> {
        self.versions.first()
    }

    /// Iterates newest first.
    pub fn iter(&self) -> impl Iterator<Item = &ProposalVersion> {
        self.versions.iter()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}
