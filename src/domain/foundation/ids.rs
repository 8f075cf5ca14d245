//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a saved proposal version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(Uuid);

impl VersionId {
    /// Creates a new random VersionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a VersionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for VersionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VersionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Key of a parsed section.
///
/// Derived from the section's position in the parser output, so parsing the
/// same text always yields the same ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    const INTRO: &'static str = "intro";

    /// The id reserved for the synthetic intro section.
    pub fn intro() -> Self {
        Self(Self::INTRO.to_string())
    }

    /// The id of the section at `index` in the parser output.
    pub fn at_index(index: usize) -> Self {
        Self(format!("section-{}", index))
    }

    /// Returns true if this is the synthetic intro section id.
    pub fn is_intro(&self) -> bool {
        self.0 == Self::INTRO
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key of a second-level heading inside a section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubHeaderId(String);

impl SubHeaderId {
    /// The id of the `ordinal`-th sub-heading (zero-based) of `section`.
    pub fn new(section: &SectionId, ordinal: usize) -> Self {
        Self(format!("{}-sub-{}", section, ordinal))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubHeaderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies one in-flight fragment stream.
///
/// Tickets increase monotonically per workspace; a fragment is only applied
/// when it carries the ticket of the currently active stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamTicket(u64);

impl StreamTicket {
    /// Creates a ticket from a raw counter value.
    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw counter value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Returns the ticket that follows this one.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for StreamTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stream#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_ids_are_unique() {
        assert_ne!(VersionId::new(), VersionId::new());
    }

    #[test]
    fn version_id_round_trips_through_string() {
        let id = VersionId::new();
        let parsed: VersionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn version_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<VersionId>().is_err());
    }

    #[test]
    fn section_ids_are_positional() {
        assert_eq!(SectionId::at_index(3).as_str(), "section-3");
        assert_eq!(SectionId::at_index(3), SectionId::at_index(3));
        assert!(SectionId::intro().is_intro());
        assert!(!SectionId::at_index(0).is_intro());
    }

    #[test]
    fn sub_header_id_is_scoped_to_section() {
        let id = SubHeaderId::new(&SectionId::at_index(2), 1);
        assert_eq!(id.as_str(), "section-2-sub-1");
    }

    #[test]
    fn stream_ticket_increments() {
        let ticket = StreamTicket::from_raw(7);
        assert_eq!(ticket.next().as_u64(), 8);
        assert!(ticket < ticket.next());
        assert_eq!(ticket.to_string(), "stream#7");
    }
}
