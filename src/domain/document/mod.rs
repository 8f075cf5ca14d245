//! Document module - sections, parsing and section patches.
//!
//! # Module Organization
//!
//! - `heading` - Line classification and title normalization
//! - `section` - Section and sub-heading records
//! - `parser` - Full-buffer section parser with duplicate suppression
//! - `state` - Text buffer plus derived sections
//! - `patch` - Single-section splice for streaming rewrites
//! - `outline` - Serializable outline view models

mod heading;
mod outline;
mod parser;
mod patch;
mod section;
mod state;

pub use heading::{normalize_title, LineKind};
pub use outline::{Outline, OutlineEntry, OutlineSubEntry};
pub use parser::{parse_sections, SectionParser, DEFAULT_INTRO_TITLE};
pub use patch::PatchSession;
pub use section::{Section, SubHeader};
pub use state::DocumentState;
