//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps and error types that form the
//! vocabulary of the proposal outline domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode};
pub use ids::{SectionId, StreamTicket, SubHeaderId, VersionId};
pub use timestamp::Timestamp;
