//! Application handlers.
//!
//! Command handlers that drive upstream streams into the workspace.

pub mod generate_proposal;
pub mod restore_version;
pub mod rewrite_section;
mod stream_driver;

pub use generate_proposal::{
    GenerateProposalCommand, GenerateProposalConfig, GenerateProposalError,
    GenerateProposalHandler, DEFAULT_REGENERATION_LABEL,
};
pub use restore_version::{RestoreOutcome, RestoreVersionCommand, RestoreVersionHandler};
pub use rewrite_section::{RewriteSectionCommand, RewriteSectionError, RewriteSectionHandler};
pub use stream_driver::{StreamStatus, StreamSummary};
