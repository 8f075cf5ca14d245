//! Application layer - Commands and Handlers.
//!
//! This layer orchestrates workspace operations and coordinates between ports.
//! Handlers own the async side (upstream streams, confirmation, event
//! publishing); the workspace stays synchronous.

pub mod handlers;

pub use handlers::{
    // Generation
    GenerateProposalCommand, GenerateProposalConfig, GenerateProposalError,
    GenerateProposalHandler,
    // Section rewrite
    RewriteSectionCommand, RewriteSectionError, RewriteSectionHandler,
    // Version restore
    RestoreOutcome, RestoreVersionCommand, RestoreVersionHandler,
    // Stream results
    StreamStatus, StreamSummary,
};
