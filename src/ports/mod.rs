//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ProposalGenerator` - Streaming text source for proposals and section rewrites
//! - `DocumentEventSink` - Delivery of document change events to renderers
//! - `DocumentExporter` - Conversion of parsed sections into files
//! - `Confirmation` - Yes/no prompt before destructive actions

mod confirmation;
mod document_events;
mod document_exporter;
mod proposal_generator;

pub use confirmation::Confirmation;
pub use document_events::DocumentEventSink;
pub use document_exporter::{DocumentExporter, ExportError, ExportFormat, ExportedDocument};
pub use proposal_generator::{
    FragmentStream, GenerationError, ProposalGenerator, ProposalRequest, SectionRewriteRequest,
};
