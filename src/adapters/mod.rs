//! Adapters - Implementations of port interfaces.
//!
//! - `generator` - Scripted proposal generator
//! - `events` - In-memory document event sink
//! - `export` - Markdown and word processor exporters
//! - `confirmation` - Fixed-answer confirmation

pub mod confirmation;
pub mod events;
pub mod export;
pub mod generator;

pub use confirmation::StaticConfirmation;
pub use events::InMemoryDocumentEvents;
pub use export::{MarkdownExporter, WordHtmlExporter};
pub use generator::ScriptedProposalGenerator;
