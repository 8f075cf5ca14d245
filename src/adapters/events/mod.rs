//! Event adapters.
//!
//! - `InMemoryDocumentEvents` - In-process sink with recording and live fan-out

mod in_memory;

pub use in_memory::InMemoryDocumentEvents;
