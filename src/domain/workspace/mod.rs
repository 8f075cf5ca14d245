//! Workspace module - the proposal aggregate and its stream lifecycle.
//!
//! The workspace owns the document, version history and navigation state.
//! Async drivers share it through a [`WorkspaceHandle`], locking it once per
//! fragment and never across an await on the upstream stream.

mod aggregate;
mod events;
mod stream;

use std::sync::Arc;

use tokio::sync::Mutex;

pub use aggregate::ProposalWorkspace;
pub use events::DocumentEvent;
pub use stream::{FragmentOutcome, StreamKind};

/// Shared access to a workspace for async drivers.
pub type WorkspaceHandle = Arc<Mutex<ProposalWorkspace>>;
