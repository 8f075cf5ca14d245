//! GenerateProposalHandler - streams a whole new proposal into the workspace.
//!
//! The previous text is snapshotted, the document is cleared, and every
//! fragment from the generator is appended and re-parsed as it arrives.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use super::stream_driver::{self, StreamSummary};
use crate::domain::foundation::DomainError;
use crate::domain::workspace::{StreamKind, WorkspaceHandle};
use crate::ports::{DocumentEventSink, GenerationError, ProposalGenerator, ProposalRequest};

/// Default history label for the snapshot taken before regeneration.
pub const DEFAULT_REGENERATION_LABEL: &str = "Before regeneration";

/// Command to generate a proposal from a project brief.
#[derive(Debug, Clone)]
pub struct GenerateProposalCommand {
    /// Structured project brief.
    pub brief: serde_json::Value,
    /// Extra free-form guidance.
    pub instructions: Option<String>,
}

impl GenerateProposalCommand {
    /// Creates a command from a project brief.
    pub fn new(brief: serde_json::Value) -> Self {
        Self {
            brief,
            instructions: None,
        }
    }

    /// Adds free-form guidance.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }
}

/// Errors from proposal generation.
#[derive(Debug, Clone, Error)]
pub enum GenerateProposalError {
    /// The workspace refused to start the stream.
    #[error("{0}")]
    Rejected(#[from] DomainError),

    /// The generator failed; partial text stays in the document.
    #[error("Proposal generation failed: {0}")]
    Generation(#[from] GenerationError),
}

/// Configuration for the generation handler.
#[derive(Debug, Clone)]
pub struct GenerateProposalConfig {
    /// History label for the snapshot taken before the document is cleared.
    pub regeneration_label: String,
}

impl Default for GenerateProposalConfig {
    fn default() -> Self {
        Self {
            regeneration_label: DEFAULT_REGENERATION_LABEL.to_string(),
        }
    }
}

/// Handler for whole-document generation.
///
/// # Usage
///
/// ```rust,ignore
/// let handler = GenerateProposalHandler::new(workspace.clone(), generator, events);
/// let summary = handler.handle(GenerateProposalCommand::new(brief)).await?;
/// ```
pub struct GenerateProposalHandler {
    workspace: WorkspaceHandle,
    generator: Arc<dyn ProposalGenerator>,
    events: Arc<dyn DocumentEventSink>,
    config: GenerateProposalConfig,
}

impl GenerateProposalHandler {
    /// Creates a new handler with the given dependencies.
    pub fn new(
        workspace: WorkspaceHandle,
        generator: Arc<dyn ProposalGenerator>,
        events: Arc<dyn DocumentEventSink>,
    ) -> Self {
        Self::with_config(workspace, generator, events, GenerateProposalConfig::default())
    }

    /// Creates a handler with custom configuration.
    pub fn with_config(
        workspace: WorkspaceHandle,
        generator: Arc<dyn ProposalGenerator>,
        events: Arc<dyn DocumentEventSink>,
        config: GenerateProposalConfig,
    ) -> Self {
        Self {
            workspace,
            generator,
            events,
            config,
        }
    }

    /// Generates a proposal, applying fragments as they arrive.
    ///
    /// # Errors
    ///
    /// - `Rejected` if another stream is in flight (nothing is changed)
    /// - `Generation` if the generator fails to open or fails mid-stream
    pub async fn handle(
        &self,
        cmd: GenerateProposalCommand,
    ) -> Result<StreamSummary, GenerateProposalError> {
        // 1. Claim the stream slot; this snapshots and clears the document
        let (ticket, events) = {
            let mut ws = self.workspace.lock().await;
            let ticket = ws.begin_generation(&self.config.regeneration_label)?;
            (ticket, ws.take_events())
        };
        stream_driver::publish_events(self.events.as_ref(), events).await;

        // 2. Open the upstream stream
        let request = ProposalRequest {
            brief: cmd.brief,
            instructions: cmd.instructions,
        };
        let fragments = match self.generator.stream_proposal(request).await {
            Ok(fragments) => fragments,
            Err(error) => {
                stream_driver::fail(&self.workspace, self.events.as_ref(), ticket, &error).await;
                return Err(error.into());
            }
        };

        // 3. Apply fragments until the stream ends
        let summary = stream_driver::drive(
            &self.workspace,
            self.events.as_ref(),
            ticket,
            StreamKind::Generation,
            fragments,
        )
        .await?;

        info!(
            %ticket,
            status = ?summary.status,
            fragments = summary.fragments_applied,
            "Proposal generation finished"
        );
        Ok(summary)
    }
}
