//! RewriteSectionHandler - streams a replacement for one section.
//!
//! The target section and its siblings are captured when the rewrite starts.
//! Each fragment rebuilds the document from the untouched siblings plus the
//! replacement so far.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use super::stream_driver::{self, StreamSummary};
use crate::domain::foundation::DomainError;
use crate::domain::workspace::{StreamKind, WorkspaceHandle};
use crate::ports::{DocumentEventSink, GenerationError, ProposalGenerator, SectionRewriteRequest};

/// Command to rewrite one section.
#[derive(Debug, Clone)]
pub struct RewriteSectionCommand {
    /// Index of the section in the current section list.
    pub section_index: usize,
    /// What the user wants changed.
    pub instructions: String,
}

impl RewriteSectionCommand {
    pub fn new(section_index: usize, instructions: impl Into<String>) -> Self {
        Self {
            section_index,
            instructions: instructions.into(),
        }
    }
}

/// Errors from a section rewrite.
#[derive(Debug, Clone, Error)]
pub enum RewriteSectionError {
    /// The workspace refused to start the rewrite.
    #[error("{0}")]
    Rejected(#[from] DomainError),

    /// The generator failed; the partial replacement stays visible.
    #[error("Section rewrite failed: {0}")]
    Generation(#[from] GenerationError),
}

/// Handler for single-section rewrites.
///
/// # Usage
///
/// ```rust,ignore
/// let handler = RewriteSectionHandler::new(workspace.clone(), generator, events);
/// handler.handle(RewriteSectionCommand::new(2, "Add a risk table")).await?;
/// ```
pub struct RewriteSectionHandler {
    workspace: WorkspaceHandle,
    generator: Arc<dyn ProposalGenerator>,
    events: Arc<dyn DocumentEventSink>,
}

impl RewriteSectionHandler {
    pub fn new(
        workspace: WorkspaceHandle,
        generator: Arc<dyn ProposalGenerator>,
        events: Arc<dyn DocumentEventSink>,
    ) -> Self {
        Self {
            workspace,
            generator,
            events,
        }
    }

    /// Rewrites the section, applying fragments as they arrive.
    ///
    /// # Errors
    ///
    /// - `Rejected` if another stream is in flight or the index is out of range
    /// - `Generation` if the generator fails to open or fails mid-stream
    pub async fn handle(
        &self,
        cmd: RewriteSectionCommand,
    ) -> Result<StreamSummary, RewriteSectionError> {
        // 1. Claim the stream slot and capture the target
        let (ticket, request) = {
            let mut ws = self.workspace.lock().await;
            let ticket = ws.begin_patch(cmd.section_index)?;
            // begin_patch validated the index
            let section = &ws.sections()[cmd.section_index];
            let request = SectionRewriteRequest {
                section_title: section.title.clone(),
                section_body: section.raw_body.clone(),
                instructions: cmd.instructions,
            };
            (ticket, request)
        };
        info!(%ticket, index = cmd.section_index, title = %request.section_title, "Section rewrite requested");

        // 2. Open the section-scoped stream
        let fragments = match self.generator.stream_section(request).await {
            Ok(fragments) => fragments,
            Err(error) => {
                stream_driver::fail(&self.workspace, self.events.as_ref(), ticket, &error).await;
                return Err(error.into());
            }
        };

        // 3. Splice fragments in until the stream ends
        let summary = stream_driver::drive(
            &self.workspace,
            self.events.as_ref(),
            ticket,
            StreamKind::Patch,
            fragments,
        )
        .await?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::generator::RecordedCall;
    use crate::adapters::{InMemoryDocumentEvents, ScriptedProposalGenerator};
    use crate::application::handlers::StreamStatus;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::workspace::ProposalWorkspace;

    const DOC: &str = "# Scope\nWe build.\n# Budget\n$10k\n## Costs\n# Team\nTwo people.\n";

    fn setup(
        generator: ScriptedProposalGenerator,
    ) -> (WorkspaceHandle, Arc<InMemoryDocumentEvents>, RewriteSectionHandler) {
        let workspace = ProposalWorkspace::default().with_text(DOC).into_handle();
        let events = Arc::new(InMemoryDocumentEvents::new());
        let handler = RewriteSectionHandler::new(workspace.clone(), Arc::new(generator), events.clone());
        (workspace, events, handler)
    }

    #[tokio::test]
    async fn rewrites_only_the_target_section() {
        let (workspace, _, handler) = setup(
            ScriptedProposalGenerator::new()
                .with_text_in_chunks("# Budget\n$12k after review.\n", 3),
        );

        let summary = handler.handle(RewriteSectionCommand::new(1, "Raise it")).await.unwrap();

        assert_eq!(summary.status, StreamStatus::Completed);
        assert_eq!(summary.kind, StreamKind::Patch);
        let ws = workspace.lock().await;
        assert_eq!(
            ws.full_text(),
            "# Scope\nWe build.\n# Budget\n$12k after review.\n# Team\nTwo people.\n"
        );
        assert!(ws.sections()[1].sub_headers.is_empty());
    }

    #[tokio::test]
    async fn request_carries_captured_title_and_body() {
        let generator = ScriptedProposalGenerator::new().with_fragments(["# Budget\nx\n"]);
        let (_, _, handler) = setup(generator.clone());

        handler.handle(RewriteSectionCommand::new(1, "Shorter")).await.unwrap();

        assert_eq!(
            generator.calls(),
            vec![RecordedCall::Section(SectionRewriteRequest {
                section_title: "Budget".to_string(),
                section_body: "$10k\n## Costs\n".to_string(),
                instructions: "Shorter".to_string(),
            })]
        );
    }

    #[tokio::test]
    async fn out_of_range_index_is_rejected_before_calling_generator() {
        let generator = ScriptedProposalGenerator::new().with_fragments(["# X\n"]);
        let (workspace, events, handler) = setup(generator.clone());

        let err = handler.handle(RewriteSectionCommand::new(9, "x")).await.unwrap_err();

        match err {
            RewriteSectionError::Rejected(e) => assert_eq!(e.code, ErrorCode::SectionNotFound),
            other => panic!("Expected Rejected, got {:?}", other),
        }
        assert_eq!(generator.call_count(), 0);
        assert_eq!(events.event_count(), 0);
        assert_eq!(workspace.lock().await.full_text(), DOC);
    }

    #[tokio::test]
    async fn failure_leaves_partial_replacement() {
        let (workspace, events, handler) = setup(
            ScriptedProposalGenerator::new()
                .with_failure_after(["# Team\nThree"], GenerationError::interrupted("eof")),
        );

        let err = handler.handle(RewriteSectionCommand::new(2, "Grow")).await.unwrap_err();

        assert!(matches!(err, RewriteSectionError::Generation(_)));
        let ws = workspace.lock().await;
        assert_eq!(ws.full_text(), "# Scope\nWe build.\n# Budget\n$10k\n## Costs\n# Team\nThree");
        assert!(!ws.is_streaming());
        assert!(events.has_event("document.stream_failed"));
    }

    #[tokio::test]
    async fn rejected_during_generation() {
        let (workspace, _, handler) = setup(ScriptedProposalGenerator::new());
        workspace.lock().await.begin_generation("label").unwrap();

        let err = handler.handle(RewriteSectionCommand::new(0, "x")).await.unwrap_err();

        assert!(matches!(err, RewriteSectionError::Rejected(_)));
    }
}
