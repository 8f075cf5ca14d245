//! RestoreVersionHandler - replaces the document with a saved version after
//! the user confirms.

use std::sync::Arc;

use tracing::info;

use super::stream_driver;
use crate::domain::foundation::{DomainError, ErrorCode, VersionId};
use crate::domain::workspace::WorkspaceHandle;
use crate::ports::{Confirmation, DocumentEventSink};

/// Command to restore a saved version.
#[derive(Debug, Clone, Copy)]
pub struct RestoreVersionCommand {
    pub version_id: VersionId,
}

/// What happened to a restore request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// The document now holds the version's text.
    Restored,
    /// The user declined; nothing changed.
    Declined,
}

/// Handler for restoring versions.
///
/// Preconditions are checked before the user is asked, and again when the
/// restore is applied.
pub struct RestoreVersionHandler {
    workspace: WorkspaceHandle,
    confirmation: Arc<dyn Confirmation>,
    events: Arc<dyn DocumentEventSink>,
}

impl RestoreVersionHandler {
    pub fn new(
        workspace: WorkspaceHandle,
        confirmation: Arc<dyn Confirmation>,
        events: Arc<dyn DocumentEventSink>,
    ) -> Self {
        Self {
            workspace,
            confirmation,
            events,
        }
    }

    /// Asks for confirmation, then restores the version.
    ///
    /// # Errors
    ///
    /// - `StreamInFlight` while a stream is active
    /// - `VersionNotFound` for an unknown id
    pub async fn handle(&self, cmd: RestoreVersionCommand) -> Result<RestoreOutcome, DomainError> {
        // 1. Validate and build the prompt without holding the lock while asking
        let prompt = {
            let ws = self.workspace.lock().await;
            if ws.is_streaming() {
                return Err(DomainError::new(
                    ErrorCode::StreamInFlight,
                    "Cannot restore a version while a stream is in flight",
                ));
            }
            let version = ws.history().get(cmd.version_id).ok_or_else(|| {
                DomainError::new(ErrorCode::VersionNotFound, "Version not found")
                    .with_detail("version_id", cmd.version_id.to_string())
            })?;
            format!(
                "Restore \"{}\" from {}? The current document will be replaced.",
                version.label(),
                version.timestamp()
            )
        };

        // 2. Ask
        if !self.confirmation.confirm(&prompt) {
            info!(version_id = %cmd.version_id, "Restore declined");
            return Ok(RestoreOutcome::Declined);
        }

        // 3. Restore
        let events = {
            let mut ws = self.workspace.lock().await;
            ws.restore(cmd.version_id)?;
            ws.take_events()
        };
        stream_driver::publish_events(self.events.as_ref(), events).await;

        Ok(RestoreOutcome::Restored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryDocumentEvents, StaticConfirmation};
    use crate::domain::workspace::{DocumentEvent, ProposalWorkspace};

    async fn workspace_with_version() -> (WorkspaceHandle, VersionId) {
        let workspace = ProposalWorkspace::default().with_text("# First\n").into_handle();
        let version = {
            let mut ws = workspace.lock().await;
            let version = ws.snapshot("Draft 1").unwrap();
            let ticket = ws.begin_generation("Before regeneration").unwrap();
            ws.apply_fragment(ticket, "# Second\n");
            ws.finish_stream(ticket).unwrap();
            ws.take_events();
            version
        };
        (workspace, version)
    }

    #[tokio::test]
    async fn confirmed_restore_replaces_text() {
        let (workspace, version) = workspace_with_version().await;
        let confirmation = Arc::new(StaticConfirmation::accept());
        let events = Arc::new(InMemoryDocumentEvents::new());
        let handler = RestoreVersionHandler::new(workspace.clone(), confirmation.clone(), events.clone());

        let outcome = handler
            .handle(RestoreVersionCommand { version_id: version })
            .await
            .unwrap();

        assert_eq!(outcome, RestoreOutcome::Restored);
        assert_eq!(workspace.lock().await.full_text(), "# First\n");
        assert_eq!(confirmation.prompt_count(), 1);
        assert_eq!(
            events.published_events(),
            vec![DocumentEvent::VersionRestored { version_id: version }]
        );
    }

    #[tokio::test]
    async fn declined_restore_changes_nothing() {
        let (workspace, version) = workspace_with_version().await;
        let events = Arc::new(InMemoryDocumentEvents::new());
        let handler = RestoreVersionHandler::new(
            workspace.clone(),
            Arc::new(StaticConfirmation::decline()),
            events.clone(),
        );

        let outcome = handler
            .handle(RestoreVersionCommand { version_id: version })
            .await
            .unwrap();

        assert_eq!(outcome, RestoreOutcome::Declined);
        assert_eq!(workspace.lock().await.full_text(), "# Second\n");
        assert_eq!(events.event_count(), 0);
    }

    #[tokio::test]
    async fn streaming_is_rejected_without_asking() {
        let (workspace, version) = workspace_with_version().await;
        workspace.lock().await.begin_generation("label").unwrap();
        let confirmation = Arc::new(StaticConfirmation::accept());
        let handler = RestoreVersionHandler::new(
            workspace,
            confirmation.clone(),
            Arc::new(InMemoryDocumentEvents::new()),
        );

        let err = handler
            .handle(RestoreVersionCommand { version_id: version })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::StreamInFlight);
        assert_eq!(confirmation.prompt_count(), 0);
    }

    #[tokio::test]
    async fn unknown_version_is_not_found() {
        let (workspace, _) = workspace_with_version().await;
        let handler = RestoreVersionHandler::new(
            workspace,
            Arc::new(StaticConfirmation::accept()),
            Arc::new(InMemoryDocumentEvents::new()),
        );

        let err = handler
            .handle(RestoreVersionCommand {
                version_id: VersionId::new(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::VersionNotFound);
    }
}
