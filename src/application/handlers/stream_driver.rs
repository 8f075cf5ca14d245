//! Shared loop that feeds an upstream fragment stream into the workspace.
//!
//! The workspace lock is taken once per fragment and released before the
//! next await on the upstream stream, so readers and other commands are
//! never blocked by a slow generator.

use futures::StreamExt;
use tracing::{debug, warn};

use crate::domain::foundation::{ErrorCode, StreamTicket};
use crate::domain::workspace::{DocumentEvent, FragmentOutcome, StreamKind, WorkspaceHandle};
use crate::ports::{DocumentEventSink, FragmentStream, GenerationError};

/// How a stream ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamStatus {
    /// The upstream finished and the stream was completed.
    Completed,
    /// The stream was abandoned; remaining fragments were dropped.
    Abandoned,
}

/// Summary of a driven stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamSummary {
    pub ticket: StreamTicket,
    pub kind: StreamKind,
    pub status: StreamStatus,
    /// Non-empty fragments applied to the document.
    pub fragments_applied: usize,
}

/// Publishes events, logging delivery failures instead of failing the stream.
pub(crate) async fn publish_events(sink: &dyn DocumentEventSink, events: Vec<DocumentEvent>) {
    if events.is_empty() {
        return;
    }
    if let Err(err) = sink.publish_all(events).await {
        warn!(error = %err, "Failed to deliver document events");
    }
}

/// Marks the stream as failed and publishes the resulting events.
///
/// A stream that was already abandoned is left alone.
pub(crate) async fn fail(
    workspace: &WorkspaceHandle,
    sink: &dyn DocumentEventSink,
    ticket: StreamTicket,
    error: &GenerationError,
) {
    let events = {
        let mut ws = workspace.lock().await;
        if let Err(err) = ws.fail_stream(ticket, error.to_string()) {
            debug!(%ticket, error = %err, "Stream already released before failure");
        }
        ws.take_events()
    };
    publish_events(sink, events).await;
}

/// Applies every fragment of `fragments` to the stream identified by `ticket`.
///
/// # Errors
///
/// Returns the upstream error after marking the stream as failed. Text
/// applied before the error stays in the document.
pub(crate) async fn drive(
    workspace: &WorkspaceHandle,
    sink: &dyn DocumentEventSink,
    ticket: StreamTicket,
    kind: StreamKind,
    mut fragments: FragmentStream,
) -> Result<StreamSummary, GenerationError> {
    let mut fragments_applied = 0;

    while let Some(item) = fragments.next().await {
        let fragment = match item {
            Ok(fragment) => fragment,
            Err(error) => {
                fail(workspace, sink, ticket, &error).await;
                return Err(error);
            }
        };

        let (outcome, events) = {
            let mut ws = workspace.lock().await;
            let outcome = ws.apply_fragment(ticket, &fragment);
            (outcome, ws.take_events())
        };
        publish_events(sink, events).await;

        match outcome {
            FragmentOutcome::Applied => fragments_applied += 1,
            FragmentOutcome::Unchanged => {}
            FragmentOutcome::Ignored => {
                debug!(%ticket, "Stream abandoned, dropping remaining fragments");
                return Ok(StreamSummary {
                    ticket,
                    kind,
                    status: StreamStatus::Abandoned,
                    fragments_applied,
                });
            }
        }
    }

    let (finished, events) = {
        let mut ws = workspace.lock().await;
        let finished = ws.finish_stream(ticket);
        (finished, ws.take_events())
    };
    publish_events(sink, events).await;

    let status = match finished {
        Ok(_) => StreamStatus::Completed,
        Err(err) if err.code == ErrorCode::NoActiveStream => StreamStatus::Abandoned,
        Err(err) => {
            warn!(%ticket, error = %err, "Unexpected error finishing stream");
            StreamStatus::Abandoned
        }
    };

    Ok(StreamSummary {
        ticket,
        kind,
        status,
        fragments_applied,
    })
}
