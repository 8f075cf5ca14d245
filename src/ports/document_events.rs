//! DocumentEventSink port - Interface for delivering document events.
//!
//! Renderers subscribe through an adapter of this port to learn when the
//! section list changes or a stream ends.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::workspace::DocumentEvent;

/// Port for publishing document events.
///
/// Events must be delivered in the order they are published.
#[async_trait]
pub trait DocumentEventSink: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: DocumentEvent) -> Result<(), DomainError>;

    /// Publish events in order.
    async fn publish_all(&self, events: Vec<DocumentEvent>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}
