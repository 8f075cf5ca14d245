//! In-memory document event sink.
//!
//! Records every published event for assertions and fans events out to live
//! subscribers over a broadcast channel.
//!
//! # Panics
//!
//! Accessors panic if the event log lock is poisoned.

use async_trait::async_trait;
use std::sync::RwLock;
use tokio::sync::broadcast;

use crate::domain::foundation::DomainError;
use crate::domain::workspace::DocumentEvent;
use crate::ports::DocumentEventSink;

const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// In-memory sink for document events.
///
/// # Example
///
/// ```ignore
/// let events = Arc::new(InMemoryDocumentEvents::new());
/// let mut live = events.subscribe();
///
/// events.publish(event).await?;
///
/// assert_eq!(events.event_count(), 1);
/// assert!(events.has_event("document.sections_changed"));
/// ```
pub struct InMemoryDocumentEvents {
    published: RwLock<Vec<DocumentEvent>>,
    sender: broadcast::Sender<DocumentEvent>,
}

impl InMemoryDocumentEvents {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates an empty sink whose live channel buffers `capacity` events.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            published: RwLock::new(Vec::new()),
            sender,
        }
    }

    /// Subscribes to events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<DocumentEvent> {
        self.sender.subscribe()
    }

    // === Test Helpers ===

    /// Returns all published events in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn published_events(&self) -> Vec<DocumentEvent> {
        self.published
            .read()
            .expect("InMemoryDocumentEvents: published lock poisoned")
            .clone()
    }

    /// Returns events of a specific type (see [`DocumentEvent::event_type`]).
    pub fn events_of_type(&self, event_type: &str) -> Vec<DocumentEvent> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Returns count of published events.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn event_count(&self) -> usize {
        self.published
            .read()
            .expect("InMemoryDocumentEvents: published lock poisoned")
            .len()
    }

    /// Checks if a specific event type was published.
    pub fn has_event(&self, event_type: &str) -> bool {
        self.published
            .read()
            .expect("InMemoryDocumentEvents: published lock poisoned")
            .iter()
            .any(|e| e.event_type() == event_type)
    }

    /// Clears all published events (for test isolation).
    pub fn clear(&self) {
        self.published
            .write()
            .expect("InMemoryDocumentEvents: published write lock poisoned")
            .clear();
    }
}

impl Default for InMemoryDocumentEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentEventSink for InMemoryDocumentEvents {
    async fn publish(&self, event: DocumentEvent) -> Result<(), DomainError> {
        self.published
            .write()
            .expect("InMemoryDocumentEvents: published write lock poisoned")
            .push(event.clone());

        // No live subscribers is fine
        let _ = self.sender.send(event);
        Ok(())
    }
}
