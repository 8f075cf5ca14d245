//! ProposalWorkspace aggregate - owns the document, its history and the
//! single stream slot.
//!
//! Every mutation of the document goes through this type. At most one stream
//! (whole-document generation or single-section patch) may be in flight; a
//! second request is rejected before any state changes.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::stream::ActiveStream;
use super::{DocumentEvent, FragmentOutcome, StreamKind, WorkspaceHandle};
use crate::domain::document::{DocumentState, Outline, PatchSession, Section, SectionParser, SubHeader};
use crate::domain::foundation::{DomainError, ErrorCode, StreamTicket, VersionId};
use crate::domain::history::VersionHistory;
use crate::domain::navigation::NavigationState;

/// The proposal being written, plus everything needed to stream into it.
#[derive(Debug, Clone)]
pub struct ProposalWorkspace {
    parser: SectionParser,
    document: DocumentState,
    history: VersionHistory,
    navigation: NavigationState,

    // Streaming
    active: Option<ActiveStream>,
    next_ticket: StreamTicket,

    domain_events: Vec<DocumentEvent>,
}

impl Default for ProposalWorkspace {
    fn default() -> Self {
        Self::new(SectionParser::new(), NavigationState::default())
    }
}

impl ProposalWorkspace {
    // ════════════════════════════════════════════════════════════════════════════════
    // Construction
    // ════════════════════════════════════════════════════════════════════════════════

    /// Creates an empty workspace.
    pub fn new(parser: SectionParser, navigation: NavigationState) -> Self {
        Self {
            parser,
            document: DocumentState::new(),
            history: VersionHistory::new(),
            navigation,
            active: None,
            next_ticket: StreamTicket::from_raw(1),
            domain_events: Vec::new(),
        }
    }

    /// Seeds the workspace with existing text, e.g. a proposal opened from disk.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.document.replace_text(&self.parser, text);
        self.navigation.clamp(&mut self.document);
        self
    }

    /// Wraps the workspace in a shared handle for async drivers.
    pub fn into_handle(self) -> WorkspaceHandle {
        Arc::new(Mutex::new(self))
    }

    // ════════════════════════════════════════════════════════════════════════════════
    // Accessors
    // ════════════════════════════════════════════════════════════════════════════════

    pub fn document(&self) -> &DocumentState {
        &self.document
    }

    pub fn full_text(&self) -> &str {
        self.document.full_text()
    }

    pub fn sections(&self) -> &[Section] {
        self.document.sections()
    }

    pub fn active_section_index(&self) -> usize {
        self.document.active_section_index()
    }

    pub fn history(&self) -> &VersionHistory {
        &self.history
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    pub fn parser(&self) -> &SectionParser {
        &self.parser
    }

    /// Returns the ticket and kind of the in-flight stream, if any.
    pub fn active_stream(&self) -> Option<(StreamTicket, StreamKind)> {
        self.active.as_ref().map(|a| (a.ticket(), a.kind()))
    }

    /// Returns true while a generation or patch stream is in flight.
    pub fn is_streaming(&self) -> bool {
        self.active.is_some()
    }

    /// Builds the outline view of the current sections.
    pub fn outline(&self) -> Outline {
        Outline::from_sections(self.document.sections(), self.document.active_section_index())
    }

    /// Takes accumulated domain events, clearing the internal buffer.
    pub fn take_events(&mut self) -> Vec<DocumentEvent> {
        std::mem::take(&mut self.domain_events)
    }

    // ───────────────────────────────────────────────────────────────
    // Stream lifecycle
    // ───────────────────────────────────────────────────────────────

    /// Starts a whole-document generation run.
    ///
    /// The current text is snapshotted under `label` (if non-empty), then the
    /// document is cleared.
    ///
    /// # Errors
    ///
    /// Returns `StreamInFlight` if another stream is active.
    pub fn begin_generation(&mut self, label: &str) -> Result<StreamTicket, DomainError> {
        self.ensure_idle(StreamKind::Generation)?;

        self.history.snapshot(self.document.full_text(), label);
        self.document.reset();
        self.navigation.clamp(&mut self.document);

        let ticket = self.issue_ticket();
        self.active = Some(ActiveStream::Generation { ticket });
        self.record_sections_changed(ticket);

        info!(%ticket, "Generation stream started");
        Ok(ticket)
    }

    /// Starts a rewrite of the section at `index`.
    ///
    /// The section list and index are captured now and never re-resolved.
    ///
    /// # Errors
    ///
    /// Returns `StreamInFlight` if another stream is active, or
    /// `SectionNotFound` if `index` is out of range.
    pub fn begin_patch(&mut self, index: usize) -> Result<StreamTicket, DomainError> {
        self.ensure_idle(StreamKind::Patch)?;
        let session = PatchSession::new(self.document.sections().to_vec(), index)?;

        let ticket = self.issue_ticket();
        info!(%ticket, index, title = %session.target().title, "Patch stream started");
        self.active = Some(ActiveStream::Patch { ticket, session });
        Ok(ticket)
    }

    /// Applies one fragment of the stream identified by `ticket`.
    ///
    /// Fragments from a stream that is no longer active are ignored, as are
    /// empty fragments.
    pub fn apply_fragment(&mut self, ticket: StreamTicket, fragment: &str) -> FragmentOutcome {
        let active = match self.active.as_mut() {
            Some(active) if active.ticket() == ticket => active,
            _ => {
                debug!(%ticket, "Ignoring fragment from inactive stream");
                return FragmentOutcome::Ignored;
            }
        };
        if fragment.is_empty() {
            return FragmentOutcome::Unchanged;
        }

        match active {
            ActiveStream::Generation { .. } => {
                self.document.append_fragment(&self.parser, fragment);
                self.navigation.follow_writer(&mut self.document);
            }
            ActiveStream::Patch { session, .. } => {
                session.push_fragment(fragment);
                self.document.replace_text(&self.parser, session.compose());
                self.navigation.clamp(&mut self.document);
            }
        }

        debug!(
            %ticket,
            bytes = fragment.len(),
            sections = self.document.section_count(),
            "Fragment applied"
        );
        self.record_sections_changed(ticket);
        FragmentOutcome::Applied
    }

    /// Marks the stream as complete. The active index stays where it landed.
    ///
    /// A patch whose rewrite never terminated its first line is settled here,
    /// replacing the held heading with the text that actually arrived.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveStream` if `ticket` is not the active stream.
    pub fn finish_stream(&mut self, ticket: StreamTicket) -> Result<StreamKind, DomainError> {
        let settled = match &self.active {
            Some(ActiveStream::Patch { ticket: active, session }) if *active == ticket => {
                Some(session.compose_final())
            }
            _ => None,
        };
        let kind = self.release(ticket)?;

        if let Some(text) = settled {
            if text != self.document.full_text() {
                self.document.replace_text(&self.parser, text);
                self.navigation.clamp(&mut self.document);
                self.record_sections_changed(ticket);
            }
        }

        info!(%ticket, %kind, sections = self.document.section_count(), "Stream completed");
        self.domain_events
            .push(DocumentEvent::StreamCompleted { ticket, kind });
        Ok(kind)
    }

    /// Marks the stream as failed. Partial text stays in the document.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveStream` if `ticket` is not the active stream.
    pub fn fail_stream(
        &mut self,
        ticket: StreamTicket,
        reason: impl Into<String>,
    ) -> Result<StreamKind, DomainError> {
        let kind = self.release(ticket)?;
        let reason = reason.into();
        warn!(%ticket, %kind, %reason, "Stream failed");
        self.domain_events.push(DocumentEvent::StreamFailed {
            ticket,
            kind,
            reason,
        });
        Ok(kind)
    }

    /// Stops applying fragments from the stream without completing it.
    ///
    /// The upstream source is not cancelled; its remaining fragments are
    /// ignored when they arrive.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveStream` if `ticket` is not the active stream.
    pub fn abandon_stream(&mut self, ticket: StreamTicket) -> Result<StreamKind, DomainError> {
        let kind = self.release(ticket)?;
        info!(%ticket, %kind, "Stream abandoned");
        Ok(kind)
    }

    // ───────────────────────────────────────────────────────────────
    // History
    // ───────────────────────────────────────────────────────────────

    /// Captures the current text under `label`. Empty text is not captured.
    pub fn snapshot(&mut self, label: &str) -> Option<VersionId> {
        self.history.snapshot(self.document.full_text(), label)
    }

    /// Replaces the document with a saved version.
    ///
    /// Restoring neither removes nor reorders history and takes no snapshot
    /// of the text it replaces.
    ///
    /// # Errors
    ///
    /// Returns `StreamInFlight` while a stream is active, or
    /// `VersionNotFound` for an unknown id.
    pub fn restore(&mut self, version_id: VersionId) -> Result<(), DomainError> {
        if let Some(active) = &self.active {
            warn!(version_id = %version_id, ticket = %active.ticket(), "Restore rejected while streaming");
            return Err(DomainError::new(
                ErrorCode::StreamInFlight,
                "Cannot restore a version while a stream is in flight",
            )
            .with_detail("active_ticket", active.ticket().to_string()));
        }

        let content = self
            .history
            .get(version_id)
            .map(|v| v.content().to_string())
            .ok_or_else(|| {
                DomainError::new(ErrorCode::VersionNotFound, "Version not found")
                    .with_detail("version_id", version_id.to_string())
            })?;

        self.document.replace_text(&self.parser, content);
        self.navigation.clamp(&mut self.document);
        self.domain_events
            .push(DocumentEvent::VersionRestored { version_id });

        info!(version_id = %version_id, sections = self.document.section_count(), "Version restored");
        Ok(())
    }

    // ───────────────────────────────────────────────────────────────
    // Navigation
    // ───────────────────────────────────────────────────────────────

    /// Makes the section at `index` active.
    ///
    /// # Errors
    ///
    /// Returns `SectionNotFound` if `index` is out of range.
    pub fn select_section(&mut self, index: usize) -> Result<(), DomainError> {
        self.navigation.select(&mut self.document, index)
    }

    /// Makes the section titled `title` active and returns its index.
    ///
    /// # Errors
    ///
    /// Returns `SectionNotFound` if no section carries that title.
    pub fn select_section_by_title(&mut self, title: &str) -> Result<usize, DomainError> {
        self.navigation.select_by_title(&mut self.document, title)
    }

    /// Records a sub-heading of the active section to scroll to.
    pub fn request_sub_heading(&mut self, query: impl Into<String>) {
        self.navigation.request_sub_heading(query);
    }

    /// Resolves and clears the pending sub-heading request.
    pub fn take_sub_heading_target(&mut self) -> Option<SubHeader> {
        self.navigation.take_sub_heading_target(&self.document)
    }

    // ───────────────────────────────────────────────────────────────
    // Internals
    // ───────────────────────────────────────────────────────────────

    fn ensure_idle(&self, requested: StreamKind) -> Result<(), DomainError> {
        match &self.active {
            None => Ok(()),
            Some(active) => {
                warn!(
                    active_ticket = %active.ticket(),
                    active_kind = %active.kind(),
                    %requested,
                    "Stream rejected while another is in flight"
                );
                Err(DomainError::new(
                    ErrorCode::StreamInFlight,
                    format!("A {} stream is already in flight", active.kind()),
                )
                .with_detail("active_kind", active.kind().to_string())
                .with_detail("requested_kind", requested.to_string()))
            }
        }
    }

    fn issue_ticket(&mut self) -> StreamTicket {
        let ticket = self.next_ticket;
        self.next_ticket = ticket.next();
        ticket
    }

    fn release(&mut self, ticket: StreamTicket) -> Result<StreamKind, DomainError> {
        match self.active.take() {
            Some(active) if active.ticket() == ticket => Ok(active.kind()),
            other => {
                self.active = other;
                Err(DomainError::new(
                    ErrorCode::NoActiveStream,
                    format!("{} is not the active stream", ticket),
                ))
            }
        }
    }

    fn record_sections_changed(&mut self, ticket: StreamTicket) {
        self.domain_events.push(DocumentEvent::SectionsChanged {
            ticket,
            section_count: self.document.section_count(),
            active_section_index: self.document.active_section_index(),
        });
    }
}
