//! Proposal Generator Port - Interface for the upstream text source.
//!
//! The generator produces the proposal as a stream of text fragments. It is
//! opened either for the whole document or for a single section rewrite.
//! Prompt construction, transport and retries belong to the adapter.
//!
//! # Example
//!
//! ```ignore
//! let mut fragments = generator.stream_proposal(ProposalRequest::new(brief)).await?;
//! while let Some(fragment) = fragments.next().await {
//!     workspace.lock().await.apply_fragment(ticket, &fragment?);
//! }
//! ```

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;

/// Stream of text fragments in arrival order.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, GenerationError>> + Send>>;

/// Port for the generative text source.
#[async_trait]
pub trait ProposalGenerator: Send + Sync {
    /// Opens a stream that writes the whole proposal.
    async fn stream_proposal(&self, request: ProposalRequest) -> Result<FragmentStream, GenerationError>;

    /// Opens a stream that rewrites one section.
    ///
    /// The stream is expected to start with the section's own heading line.
    async fn stream_section(
        &self,
        request: SectionRewriteRequest,
    ) -> Result<FragmentStream, GenerationError>;
}

/// Request for a whole-document generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalRequest {
    /// Structured project brief collected from the user.
    pub brief: serde_json::Value,
    /// Extra free-form guidance.
    pub instructions: Option<String>,
}

impl ProposalRequest {
    /// Creates a request from a project brief.
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

/// Request for a single-section rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRewriteRequest {
    /// Normalized title of the section being replaced.
    pub section_title: String,
    /// The section's current body, without its heading line.
    pub section_body: String,
    /// What the user wants changed.
    pub instructions: String,
}

/// Upstream generation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// Generator is unavailable.
    #[error("generator unavailable: {0}")]
    Unavailable(String),

    /// Network error while streaming.
    #[error("network error: {0}")]
    Network(String),

    /// Rate limited by the upstream service.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// The request was refused (bad brief, content policy).
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The stream ended abnormally after some fragments were delivered.
    #[error("stream interrupted: {0}")]
    Interrupted(String),
}

impl GenerationError {
    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates an interrupted error.
    pub fn interrupted(message: impl Into<String>) -> Self {
        Self::Interrupted(message.into())
    }

    /// Returns true if retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GenerationError::Unavailable(_)
                | GenerationError::Network(_)
                | GenerationError::RateLimited { .. }
                | GenerationError::Interrupted(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn ProposalGenerator) {}

    #[test]
    fn proposal_request_builder_works() {
        let request = ProposalRequest::new(json!({"client": "Acme"})).with_instructions("Be brief");

        assert_eq!(request.brief["client"], "Acme");
        assert_eq!(request.instructions, Some("Be brief".to_string()));
    }

    #[test]
    fn error_messages_are_readable() {
        assert_eq!(
            GenerationError::RateLimited { retry_after_secs: 30 }.to_string(),
            "rate limited: retry after 30s"
        );
        assert_eq!(
            GenerationError::interrupted("socket closed").to_string(),
            "stream interrupted: socket closed"
        );
    }

    #[test]
    fn rejected_is_not_retryable() {
        assert!(!GenerationError::Rejected("policy".into()).is_retryable());
        assert!(GenerationError::network("reset").is_retryable());
        assert!(GenerationError::unavailable("down").is_retryable());
    }
}
