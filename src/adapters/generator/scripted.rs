//! Scripted proposal generator for tests and demos.
//!
//! Replays pre-configured fragment scripts instead of calling a real text
//! generation service.
//!
//! # Features
//!
//! - Fragment lists replayed in order, one script per call
//! - Failures before the first fragment or partway through a stream
//! - Simulated per-fragment latency
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let generator = ScriptedProposalGenerator::new()
//!     .with_text_in_chunks("# Scope\nWe deliver.\n", 5)
//!     .with_failure_after(["# Budget\n"], GenerationError::network("reset"));
//! ```

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    FragmentStream, GenerationError, ProposalGenerator, ProposalRequest, SectionRewriteRequest,
};

/// One configured reply.
#[derive(Debug, Clone)]
pub enum Script {
    /// Stream these fragments, then end normally.
    Fragments(Vec<String>),
    /// Stream these fragments, then yield `error`.
    FailAfter {
        fragments: Vec<String>,
        error: GenerationError,
    },
    /// Refuse to open the stream.
    Refuse(GenerationError),
}

/// A request the generator received.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Proposal(ProposalRequest),
    Section(SectionRewriteRequest),
}

/// Generator that replays scripts in the order they were added.
///
/// Both `stream_proposal` and `stream_section` consume from the same queue.
/// Once the queue is empty every call is refused as unavailable.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProposalGenerator {
    scripts: Arc<Mutex<VecDeque<Script>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl ScriptedProposalGenerator {
    /// Creates a generator with an empty script queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a stream of the given fragments.
    pub fn with_fragments<I, S>(self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Script::Fragments(fragments.into_iter().map(Into::into).collect()))
    }

    /// Queues `text` split into fragments of at most `chunk_chars` characters.
    pub fn with_text_in_chunks(self, text: &str, chunk_chars: usize) -> Self {
        self.push(Script::Fragments(split_into_chunks(text, chunk_chars)))
    }

    /// Queues a stream that yields `fragments` and then fails with `error`.
    pub fn with_failure_after<I, S>(self, fragments: I, error: GenerationError) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Script::FailAfter {
            fragments: fragments.into_iter().map(Into::into).collect(),
            error,
        })
    }

    /// Queues a refusal to open the stream.
    pub fn with_refusal(self, error: GenerationError) -> Self {
        self.push(Script::Refuse(error))
    }

    /// Sets simulated latency before each fragment.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the number of calls made to this generator.
    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .expect("ScriptedProposalGenerator: calls lock poisoned")
            .len()
    }

    /// Returns all recorded calls.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .expect("ScriptedProposalGenerator: calls lock poisoned")
            .clone()
    }

    fn push(self, script: Script) -> Self {
        self.scripts
            .lock()
            .expect("ScriptedProposalGenerator: scripts lock poisoned")
            .push_back(script);
        self
    }

    fn record(&self, call: RecordedCall) {
        self.calls
            .lock()
            .expect("ScriptedProposalGenerator: calls lock poisoned")
            .push(call);
    }

    fn next_stream(&self) -> Result<FragmentStream, GenerationError> {
        let script = self
            .scripts
            .lock()
            .expect("ScriptedProposalGenerator: scripts lock poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Script::Refuse(GenerationError::unavailable("no scripted response left"))
            });

        let (fragments, trailing_error) = match script {
            Script::Fragments(fragments) => (fragments, None),
            Script::FailAfter { fragments, error } => (fragments, Some(error)),
            Script::Refuse(error) => return Err(error),
        };

        let items = fragments
            .into_iter()
            .map(Ok::<String, GenerationError>)
            .chain(trailing_error.map(Err));

        let delay = self.delay;
        let stream = stream::iter(items).then(move |item| async move {
            if !delay.is_zero() {
                sleep(delay).await;
            }
            item
        });
        Ok(Box::pin(stream))
    }
}

#[async_trait]
impl ProposalGenerator for ScriptedProposalGenerator {
    async fn stream_proposal(&self, request: ProposalRequest) -> Result<FragmentStream, GenerationError> {
        self.record(RecordedCall::Proposal(request));
        self.next_stream()
    }

    async fn stream_section(
        &self,
        request: SectionRewriteRequest,
    ) -> Result<FragmentStream, GenerationError> {
        self.record(RecordedCall::Section(request));
        self.next_stream()
    }
}

/// Splits `text` into pieces of at most `chunk_chars` characters, never
/// cutting through a UTF-8 sequence.
pub fn split_into_chunks(text: &str, chunk_chars: usize) -> Vec<String> {
    let size = chunk_chars.max(1);
    let chars: Vec<char> = text.chars().collect();
    chars.chunks(size).map(|c| c.iter().collect()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn proposal_request() -> ProposalRequest {
        ProposalRequest::new(json!({"client": "Acme"}))
    }

    async fn collect(stream: FragmentStream) -> Vec<Result<String, GenerationError>> {
        stream.collect().await
    }

    #[tokio::test]
    async fn replays_fragments_in_order() {
        let generator = ScriptedProposalGenerator::new().with_fragments(["# A\n", "body\n"]);

        let items = collect(generator.stream_proposal(proposal_request()).await.unwrap()).await;

        assert_eq!(items, vec![Ok("# A\n".to_string()), Ok("body\n".to_string())]);
    }

    #[tokio::test]
    async fn scripts_are_consumed_per_call() {
        let generator = ScriptedProposalGenerator::new()
            .with_fragments(["first"])
            .with_fragments(["second"]);

        let first = collect(generator.stream_proposal(proposal_request()).await.unwrap()).await;
        let second = collect(
            generator
                .stream_section(SectionRewriteRequest {
                    section_title: "A".into(),
                    section_body: "".into(),
                    instructions: "shorter".into(),
                })
                .await
                .unwrap(),
        )
        .await;

        assert_eq!(first, vec![Ok("first".to_string())]);
        assert_eq!(second, vec![Ok("second".to_string())]);
        assert_eq!(generator.call_count(), 2);
        assert!(matches!(generator.calls()[1], RecordedCall::Section(_)));
    }

    #[tokio::test]
    async fn failure_after_fragments_ends_with_error() {
        let generator = ScriptedProposalGenerator::new()
            .with_failure_after(["# A\n"], GenerationError::network("reset"));

        let items = collect(generator.stream_proposal(proposal_request()).await.unwrap()).await;

        assert_eq!(
            items,
            vec![Ok("# A\n".to_string()), Err(GenerationError::network("reset"))]
        );
    }

    #[tokio::test]
    async fn refusal_fails_to_open() {
        let generator = ScriptedProposalGenerator::new()
            .with_refusal(GenerationError::Rejected("policy".into()));

        let result = generator.stream_proposal(proposal_request()).await;
        assert!(matches!(result, Err(GenerationError::Rejected(_))));
    }

    #[tokio::test]
    async fn exhausted_queue_is_unavailable() {
        let generator = ScriptedProposalGenerator::new();

        let result = generator.stream_proposal(proposal_request()).await;
        assert!(matches!(result, Err(GenerationError::Unavailable(_))));
    }

    #[tokio::test]
    async fn delayed_stream_still_yields_everything() {
        let generator = ScriptedProposalGenerator::new()
            .with_fragments(["a", "b"])
            .with_delay(Duration::from_millis(1));

        let items = collect(generator.stream_proposal(proposal_request()).await.unwrap()).await;
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn chunks_respect_char_boundaries() {
        assert_eq!(split_into_chunks("héllo", 2), vec!["hé", "ll", "o"]);
        assert_eq!(split_into_chunks("", 3), Vec::<String>::new());
        assert_eq!(split_into_chunks("abc", 0), vec!["a", "b", "c"]);
    }
}
