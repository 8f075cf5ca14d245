//! Generator adapters - implementations of the ProposalGenerator port.

mod scripted;

pub use scripted::{split_into_chunks, RecordedCall, Script, ScriptedProposalGenerator};
