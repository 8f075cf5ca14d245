//! Domain layer containing the document model and its state transitions.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `document` - Sections, the section parser and single-section patches
//! - `history` - Append-only whole-document snapshots
//! - `navigation` - Active section and scroll target policies
//! - `workspace` - The proposal aggregate that owns all of the above

pub mod document;
pub mod foundation;
pub mod history;
pub mod navigation;
pub mod workspace;
