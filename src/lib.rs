//! Proposal Outline - streamed proposal documents, one section at a time
//!
//! This crate turns a stream of markdown fragments into a live list of
//! sections, rewrites a single section without disturbing its siblings, and
//! keeps restorable snapshots of the whole document.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
