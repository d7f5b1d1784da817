#![deny(missing_docs)]

//! Core library for the Session Lens training-session analyzer.

/// Session analysis orchestration across inputs and feedback tracks.
pub mod analysis;
/// Environment-driven configuration management.
pub mod config;
/// Extraction collaborators for files, web pages, and Google Workspace links.
pub mod extract;
/// Chat-completion generation clients.
pub mod generation;
/// Structured logging and tracing setup.
pub mod logging;
/// Pipeline call counters.
pub mod metrics;
/// Hierarchical chunk-and-summarize pipeline.
pub mod pipeline;
