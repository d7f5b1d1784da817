//! Hierarchical chunk-and-summarize pipeline: bounded partitioning, per-chunk fan-out,
//! recursive fan-in, and final report composition.

pub mod chunker;
pub mod composer;
pub mod prompt;
pub mod reducer;
pub mod types;

pub use composer::{analyze_feedback_tracks, compose_feedback_report, compose_material_report};
pub use reducer::{evaluate_material, summarize_feedback};
pub use types::{ChunkOutcome, ReportError, SessionContext};
