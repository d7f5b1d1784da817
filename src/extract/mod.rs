//! Extraction collaborators supplying plain text and image text to the pipeline.
//!
//! Each extractor is a thin, single-purpose wrapper around one library or HTTP call; there
//! is no retry logic or internal state machine here. The pipeline consumes only the `text`
//! and recognized-text fields of what these return.

pub mod file;
pub mod google;
pub mod input;
pub mod types;
pub mod web;

pub use input::InputKind;
pub use types::{ExtractedContent, ExtractedImage, ExtractionError};
pub use web::WebExtractor;
