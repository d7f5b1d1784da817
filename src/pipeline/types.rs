//! Core data types and error definitions for the analysis pipeline.

use crate::generation::GenerationClientError;
use thiserror::Error;

/// Immutable session metadata threaded through prompts; never mutated by the pipeline.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    /// Session title, when known.
    pub title: Option<String>,
    /// Free-form session description, when known.
    pub description: Option<String>,
}

impl SessionContext {
    /// Title to interpolate into prompts, with a neutral fallback.
    pub fn topic(&self) -> &str {
        self.title.as_deref().unwrap_or("(untitled session)")
    }
}

/// Result of one chunk's generation call.
///
/// A failed chunk keeps its ordinal slot in the downstream sequence; the failure is rendered
/// as placeholder text rather than aborting the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkOutcome {
    /// The chunk was summarized successfully.
    Summarized(String),
    /// The chunk's generation call failed.
    Failed {
        /// Zero-based position of the chunk within its level.
        index: usize,
        /// Human-readable failure description.
        reason: String,
    },
}

impl ChunkOutcome {
    /// Render the outcome as the text occupying this chunk's slot.
    pub fn into_text(self) -> String {
        match self {
            Self::Summarized(summary) => summary,
            Self::Failed { index, reason } => {
                format!("[part {}: summary unavailable ({reason})]", index + 1)
            }
        }
    }

    /// Whether the chunk resolved successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Summarized(_))
    }
}

/// Fatal errors surfaced by report composition.
///
/// Per-chunk failures degrade gracefully; only the terminal composition call may fail the run.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The final composition call failed; no meaningful partial report exists.
    #[error("Final report composition failed: {0}")]
    FinalComposition(#[from] GenerationClientError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_outcome_renders_one_based_placeholder() {
        let outcome = ChunkOutcome::Failed {
            index: 2,
            reason: "timeout".into(),
        };
        assert_eq!(
            outcome.into_text(),
            "[part 3: summary unavailable (timeout)]"
        );
    }

    #[test]
    fn topic_falls_back_when_untitled() {
        assert_eq!(SessionContext::default().topic(), "(untitled session)");
    }
}
