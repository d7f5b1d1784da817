//! Terminal report composition.
//!
//! Per-chunk failures degrade gracefully upstream; composition is the one stage allowed to
//! fail the run, because no meaningful partial report exists without it.

use crate::generation::GenerationClient;
use crate::metrics::PipelineMetrics;
use crate::pipeline::prompt::{FeedbackReportPrompt, MaterialCombinePrompt};
use crate::pipeline::reducer::summarize_feedback;
use crate::pipeline::types::{ChunkOutcome, ReportError, SessionContext};

/// Role labels for the two feedback tracks.
pub const PARTICIPANT_ROLE: &str = "participant";
/// Facilitator-side role label, covering trainers and moderators.
pub const FACILITATOR_ROLE: &str = "facilitator and moderator";

/// Compose the final feedback report from two independently produced track summaries.
pub async fn compose_feedback_report(
    client: &dyn GenerationClient,
    metrics: &PipelineMetrics,
    participant_summary: &str,
    facilitator_summary: &str,
) -> Result<String, ReportError> {
    let request = FeedbackReportPrompt {
        participant_summary,
        facilitator_summary,
    }
    .render();
    metrics.record_generation_call();
    let report = client.generate(request).await?;
    Ok(report)
}

/// Compose the final material-quality report from per-part evaluations.
///
/// Evaluation passages are concatenated verbatim into the combine prompt; failed parts keep
/// their placeholder text so gaps stay visible in the report.
pub async fn compose_material_report(
    client: &dyn GenerationClient,
    metrics: &PipelineMetrics,
    session: &SessionContext,
    part_evaluations: Vec<ChunkOutcome>,
) -> Result<String, ReportError> {
    let passages: Vec<String> = part_evaluations
        .into_iter()
        .enumerate()
        .map(|(index, outcome)| match outcome {
            ChunkOutcome::Summarized(evaluation) => {
                format!("Feedback for part {}:\n{evaluation}", index + 1)
            }
            failed => failed.into_text(),
        })
        .collect();

    let request = MaterialCombinePrompt {
        session,
        part_feedback: &passages,
    }
    .render();
    metrics.record_generation_call();
    let report = client.generate(request).await?;
    Ok(report)
}

/// Analyze the two feedback tracks end to end: hierarchical summarization per track, then
/// one combined report.
///
/// Both tracks empty is a well-specified no-op: a sentinel report is returned without any
/// generation call.
pub async fn analyze_feedback_tracks(
    client: &dyn GenerationClient,
    metrics: &PipelineMetrics,
    participant_items: &[String],
    facilitator_items: &[String],
    chunk_size: usize,
    concurrency: usize,
) -> Result<String, ReportError> {
    if participant_items.is_empty() && facilitator_items.is_empty() {
        tracing::warn!("Both feedback tracks are empty; nothing to analyze");
        return Ok("No feedback was provided for either track.".to_string());
    }

    let participant_summary = summarize_feedback(
        client,
        metrics,
        PARTICIPANT_ROLE,
        participant_items,
        chunk_size,
        concurrency,
    )
    .await;
    let facilitator_summary = summarize_feedback(
        client,
        metrics,
        FACILITATOR_ROLE,
        facilitator_items,
        chunk_size,
        concurrency,
    )
    .await;

    compose_feedback_report(client, metrics, &participant_summary, &facilitator_summary).await
}
