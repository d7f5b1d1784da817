//! Leaf summarization fan-out and hierarchical reduction.
//!
//! Every chunk is summarized independently with bounded concurrency; results come back in
//! input order. A failed chunk contributes a placeholder to its slot instead of aborting the
//! batch, and the reduction step runs only once every sibling has resolved. Reduction
//! repeats until exactly one summary remains, which collapses to a single combine call
//! whenever the chunk-level summaries fit in one chunk.

use crate::generation::{GenerationClient, GenerationRequest};
use crate::metrics::PipelineMetrics;
use crate::pipeline::chunker::{chunk_units, chunk_words};
use crate::pipeline::prompt::{FeedbackChunkPrompt, FeedbackCombinePrompt, MaterialChunkPrompt};
use crate::pipeline::types::{ChunkOutcome, SessionContext};
use futures_util::stream::{self, StreamExt};

/// Hierarchically summarize a feedback list for one role.
///
/// Issues one leaf call per chunk, then combine calls over the chunk summaries until a
/// single summary remains. An empty list returns a sentinel without any generation call;
/// a single chunk returns its leaf summary directly with no combine call.
pub async fn summarize_feedback(
    client: &dyn GenerationClient,
    metrics: &PipelineMetrics,
    role_name: &str,
    items: &[String],
    chunk_size: usize,
    concurrency: usize,
) -> String {
    if items.is_empty() {
        tracing::warn!(role = role_name, "No feedback provided; skipping summarization");
        return format!("No {role_name} feedback was provided.");
    }

    let mut level: Vec<String> = items.to_vec();
    let mut combining = false;

    loop {
        // Leaf passes honor the caller's chunk size; reduction passes must group at
        // least two summaries per chunk or a size of one would never converge.
        let effective_size = if combining { chunk_size.max(2) } else { chunk_size };
        let chunks = chunk_units(&level, effective_size);
        tracing::debug!(
            role = role_name,
            chunks = chunks.len(),
            combining,
            "Reducing feedback level"
        );

        let requests: Vec<GenerationRequest> = chunks
            .iter()
            .map(|chunk| {
                if combining {
                    FeedbackCombinePrompt {
                        role_name,
                        summaries: chunk,
                    }
                    .render()
                } else {
                    FeedbackChunkPrompt {
                        role_name,
                        items: chunk,
                    }
                    .render()
                }
            })
            .collect();

        let outcomes = run_chunk_calls(client, metrics, requests, concurrency).await;
        let mut summaries: Vec<String> =
            outcomes.into_iter().map(ChunkOutcome::into_text).collect();

        if summaries.len() == 1 {
            return summaries.pop().expect("single summary present");
        }
        level = summaries;
        combining = true;
    }
}

/// Evaluate training material chunk-by-chunk against the session topic.
///
/// The session header and any image-recognized text are merged into the material before
/// chunking. Returns one outcome per part, in part order; the caller concatenates the
/// passages verbatim for the final composition. Empty material yields no outcomes and no
/// generation calls.
pub async fn evaluate_material(
    client: &dyn GenerationClient,
    metrics: &PipelineMetrics,
    session: &SessionContext,
    text: &str,
    ocr_texts: &[String],
    max_words: usize,
    concurrency: usize,
) -> Vec<ChunkOutcome> {
    let combined = combine_material(session, text, ocr_texts);
    let chunks = chunk_words(&combined, max_words);
    if chunks.is_empty() {
        tracing::warn!("No material text to evaluate");
        return Vec::new();
    }
    tracing::info!(parts = chunks.len(), "Evaluating training material");

    let requests: Vec<GenerationRequest> = chunks
        .iter()
        .enumerate()
        .map(|(index, chunk)| {
            MaterialChunkPrompt {
                part: index + 1,
                session,
                chunk,
            }
            .render()
        })
        .collect();

    run_chunk_calls(client, metrics, requests, concurrency).await
}

/// Merge the session header, material text, and image-recognized text into one document.
fn combine_material(session: &SessionContext, text: &str, ocr_texts: &[String]) -> String {
    let mut combined = String::new();
    if let Some(title) = session.title.as_deref() {
        combined.push_str(&format!("Session Title: {title}\n"));
    }
    if let Some(description) = session.description.as_deref() {
        combined.push_str(&format!("Description: {description}\n"));
    }
    combined.push_str(text);

    let recognized: Vec<&str> = ocr_texts
        .iter()
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .collect();
    if !recognized.is_empty() {
        combined.push_str("\n\nImage Content:\n");
        combined.push_str(&recognized.join("\n"));
    }

    combined
}

/// Issue the per-chunk generation calls with bounded, order-preserving concurrency.
///
/// This is the join point: the returned vector is complete only after every sibling chunk
/// has resolved, success or failure.
async fn run_chunk_calls(
    client: &dyn GenerationClient,
    metrics: &PipelineMetrics,
    requests: Vec<GenerationRequest>,
    concurrency: usize,
) -> Vec<ChunkOutcome> {
    stream::iter(requests.into_iter().enumerate())
        .map(|(index, request)| async move {
            metrics.record_generation_call();
            match client.generate(request).await {
                Ok(summary) => {
                    metrics.record_chunk_summarized();
                    ChunkOutcome::Summarized(summary)
                }
                Err(error) => {
                    tracing::warn!(
                        part = index + 1,
                        error = %error,
                        "Chunk generation failed; substituting placeholder"
                    );
                    metrics.record_chunk_failure();
                    ChunkOutcome::Failed {
                        index,
                        reason: error.to_string(),
                    }
                }
            }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await
}
