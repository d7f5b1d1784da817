//! Analysis service coordinating extraction, the summarize pipeline, and report composition.

use crate::{
    config::get_config,
    extract::{self, InputKind, WebExtractor},
    generation::GenerationClient,
    metrics::{MetricsSnapshot, PipelineMetrics},
    pipeline::{
        analyze_feedback_tracks, compose_material_report, evaluate_material, ReportError,
        SessionContext,
    },
};
use std::sync::Arc;

/// Coordinates the full analysis run: extraction, chunked evaluation, and composition.
///
/// The service owns the injected generation client, the web extractor, and the metrics
/// registry. Construct it once near process start; the generation client is stateless with
/// respect to the pipeline, so one service instance may serve concurrent runs.
pub struct AnalysisService {
    generation: Box<dyn GenerationClient>,
    extractor: WebExtractor,
    metrics: Arc<PipelineMetrics>,
    feedback_chunk_size: usize,
    material_chunk_words: usize,
    concurrency: usize,
}

impl AnalysisService {
    /// Build the service from global configuration with an injected generation client.
    pub fn new(generation: Box<dyn GenerationClient>) -> Self {
        let config = get_config();
        Self::with_settings(
            generation,
            config.feedback_chunk_size,
            config.material_chunk_words,
            config.generation_concurrency,
        )
    }

    /// Build the service with explicit pipeline settings, bypassing global configuration.
    pub fn with_settings(
        generation: Box<dyn GenerationClient>,
        feedback_chunk_size: usize,
        material_chunk_words: usize,
        concurrency: usize,
    ) -> Self {
        Self {
            generation,
            extractor: WebExtractor::new(),
            metrics: Arc::new(PipelineMetrics::new()),
            feedback_chunk_size: feedback_chunk_size.max(1),
            material_chunk_words: material_chunk_words.max(1),
            concurrency: concurrency.max(1),
        }
    }

    /// Analyze training materials across all inputs and produce one quality report.
    ///
    /// Per-input failures degrade gracefully: an extraction failure or unsupported input
    /// contributes nothing and is logged, and the batch continues. Only the terminal
    /// composition call may fail the run.
    pub async fn analyze_session(
        &self,
        inputs: &[String],
        session: &SessionContext,
    ) -> Result<String, ReportError> {
        let mut all_text = String::new();
        let mut recognized_texts: Vec<String> = Vec::new();

        for input in inputs {
            let content = match extract::input::classify(input) {
                InputKind::GoogleWorkspace => self.extractor.extract_google(input).await,
                InputKind::Url => self.extractor.extract_url(input).await,
                InputKind::File => {
                    tracing::info!(path = %input, "Processing file");
                    extract::file::extract_from_file(input)
                }
                InputKind::Unsupported => {
                    tracing::warn!(input = %input, "Skipping unsupported input");
                    continue;
                }
            };

            match content {
                Ok(content) => {
                    tracing::info!(
                        input = %input,
                        chars = content.text.len(),
                        images = content.images.len(),
                        "Extracted input"
                    );
                    recognized_texts.extend(content.recognized_texts());
                    all_text.push_str("\n\n");
                    all_text.push_str(&content.text);
                }
                Err(error) => {
                    tracing::warn!(
                        input = %input,
                        error = %error,
                        "Extraction failed; input contributes no material"
                    );
                }
            }
        }

        if all_text.trim().is_empty() && recognized_texts.is_empty() {
            tracing::warn!("No material recovered from any input");
            return Ok("No training material could be extracted from the provided inputs.".into());
        }

        let evaluations = evaluate_material(
            self.generation.as_ref(),
            &self.metrics,
            session,
            &all_text,
            &recognized_texts,
            self.material_chunk_words,
            self.concurrency,
        )
        .await;

        compose_material_report(self.generation.as_ref(), &self.metrics, session, evaluations)
            .await
    }

    /// Analyze the participant and facilitator feedback tracks into one combined report.
    pub async fn analyze_feedback(
        &self,
        participant_items: &[String],
        facilitator_items: &[String],
    ) -> Result<String, ReportError> {
        analyze_feedback_tracks(
            self.generation.as_ref(),
            &self.metrics,
            participant_items,
            facilitator_items,
            self.feedback_chunk_size,
            self.concurrency,
        )
        .await
    }

    /// Return the current pipeline metrics snapshot.
    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
