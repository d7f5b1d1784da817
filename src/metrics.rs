use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters describing pipeline activity.
#[derive(Default)]
pub struct PipelineMetrics {
    generation_calls: AtomicU64,
    chunks_summarized: AtomicU64,
    chunk_failures: AtomicU64,
}

impl PipelineMetrics {
    /// Create an empty metrics accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one generation call issued against the provider.
    pub fn record_generation_call(&self) {
        self.generation_calls.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a chunk that was summarized successfully.
    pub fn record_chunk_summarized(&self) {
        self.chunks_summarized.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a chunk whose generation call failed and was replaced with a placeholder.
    pub fn record_chunk_failure(&self) {
        self.chunk_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Return a snapshot of the current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            generation_calls: self.generation_calls.load(Ordering::Relaxed),
            chunks_summarized: self.chunks_summarized.load(Ordering::Relaxed),
            chunk_failures: self.chunk_failures.load(Ordering::Relaxed),
        }
    }
}

/// Immutable view of pipeline counters used for reporting.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct MetricsSnapshot {
    /// Total generation calls issued since startup.
    pub generation_calls: u64,
    /// Chunks summarized successfully across all reductions.
    pub chunks_summarized: u64,
    /// Chunk-level failures recovered with placeholders.
    pub chunk_failures: u64,
}
