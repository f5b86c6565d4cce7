use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use super::chunks::aggregate_chunks;
use super::lcs::compute_lcs;
use super::operations::generate_operations;
use super::preprocess::preprocess;
use super::statistics::calculate_statistics;
use super::tokenizer::tokenize;
use super::types::{ComparisonOptions, DiffChunk, DiffStatistics, TextComparisonResult};
use crate::config::EngineConfig;
use crate::error::{EngineError, Result, Side};

/// Runs comparisons under one engine configuration.
///
/// Holds no state between calls; each [`TextComparer::compare`] is a full,
/// independent computation.
#[derive(Debug, Clone, Default)]
pub struct TextComparer {
    config: EngineConfig,
}

impl TextComparer {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compare two texts. Never panics and never returns an error: failures
    /// come back as `success == false` with a message.
    pub fn compare(
        &self,
        original_text: &str,
        modified_text: &str,
        options: &ComparisonOptions,
    ) -> TextComparisonResult {
        let start = Instant::now();
        let outcome = catch_fault(|| self.run(original_text, modified_text, options));
        assemble_result(original_text, modified_text, options, outcome, start.elapsed())
    }

    /// Check both inputs against the configured ceiling
    pub fn check_length(&self, original_text: &str, modified_text: &str) -> Result<()> {
        let limit = self.config.max_text_length;
        for (side, text) in [(Side::Original, original_text), (Side::Modified, modified_text)] {
            // Cheap byte check first; a char count never exceeds the byte length.
            if text.len() <= limit {
                continue;
            }
            let length = text.chars().count();
            if length > limit {
                return Err(EngineError::InputTooLarge { side, length, limit });
            }
        }
        Ok(())
    }

    fn run(
        &self,
        original_text: &str,
        modified_text: &str,
        options: &ComparisonOptions,
    ) -> Result<(Vec<DiffChunk>, DiffStatistics)> {
        self.check_length(original_text, modified_text)?;

        let normalize =
            |text: &str| preprocess(text, options.case_sensitive, options.ignore_whitespace);
        let normalized_original = normalize(original_text);
        let normalized_modified = normalize(modified_text);

        let original_tokens = tokenize(&normalized_original, options.mode);
        let modified_tokens = tokenize(&normalized_modified, options.mode);

        let lcs = compute_lcs(&original_tokens, &modified_tokens)?;
        tracing::debug!(
            mode = %options.mode,
            original_tokens = original_tokens.len(),
            modified_tokens = modified_tokens.len(),
            lcs_length = lcs.length,
            "aligned token sequences"
        );

        let operations = generate_operations(&original_tokens, &modified_tokens, &lcs.sequence)?;
        let chunks = aggregate_chunks(&operations, options.mode, self.config.chunk_pairing);
        let statistics =
            calculate_statistics(&chunks, original_text, modified_text, options.mode);

        tracing::debug!(
            chunks = chunks.len(),
            similarity = statistics.similarity_percentage,
            "comparison complete"
        );

        Ok((chunks, statistics))
    }
}

/// Run one pipeline stage, turning a panic into [`EngineError::Internal`]
fn catch_fault<T>(stage: impl FnOnce() -> Result<T>) -> Result<T> {
    panic::catch_unwind(AssertUnwindSafe(stage))
        .unwrap_or_else(|payload| Err(EngineError::internal(panic_message(&*payload))))
}

/// Build the caller-facing result; any error yields no chunks and zeroed statistics
fn assemble_result(
    original_text: &str,
    modified_text: &str,
    options: &ComparisonOptions,
    outcome: Result<(Vec<DiffChunk>, DiffStatistics)>,
    elapsed: Duration,
) -> TextComparisonResult {
    let (chunks, statistics, error) = match outcome {
        Ok((chunks, statistics)) => (chunks, statistics, None),
        Err(err) => {
            match &err {
                EngineError::InputTooLarge { side, length, limit } => {
                    tracing::warn!(%side, length, limit, "comparison rejected: input too large");
                }
                EngineError::Internal(message) => {
                    tracing::error!(%message, "comparison failed");
                }
            }
            (Vec::new(), DiffStatistics::default(), Some(err.to_string()))
        }
    };

    TextComparisonResult {
        original_text: original_text.to_string(),
        modified_text: modified_text.to_string(),
        chunks,
        statistics,
        processing_time_ms: elapsed.as_secs_f64() * 1000.0,
        options: options.clone(),
        success: error.is_none(),
        error,
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Unknown error occurred".to_string()
    }
}

/// Compare two texts with the default engine configuration
pub fn compare(
    original_text: &str,
    modified_text: &str,
    options: &ComparisonOptions,
) -> TextComparisonResult {
    TextComparer::default().compare(original_text, modified_text, options)
}
