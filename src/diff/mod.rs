//! Text comparison engine
//!
//! The pipeline runs leaves first: [`preprocess`] normalizes each text,
//! [`tokenize`] splits it at the requested granularity, [`compute_lcs`]
//! aligns the two token sequences, [`generate_operations`] turns the
//! alignment into an edit script, [`aggregate_chunks`] merges the script into
//! renderable chunks and [`calculate_statistics`] scores the result.
//! [`TextComparer`] drives the whole pipeline and never fails loudly.

pub mod chunks;
pub mod compare;
pub mod formatter;
pub mod lcs;
pub mod operations;
pub mod preprocess;
pub mod statistics;
pub mod tokenizer;
pub mod types;

// Re-export the main types for easier use
pub use chunks::{aggregate_chunks, side_text, ChunkPairing};
pub use compare::{compare, TextComparer};
pub use formatter::DiffFormatter;
pub use lcs::{compute_lcs, compute_lcs_with_table, LcsResult, LcsTable};
pub use operations::generate_operations;
pub use preprocess::preprocess;
pub use statistics::calculate_statistics;
pub use tokenizer::tokenize;
pub use types::{
    ChunkType, ComparisonMode, ComparisonOptions, DiffChunk, DiffOperation, DiffStatistics,
    TextComparisonResult, ViewMode,
};

/// Convenience function to render a comparison in the view mode its options name
pub fn render(original: &str, modified: &str, options: &ComparisonOptions, width: usize) -> String {
    let result = compare(original, modified, options);
    DiffFormatter::format(&result, options.view_mode, width)
}

/// Convenience function to get comparison statistics
pub fn get_statistics(
    original: &str,
    modified: &str,
    options: &ComparisonOptions,
) -> DiffStatistics {
    compare(original, modified, options).statistics
}
