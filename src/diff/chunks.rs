use serde::{Deserialize, Serialize};

use super::types::{ChunkType, ComparisonMode, DiffChunk, DiffOperation};
use crate::error::Side;

/// Whether an adjacent removed/added pair is reported as one `Modified` chunk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChunkPairing {
    /// Removed and added runs stay separate; `Modified` is never produced
    #[default]
    Preserve,
    /// A removed run directly followed by an added run becomes `Modified`
    PairReplacements,
}

/// Merge consecutive operations of the same kind into chunks.
///
/// Equal maps to `Unchanged`, Delete to `Removed`, Insert to `Added`. Tokens
/// inside a chunk are joined with the separator of `mode`.
pub fn aggregate_chunks(
    operations: &[DiffOperation],
    mode: ComparisonMode,
    pairing: ChunkPairing,
) -> Vec<DiffChunk> {
    let joiner = mode.joiner();
    let mut chunks: Vec<DiffChunk> = Vec::new();
    let mut current: Option<DiffChunk> = None;

    for (index, op) in operations.iter().enumerate() {
        let kind = op.chunk_type();

        match current.as_mut() {
            Some(chunk) if chunk.kind == kind => {
                chunk.content.push_str(joiner);
                chunk.content.push_str(op.token());
                if let Some(i) = op.original_index() {
                    chunk.original_end = Some(i + 1);
                }
                if let Some(j) = op.modified_index() {
                    chunk.modified_end = Some(j + 1);
                }
            }
            _ => {
                if let Some(done) = current.take() {
                    chunks.push(done);
                }
                current = Some(DiffChunk {
                    kind,
                    content: op.token().to_string(),
                    original_content: None,
                    original_start: op.original_index(),
                    original_end: op.original_index().map(|i| i + 1),
                    modified_start: op.modified_index(),
                    modified_end: op.modified_index().map(|j| j + 1),
                    line_number: index + 1,
                });
            }
        }
    }

    if let Some(done) = current {
        chunks.push(done);
    }

    match pairing {
        ChunkPairing::Preserve => chunks,
        ChunkPairing::PairReplacements => pair_replacements(chunks),
    }
}

fn pair_replacements(chunks: Vec<DiffChunk>) -> Vec<DiffChunk> {
    let mut paired = Vec::with_capacity(chunks.len());
    let mut iter = chunks.into_iter().peekable();

    while let Some(chunk) = iter.next() {
        let next_is_added = iter
            .peek()
            .is_some_and(|next| next.kind == ChunkType::Added);

        if chunk.kind != ChunkType::Removed || !next_is_added {
            paired.push(chunk);
            continue;
        }

        if let Some(added) = iter.next() {
            paired.push(DiffChunk {
                kind: ChunkType::Modified,
                content: added.content,
                original_content: Some(chunk.content),
                original_start: chunk.original_start,
                original_end: chunk.original_end,
                modified_start: added.modified_start,
                modified_end: added.modified_end,
                line_number: chunk.line_number,
            });
        }
    }

    paired
}

/// Rebuild one side's text from the chunks, using the mode's separator.
///
/// Tokenizing the returned text in the same mode gives back that side's
/// token sequence.
pub fn side_text(chunks: &[DiffChunk], mode: ComparisonMode, side: Side) -> String {
    chunks
        .iter()
        .filter_map(|chunk| match side {
            Side::Original => chunk.original_text(),
            Side::Modified => chunk.modified_text(),
        })
        .collect::<Vec<_>>()
        .join(mode.joiner())
}
