use super::types::{ChunkType, ComparisonMode, DiffChunk, DiffStatistics};

/// Per-chunk tallies plus the similarity score.
///
/// Character counts cover token text only; the separators `mode` joins tokens
/// with are not counted. Similarity is the share of unchanged characters
/// relative to the longer of the two raw inputs, rounded and clamped to
/// `0..=100`. A comparison without any changed chunk (including two empty
/// inputs) scores 100.
pub fn calculate_statistics(
    chunks: &[DiffChunk],
    original_text: &str,
    modified_text: &str,
    mode: ComparisonMode,
) -> DiffStatistics {
    let mut stats = DiffStatistics {
        total_lines: line_count(original_text).max(line_count(modified_text)),
        ..Default::default()
    };

    for chunk in chunks {
        let lines = line_count(&chunk.content);
        let words = chunk.content.split_whitespace().count();
        let chars = token_chars(&chunk.content, mode);

        let (line_slot, word_slot, char_slot) = match chunk.kind {
            ChunkType::Added => (
                &mut stats.added_lines,
                &mut stats.added_words,
                &mut stats.added_chars,
            ),
            ChunkType::Removed => (
                &mut stats.removed_lines,
                &mut stats.removed_words,
                &mut stats.removed_chars,
            ),
            ChunkType::Modified => (
                &mut stats.modified_lines,
                &mut stats.modified_words,
                &mut stats.modified_chars,
            ),
            ChunkType::Unchanged => (
                &mut stats.unchanged_lines,
                &mut stats.unchanged_words,
                &mut stats.unchanged_chars,
            ),
        };
        *line_slot += lines;
        *word_slot += words;
        *char_slot += chars;
    }

    stats.similarity_percentage =
        similarity(chunks, stats.unchanged_chars, original_text, modified_text);
    stats
}

/// Characters of a chunk's tokens, leaving out the separators between them
fn token_chars(content: &str, mode: ComparisonMode) -> usize {
    match mode {
        ComparisonMode::Character => content.chars().count(),
        ComparisonMode::Word => content.chars().filter(|c| !c.is_whitespace()).count(),
        ComparisonMode::Line => content.chars().filter(|&c| c != '\n').count(),
    }
}

fn similarity(
    chunks: &[DiffChunk],
    unchanged_chars: usize,
    original_text: &str,
    modified_text: &str,
) -> u8 {
    let total_chars = original_text.chars().count().max(modified_text.chars().count());
    if total_chars == 0 || chunks.iter().all(|chunk| !chunk.is_change()) {
        return 100;
    }

    let ratio = unchanged_chars as f64 / total_chars as f64;
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Number of `\n`-separated segments; an empty string counts as one line
fn line_count(text: &str) -> usize {
    text.split('\n').count()
}
