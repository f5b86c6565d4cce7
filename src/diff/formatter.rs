use super::types::{
    ChunkType, ComparisonMode, DiffChunk, DiffStatistics, TextComparisonResult, ViewMode,
};
use crate::error::Side;

/// Plain-text renderings of a comparison result.
///
/// Removed text is wrapped as `[-…-]`, added text as `{+…+}` and modified
/// text as `[~…~]`, so the output stays readable without colors.
pub struct DiffFormatter;

#[derive(Debug, Default)]
struct RenderedLine {
    text: String,
    changed: bool,
    /// 1-based line in the source text, known in Line mode only
    source_line: Option<usize>,
}

impl DiffFormatter {
    /// Format with the layout the result's options ask for
    pub fn format(result: &TextComparisonResult, view_mode: ViewMode, width: usize) -> String {
        match view_mode {
            ViewMode::Unified => Self::format_unified(result),
            ViewMode::SideBySide => Self::format_side_by_side(result, width),
            ViewMode::Inline => Self::format_inline(result),
        }
    }

    /// Every chunk in order, changes marked in place
    pub fn format_unified(result: &TextComparisonResult) -> String {
        render_lines(result.chunks.iter(), result.options.mode, None)
            .into_iter()
            .map(|line| line.text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Original on the left, modified on the right
    pub fn format_side_by_side(result: &TextComparisonResult, width: usize) -> String {
        let mode = result.options.mode;
        let half_width = width.saturating_sub(3) / 2; // Account for separator " | "

        let left = render_lines(
            result.chunks.iter().filter(|c| c.kind.touches_original()),
            mode,
            Some(Side::Original),
        );
        let right = render_lines(
            result.chunks.iter().filter(|c| c.kind.touches_modified()),
            mode,
            Some(Side::Modified),
        );

        let mut output = Vec::with_capacity(left.len().max(right.len()) + 2);
        output.push(format!("{:<half_width$} | {}", "Original", "Modified"));
        output.push("-".repeat(width));

        for row in 0..left.len().max(right.len()) {
            let l = left.get(row).map(|line| line.text.as_str()).unwrap_or("");
            let r = right.get(row).map(|line| line.text.as_str()).unwrap_or("");
            output.push(format!(
                "{:<half_width$} | {}",
                Self::truncate_line(l, half_width),
                Self::truncate_line(r, half_width)
            ));
        }

        output.join("\n")
    }

    /// Unified markup with optional line numbers; unchanged lines further than
    /// `context_lines` from any change are folded into `...`.
    ///
    /// In Line mode the gutter shows where a line sits in its own text: the
    /// original for unchanged and removed lines, the modified text for added
    /// ones. Other modes number the rendered rows.
    pub fn format_inline(result: &TextComparisonResult) -> String {
        let options = &result.options;
        let lines = render_lines(result.chunks.iter(), options.mode, None);

        let changed: Vec<usize> = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.changed)
            .map(|(idx, _)| idx)
            .collect();

        let visible = |idx: usize| {
            changed.is_empty()
                || changed
                    .iter()
                    .any(|&c| idx.abs_diff(c) <= options.context_lines)
        };

        let mut output = Vec::new();
        let mut folded = false;
        for (idx, line) in lines.iter().enumerate() {
            if !visible(idx) {
                if !folded {
                    output.push("...".to_string());
                    folded = true;
                }
                continue;
            }
            folded = false;

            if options.show_line_numbers {
                let number = line.source_line.unwrap_or(idx + 1);
                output.push(format!("{:>4}  {}", number, line.text));
            } else {
                output.push(line.text.clone());
            }
        }

        output.join("\n")
    }

    /// One-line summary of the statistics
    pub fn format_stats(stats: &DiffStatistics) -> String {
        if stats.is_identical() {
            return format!("Identical ({}% similar)", stats.similarity_percentage);
        }

        let mut parts = vec![format!("{}% similar", stats.similarity_percentage)];

        if stats.added_words > 0 || stats.added_chars > 0 {
            parts.push(format!(
                "{} word{} added",
                stats.added_words,
                if stats.added_words == 1 { "" } else { "s" }
            ));
        }

        if stats.removed_words > 0 || stats.removed_chars > 0 {
            parts.push(format!(
                "{} word{} removed",
                stats.removed_words,
                if stats.removed_words == 1 { "" } else { "s" }
            ));
        }

        if stats.modified_words > 0 || stats.modified_chars > 0 {
            parts.push(format!(
                "{} word{} modified",
                stats.modified_words,
                if stats.modified_words == 1 { "" } else { "s" }
            ));
        }

        parts.join(", ")
    }

    fn truncate_line(line: &str, max_width: usize) -> String {
        if line.chars().count() > max_width {
            if max_width > 3 {
                let kept: String = line.chars().take(max_width - 3).collect();
                format!("{kept}...")
            } else {
                line.chars().take(max_width).collect()
            }
        } else {
            line.to_string()
        }
    }
}

fn markup(chunk: &DiffChunk, side: Option<Side>) -> String {
    match chunk.kind {
        ChunkType::Unchanged => chunk.content.clone(),
        ChunkType::Removed => format!("[-{}-]", chunk.content),
        ChunkType::Added => format!("{{+{}+}}", chunk.content),
        ChunkType::Modified => {
            let original = chunk.original_content.as_deref().unwrap_or("");
            match side {
                Some(Side::Original) => format!("[~{original}~]"),
                Some(Side::Modified) => format!("[~{}~]", chunk.content),
                None => format!("[-{original}-]{{+{}+}}", chunk.content),
            }
        }
    }
}

/// Token index the chunk starts at in the text a view shows it from
fn first_token(chunk: &DiffChunk, side: Option<Side>) -> Option<usize> {
    match side {
        Some(Side::Original) => chunk.original_start,
        Some(Side::Modified) => chunk.modified_start,
        None if chunk.kind == ChunkType::Added => chunk.modified_start,
        None => chunk.original_start,
    }
}

/// Markup pieces of one chunk, each with the token index it starts at.
///
/// In Line mode a modified chunk shown from both sides is split so its old
/// and new lines keep their own numbering.
fn pieces(
    chunk: &DiffChunk,
    mode: ComparisonMode,
    side: Option<Side>,
) -> Vec<(String, Option<usize>)> {
    if mode == ComparisonMode::Line && side.is_none() && chunk.kind == ChunkType::Modified {
        let original = chunk.original_content.as_deref().unwrap_or("");
        return vec![
            (format!("[-{original}-]"), chunk.original_start),
            (format!("{{+{}+}}", chunk.content), chunk.modified_start),
        ];
    }
    vec![(markup(chunk, side), first_token(chunk, side))]
}

/// Lay chunks out as lines, remembering which lines carry a change
fn render_lines<'a>(
    chunks: impl Iterator<Item = &'a DiffChunk>,
    mode: ComparisonMode,
    side: Option<Side>,
) -> Vec<RenderedLine> {
    let mut lines: Vec<RenderedLine> = Vec::new();
    let line_mode = mode == ComparisonMode::Line;

    for chunk in chunks {
        for (text, start) in pieces(chunk, mode, side) {
            if lines.is_empty() || line_mode {
                lines.push(RenderedLine::default());
            } else if let Some(last) = lines.last_mut() {
                last.text.push_str(mode.joiner());
            }

            for (n, piece) in text.split('\n').enumerate() {
                if n > 0 {
                    lines.push(RenderedLine::default());
                }
                if let Some(last) = lines.last_mut() {
                    last.text.push_str(piece);
                    last.changed |= chunk.is_change();
                    if line_mode {
                        last.source_line = start.map(|token| token + n + 1);
                    }
                }
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::diff::chunks::ChunkPairing;
    use crate::diff::compare::{compare, TextComparer};
    use crate::diff::types::ComparisonOptions;

    fn word_result(original: &str, modified: &str) -> TextComparisonResult {
        compare(original, modified, &ComparisonOptions::default())
    }

    #[test]
    fn test_format_unified_words() {
        let result = word_result("the cat sat", "the dog sat");
        assert_eq!(DiffFormatter::format_unified(&result), "the [-cat-] {+dog+} sat");
    }

    #[test]
    fn test_format_unified_lines() {
        let options = ComparisonOptions::default().with_mode(ComparisonMode::Line);
        let result = compare("a\nb\nc", "a\nx\nc", &options);
        assert_eq!(DiffFormatter::format_unified(&result), "a\n[-b-]\n{+x+}\nc");
    }

    #[test]
    fn test_format_side_by_side() {
        let result = word_result("the cat sat", "the dog sat");
        let formatted = DiffFormatter::format_side_by_side(&result, 43);
        let rows: Vec<&str> = formatted.lines().collect();

        assert_eq!(rows.len(), 3);
        assert!(rows[0].starts_with("Original"));
        assert!(rows[0].contains("| Modified"));
        assert_eq!(rows[2], format!("{:<20} | {}", "the [-cat-] sat", "the {+dog+} sat"));
    }

    #[test]
    fn test_format_inline_folds_far_context() {
        let options = ComparisonOptions {
            mode: ComparisonMode::Line,
            context_lines: 1,
            ..Default::default()
        };
        let original = "1\n2\n3\n4\n5\n6\n7";
        let modified = "1\n2\n3\n4\n5\n6\nseven";
        let result = compare(original, modified, &options);
        let formatted = DiffFormatter::format_inline(&result);
        let rows: Vec<&str> = formatted.lines().collect();

        assert_eq!(rows[0], "...");
        assert_eq!(rows[1], "   6  6");
        assert_eq!(rows[2], "   7  [-7-]");
        assert_eq!(rows[3], "   7  {+seven+}");
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn test_format_inline_numbers_each_side() {
        let options = ComparisonOptions::default().with_mode(ComparisonMode::Line);
        let result = compare("a\nold\nb\nc", "a\nb\nnew\nc", &options);
        let formatted = DiffFormatter::format_inline(&result);

        assert_eq!(
            formatted.lines().collect::<Vec<_>>(),
            vec!["   1  a", "   2  [-old-]", "   3  b", "   3  {+new+}", "   4  c"]
        );
    }

    #[test]
    fn test_format_inline_numbers_paired_lines() {
        let comparer = TextComparer::new(
            EngineConfig::default().with_chunk_pairing(ChunkPairing::PairReplacements),
        );
        let options = ComparisonOptions::default().with_mode(ComparisonMode::Line);
        let result = comparer.compare("a\nb\nc", "a\nx\ny\nc", &options);
        let formatted = DiffFormatter::format_inline(&result);

        assert_eq!(
            formatted.lines().collect::<Vec<_>>(),
            vec!["   1  a", "   2  [-b-]", "   2  {+x", "   3  y+}", "   3  c"]
        );
    }

    #[test]
    fn test_format_inline_identical_shows_everything() {
        let options = ComparisonOptions {
            mode: ComparisonMode::Line,
            show_line_numbers: false,
            ..Default::default()
        };
        let result = compare("a\nb", "a\nb", &options);
        assert_eq!(DiffFormatter::format_inline(&result), "a\nb");
    }

    #[test]
    fn test_format_stats() {
        let result = word_result("the cat sat", "the dog sat");
        let stats = DiffFormatter::format_stats(&result.statistics);

        assert!(stats.contains("1 word added"));
        assert!(stats.contains("1 word removed"));

        let same = word_result("same", "same");
        assert_eq!(DiffFormatter::format_stats(&same.statistics), "Identical (100% similar)");

        // A trailing blank line is a change even though it has no characters
        let options = ComparisonOptions::default().with_mode(ComparisonMode::Line);
        let blank = compare("a", "a\n", &options);
        assert_eq!(DiffFormatter::format_stats(&blank.statistics), "50% similar");
    }

    #[test]
    fn test_truncate_line_is_char_safe() {
        assert_eq!(DiffFormatter::truncate_line("ééééééé", 5), "éé...");
        assert_eq!(DiffFormatter::truncate_line("abc", 5), "abc");
        assert_eq!(DiffFormatter::truncate_line("abcdef", 2), "ab");
    }
}
