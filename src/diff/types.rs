use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Tokenization granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum ComparisonMode {
    #[serde(rename = "char")]
    #[value(name = "char", alias = "character")]
    Character,
    #[serde(rename = "word")]
    Word,
    #[serde(rename = "line")]
    Line,
}

impl ComparisonMode {
    /// Separator placed between tokens of the same chunk
    pub fn joiner(&self) -> &'static str {
        match self {
            Self::Character => "",
            Self::Word => " ",
            Self::Line => "\n",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Character => "char",
            Self::Word => "word",
            Self::Line => "line",
        }
    }
}

impl std::fmt::Display for ComparisonMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How the renderer lays the chunks out. The engine never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    SideBySide,
    Unified,
    Inline,
}

/// Configuration for a single comparison call.
///
/// Every field is required. The engine applies no fallback of its own; the
/// [`Default`] impl exists for callers that want the usual settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonOptions {
    pub mode: ComparisonMode,
    pub view_mode: ViewMode,
    pub case_sensitive: bool,
    pub ignore_whitespace: bool,
    pub show_line_numbers: bool,
    pub context_lines: usize,
}

impl Default for ComparisonOptions {
    fn default() -> Self {
        Self {
            mode: ComparisonMode::Word,
            view_mode: ViewMode::SideBySide,
            case_sensitive: true,
            ignore_whitespace: false,
            show_line_numbers: true,
            context_lines: 3,
        }
    }
}

impl ComparisonOptions {
    pub fn with_mode(mut self, mode: ComparisonMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_view_mode(mut self, view_mode: ViewMode) -> Self {
        self.view_mode = view_mode;
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn ignore_whitespace(mut self, ignore_whitespace: bool) -> Self {
        self.ignore_whitespace = ignore_whitespace;
        self
    }
}

/// One step of the alignment between the two token sequences.
///
/// Indices are token positions in the respective sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "lowercase")]
pub enum DiffOperation {
    Equal {
        token: String,
        original_index: usize,
        modified_index: usize,
    },
    Delete {
        token: String,
        original_index: usize,
    },
    Insert {
        token: String,
        modified_index: usize,
    },
}

impl DiffOperation {
    pub fn token(&self) -> &str {
        match self {
            Self::Equal { token, .. } | Self::Delete { token, .. } | Self::Insert { token, .. } => {
                token
            }
        }
    }

    pub fn original_index(&self) -> Option<usize> {
        match self {
            Self::Equal { original_index, .. } | Self::Delete { original_index, .. } => {
                Some(*original_index)
            }
            Self::Insert { .. } => None,
        }
    }

    pub fn modified_index(&self) -> Option<usize> {
        match self {
            Self::Equal { modified_index, .. } | Self::Insert { modified_index, .. } => {
                Some(*modified_index)
            }
            Self::Delete { .. } => None,
        }
    }

    /// Chunk classification this operation maps onto
    pub fn chunk_type(&self) -> ChunkType {
        match self {
            Self::Equal { .. } => ChunkType::Unchanged,
            Self::Delete { .. } => ChunkType::Removed,
            Self::Insert { .. } => ChunkType::Added,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkType {
    Added,
    Removed,
    Modified,
    Unchanged,
}

impl ChunkType {
    /// Lower-case name, also used as the CSS class in exports
    pub fn name(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Modified => "modified",
            Self::Unchanged => "unchanged",
        }
    }

    /// Whether the chunk carries text of the original side
    pub fn touches_original(&self) -> bool {
        !matches!(self, Self::Added)
    }

    /// Whether the chunk carries text of the modified side
    pub fn touches_modified(&self) -> bool {
        !matches!(self, Self::Removed)
    }
}

impl std::fmt::Display for ChunkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A maximal run of same-type operations, ready for rendering.
///
/// Token ranges are half-open and `None` for a side the chunk does not cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffChunk {
    #[serde(rename = "type")]
    pub kind: ChunkType,
    pub content: String,
    /// Replaced text of a `Modified` chunk; `content` then holds the new text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_content: Option<String>,
    pub original_start: Option<usize>,
    pub original_end: Option<usize>,
    pub modified_start: Option<usize>,
    pub modified_end: Option<usize>,
    /// 1-based position of the chunk's first operation
    pub line_number: usize,
}

impl DiffChunk {
    /// Text this chunk contributes to the original side, if any
    pub fn original_text(&self) -> Option<&str> {
        match self.kind {
            ChunkType::Unchanged | ChunkType::Removed => Some(&self.content),
            ChunkType::Modified => self.original_content.as_deref(),
            ChunkType::Added => None,
        }
    }

    /// Text this chunk contributes to the modified side, if any
    pub fn modified_text(&self) -> Option<&str> {
        match self.kind {
            ChunkType::Unchanged | ChunkType::Added | ChunkType::Modified => Some(&self.content),
            ChunkType::Removed => None,
        }
    }

    pub fn is_change(&self) -> bool {
        self.kind != ChunkType::Unchanged
    }
}

/// Line, word and character counts per chunk type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffStatistics {
    pub total_lines: usize,
    pub added_lines: usize,
    pub removed_lines: usize,
    pub modified_lines: usize,
    pub unchanged_lines: usize,
    pub added_words: usize,
    pub removed_words: usize,
    pub modified_words: usize,
    pub unchanged_words: usize,
    pub added_chars: usize,
    pub removed_chars: usize,
    pub modified_chars: usize,
    pub unchanged_chars: usize,
    pub similarity_percentage: u8,
}

impl DiffStatistics {
    /// No added, removed or modified chunk was counted. Every chunk spans at
    /// least one line, so a blank added line still counts as a change.
    pub fn is_identical(&self) -> bool {
        self.added_lines == 0 && self.removed_lines == 0 && self.modified_lines == 0
    }
}

/// Everything a renderer needs from one comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextComparisonResult {
    pub original_text: String,
    pub modified_text: String,
    pub chunks: Vec<DiffChunk>,
    pub statistics: DiffStatistics,
    pub processing_time_ms: f64,
    pub options: ComparisonOptions,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_serialize_like_the_web_tool() {
        let options = ComparisonOptions::default().with_mode(ComparisonMode::Character);
        let json = serde_json::to_value(&options).unwrap();

        assert_eq!(json["mode"], "char");
        assert_eq!(json["viewMode"], "side-by-side");
        assert_eq!(json["caseSensitive"], true);
        assert_eq!(json["contextLines"], 3);
    }

    #[test]
    fn test_operation_accessors() {
        let op = DiffOperation::Delete {
            token: "cat".to_string(),
            original_index: 4,
        };
        assert_eq!(op.token(), "cat");
        assert_eq!(op.original_index(), Some(4));
        assert_eq!(op.modified_index(), None);
        assert_eq!(op.chunk_type(), ChunkType::Removed);
    }

    #[test]
    fn test_chunk_side_text() {
        let chunk = DiffChunk {
            kind: ChunkType::Modified,
            content: "dog".to_string(),
            original_content: Some("cat".to_string()),
            original_start: Some(1),
            original_end: Some(2),
            modified_start: Some(1),
            modified_end: Some(2),
            line_number: 2,
        };
        assert_eq!(chunk.original_text(), Some("cat"));
        assert_eq!(chunk.modified_text(), Some("dog"));

        let json = serde_json::to_value(&chunk).unwrap();
        assert_eq!(json["type"], "modified");
        assert_eq!(json["originalContent"], "cat");
    }

    #[test]
    fn test_is_identical_counts_changed_lines() {
        let blank_line_added = DiffStatistics {
            added_lines: 1,
            ..Default::default()
        };
        assert!(!blank_line_added.is_identical());
        assert!(DiffStatistics::default().is_identical());
    }
}
