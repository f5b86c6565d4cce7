//! Export functionality for comparison results
//!
//! Serializes an already computed [`TextComparisonResult`] as a standalone
//! HTML report, as JSON, or as the plain concatenated text that a "copy to
//! clipboard" action would produce.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::diff::{ChunkType, DiffFormatter, TextComparisonResult};

/// Output formats an exporter can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Html,
    Json,
    Text,
}

/// Export configuration
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub format: ExportFormat,
    pub include_stats: bool,
    pub include_metadata: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Html,
            include_stats: true,
            include_metadata: true,
        }
    }
}

/// Colors used for each chunk type in HTML reports
pub fn chunk_color(kind: ChunkType) -> &'static str {
    match kind {
        ChunkType::Added => "#22c55e",
        ChunkType::Removed => "#ef4444",
        ChunkType::Modified => "#f59e0b",
        ChunkType::Unchanged => "#6b7280",
    }
}

/// Handles exporting comparison results to various formats and destinations
pub struct ResultExporter {
    config: ExportConfig,
}

impl ResultExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn with_format(format: ExportFormat) -> Self {
        Self {
            config: ExportConfig {
                format,
                ..Default::default()
            },
        }
    }

    /// Create an exporter for HTML reports
    pub fn html() -> Self {
        Self::with_format(ExportFormat::Html)
    }

    /// Create an exporter for JSON output
    pub fn json() -> Self {
        Self::with_format(ExportFormat::Json)
    }

    /// Render the result in the configured format
    pub fn render(&self, result: &TextComparisonResult) -> Result<String> {
        let content = match self.config.format {
            ExportFormat::Html => self.render_html(result),
            ExportFormat::Json => serde_json::to_string_pretty(result)?,
            ExportFormat::Text => {
                let mut content = String::new();
                if self.config.include_stats {
                    content.push_str(&format!(
                        "Changes: {}\n\n",
                        DiffFormatter::format_stats(&result.statistics)
                    ));
                }
                content.push_str(&plain_text(result));
                content
            }
        };
        Ok(content)
    }

    /// Export a single result to a file
    pub fn export<P: AsRef<Path>>(
        &self,
        result: &TextComparisonResult,
        output_path: P,
    ) -> Result<()> {
        fs::write(output_path.as_ref(), self.render(result)?)?;
        Ok(())
    }

    /// Export to a writer (for streaming or custom outputs)
    pub fn export_to_writer<W: Write>(
        &self,
        result: &TextComparisonResult,
        writer: &mut W,
    ) -> Result<()> {
        write!(writer, "{}", self.render(result)?)?;
        Ok(())
    }

    fn render_html(&self, result: &TextComparisonResult) -> String {
        let stats = &result.statistics;
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        html.push_str("    <title>Text Comparison Result</title>\n    <style>\n");
        html.push_str("        body { font-family: monospace; line-height: 1.5; margin: 20px; }\n");
        for kind in [ChunkType::Added, ChunkType::Removed, ChunkType::Modified] {
            let color = chunk_color(kind);
            let extra = if kind == ChunkType::Removed {
                " text-decoration: line-through;"
            } else {
                ""
            };
            html.push_str(&format!(
                "        .{} {{ background-color: {color}20; color: {color};{extra} }}\n",
                kind.name()
            ));
        }
        html.push_str(&format!(
            "        .unchanged {{ color: {}; }}\n",
            chunk_color(ChunkType::Unchanged)
        ));
        html.push_str(
            "        .stats { margin: 20px 0; padding: 10px; background: #f5f5f5; \
             border-radius: 5px; }\n",
        );
        html.push_str("    </style>\n</head>\n<body>\n    <h1>Text Comparison Result</h1>\n");

        if self.config.include_metadata {
            html.push_str(&format!(
                "    <p class=\"meta\">Generated at: {} &middot; mode: {}</p>\n",
                chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
                result.options.mode
            ));
        }

        if self.config.include_stats {
            html.push_str("    <div class=\"stats\">\n        <h3>Statistics</h3>\n");
            html.push_str(&format!(
                "        <p>Similarity: {}%</p>\n",
                stats.similarity_percentage
            ));
            html.push_str(&format!(
                "        <p>Added: {} words, {} chars</p>\n",
                stats.added_words, stats.added_chars
            ));
            html.push_str(&format!(
                "        <p>Removed: {} words, {} chars</p>\n",
                stats.removed_words, stats.removed_chars
            ));
            html.push_str(&format!(
                "        <p>Modified: {} words, {} chars</p>\n",
                stats.modified_words, stats.modified_chars
            ));
            html.push_str("    </div>\n");
        }

        if let Some(error) = &result.error {
            html.push_str(&format!("    <p class=\"error\">{}</p>\n", escape_html(error)));
        }

        html.push_str("    <div class=\"diff\">\n        ");
        for chunk in &result.chunks {
            html.push_str(&format!(
                "<span class=\"{}\">{}</span>",
                chunk.kind.name(),
                escape_html(&chunk.content)
            ));
        }
        html.push_str("\n    </div>\n</body>\n</html>\n");

        html
    }
}

/// Render a standalone HTML report with statistics and metadata
pub fn render_html(result: &TextComparisonResult) -> String {
    ResultExporter::html().render_html(result)
}

/// Concatenate every chunk's content, as copied to the clipboard
pub fn plain_text(result: &TextComparisonResult) -> String {
    result.chunks.iter().map(|chunk| chunk.content.as_str()).collect()
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{compare, ComparisonOptions};
    use tempfile::TempDir;

    fn sample() -> TextComparisonResult {
        compare("the <cat> sat", "the dog sat", &ComparisonOptions::default())
    }

    #[test]
    fn test_render_html() {
        let html = render_html(&sample());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<span class=\"removed\">&lt;cat&gt;</span>"));
        assert!(html.contains("<span class=\"added\">dog</span>"));
        assert!(html.contains("Similarity: "));
        assert!(html.contains("text-decoration: line-through"));
        assert!(html.contains("Generated at:"));
    }

    #[test]
    fn test_html_without_stats_or_metadata() {
        let exporter = ResultExporter::new(ExportConfig {
            format: ExportFormat::Html,
            include_stats: false,
            include_metadata: false,
        });
        let html = exporter.render(&sample()).unwrap();

        assert!(!html.contains("Statistics"));
        assert!(!html.contains("Generated at:"));
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(plain_text(&sample()), "the<cat>dogsat");
    }

    #[test]
    fn test_export_json_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("result.json");

        ResultExporter::json().export(&sample(), &output_path).unwrap();

        let content = fs::read_to_string(output_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["chunks"][1]["type"], "removed");
        assert_eq!(value["options"]["mode"], "word");
    }

    #[test]
    fn test_export_text_to_writer() {
        let mut buffer = Vec::new();
        ResultExporter::with_format(ExportFormat::Text)
            .export_to_writer(&sample(), &mut buffer)
            .unwrap();

        let content = String::from_utf8(buffer).unwrap();
        assert!(content.starts_with("Changes: "));
        assert!(content.ends_with("the<cat>dogsat"));
    }
}
