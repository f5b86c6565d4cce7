use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use crate::config::EngineConfig;
use crate::diff::{ChunkPairing, ComparisonMode, ComparisonOptions, ViewMode};

#[derive(Parser)]
#[command(name = "textcompare")]
#[command(version)]
#[command(about = "Compare two texts by character, word or line and report the differences")]
#[command(long_about = "textcompare aligns two texts with a longest-common-subsequence diff \
    at character, word or line granularity, then prints the changed chunks and similarity \
    statistics as text, JSON or an HTML report.")]
pub struct Cli {
    /// Original text file ("-" reads stdin)
    #[arg(value_name = "ORIGINAL")]
    pub original: PathBuf,

    /// Modified text file ("-" reads stdin)
    #[arg(value_name = "MODIFIED")]
    pub modified: PathBuf,

    /// Comparison granularity
    #[arg(short, long, default_value = "word", help = "Tokenization granularity")]
    pub mode: ComparisonMode,

    /// Layout for text output
    #[arg(long, default_value = "side-by-side", help = "View mode for text output")]
    pub view: ViewMode,

    /// Fold case before comparing
    #[arg(short = 'i', long, help = "Ignore case differences")]
    pub ignore_case: bool,

    /// Collapse whitespace runs before comparing
    #[arg(short = 'w', long, help = "Ignore whitespace differences")]
    pub ignore_whitespace: bool,

    /// Hide line numbers in inline view
    #[arg(long, help = "Disable line numbers")]
    pub no_line_numbers: bool,

    /// Unchanged lines kept around each change in inline view
    #[arg(long, default_value = "3", help = "Number of context lines")]
    pub context: usize,

    /// Output format
    #[arg(short, long, default_value = "text", help = "Output format")]
    pub output: OutputFormat,

    /// Maximum characters per input
    #[arg(long, help = "Override the maximum input length")]
    pub max_length: Option<usize>,

    /// Report adjacent removed/added runs as modified chunks
    #[arg(long, help = "Pair replacements into modified chunks")]
    pub pair_replacements: bool,

    /// TOML engine configuration
    #[arg(long, value_name = "FILE", help = "Engine configuration file")]
    pub config: Option<PathBuf>,

    /// Terminal width for side-by-side view
    #[arg(long, default_value = "120", help = "Output width")]
    pub width: usize,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Rendered diff followed by a summary (default)
    Text,
    /// Full result as JSON for scripting
    Json,
    /// Standalone HTML report
    Html,
    /// Summary line only
    Stats,
}

impl Cli {
    pub fn comparison_options(&self) -> ComparisonOptions {
        ComparisonOptions {
            mode: self.mode,
            view_mode: self.view,
            case_sensitive: !self.ignore_case,
            ignore_whitespace: self.ignore_whitespace,
            show_line_numbers: !self.no_line_numbers,
            context_lines: self.context,
        }
    }

    /// Defaults, then config file or environment, then command-line flags
    pub fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load_from_file(path)?,
            None => EngineConfig::from_env(),
        };

        if let Some(max) = self.max_length {
            config.max_text_length = max;
        }
        if self.pair_replacements {
            config.chunk_pairing = ChunkPairing::PairReplacements;
        }

        config.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }

    /// Read both inputs; at most one of them may come from stdin
    pub fn read_inputs(&self) -> Result<(String, String)> {
        Ok((read_input(&self.original)?, read_input(&self.modified)?))
    }

    pub fn setup_logging(&self) {
        let level = if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_writer(std::io::stderr)
            .init();
    }

    pub fn validate(&self) -> Result<(), String> {
        if is_stdin(&self.original) && is_stdin(&self.modified) {
            return Err("Only one input can be read from stdin".to_string());
        }

        for path in [&self.original, &self.modified] {
            if !is_stdin(path) && !path.is_file() {
                return Err(format!("File does not exist: {}", path.display()));
            }
        }

        if self.width < 20 {
            return Err("Width must be at least 20".to_string());
        }

        if self.max_length == Some(0) {
            return Err("Max length must be greater than 0".to_string());
        }

        Ok(())
    }
}

fn is_stdin(path: &std::path::Path) -> bool {
    path.as_os_str() == "-"
}

fn read_input(path: &std::path::Path) -> Result<String> {
    if is_stdin(path) {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        return Ok(buffer);
    }

    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(err) if err.kind() == std::io::ErrorKind::InvalidData => {
            bail!("{} is not valid UTF-8 text", path.display())
        }
        Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
    }
}
