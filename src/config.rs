//! Engine configuration
//!
//! Per-call settings live in [`crate::diff::ComparisonOptions`]. This module
//! holds the settings that belong to whoever embeds the engine: the input
//! ceiling that bounds the O(m·n) table, and the optional extensions.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::diff::ChunkPairing;

/// Longest accepted input, in characters
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 500_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Inputs longer than this are rejected before any work is done
    pub max_text_length: usize,
    /// Whether adjacent removed/added runs are reported as `Modified`
    pub chunk_pairing: ChunkPairing,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
            chunk_pairing: ChunkPairing::Preserve,
        }
    }
}

impl EngineConfig {
    pub fn with_max_text_length(mut self, max_text_length: usize) -> Self {
        self.max_text_length = max_text_length;
        self
    }

    pub fn with_chunk_pairing(mut self, chunk_pairing: ChunkPairing) -> Self {
        self.chunk_pairing = chunk_pairing;
        self
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("TEXTCOMPARE_MAX_TEXT_LENGTH") {
            if let Ok(max) = val.parse::<usize>() {
                config.max_text_length = max;
            }
        }

        if let Ok(val) = std::env::var("TEXTCOMPARE_PAIR_REPLACEMENTS") {
            if matches!(val.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes") {
                config.chunk_pairing = ChunkPairing::PairReplacements;
            }
        }

        config
    }

    /// Load a TOML file; keys that are missing keep their defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        config.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }

        Ok(())
    }
}
