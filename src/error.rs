//! Error types for the comparison engine
//!
//! Component functions report failures through [`EngineError`]. The
//! orchestrator in [`crate::diff::compare`] is the only place that turns an
//! error into a failed [`crate::diff::TextComparisonResult`]; nothing here is
//! ever surfaced to a caller as a panic.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which of the two inputs an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Original,
    Modified,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Original => write!(f, "original"),
            Side::Modified => write!(f, "modified"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// One of the inputs is longer than the configured ceiling
    #[error("Text length exceeds maximum limit of {} characters", group_thousands(.limit))]
    InputTooLarge {
        side: Side,
        length: usize,
        limit: usize,
    },
    /// Anything that should be unreachable for well-formed input
    #[error("internal error: {0}")]
    Internal(String),
}

impl EngineError {
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Formats a count with comma thousands separators (`500000` -> `500,000`)
pub fn group_thousands(value: &usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
