pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod export;

pub use config::EngineConfig;
pub use diff::*;
pub use error::{EngineError, Side};
pub use export::{ExportConfig, ExportFormat, ResultExporter};
