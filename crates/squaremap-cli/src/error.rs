//! Error types for the squaremap CLI.

use squaremap_core::TreemapError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading an input or config file failed.
    #[error("IO error on {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    /// The config file is not valid YAML for this tool.
    #[error("Config error: {0}")]
    Config(#[from] serde_yaml_ng::Error),

    /// Parsing or layout failed.
    #[error(transparent)]
    Treemap(#[from] TreemapError),
}
