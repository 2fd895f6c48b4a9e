//! Error types for squaremap.

use thiserror::Error;

/// Errors reported while parsing a tree or computing a layout.
///
/// A layout either succeeds completely or returns one of these; there is
/// no partial result.
#[derive(Debug, Error)]
pub enum TreemapError {
    /// The input document did not contain a root node.
    #[error("Missing root node")]
    MissingRoot,

    /// Canvas dimensions are not finite and strictly positive.
    #[error("Invalid canvas size: {width}x{height} (both sides must be > 0)")]
    InvalidSize {
        /// Requested width
        width: f64,
        /// Requested height
        height: f64,
    },

    /// A leaf carries a weight below zero.
    #[error("Negative weight {weight} at '{path}'")]
    NegativeWeight {
        /// Slash-separated names from the root to the node
        path: String,
        /// The offending weight
        weight: f64,
    },

    /// A leaf carries NaN or an infinite weight.
    #[error("Non-finite weight at '{path}'")]
    NonFiniteWeight {
        /// Slash-separated names from the root to the node
        path: String,
    },

    /// A `value` field could not be read as a number.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Error message
        message: String,
    },

    /// Layout configuration is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON syntax or shape error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used across the squaremap crates.
pub type Result<T> = std::result::Result<T, TreemapError>;
