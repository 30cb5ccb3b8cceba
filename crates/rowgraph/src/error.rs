//! Error types for rowgraph operations.
//!
//! ## Error Philosophy
//!
//! Building and analyzing a graph never fails:
//! - A row that does not fit the mapping is skipped and recorded in a
//!   [`BuildReport`](crate::report::BuildReport)
//! - An unknown id handed to an analysis is skipped and listed in the
//!   result's diagnostics
//! - Missing parameters produce an empty, zero-metric result
//!
//! [`Error`] therefore only covers the boundary: reading and writing files,
//! decoding mapping/settings documents, and rejecting CLI arguments.

use std::io;
use thiserror::Error;

/// Result type for rowgraph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for rowgraph operations.
#[derive(Debug, Error)]
pub enum Error {
    /// File system operation failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON decoding or encoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings could not be loaded or are invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// Mapping configuration could not be loaded
    #[error("mapping error: {0}")]
    Mapping(String),

    /// Invalid command-line argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
