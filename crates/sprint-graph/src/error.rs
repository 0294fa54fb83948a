//! Error types for sprint-graph operations.
//!
//! The resolution engine itself never fails; these errors come from the
//! surrounding application (configuration, file access, searches).

use std::io;
use thiserror::Error;

/// The error type for sprint-graph operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A tracker search failed before its issues reached the engine.
    #[error("Search failed: {0}")]
    Search(#[from] sprint_search::Error),
}

/// A specialized Result type for sprint-graph operations.
pub type Result<T> = std::result::Result<T, Error>;
